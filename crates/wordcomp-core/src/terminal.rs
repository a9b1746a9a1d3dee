//! The terminal device collaborator.
//!
//! Everything the prompt needs from the outside world goes through the
//! [`Terminal`] trait: blocking reads of raw input, the terminal size, the
//! cursor position, and an output [`Write`] sink.  [`CrosstermTerminal`] is the
//! real implementation; [`FakeTerminal`](crate::testing::FakeTerminal) is the
//! in-memory one used by tests.

use crate::input::InputUnit;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode},
};
use std::io::{self, stderr, stdout, Stderr, Stdout, Write};
use std::time::Duration;

/// Device operations the prompt loop depends on.
///
/// Rows and columns are 0-based.  Output goes through the [`Write`]
/// supertrait, so crossterm's `queue!` works directly on any implementor.
pub trait Terminal: Write {
    /// Block until one unit of input is available.
    fn read_unit(&mut self) -> io::Result<InputUnit>;

    /// Wait up to `timeout` for the next unit of a multi-unit key sequence.
    ///
    /// Returns `Ok(None)` when nothing arrived in time.
    fn read_follow_up(&mut self, timeout: Duration) -> io::Result<Option<InputUnit>>;

    /// Terminal size as `(height, width)`.
    fn size(&mut self) -> io::Result<(u16, u16)>;

    /// Cursor position as `(row, col)`.
    fn cursor_position(&mut self) -> io::Result<(u16, u16)>;
}

impl<T: Terminal + ?Sized> Terminal for &mut T {
    fn read_unit(&mut self) -> io::Result<InputUnit> {
        (**self).read_unit()
    }

    fn read_follow_up(&mut self, timeout: Duration) -> io::Result<Option<InputUnit>> {
        (**self).read_follow_up(timeout)
    }

    fn size(&mut self) -> io::Result<(u16, u16)> {
        (**self).size()
    }

    fn cursor_position(&mut self) -> io::Result<(u16, u16)> {
        (**self).cursor_position()
    }
}

/// Output target for the prompt.
///
/// By default the prompt draws on **stdout**.  When stdout is piped (e.g. the
/// completed line is the program's output), switch to
/// [`Stderr`](OutputTarget::Stderr) so the prompt still reaches the terminal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to stdout (default).
    #[default]
    Stdout,
    /// Write to stderr (useful when stdout is piped).
    Stderr,
}

/// Writer that wraps either stdout or stderr.
enum Output {
    Stdout(Stdout),
    Stderr(Stderr),
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(w) => w.write(buf),
            Output::Stderr(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(w) => w.flush(),
            Output::Stderr(w) => w.flush(),
        }
    }
}

impl Output {
    fn new(target: OutputTarget) -> Self {
        match target {
            OutputTarget::Stdout => Output::Stdout(stdout()),
            OutputTarget::Stderr => Output::Stderr(stderr()),
        }
    }
}

/// Configuration for [`CrosstermTerminal`].
///
/// # Example
///
/// ```rust,ignore
/// use wordcomp_core::terminal::{CrosstermTerminal, OutputTarget, TerminalOptions};
///
/// let term = CrosstermTerminal::with_options(TerminalOptions {
///     output: OutputTarget::Stderr,
///     ..TerminalOptions::default()
/// })?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TerminalOptions {
    /// Where rendered output goes (default: stdout).
    pub output: OutputTarget,
    /// Whether to restore cooked mode from a panic hook (default: true).
    pub catch_panics: bool,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            output: OutputTarget::default(),
            catch_panics: true,
        }
    }
}

/// A [`Terminal`] backed by crossterm.
///
/// Raw mode is enabled on construction and restored when the value is
/// dropped.  Ctrl+C does not raise a signal in raw mode, so it is reported as
/// an [`io::ErrorKind::Interrupted`] error from [`read_unit`](Terminal::read_unit).
pub struct CrosstermTerminal {
    output: Output,
}

impl CrosstermTerminal {
    /// Put the terminal into raw mode with default options.
    pub fn new() -> io::Result<Self> {
        Self::with_options(TerminalOptions::default())
    }

    /// Put the terminal into raw mode with custom options.
    pub fn with_options(options: TerminalOptions) -> io::Result<Self> {
        // Install the panic hook only once to avoid stacking.
        if options.catch_panics {
            use std::sync::Once;
            static HOOK_INSTALLED: Once = Once::new();
            let output_target = options.output;
            HOOK_INSTALLED.call_once(|| {
                let original_hook = std::panic::take_hook();
                std::panic::set_hook(Box::new(move |info| {
                    let _ = restore_terminal(output_target);
                    original_hook(info);
                }));
            });
        }

        enable_raw_mode()?;
        tracing::debug!(output = ?options.output, "raw mode enabled");
        Ok(Self {
            output: Output::new(options.output),
        })
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        if let Err(err) = disable_raw_mode() {
            tracing::warn!(%err, "failed to leave raw mode");
        }
    }
}

impl Write for CrosstermTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}

impl Terminal for CrosstermTerminal {
    fn read_unit(&mut self) -> io::Result<InputUnit> {
        convert_event(event::read()?)
    }

    fn read_follow_up(&mut self, timeout: Duration) -> io::Result<Option<InputUnit>> {
        if event::poll(timeout)? {
            convert_event(event::read()?).map(Some)
        } else {
            Ok(None)
        }
    }

    fn size(&mut self) -> io::Result<(u16, u16)> {
        let (width, height) = terminal::size()?;
        Ok((height, width))
    }

    fn cursor_position(&mut self) -> io::Result<(u16, u16)> {
        let (col, row) = cursor::position()?;
        Ok((row, col))
    }
}

fn convert_event(event: Event) -> io::Result<InputUnit> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Release => Ok(InputUnit::Other),
        Event::Key(key)
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted by Ctrl+C"))
        }
        Event::Key(key) => Ok(InputUnit::Key(key)),
        _ => Ok(InputUnit::Other),
    }
}

fn restore_terminal(output_target: OutputTarget) -> io::Result<()> {
    // Best effort: show the cursor even if leaving raw mode failed.
    let result = disable_raw_mode();
    let mut writer = Output::new(output_target);
    execute!(writer, cursor::Show).ok();
    result
}
