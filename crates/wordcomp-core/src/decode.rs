//! Classifies raw input units into [`KeyAction`]s.
//!
//! Two families of arrow-key encodings are understood on byte streams:
//!
//! - ANSI: `ESC [ A` / `ESC [ B` (and the SS3 form `ESC O A` / `ESC O B`),
//!   including parameterised CSI forms such as `ESC [ 1 ; 2 A`.
//! - DOS console: a `0xE0` or `0x00` prefix followed by `H` (up) or `P` (down).
//!
//! Follow-up units are awaited for at most the decoder's timeout.  A sequence
//! that never completes, or completes into a key the prompt has no use for,
//! decodes to [`KeyAction::Unrecognized`] instead of an error.  A follow-up
//! that is not a byte (a parsed key, say) ends the sequence and is kept for
//! the next [`Decoder::next_action`].

use crate::input::{InputUnit, KeyAction};
use crate::terminal::Terminal;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

const ESC: u8 = 0x1b;
const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7f;
const CONSOLE_PREFIX: u8 = 0xe0;
const CONSOLE_PREFIX_ALT: u8 = 0x00;

/// Upper bound on CSI parameter bytes before a sequence is abandoned.
const MAX_CSI_LEN: usize = 16;

/// Input event decoder.
#[derive(Debug, Clone)]
pub struct Decoder {
    timeout: Duration,
    pending: Option<InputUnit>,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(Duration::from_millis(50))
    }
}

impl Decoder {
    /// Create a decoder that waits up to `timeout` for each follow-up unit.
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            pending: None,
        }
    }

    /// Read the next unit (a held-back one first) and decode it.
    pub fn next_action<T: Terminal + ?Sized>(
        &mut self,
        terminal: &mut T,
    ) -> io::Result<KeyAction> {
        let unit = match self.pending.take() {
            Some(unit) => unit,
            None => terminal.read_unit()?,
        };
        self.decode(unit, terminal)
    }

    /// Decode `unit`, reading any follow-up units of an escape sequence from
    /// `terminal`.
    ///
    /// Only device failures are returned as errors.
    pub fn decode<T: Terminal + ?Sized>(
        &mut self,
        unit: InputUnit,
        terminal: &mut T,
    ) -> io::Result<KeyAction> {
        let action = match unit {
            InputUnit::Key(key) => decode_key(&key),
            InputUnit::Byte(byte) => self.decode_byte(byte, terminal)?,
            InputUnit::Other => KeyAction::Unrecognized,
        };
        tracing::trace!(?action, "decoded input");
        Ok(action)
    }

    fn decode_byte<T: Terminal + ?Sized>(
        &mut self,
        byte: u8,
        terminal: &mut T,
    ) -> io::Result<KeyAction> {
        let action = match byte {
            b'\r' | b'\n' => KeyAction::Enter,
            b'\t' => KeyAction::Tab,
            b' ' => KeyAction::Space,
            BACKSPACE | DELETE => KeyAction::Backspace,
            ESC => self.decode_escape(terminal)?,
            CONSOLE_PREFIX => self.decode_console_prefix(byte, terminal)?,
            CONSOLE_PREFIX_ALT => match self.next_byte(terminal)? {
                Some(code) => console_arrow(code),
                None => KeyAction::Unrecognized,
            },
            b if b.is_ascii_control() => KeyAction::Unrecognized,
            b if b.is_ascii() => KeyAction::Character(char::from(b)),
            lead => self.decode_utf8(vec![lead], terminal)?,
        };
        Ok(action)
    }

    fn decode_escape<T: Terminal + ?Sized>(&mut self, terminal: &mut T) -> io::Result<KeyAction> {
        match self.next_byte(terminal)? {
            Some(b'[') => {
                for _ in 0..MAX_CSI_LEN {
                    match self.next_byte(terminal)? {
                        Some(b) if (0x40..=0x7e).contains(&b) => return Ok(ansi_arrow(b)),
                        Some(_) => continue,
                        None => break,
                    }
                }
                tracing::debug!("dropped incomplete CSI sequence");
                Ok(KeyAction::Unrecognized)
            }
            Some(b'O') => Ok(match self.next_byte(terminal)? {
                Some(b) => ansi_arrow(b),
                None => KeyAction::Unrecognized,
            }),
            Some(other) => {
                tracing::debug!(byte = other, "dropped escape-prefixed byte");
                Ok(KeyAction::Unrecognized)
            }
            None => Ok(KeyAction::Unrecognized),
        }
    }

    /// `0xE0` is both the DOS console arrow prefix and a UTF-8 lead byte, so
    /// the follow-up decides which one it is.
    fn decode_console_prefix<T: Terminal + ?Sized>(
        &mut self,
        lead: u8,
        terminal: &mut T,
    ) -> io::Result<KeyAction> {
        match self.next_byte(terminal)? {
            Some(b) if is_continuation(b) => self.decode_utf8(vec![lead, b], terminal),
            Some(code) => Ok(console_arrow(code)),
            None => Ok(KeyAction::Unrecognized),
        }
    }

    fn decode_utf8<T: Terminal + ?Sized>(
        &mut self,
        mut bytes: Vec<u8>,
        terminal: &mut T,
    ) -> io::Result<KeyAction> {
        let expected = match bytes.first() {
            Some(0xc2..=0xdf) => 2,
            Some(0xe0..=0xef) => 3,
            Some(0xf0..=0xf4) => 4,
            _ => return Ok(KeyAction::Unrecognized),
        };
        while bytes.len() < expected {
            match self.next_byte(terminal)? {
                Some(b) if is_continuation(b) => bytes.push(b),
                _ => {
                    tracing::debug!(?bytes, "dropped truncated UTF-8 sequence");
                    return Ok(KeyAction::Unrecognized);
                }
            }
        }
        Ok(match std::str::from_utf8(&bytes).ok().and_then(|s| s.chars().next()) {
            Some(c) if !c.is_control() => KeyAction::Character(c),
            _ => KeyAction::Unrecognized,
        })
    }

    fn next_byte<T: Terminal + ?Sized>(&mut self, terminal: &mut T) -> io::Result<Option<u8>> {
        match terminal.read_follow_up(self.timeout)? {
            Some(InputUnit::Byte(b)) => Ok(Some(b)),
            Some(unit) => {
                self.pending = Some(unit);
                Ok(None)
            }
            None => Ok(None),
        }
    }
}

/// Map a crossterm key event.
pub fn decode_key(key: &KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::Unrecognized;
    }
    match key.code {
        KeyCode::Enter => KeyAction::Enter,
        KeyCode::Tab => KeyAction::Tab,
        KeyCode::BackTab | KeyCode::Up => KeyAction::ArrowUp,
        KeyCode::Down => KeyAction::ArrowDown,
        KeyCode::Backspace => KeyAction::Backspace,
        KeyCode::Char(_) if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            KeyAction::Unrecognized
        }
        KeyCode::Char(' ') => KeyAction::Space,
        KeyCode::Char(c) if !c.is_control() => KeyAction::Character(c),
        _ => KeyAction::Unrecognized,
    }
}

fn ansi_arrow(final_byte: u8) -> KeyAction {
    match final_byte {
        b'A' => KeyAction::ArrowUp,
        b'B' => KeyAction::ArrowDown,
        _ => KeyAction::Unrecognized,
    }
}

fn console_arrow(code: u8) -> KeyAction {
    match code {
        b'H' => KeyAction::ArrowUp,
        b'P' => KeyAction::ArrowDown,
        _ => KeyAction::Unrecognized,
    }
}

fn is_continuation(byte: u8) -> bool {
    (0x80..=0xbf).contains(&byte)
}
