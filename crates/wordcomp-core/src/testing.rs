use crate::input::InputUnit;
use crate::terminal::Terminal;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;
use std::io::{self, Write};
use std::time::Duration;

/// An in-memory [`Terminal`] for driving a prompt without a TTY.
///
/// Input is a scripted queue of [`InputUnit`]s.  Everything written to the
/// terminal is captured verbatim and also interpreted by a small [`Screen`]
/// emulator that understands the cursor moves, clears, line feeds and
/// inverse-video attributes the renderer emits, so tests can assert on what a
/// user would actually see.
///
/// # Example
///
/// ```rust
/// use wordcomp_core::terminal::Terminal;
/// use wordcomp_core::testing::FakeTerminal;
/// use std::io::Write;
///
/// let mut term = FakeTerminal::new(24, 80).with_cursor(5, 0);
/// term.push_str("hi\r");
/// assert_eq!(term.cursor_position().unwrap(), (5, 0));
///
/// write!(term, "hello").unwrap();
/// assert_eq!(term.screen().row_text(5), "hello");
/// ```
#[derive(Debug, Clone)]
pub struct FakeTerminal {
    input: VecDeque<InputUnit>,
    start_cursor: (u16, u16),
    output: Vec<u8>,
    screen: Screen,
}

impl FakeTerminal {
    /// Create a terminal of `height` rows by `width` columns with the cursor
    /// at the top-left corner.
    pub fn new(height: u16, width: u16) -> Self {
        Self {
            input: VecDeque::new(),
            start_cursor: (0, 0),
            output: Vec::new(),
            screen: Screen::new(height, width),
        }
    }

    /// Place the cursor at `(row, col)` before anything is drawn.
    pub fn with_cursor(mut self, row: u16, col: u16) -> Self {
        self.start_cursor = (row, col);
        self.screen.cursor = (row, col);
        self
    }

    /// Queue raw bytes as individual input units.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied().map(InputUnit::Byte));
    }

    /// Queue the UTF-8 bytes of `s`.
    pub fn push_str(&mut self, s: &str) {
        self.push_bytes(s.as_bytes());
    }

    /// Queue a crossterm key press with no modifiers.
    pub fn push_key(&mut self, code: KeyCode) {
        self.push_unit(InputUnit::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    /// Queue any input unit.
    pub fn push_unit(&mut self, unit: InputUnit) {
        self.input.push_back(unit);
    }

    /// Number of queued input units not yet read.
    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    /// Every byte written so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// The emulated screen.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }
}

impl Write for FakeTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.extend_from_slice(buf);
        for &byte in buf {
            self.screen.feed(byte);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Terminal for FakeTerminal {
    /// Returns [`io::ErrorKind::UnexpectedEof`] once the script runs out, so a
    /// test that forgets its Enter fails instead of hanging.
    fn read_unit(&mut self) -> io::Result<InputUnit> {
        self.input.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "scripted input exhausted")
        })
    }

    fn read_follow_up(&mut self, _timeout: Duration) -> io::Result<Option<InputUnit>> {
        Ok(self.input.pop_front())
    }

    fn size(&mut self) -> io::Result<(u16, u16)> {
        Ok((self.screen.height, self.screen.width))
    }

    fn cursor_position(&mut self) -> io::Result<(u16, u16)> {
        Ok(self.start_cursor)
    }
}

/// A single character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    reversed: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            reversed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseState {
    Ground,
    Escape,
    Csi(Vec<u8>),
    Utf8(Vec<u8>),
}

/// Minimal terminal screen emulator.
///
/// Handles printable text (with autowrap), `\r`, `\n` (scrolling at the
/// bottom row), `ESC [ row ; col H`, `ESC [ J`, and the SGR codes `7`, `27`
/// and `0`.  Other sequences are parsed and ignored.
#[derive(Debug, Clone)]
pub struct Screen {
    height: u16,
    width: u16,
    rows: Vec<Vec<Cell>>,
    cursor: (u16, u16),
    reversed: bool,
    scrolled: usize,
    state: ParseState,
}

impl Screen {
    fn new(height: u16, width: u16) -> Self {
        let height = height.max(1);
        let width = width.max(1);
        Self {
            height,
            width,
            rows: vec![vec![Cell::default(); usize::from(width)]; usize::from(height)],
            cursor: (0, 0),
            reversed: false,
            scrolled: 0,
            state: ParseState::Ground,
        }
    }

    /// Text of `row` with trailing blanks removed.
    pub fn row_text(&self, row: u16) -> String {
        self.rows
            .get(usize::from(row))
            .map(|cells| cells.iter().map(|c| c.ch).collect::<String>())
            .unwrap_or_default()
            .trim_end()
            .to_string()
    }

    /// All rows, top to bottom, with trailing blanks removed.
    pub fn lines(&self) -> Vec<String> {
        (0..self.height).map(|row| self.row_text(row)).collect()
    }

    /// Current cursor position as `(row, col)`.
    pub fn cursor(&self) -> (u16, u16) {
        self.cursor
    }

    /// How many lines have scrolled off the top.
    pub fn scrolled(&self) -> usize {
        self.scrolled
    }

    /// Characters drawn in inverse video, in reading order.
    pub fn reversed_text(&self) -> String {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| cell.reversed)
            .map(|cell| cell.ch)
            .collect()
    }

    fn feed(&mut self, byte: u8) {
        let state = std::mem::replace(&mut self.state, ParseState::Ground);
        self.state = match state {
            ParseState::Ground => match byte {
                0x1b => ParseState::Escape,
                b'\n' => {
                    self.line_feed();
                    ParseState::Ground
                }
                b'\r' => {
                    self.cursor.1 = 0;
                    ParseState::Ground
                }
                b if b < 0x20 || b == 0x7f => ParseState::Ground,
                b if b < 0x80 => {
                    self.put(char::from(b));
                    ParseState::Ground
                }
                lead => ParseState::Utf8(vec![lead]),
            },
            ParseState::Escape if byte == b'[' => ParseState::Csi(Vec::new()),
            ParseState::Escape => ParseState::Ground,
            ParseState::Csi(mut params) => {
                if (0x40..=0x7e).contains(&byte) {
                    self.apply_csi(&params, byte);
                    ParseState::Ground
                } else {
                    params.push(byte);
                    ParseState::Csi(params)
                }
            }
            ParseState::Utf8(mut bytes) => {
                bytes.push(byte);
                match std::str::from_utf8(&bytes) {
                    Ok(s) => {
                        if let Some(c) = s.chars().next() {
                            self.put(c);
                        }
                        ParseState::Ground
                    }
                    Err(err) if err.error_len().is_none() && bytes.len() < 4 => {
                        ParseState::Utf8(bytes)
                    }
                    Err(_) => ParseState::Ground,
                }
            }
        };
    }

    fn apply_csi(&mut self, params: &[u8], final_byte: u8) {
        let params = String::from_utf8_lossy(params);
        let numbers: Vec<u16> = params
            .split(';')
            .map(|p| p.parse().unwrap_or(0))
            .collect();
        match final_byte {
            b'H' => {
                let row = numbers.first().copied().unwrap_or(1).max(1) - 1;
                let col = numbers.get(1).copied().unwrap_or(1).max(1) - 1;
                self.cursor = (row.min(self.height - 1), col.min(self.width - 1));
            }
            b'J' => self.clear_down(),
            b'm' => {
                for code in numbers {
                    match code {
                        7 => self.reversed = true,
                        0 | 27 => self.reversed = false,
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    fn put(&mut self, ch: char) {
        if self.cursor.1 >= self.width {
            self.cursor.1 = 0;
            self.line_feed();
        }
        let (row, col) = self.cursor;
        self.rows[usize::from(row)][usize::from(col)] = Cell {
            ch,
            reversed: self.reversed,
        };
        self.cursor.1 += 1;
    }

    fn line_feed(&mut self) {
        if self.cursor.0 + 1 >= self.height {
            self.rows.remove(0);
            self.rows.push(vec![Cell::default(); usize::from(self.width)]);
            self.scrolled += 1;
        } else {
            self.cursor.0 += 1;
        }
    }

    fn clear_down(&mut self) {
        let (row, col) = self.cursor;
        let col = usize::from(col.min(self.width));
        for cell in &mut self.rows[usize::from(row)][col..] {
            *cell = Cell::default();
        }
        for cells in &mut self.rows[usize::from(row) + 1..] {
            cells.fill(Cell::default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::{cursor::MoveTo, queue, style::Print};

    #[test]
    fn scripted_input_is_read_in_order() {
        let mut term = FakeTerminal::new(5, 5);
        term.push_str("ab");
        term.push_key(KeyCode::Enter);
        assert_eq!(term.read_unit().unwrap(), InputUnit::Byte(b'a'));
        assert_eq!(
            term.read_follow_up(Duration::ZERO).unwrap(),
            Some(InputUnit::Byte(b'b'))
        );
        assert!(matches!(term.read_unit().unwrap(), InputUnit::Key(_)));
        assert_eq!(term.read_follow_up(Duration::ZERO).unwrap(), None);
        assert_eq!(
            term.read_unit().unwrap_err().kind(),
            io::ErrorKind::UnexpectedEof
        );
    }

    #[test]
    fn output_is_captured_verbatim() {
        let mut term = FakeTerminal::new(2, 10);
        term.push_str("xy");
        queue!(term, MoveTo(1, 0), Print("ok")).unwrap();
        assert_eq!(term.output(), b"\x1b[1;2Hok");
        assert_eq!(term.pending_input(), 2);
        term.read_unit().unwrap();
        assert_eq!(term.pending_input(), 1);
    }

    #[test]
    fn screen_interprets_crossterm_output() {
        let mut term = FakeTerminal::new(3, 6);
        queue!(term, MoveTo(2, 1), Print("héllo")).unwrap();
        assert_eq!(term.screen().row_text(1), "  héll");
        assert_eq!(term.screen().row_text(2), "o");
        assert_eq!(term.screen().cursor(), (2, 1));
    }

    #[test]
    fn line_feed_at_bottom_scrolls() {
        let mut term = FakeTerminal::new(2, 4);
        term.write_all(b"ab\r\ncd\r\nef").unwrap();
        assert_eq!(term.screen().lines(), vec!["cd", "ef"]);
        assert_eq!(term.screen().scrolled(), 1);
    }

    #[test]
    fn clear_down_erases_rest_of_screen() {
        let mut term = FakeTerminal::new(3, 4);
        term.write_all(b"abcdefghij").unwrap();
        term.write_all(b"\x1b[1;3H\x1b[J").unwrap();
        assert_eq!(term.screen().lines(), vec!["ab", "", ""]);
    }

    #[test]
    fn escape_sequences_split_across_writes() {
        let mut term = FakeTerminal::new(3, 4);
        for piece in ["\x1b[", "2", ";", "2", "H", "x"] {
            term.write_all(piece.as_bytes()).unwrap();
        }
        assert_eq!(term.screen().row_text(1), " x");
    }
}
