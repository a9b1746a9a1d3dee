//! Wrapped, scroll-aware redraw of the prompt line.
//!
//! The [`Renderer`] owns the [`CursorAnchor`] for one prompt invocation.  Each
//! call to [`Renderer::render`] clears everything from the anchor down, writes
//! the display text wrapped at the terminal width, and leaves the cursor after
//! the last character.  When wrapped output runs past the bottom of the
//! terminal, the screen is scrolled one line at a time and the anchor's
//! `start_row` follows the text upward, so later redraws land on the same
//! rows the text actually occupies.  Once the first line has gone off the top,
//! the next frame starts again at row 0.
//!
//! Every `char` counts as one display column.

use crate::terminal::Terminal;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};
use std::ops::Range;

/// Where the prompt's first line begins, and the terminal size it was
/// measured against.
///
/// `start_row` is signed: once output taller than the terminal has scrolled
/// the first line off the top, it goes negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorAnchor {
    /// Row of the first wrapped line (0-based).
    pub start_row: i32,
    /// Column the cursor was in when the prompt started.
    pub start_col: u16,
    /// Terminal height in rows.
    pub height: u16,
    /// Terminal width in columns.
    pub width: u16,
}

impl CursorAnchor {
    /// Build an anchor from explicit coordinates.
    pub fn new(start_row: i32, start_col: u16, height: u16, width: u16) -> Self {
        Self {
            start_row,
            start_col,
            height: height.max(1),
            width: width.max(1),
        }
    }

    /// Query the terminal for its size and current cursor position.
    pub fn query<T: Terminal + ?Sized>(terminal: &mut T) -> io::Result<Self> {
        let (height, width) = terminal.size()?;
        let (row, col) = terminal.cursor_position()?;
        let anchor = Self::new(i32::from(row), col, height, width);
        tracing::debug!(?anchor, "queried cursor anchor");
        Ok(anchor)
    }

    /// Move to the start of a fresh line if the cursor is mid-line, so the
    /// redraw does not overwrite whatever is already on the current row.
    pub fn begin_on_fresh_line<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if self.start_col == 0 {
            return Ok(());
        }
        out.write_all(b"\r\n")?;
        self.start_col = 0;
        self.start_row = (self.start_row + 1).min(self.last_row());
        Ok(())
    }

    fn last_row(&self) -> i32 {
        i32::from(self.height) - 1
    }
}

/// Text to draw for one frame.
///
/// At most one character range can be highlighted; it is drawn in inverse
/// video and may span wrapped lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayText {
    text: String,
    len: usize,
    highlight: Option<Range<usize>>,
}

impl DisplayText {
    /// Create an empty display text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append plain text.
    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
        self.len += s.chars().count();
    }

    /// Append text drawn in inverse video.  Replaces any earlier highlight.
    pub fn push_highlighted(&mut self, s: &str) {
        let start = self.len;
        self.push_str(s);
        self.highlight = Some(start..self.len);
    }

    /// The plain text, without styling.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Highlighted character range, if any.
    pub fn highlight(&self) -> Option<Range<usize>> {
        self.highlight.clone()
    }

    /// Length in characters (display columns).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl From<&str> for DisplayText {
    fn from(s: &str) -> Self {
        let mut display = DisplayText::new();
        display.push_str(s);
        display
    }
}

/// Split `text` into lines of exactly `width` characters; the last line may
/// be shorter.  Empty text yields a single empty line.
///
/// # Example
///
/// ```
/// use wordcomp_core::render::wrap;
///
/// assert_eq!(wrap("abcdefg", 3), vec!["abc", "def", "g"]);
/// assert_eq!(wrap("", 3), vec![""]);
/// ```
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(width).map(|chunk| chunk.iter().collect()).collect()
}

/// Where the cursor was left after a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPlacement {
    /// Row of the last wrapped line.
    pub row: u16,
    /// Column after the last character, modulo the terminal width.
    pub col: u16,
    /// Number of wrapped lines drawn.
    pub lines: usize,
    /// Number of times the terminal was scrolled during this render.
    pub scrolled: usize,
}

/// Draws [`DisplayText`] at a [`CursorAnchor`], scrolling as needed.
#[derive(Debug, Clone)]
pub struct Renderer {
    anchor: CursorAnchor,
}

impl Renderer {
    /// Create a renderer for one prompt invocation.
    pub fn new(anchor: CursorAnchor) -> Self {
        Self { anchor }
    }

    /// The current anchor, reflecting every scroll so far.
    pub fn anchor(&self) -> CursorAnchor {
        self.anchor
    }

    /// Redraw `display` and place the cursor after its last character.
    pub fn render<W: Write>(
        &mut self,
        out: &mut W,
        display: &DisplayText,
    ) -> io::Result<CursorPlacement> {
        let width = usize::from(self.anchor.width);
        let last_row = self.anchor.last_row();
        let lines = wrap(display.text(), width);
        let highlight = display.highlight();

        // Rows above the top are gone; the frame restarts at the first visible
        // row and scrolls again only if it still overflows.
        self.anchor.start_row = self.anchor.start_row.max(0);

        // Erase the previous frame, which may have been longer than this one.
        queue!(
            out,
            MoveTo(0, row_u16(self.anchor.start_row)),
            Clear(ClearType::FromCursorDown)
        )?;

        let mut scrolled = 0;
        let mut offset = 0;
        for (i, line) in lines.iter().enumerate() {
            let mut row = self.anchor.start_row + i32::try_from(i).unwrap_or(i32::MAX);
            if row > last_row {
                queue!(out, MoveTo(0, row_u16(last_row)), Print("\n"))?;
                self.anchor.start_row -= 1;
                row -= 1;
                scrolled += 1;
            }
            let len = line.chars().count();
            if row >= 0 {
                queue!(out, MoveTo(0, row_u16(row)))?;
                write_line(out, line, offset, highlight.as_ref())?;
            }
            offset += len;
        }

        let last_line = lines.last().map_or(0, |line| line.chars().count());
        let row = self.anchor.start_row + i32::try_from(lines.len()).unwrap_or(i32::MAX) - 1;
        let placement = CursorPlacement {
            row: row_u16(row.clamp(0, last_row)),
            col: u16::try_from(last_line % width).unwrap_or(0),
            lines: lines.len(),
            scrolled,
        };
        queue!(out, MoveTo(placement.col, placement.row))?;
        out.flush()?;

        if scrolled > 0 {
            tracing::debug!(scrolled, start_row = self.anchor.start_row, "terminal scrolled");
        }
        Ok(placement)
    }
}

/// Write one wrapped line whose first character sits at `offset` in the full
/// display text.
fn write_line<W: Write>(
    out: &mut W,
    line: &str,
    offset: usize,
    highlight: Option<&Range<usize>>,
) -> io::Result<()> {
    let len = line.chars().count();
    let Some(range) = highlight else {
        return queue!(out, Print(line));
    };
    let start = range.start.clamp(offset, offset + len) - offset;
    let end = range.end.clamp(offset, offset + len) - offset;
    if start == end {
        return queue!(out, Print(line));
    }
    let before: String = line.chars().take(start).collect();
    let marked: String = line.chars().skip(start).take(end - start).collect();
    let after: String = line.chars().skip(end).collect();
    queue!(
        out,
        Print(before),
        SetAttribute(Attribute::Reverse),
        Print(marked),
        SetAttribute(Attribute::NoReverse),
        Print(after)
    )
}

fn row_u16(row: i32) -> u16 {
    u16::try_from(row).unwrap_or(0)
}
