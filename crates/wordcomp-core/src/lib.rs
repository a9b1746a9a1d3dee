//! Terminal primitives for the **wordcomp** prompt.
//!
//! `wordcomp-core` holds everything that touches the terminal device or its
//! coordinate system.  The editing logic lives in `wordcomp-widgets`; this
//! crate gives it a way to read keys and draw frames.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Terminal`] | The device collaborator: blocking input, size, cursor position, output |
//! | [`CrosstermTerminal`] | Raw-mode [`Terminal`] backed by crossterm |
//! | [`InputUnit`] | One raw unit of input (byte or parsed key) |
//! | [`KeyAction`] | Logical editing event |
//! | [`Decoder`] | Turns [`InputUnit`]s (and their escape-sequence follow-ups) into [`KeyAction`]s |
//! | [`Renderer`] | Draws wrapped [`DisplayText`] at a [`CursorAnchor`], following terminal scrolls |
//! | [`FakeTerminal`](testing::FakeTerminal) | Headless [`Terminal`] with a screen emulator, for tests |
//!
//! # Coordinates
//!
//! Rows and columns are 0-based throughout, matching crossterm.  Every `char`
//! occupies exactly one column; wide and combining characters are not
//! measured specially.

pub mod decode;
pub mod error;
pub mod input;
pub mod render;
pub mod terminal;
pub mod testing;

pub use decode::Decoder;
pub use error::PromptError;
pub use input::{InputUnit, KeyAction};
pub use render::{wrap, CursorAnchor, CursorPlacement, DisplayText, Renderer};
pub use terminal::{CrosstermTerminal, OutputTarget, Terminal, TerminalOptions};
