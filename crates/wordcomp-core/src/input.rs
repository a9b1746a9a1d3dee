use crossterm::event::KeyEvent;

/// One unit of raw input delivered by a [`Terminal`](crate::terminal::Terminal).
///
/// Byte-oriented sources (a pipe, a scripted test, a console that hands out
/// `getch`-style bytes) produce [`InputUnit::Byte`]; the crossterm-backed
/// terminal produces already-parsed [`InputUnit::Key`] events.  Either form is
/// turned into a [`KeyAction`] by the [`Decoder`](crate::decode::Decoder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputUnit {
    /// A single raw byte.
    Byte(u8),
    /// A key press parsed by crossterm.
    Key(KeyEvent),
    /// Any other terminal event (resize, focus, mouse, paste, key release).
    Other,
}

impl From<u8> for InputUnit {
    fn from(byte: u8) -> Self {
        InputUnit::Byte(byte)
    }
}

impl From<KeyEvent> for InputUnit {
    fn from(key: KeyEvent) -> Self {
        InputUnit::Key(key)
    }
}

/// Logical editing event understood by the edit buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// A printable, non-space character.
    Character(char),
    /// Commit the word being typed.
    Space,
    /// Delete one character, or reopen the last committed word.
    Backspace,
    /// Accept the next suggestion.
    Tab,
    /// Cycle to the previous suggestion.
    ArrowUp,
    /// Cycle to the next suggestion.
    ArrowDown,
    /// Finish the prompt.
    Enter,
    /// Input the prompt does not react to. Swallowed without a redraw.
    Unrecognized,
}
