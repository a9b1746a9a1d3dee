//! Word-completing prompt: an input line with inline, cycle-able suggestions.
//!
//! As the user types, the best-matching known words are shown after the
//! input as `[apple | application | apply]`.  Tab or Down accepts the next
//! suggestion, Up the previous one, Space commits the word and Backspace
//! edits it (reopening the previous word when the current one is empty).
//! Enter returns the whole line.
//!
//! # Example
//!
//! ```rust,ignore
//! use wordcomp_widgets::completer::WordCompleter;
//!
//! let completer = WordCompleter::new(["apple", "application", "apply", "banana"]);
//! let line = completer.prompt_interactive("fruit> ")?;
//! println!("you typed {line:?}");
//! ```

use crate::edit_buffer::{EditBuffer, Outcome};
use crate::prefix_index::PrefixIndex;
use crate::suggest::Mode;
use std::io::Write;
use std::time::Duration;
use wordcomp_core::{
    CrosstermTerminal, CursorAnchor, Decoder, DisplayText, PromptError, Renderer, Terminal,
};

/// Configuration for [`WordCompleter`].
///
/// # Example
///
/// ```
/// use wordcomp_widgets::completer::PromptOptions;
///
/// let opts = PromptOptions {
///     highlight_selection: false,
///     ..PromptOptions::default()
/// };
/// assert!(opts.show_suggestions);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PromptOptions {
    /// Draw the accepted suggestion in inverse video (default: true).
    pub highlight_selection: bool,
    /// Show the suggestion list after the input (default: true).
    pub show_suggestions: bool,
    /// Redraw without suggestions before returning on Enter (default: true).
    pub clear_suggestions_on_enter: bool,
    /// How long to wait for the rest of an escape sequence (default: 50 ms).
    pub escape_timeout: Duration,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            highlight_selection: true,
            show_suggestions: true,
            clear_suggestions_on_enter: true,
            escape_timeout: Duration::from_millis(50),
        }
    }
}

/// A reusable word-completing prompt.
///
/// The vocabulary is kept in a [`PrefixIndex`] that lives as long as the
/// completer; every call to [`prompt`](WordCompleter::prompt) starts with an
/// empty line.
#[derive(Debug, Clone, Default)]
pub struct WordCompleter {
    index: PrefixIndex,
    options: PromptOptions,
}

impl WordCompleter {
    /// Create a completer that suggests words from `vocabulary`.
    pub fn new<I, S>(vocabulary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            index: vocabulary.into_iter().collect(),
            options: PromptOptions::default(),
        }
    }

    /// Set the options.
    pub fn with_options(mut self, options: PromptOptions) -> Self {
        self.options = options;
        self
    }

    /// Add one word to the vocabulary.
    pub fn add_word(&mut self, word: &str) -> bool {
        self.index.insert(word)
    }

    /// Add several words to the vocabulary.
    pub fn add_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.index.insert_all(words);
    }

    /// The vocabulary.
    pub fn index(&self) -> &PrefixIndex {
        &self.index
    }

    /// The options.
    pub fn options(&self) -> &PromptOptions {
        &self.options
    }

    /// Run the prompt on the real terminal, in raw mode for its duration.
    pub fn prompt_interactive(&self, prompt_text: &str) -> Result<String, PromptError> {
        let mut terminal = CrosstermTerminal::new()?;
        self.prompt(&mut terminal, prompt_text)
    }

    /// Run the prompt on `terminal` until Enter, and return the line.
    ///
    /// Each key is fully applied and redrawn before the next is read.  Keys
    /// the prompt does not understand are dropped; only terminal I/O
    /// failures end the prompt early.
    pub fn prompt<T: Terminal>(
        &self,
        terminal: &mut T,
        prompt_text: &str,
    ) -> Result<String, PromptError> {
        let mut decoder = Decoder::new(self.options.escape_timeout);
        let mut anchor = CursorAnchor::query(terminal)?;
        anchor.begin_on_fresh_line(terminal)?;
        let mut renderer = Renderer::new(anchor);
        let mut buffer = EditBuffer::new(&self.index);

        tracing::debug!(words = self.index.len(), "prompt started");
        renderer.render(terminal, &self.compose(prompt_text, &buffer, true))?;

        loop {
            let action = decoder.next_action(terminal)?;
            match buffer.apply(action) {
                Outcome::Ignored => {}
                Outcome::Updated => {
                    renderer.render(terminal, &self.compose(prompt_text, &buffer, true))?;
                }
                Outcome::Submitted(line) => {
                    if self.options.clear_suggestions_on_enter {
                        renderer.render(terminal, &self.compose(prompt_text, &buffer, false))?;
                    }
                    terminal.write_all(b"\r\n")?;
                    terminal.flush()?;
                    tracing::debug!(chars = line.chars().count(), "prompt submitted");
                    return Ok(line);
                }
            }
        }
    }

    /// Build the frame: prompt, committed words, current word, then the
    /// bracketed suggestion list.
    fn compose(
        &self,
        prompt_text: &str,
        buffer: &EditBuffer<'_>,
        with_suggestions: bool,
    ) -> DisplayText {
        let mut display = DisplayText::from(prompt_text);
        for word in buffer.committed() {
            display.push_str(word);
            display.push_str(" ");
        }
        display.push_str(buffer.current());

        let suggestions = buffer.suggestions();
        if !with_suggestions || !self.options.show_suggestions || suggestions.is_empty() {
            return display;
        }
        let selected = match buffer.mode() {
            Mode::Selected { index } if self.options.highlight_selection => Some(index),
            _ => None,
        };
        display.push_str(" [");
        for (i, candidate) in suggestions.candidates().iter().enumerate() {
            if i > 0 {
                display.push_str(" | ");
            }
            if selected == Some(i) {
                display.push_highlighted(candidate);
            } else {
                display.push_str(candidate);
            }
        }
        display.push_str("]");
        display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use wordcomp_core::testing::FakeTerminal;
    use wordcomp_core::InputUnit;

    const FRUITS: [&str; 4] = ["apple", "application", "apply", "banana"];

    fn run(term: &mut FakeTerminal) -> String {
        WordCompleter::new(FRUITS).prompt(term, "> ").unwrap()
    }

    #[test]
    fn tab_completes_first_suggestion() {
        let mut term = FakeTerminal::new(24, 80);
        term.push_str("app\t\r");
        assert_eq!(run(&mut term), "apple");
    }

    #[test]
    fn literal_word_is_committed_by_space() {
        let mut term = FakeTerminal::new(24, 80);
        term.push_str("app ba\t\r");
        assert_eq!(run(&mut term), "app banana");
    }

    #[test]
    fn suggestions_are_shown_sorted() {
        let completer = WordCompleter::new(FRUITS);
        let mut buffer = EditBuffer::new(completer.index());
        for c in "app".chars() {
            buffer.apply(wordcomp_core::KeyAction::Character(c));
        }
        let display = completer.compose("> ", &buffer, true);
        assert_eq!(display.text(), "> app [apple | application | apply]");
        assert_eq!(display.highlight(), None);
    }

    #[test]
    fn selected_suggestion_is_highlighted() {
        let mut term = FakeTerminal::new(24, 80);
        term.push_str("app\t");
        term.push_key(KeyCode::Down);
        // Stop before Enter so the last frame stays on screen.
        let err = WordCompleter::new(FRUITS).prompt(&mut term, "> ").unwrap_err();
        assert!(matches!(err, PromptError::Io(ref e) if e.kind() == std::io::ErrorKind::UnexpectedEof));
        assert_eq!(term.screen().row_text(0), "> application [apple | application | apply]");
        assert_eq!(term.screen().reversed_text(), "application");
    }

    #[test]
    fn arrow_keys_cycle_both_ways() {
        let mut term = FakeTerminal::new(24, 80);
        term.push_str("app");
        term.push_bytes(b"\x1b[B\x1b[B\x1b[A\x1b[A");
        term.push_str("\r");
        assert_eq!(run(&mut term), "apply");
    }

    #[test]
    fn console_arrow_bytes_cycle() {
        let mut term = FakeTerminal::new(24, 80);
        term.push_str("app");
        term.push_bytes(&[0xe0, b'P', 0xe0, b'P', 0xe0, b'P']);
        term.push_str("\r");
        assert_eq!(run(&mut term), "apply");
    }

    #[test]
    fn backspace_reopens_committed_word() {
        let mut term = FakeTerminal::new(24, 80);
        term.push_str("app ");
        term.push_bytes(&[0x7f]);
        term.push_str("l\t\r");
        assert_eq!(run(&mut term), "apple");
    }

    #[test]
    fn unrecognized_input_is_dropped() {
        let mut term = FakeTerminal::new(24, 80);
        term.push_str("ba");
        term.push_bytes(b"\x1b[D\x01");
        term.push_unit(InputUnit::Other);
        term.push_str("\t\r");
        assert_eq!(run(&mut term), "banana");
    }

    #[test]
    fn crossterm_keys_drive_the_prompt() {
        let mut term = FakeTerminal::new(24, 80);
        for c in "ap".chars() {
            term.push_key(KeyCode::Char(c));
        }
        term.push_key(KeyCode::Tab);
        term.push_key(KeyCode::Char(' '));
        term.push_key(KeyCode::Char('x'));
        term.push_key(KeyCode::Enter);
        assert_eq!(run(&mut term), "apple x");
    }

    #[test]
    fn enter_clears_suggestions_and_moves_to_next_line() {
        let mut term = FakeTerminal::new(24, 80).with_cursor(3, 0);
        term.push_str("ba\r");
        assert_eq!(run(&mut term), "ba");
        assert_eq!(term.screen().row_text(3), "> ba");
        assert_eq!(term.screen().cursor(), (4, 0));
        assert!(term.output().ends_with(b"\r\n"));
    }

    #[test]
    fn suggestions_can_be_left_on_enter() {
        let mut term = FakeTerminal::new(24, 80);
        term.push_str("ba\r");
        let completer = WordCompleter::new(FRUITS).with_options(PromptOptions {
            clear_suggestions_on_enter: false,
            ..PromptOptions::default()
        });
        completer.prompt(&mut term, "> ").unwrap();
        assert_eq!(term.screen().row_text(0), "> ba [banana]");
    }

    #[test]
    fn long_input_wraps_and_scrolls_at_bottom() {
        // 4 columns, starting on the last of 3 rows.
        let mut term = FakeTerminal::new(3, 4).with_cursor(2, 0);
        term.push_str("ba");
        let _ = WordCompleter::new(FRUITS).prompt(&mut term, "> ");
        // "> ba [banana]" wraps to 4 lines on a 3-row screen; the first
        // line has scrolled off the top.
        assert_eq!(term.screen().lines(), vec![" [ba", "nana", "]"]);
        assert_eq!(term.screen().scrolled(), 3);
        assert_eq!(term.screen().cursor(), (2, 1));
    }

    #[test]
    fn input_stays_visible_when_suggestions_narrow_on_a_small_screen() {
        let mut words: Vec<String> = (0..15).map(|i| format!("carrot{i:02}x")).collect();
        words.push("cz".to_string());
        let mut term = FakeTerminal::new(4, 20);
        term.push_str("cz");
        let err = WordCompleter::new(&words).prompt(&mut term, "> ").unwrap_err();
        assert!(!err.is_interrupted());
        assert_eq!(term.pending_input(), 0);
        // After "c", fifteen suggestions wrapped to ten lines on a four-row
        // screen; "cz" narrows them to a single line drawn from the top.
        assert_eq!(term.screen().scrolled(), 6);
        assert_eq!(term.screen().lines(), vec!["> cz [cz]", "", "", ""]);
        assert_eq!(term.screen().cursor(), (0, 9));
    }

    #[test]
    fn prompt_started_mid_line_moves_down() {
        let mut term = FakeTerminal::new(10, 40).with_cursor(1, 5);
        term.push_str("ba\r");
        assert_eq!(run(&mut term), "ba");
        assert_eq!(term.screen().row_text(2), "> ba");
    }

    #[test]
    fn vocabulary_can_grow_between_prompts() {
        let mut completer = WordCompleter::new(FRUITS);
        assert!(completer.add_word("cherry"));
        assert!(!completer.add_word("apple"));
        completer.add_words(["cranberry", "citrus"]);
        assert_eq!(completer.index().len(), 7);

        let mut term = FakeTerminal::new(24, 80);
        term.push_str("c\t\t\r");
        assert_eq!(completer.prompt(&mut term, "").unwrap(), "citrus");
    }

    #[test]
    fn empty_vocabulary_still_accepts_input() {
        let completer = WordCompleter::new(Vec::<String>::new());
        let mut term = FakeTerminal::new(24, 80);
        term.push_str("hello world\t\r");
        assert_eq!(completer.prompt(&mut term, "").unwrap(), "hello world");
    }

    #[test]
    fn terminal_failure_propagates() {
        let mut term = FakeTerminal::new(24, 80);
        term.push_str("abc");
        let err = WordCompleter::new(FRUITS).prompt(&mut term, "> ").unwrap_err();
        assert!(!err.is_interrupted());
    }
}
