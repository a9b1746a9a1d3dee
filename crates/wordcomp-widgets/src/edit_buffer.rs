//! Word-oriented edit buffer driven by [`KeyAction`]s.
//!
//! The buffer holds the committed words and the word currently being typed.
//! Space commits the current word; backspace on an empty word reopens the
//! last committed one, so a space followed by a backspace is always a no-op.

use crate::prefix_index::PrefixIndex;
use crate::suggest::{Mode, SuggestionEngine};
use wordcomp_core::KeyAction;

/// What applying a key did to the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed; no redraw is needed.
    Ignored,
    /// The buffer or the suggestions changed.
    Updated,
    /// Enter was pressed; carries the final text.
    Submitted(String),
}

/// Committed words, the word in progress, and its suggestions.
#[derive(Debug, Clone)]
pub struct EditBuffer<'a> {
    committed: Vec<String>,
    current: String,
    suggestions: SuggestionEngine<'a>,
}

impl<'a> EditBuffer<'a> {
    /// Create an empty buffer suggesting words from `index`.
    pub fn new(index: &'a PrefixIndex) -> Self {
        Self {
            committed: Vec::new(),
            current: String::new(),
            suggestions: SuggestionEngine::new(index),
        }
    }

    /// Apply one logical key.
    pub fn apply(&mut self, action: KeyAction) -> Outcome {
        match action {
            KeyAction::Character(c) => {
                self.current.push(c);
                self.retype();
                Outcome::Updated
            }
            KeyAction::Space => {
                if self.current.is_empty() {
                    return Outcome::Ignored;
                }
                self.committed.push(std::mem::take(&mut self.current));
                self.suggestions.clear();
                Outcome::Updated
            }
            KeyAction::Backspace => {
                if self.current.pop().is_none() {
                    let Some(word) = self.committed.pop() else {
                        return Outcome::Ignored;
                    };
                    self.current = word;
                }
                self.retype();
                Outcome::Updated
            }
            KeyAction::Tab | KeyAction::ArrowDown => match self.suggestions.cycle_forward() {
                Some(word) => {
                    self.current = word.to_owned();
                    Outcome::Updated
                }
                None => Outcome::Ignored,
            },
            KeyAction::ArrowUp => match self.suggestions.cycle_backward() {
                Some(word) => {
                    self.current = word.to_owned();
                    Outcome::Updated
                }
                None => Outcome::Ignored,
            },
            KeyAction::Enter => Outcome::Submitted(self.value()),
            KeyAction::Unrecognized => Outcome::Ignored,
        }
    }

    /// The full input: committed words and the current word, space-joined.
    pub fn value(&self) -> String {
        let mut value = self.committed.join(" ");
        if !value.is_empty() && !self.current.is_empty() {
            value.push(' ');
        }
        value.push_str(&self.current);
        value
    }

    /// Words already committed with Space.
    pub fn committed(&self) -> &[String] {
        &self.committed
    }

    /// The word being typed.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Whether the current word was typed or picked.
    pub fn mode(&self) -> Mode {
        self.suggestions.mode()
    }

    /// Suggestions for the current word.
    pub fn suggestions(&self) -> &SuggestionEngine<'a> {
        &self.suggestions
    }

    fn retype(&mut self) {
        self.suggestions.resume_typing();
        self.suggestions.on_query_changed(&self.current);
    }
}
