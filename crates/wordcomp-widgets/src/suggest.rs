//! Suggestion list with cyclic selection.

use crate::prefix_index::PrefixIndex;

/// Whether the current word was typed or picked from the suggestions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// The user is typing freely; no candidate is selected.
    #[default]
    Typing,
    /// A candidate was accepted and the user may keep cycling.
    Selected {
        /// Position of the accepted candidate.
        index: usize,
    },
}

/// Candidates for the current query, plus which one (if any) is selected.
///
/// Borrows the long-lived [`PrefixIndex`] for the duration of one prompt.
///
/// # Example
///
/// ```
/// use wordcomp_widgets::prefix_index::PrefixIndex;
/// use wordcomp_widgets::suggest::SuggestionEngine;
///
/// let index: PrefixIndex = ["apple", "apply", "banana"].into_iter().collect();
/// let mut engine = SuggestionEngine::new(&index);
///
/// engine.on_query_changed("ap");
/// assert_eq!(engine.candidates(), ["apple", "apply"]);
/// assert_eq!(engine.cycle_forward(), Some("apple"));
/// assert_eq!(engine.cycle_forward(), Some("apply"));
/// assert_eq!(engine.cycle_forward(), Some("apple"));
/// ```
#[derive(Debug, Clone)]
pub struct SuggestionEngine<'a> {
    index: &'a PrefixIndex,
    candidates: Vec<String>,
    mode: Mode,
}

impl<'a> SuggestionEngine<'a> {
    /// Create an engine with no candidates, in [`Mode::Typing`].
    pub fn new(index: &'a PrefixIndex) -> Self {
        Self {
            index,
            candidates: Vec::new(),
            mode: Mode::Typing,
        }
    }

    /// React to the query word changing.
    ///
    /// A blank query clears the candidates and returns to typing.  Otherwise
    /// candidates are recomputed while typing and left alone while a
    /// candidate is selected, since the query then *is* that candidate.
    pub fn on_query_changed(&mut self, query: &str) {
        if query.trim().is_empty() {
            self.clear();
            return;
        }
        if let Mode::Selected { .. } = self.mode {
            return;
        }
        self.candidates = self.index.find_prefix(query);
        tracing::trace!(query, candidates = self.candidates.len(), "suggestions refreshed");
    }

    /// Select the next candidate, wrapping past the end.
    ///
    /// The first call after typing selects the first candidate.  Returns
    /// `None` when there are no candidates.
    pub fn cycle_forward(&mut self) -> Option<&str> {
        let count = self.candidates.len();
        if count == 0 {
            return None;
        }
        let index = match self.mode {
            Mode::Typing => 0,
            Mode::Selected { index } => (index + 1) % count,
        };
        self.select(index)
    }

    /// Select the previous candidate, wrapping past the start.
    ///
    /// The first call after typing selects the last candidate.  Returns
    /// `None` when there are no candidates.
    pub fn cycle_backward(&mut self) -> Option<&str> {
        let count = self.candidates.len();
        if count == 0 {
            return None;
        }
        let index = match self.mode {
            Mode::Typing => count - 1,
            Mode::Selected { index } => (index + count - 1) % count,
        };
        self.select(index)
    }

    /// Leave [`Mode::Selected`] so the next query change recomputes.
    pub fn resume_typing(&mut self) {
        self.mode = Mode::Typing;
    }

    /// Drop all candidates and return to typing.
    pub fn clear(&mut self) {
        self.candidates.clear();
        self.mode = Mode::Typing;
    }

    /// Current candidates, in ascending order.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The selected candidate, if any.
    pub fn selected(&self) -> Option<&str> {
        match self.mode {
            Mode::Typing => None,
            Mode::Selected { index } => self.candidates.get(index).map(String::as_str),
        }
    }

    /// Whether there are no candidates.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    fn select(&mut self, index: usize) -> Option<&str> {
        self.mode = Mode::Selected { index };
        self.candidates.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> PrefixIndex {
        ["apple", "application", "apply", "banana"].into_iter().collect()
    }

    #[test]
    fn typing_computes_candidates() {
        let index = index();
        let mut engine = SuggestionEngine::new(&index);
        engine.on_query_changed("app");
        assert_eq!(engine.candidates(), ["apple", "application", "apply"]);
        assert_eq!(engine.mode(), Mode::Typing);
        assert_eq!(engine.selected(), None);
    }

    #[test]
    fn blank_query_clears() {
        let index = index();
        let mut engine = SuggestionEngine::new(&index);
        engine.on_query_changed("app");
        engine.cycle_forward();
        engine.on_query_changed("  ");
        assert!(engine.is_empty());
        assert_eq!(engine.mode(), Mode::Typing);
    }

    #[test]
    fn selected_mode_keeps_candidates() {
        let index = index();
        let mut engine = SuggestionEngine::new(&index);
        engine.on_query_changed("app");
        assert_eq!(engine.cycle_forward(), Some("apple"));
        engine.on_query_changed("apple");
        assert_eq!(engine.candidates().len(), 3);

        engine.resume_typing();
        engine.on_query_changed("apple");
        assert_eq!(engine.candidates(), ["apple"]);
    }

    #[test]
    fn cycling_with_no_candidates_is_noop() {
        let index = index();
        let mut engine = SuggestionEngine::new(&index);
        engine.on_query_changed("zzz");
        assert_eq!(engine.cycle_forward(), None);
        assert_eq!(engine.cycle_backward(), None);
        assert_eq!(engine.mode(), Mode::Typing);
    }

    #[test]
    fn forward_cycle_closes_after_k_steps() {
        let index = index();
        let mut engine = SuggestionEngine::new(&index);
        engine.on_query_changed("app");
        let start = engine.cycle_forward().map(str::to_owned);
        let k = engine.candidates().len();
        let mut last = None;
        for _ in 0..k {
            last = engine.cycle_forward().map(str::to_owned);
        }
        assert_eq!(last, start);
        assert_eq!(engine.mode(), Mode::Selected { index: 0 });
    }

    #[test]
    fn backward_inverts_forward() {
        let index = index();
        let mut engine = SuggestionEngine::new(&index);
        engine.on_query_changed("app");
        engine.cycle_forward();
        engine.cycle_forward();
        assert_eq!(engine.selected(), Some("application"));
        assert_eq!(engine.cycle_backward(), Some("apple"));
        assert_eq!(engine.cycle_backward(), Some("apply"));
        assert_eq!(engine.cycle_forward(), Some("apple"));
    }

    #[test]
    fn backward_from_typing_starts_at_last() {
        let index = index();
        let mut engine = SuggestionEngine::new(&index);
        engine.on_query_changed("app");
        assert_eq!(engine.cycle_backward(), Some("apply"));
    }

    #[test]
    fn single_candidate_cycles_to_itself() {
        let index = index();
        let mut engine = SuggestionEngine::new(&index);
        engine.on_query_changed("ba");
        assert_eq!(engine.cycle_forward(), Some("banana"));
        assert_eq!(engine.cycle_forward(), Some("banana"));
        assert_eq!(engine.cycle_backward(), Some("banana"));
    }
}
