//! Editing widgets for the **wordcomp** prompt.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`prefix_index`] | Character trie over the known vocabulary |
//! | [`suggest`] | Suggestion list with cyclic selection and typing/selected mode |
//! | [`edit_buffer`] | Committed words plus the word being typed, driven by key actions |
//! | [`completer`] | [`WordCompleter`](completer::WordCompleter), the read-update-render loop |

pub mod completer;
pub mod edit_buffer;
pub mod prefix_index;
pub mod suggest;

pub use completer::{PromptOptions, WordCompleter};
pub use edit_buffer::{EditBuffer, Outcome};
pub use prefix_index::{PrefixIndex, MAX_SUGGESTIONS};
pub use suggest::{Mode, SuggestionEngine};
