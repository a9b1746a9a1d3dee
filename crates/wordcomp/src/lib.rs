//! **wordcomp** -- an inline, suggestion-aware word completion prompt for
//! terminal programs.
//!
//! This is the umbrella crate that re-exports everything you need from a
//! single dependency:
//!
//! ```toml
//! [dependencies]
//! wordcomp = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`wordcomp_core`] are available at the crate root
//!   ([`Terminal`], [`CrosstermTerminal`], [`Decoder`], [`Renderer`],
//!   [`PromptError`], etc.), with [`testing`] for the fake terminal.
//! * The [`widgets`] module re-exports everything from [`wordcomp_widgets`]
//!   ([`WordCompleter`], [`PrefixIndex`], ...); the most used types are also
//!   re-exported at the root.
//! * [`vocab`] turns free text into a word set.
//! * [`crossterm`] is re-exported so downstream crates do not need to depend
//!   on it directly.
//!
//! # Quick start
//!
//! ```no_run
//! use wordcomp::{vocab, WordCompleter};
//!
//! fn main() -> Result<(), wordcomp::PromptError> {
//!     let words = vocab::words_from_text("the quick brown fox jumps over the lazy dog");
//!     let completer = WordCompleter::new(words);
//!     let line = completer.prompt_interactive("> ")?;
//!     println!("{line}");
//!     Ok(())
//! }
//! ```

pub mod vocab;

pub use wordcomp_core::*;
pub mod widgets {
    pub use wordcomp_widgets::*;
}
pub use wordcomp_widgets::{PrefixIndex, PromptOptions, WordCompleter};

// Re-export dependencies for use in demos and downstream crates
pub use crossterm;
