//! Building a vocabulary from free text.

use std::collections::BTreeSet;
use std::io;
use std::path::Path;

/// Split `text` into its distinct words.
///
/// Any run of characters other than letters, digits and `_` separates
/// words; punctuation never ends up inside a word.
///
/// # Example
///
/// ```
/// use wordcomp::vocab::words_from_text;
///
/// let words = words_from_text("Apples, apples... and pears!");
/// assert_eq!(words.into_iter().collect::<Vec<_>>(), ["Apples", "and", "apples", "pears"]);
/// ```
pub fn words_from_text(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Read a UTF-8 file and split it with [`words_from_text`].
pub fn words_from_file(path: impl AsRef<Path>) -> io::Result<BTreeSet<String>> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let words = words_from_text(&text);
    tracing::debug!(path = %path.as_ref().display(), words = words.len(), "loaded vocabulary");
    Ok(words)
}
