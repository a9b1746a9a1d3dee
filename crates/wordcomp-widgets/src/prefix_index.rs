//! Character trie answering "every known word starting with P" queries.
//!
//! Children are kept in a [`BTreeMap`], so a pre-order walk that visits a
//! node's own word before its children yields words in ascending
//! lexicographic order.  That lets [`PrefixIndex::find_prefix`] stop as soon
//! as it has [`MAX_SUGGESTIONS`] results instead of collecting and sorting
//! the whole subtree.

use std::collections::BTreeMap;

/// Maximum number of words returned by [`PrefixIndex::find_prefix`].
pub const MAX_SUGGESTIONS: usize = 15;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    terminal: bool,
}

/// The known vocabulary, searchable by prefix.
///
/// # Example
///
/// ```
/// use wordcomp_widgets::prefix_index::PrefixIndex;
///
/// let index: PrefixIndex = ["apply", "apple", "banana", "application"].into_iter().collect();
/// assert_eq!(index.find_prefix("app"), vec!["apple", "application", "apply"]);
/// assert!(index.find_prefix("cherry").is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PrefixIndex {
    root: TrieNode,
    len: usize,
}

impl PrefixIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a word.  Returns `true` if it was not already present.
    ///
    /// Empty words are ignored.
    pub fn insert(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let mut node = &mut self.root;
        for c in word.chars() {
            node = node.children.entry(c).or_default();
        }
        if node.terminal {
            return false;
        }
        node.terminal = true;
        self.len += 1;
        true
    }

    /// Add every word in `words`.
    pub fn insert_all<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.insert(word.as_ref());
        }
    }

    /// Whether `word` is a known word (not merely a prefix of one).
    pub fn contains(&self, word: &str) -> bool {
        self.find_node(word).is_some_and(|node| node.terminal)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no words.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Up to [`MAX_SUGGESTIONS`] known words starting with `prefix`, in
    /// ascending order.  Includes `prefix` itself if it is a known word.
    pub fn find_prefix(&self, prefix: &str) -> Vec<String> {
        let Some(start) = self.find_node(prefix) else {
            return Vec::new();
        };

        let mut found = Vec::new();
        // Explicit stack; children are pushed in reverse so the smallest
        // character is popped first.
        let mut stack = vec![(start, prefix.to_string())];
        while let Some((node, word)) = stack.pop() {
            if node.terminal {
                found.push(word.clone());
                if found.len() == MAX_SUGGESTIONS {
                    break;
                }
            }
            for (&c, child) in node.children.iter().rev() {
                let mut next = word.clone();
                next.push(c);
                stack.push((child, next));
            }
        }
        found
    }

    fn find_node(&self, prefix: &str) -> Option<&TrieNode> {
        prefix
            .chars()
            .try_fold(&self.root, |node, c| node.children.get(&c))
    }
}

impl<S: AsRef<str>> FromIterator<S> for PrefixIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut index = PrefixIndex::new();
        index.insert_all(iter);
        index
    }
}

impl<S: AsRef<str>> Extend<S> for PrefixIndex {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force(words: &[&str], prefix: &str) -> Vec<String> {
        let mut matches: Vec<String> = words
            .iter()
            .filter(|w| !w.is_empty() && w.starts_with(prefix))
            .map(|w| w.to_string())
            .collect();
        matches.sort();
        matches.dedup();
        matches.truncate(MAX_SUGGESTIONS);
        matches
    }

    #[test]
    fn empty_index_finds_nothing() {
        let index = PrefixIndex::new();
        assert!(index.is_empty());
        assert!(index.find_prefix("a").is_empty());
    }

    #[test]
    fn prefix_results_are_sorted() {
        let index: PrefixIndex = ["apply", "banana", "application", "apple"].into_iter().collect();
        assert_eq!(index.find_prefix("app"), vec!["apple", "application", "apply"]);
        assert_eq!(index.find_prefix("ba"), vec!["banana"]);
        assert_eq!(index.find_prefix("applic"), vec!["application"]);
    }

    #[test]
    fn missing_prefix_is_empty_not_error() {
        let index: PrefixIndex = ["apple"].into_iter().collect();
        assert!(index.find_prefix("apz").is_empty());
        assert!(index.find_prefix("apples").is_empty());
    }

    #[test]
    fn prefix_that_is_a_word_is_included() {
        let index: PrefixIndex = ["app", "apple", "ap"].into_iter().collect();
        assert_eq!(index.find_prefix("app"), vec!["app", "apple"]);
        assert_eq!(index.find_prefix("ap"), vec!["ap", "app", "apple"]);
    }

    #[test]
    fn results_are_capped() {
        let words: Vec<String> = (0..40).map(|i| format!("w{i:02}")).collect();
        let index: PrefixIndex = words.iter().collect();
        let found = index.find_prefix("w");
        assert_eq!(found.len(), MAX_SUGGESTIONS);
        assert_eq!(found.first().map(String::as_str), Some("w00"));
        assert_eq!(found.last().map(String::as_str), Some("w14"));
    }

    #[test]
    fn matches_brute_force() {
        let words = [
            "a", "ab", "abc", "abd", "b", "ba", "Zebra", "zebra", "zoo", "zo", "éclair", "ecl",
            "abacus", "abandon", "abase", "abate", "abbey", "abbot", "abdomen", "abide", "able",
            "abode", "abort", "about", "above", "abroad", "absent", "absorb", "abstract", "absurd",
        ];
        let index: PrefixIndex = words.into_iter().collect();
        for prefix in ["", "a", "ab", "abs", "z", "Z", "zo", "é", "e", "x", "abcd"] {
            assert_eq!(index.find_prefix(prefix), brute_force(&words, prefix), "prefix {prefix:?}");
        }
    }

    #[test]
    fn insert_is_idempotent() {
        let mut once = PrefixIndex::new();
        once.insert_all(["apple", "apply"]);
        let mut twice = once.clone();
        assert!(!twice.insert("apple"));
        assert_eq!(twice.len(), 2);
        assert_eq!(once.find_prefix("ap"), twice.find_prefix("ap"));
    }

    #[test]
    fn contains_distinguishes_words_from_prefixes() {
        let index: PrefixIndex = ["apple"].into_iter().collect();
        assert!(index.contains("apple"));
        assert!(!index.contains("app"));
        assert!(!index.contains(""));
    }

    #[test]
    fn empty_words_are_ignored() {
        let mut index = PrefixIndex::new();
        assert!(!index.insert(""));
        assert!(index.is_empty());
    }

    #[test]
    fn repeated_queries_are_identical() {
        let index: PrefixIndex = ["cab", "car", "cat", "ca"].into_iter().collect();
        assert_eq!(index.find_prefix("ca"), index.find_prefix("ca"));
    }
}
