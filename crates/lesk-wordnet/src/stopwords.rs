//! Stopword filtering backed by the `stop-words` crate's English list.

use std::collections::HashSet;

use stop_words::{LANGUAGE, get};

/// Case-insensitive stopword set.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    stopwords: HashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::english()
    }
}

impl StopwordFilter {
    /// The NLTK English stopword list.
    pub fn english() -> Self {
        Self {
            stopwords: get(LANGUAGE::English)
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
        }
    }

    /// Create a filter from a custom list.
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}
