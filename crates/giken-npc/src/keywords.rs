//! Topic keyword matching.
//!
//! A topic matches when its key occurs anywhere in the lower-cased message.
//! There is no tokenizing or stemming, so a key embedded in a longer word
//! ("worker", "homework") matches as well.

use serde::{Deserialize, Serialize};

/// One topic key and its candidate reply lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub key: String,
    pub lines: Vec<String>,
}

/// Ordered topic table. Declaration order is preserved and is the order in
/// which [`KeywordTable::matches`] reports hits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordTable {
    entries: Vec<KeywordEntry>,
}

impl KeywordTable {
    pub fn new(entries: Vec<KeywordEntry>) -> Self {
        Self { entries }
    }

    /// Build a table from `(key, lines)` literals.
    pub fn from_static(table: &[(&str, &[&str])]) -> Self {
        Self::new(
            table
                .iter()
                .map(|(key, lines)| KeywordEntry {
                    key: (*key).to_string(),
                    lines: lines.iter().map(|l| (*l).to_string()).collect(),
                })
                .collect(),
        )
    }

    /// Keys whose literal text occurs in `text` (case-insensitive), in
    /// declaration order.
    pub fn matches(&self, text: &str) -> Vec<&str> {
        let folded = text.to_lowercase();
        self.entries
            .iter()
            .filter(|e| folded.contains(e.key.as_str()))
            .map(|e| e.key.as_str())
            .collect()
    }

    /// Candidate lines for `key`.
    pub fn lines(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.lines.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn entries(&self) -> &[KeywordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
