//! Localized UI phrases.
//!
//! The find/replace panel and its buttons are labelled with English phrase keys; a
//! [`Phrases`] table maps them to the display language. Unknown keys fall back to
//! themselves.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A phrase table keyed by the English phrase.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phrases {
    table: BTreeMap<String, String>,
}

impl Phrases {
    /// An empty table (every phrase displays as its key).
    pub fn new() -> Self {
        Self::default()
    }

    /// Simplified Chinese labels for the search panel.
    pub fn zh_cn() -> Self {
        [
            ("next", "下一个"),
            ("previous", "上一个"),
            ("all", "全部"),
            ("Find", "查找"),
            ("replace", "替换"),
            ("Replace", "替换词"),
            ("replace all", "全替换"),
            ("match case", "区分大小写"),
            ("regexp", "正则"),
            ("by word", "逐字逐句"),
        ]
        .into_iter()
        .collect()
    }

    /// Add or replace one phrase.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.table.insert(key.into(), value.into());
    }

    /// The localized phrase for `key`, or `key` itself.
    pub fn phrase<'a>(&'a self, key: &'a str) -> &'a str {
        self.table.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Number of phrases.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Phrases {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            table: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
