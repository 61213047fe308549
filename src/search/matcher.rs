//! Query matching against a single document.
//!
//! Matching is case-insensitive and only looks at top-level string fields
//! that are not excluded. Two modes are supported:
//!
//! - **Exact**: the query is a contiguous substring of a field
//! - **Fuzzy**: the query's characters appear in a field in order, gaps allowed
//!
//! Every exact match is also a fuzzy match.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::search::store::Document;

/// Decides whether a document matches a query
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    exclude: BTreeSet<String>,
}

impl Matcher {
    pub fn new(exclude: BTreeSet<String>) -> Self {
        Self { exclude }
    }

    /// Fields that are never scanned
    pub fn excluded(&self) -> &BTreeSet<String> {
        &self.exclude
    }

    /// Check whether `query` matches any searchable field of `document`
    pub fn matches(&self, query: &str, document: &Document, fuzzy: bool) -> bool {
        self.matches_normalized(&query.to_lowercase(), document, fuzzy)
    }

    /// Same as [`matches`](Self::matches) for a query that is already lowercased.
    pub(crate) fn matches_normalized(&self, needle: &str, document: &Document, fuzzy: bool) -> bool {
        if needle.is_empty() {
            return false;
        }

        self.searchable_fields(document).any(|text| {
            let haystack = text.to_lowercase();
            if fuzzy {
                is_subsequence(needle, &haystack)
            } else {
                haystack.contains(needle)
            }
        })
    }

    /// String-valued fields that are not excluded. Other values are skipped.
    pub fn searchable_fields<'a>(&'a self, document: &'a Document) -> impl Iterator<Item = &'a str> + 'a {
        document.iter().filter_map(move |(key, value)| {
            if self.exclude.contains(key) {
                return None;
            }
            match value {
                Value::String(text) => Some(text.as_str()),
                _ => None,
            }
        })
    }
}

/// Whether every character of `needle` occurs in `haystack` in the same order.
pub fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut remaining = haystack.chars();
    needle.chars().all(|wanted| remaining.any(|c| c == wanted))
}
