//! Output types for search results
//!
//! These are the structured, markup-free shapes handed to rendering
//! consumers. They serialize to JSON and can be deserialized in tests for
//! type-safe validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::search::hit::SearchHit;

/// Output from a single search
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SearchOutput {
    pub query: String,
    pub total_results: usize,
    pub fuzzy_enabled: bool,
    /// Matched documents, each carrying the triggering `query`
    pub results: Vec<Value>,
}

impl SearchOutput {
    pub fn from_hits(query: &str, fuzzy_enabled: bool, hits: &[SearchHit]) -> Self {
        Self {
            query: query.to_string(),
            total_results: hits.len(),
            fuzzy_enabled,
            results: hits.iter().map(SearchHit::to_value).collect(),
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }

    /// Check if there are any results
    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }
}

/// Error output for failed searches
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SearchErrorOutput {
    pub error: String,
}

impl SearchErrorOutput {
    /// Create a new error output
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize error"}"#.to_string())
    }
}
