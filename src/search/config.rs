//! # Search Configuration Module
//!
//! Provides the per-index search options and their validation.
//!
//! Options are owned by each [`SearchIndex`](super::SearchIndex), so several
//! independent indexes can live in one process with different settings.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::search::ranker::SortStrategy;

/// Default limit for search results
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Rejected search configuration.
///
/// Raised when options are installed, never while a search is running.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("limit must not be negative (got {0})")]
    NegativeLimit(i64),

    #[error("field sort requires a field name")]
    EmptySortField,
}

/// Options controlling matching, ordering and truncation.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Match query characters as an ordered subsequence instead of a substring
    pub fuzzy: bool,
    /// Maximum number of results returned by a search
    pub limit: usize,
    /// Ordering applied to matches before truncation
    pub sort: SortStrategy,
    /// Document fields that are never scanned
    pub exclude: BTreeSet<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            fuzzy: false,
            limit: DEFAULT_SEARCH_LIMIT,
            sort: SortStrategy::Ingestion,
            exclude: BTreeSet::new(),
        }
    }
}

impl SearchOptions {
    pub fn with_fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set the limit from a signed source such as a config file or CLI flag.
    pub fn try_with_limit(mut self, limit: i64) -> Result<Self, ConfigurationError> {
        self.limit = usize::try_from(limit).map_err(|_| ConfigurationError::NegativeLimit(limit))?;
        Ok(self)
    }

    pub fn with_sort(mut self, sort: SortStrategy) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_exclude<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Check the options before they are installed on an index
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if let SortStrategy::Field { field, .. } = &self.sort {
            if field.trim().is_empty() {
                return Err(ConfigurationError::EmptySortField);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ranker::SortOrder;

    #[test]
    fn test_defaults() {
        let options = SearchOptions::default();
        assert!(!options.fuzzy);
        assert_eq!(options.limit, DEFAULT_SEARCH_LIMIT);
        assert!(matches!(options.sort, SortStrategy::Ingestion));
        assert!(options.exclude.is_empty());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_negative_limit_rejected() {
        let err = SearchOptions::default().try_with_limit(-1).unwrap_err();
        assert_eq!(err, ConfigurationError::NegativeLimit(-1));
    }

    #[test]
    fn test_signed_limit_accepted() {
        let options = SearchOptions::default().try_with_limit(0).unwrap();
        assert_eq!(options.limit, 0);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_large_limit_accepted() {
        let options = SearchOptions::default().with_limit(2000);
        assert!(options.validate().is_ok());

        let options = SearchOptions::default().try_with_limit(i64::from(u16::MAX)).unwrap();
        assert_eq!(options.limit, 65_535);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_empty_exclude_key_accepted() {
        // "" is a legal JSON key
        let options = SearchOptions::default().with_exclude(["", "url"]);
        assert!(options.validate().is_ok());
        assert!(options.exclude.contains(""));
    }

    #[test]
    fn test_blank_sort_field_rejected() {
        let options = SearchOptions::default().with_sort(SortStrategy::Field {
            field: String::new(),
            order: SortOrder::Ascending,
        });
        assert_eq!(options.validate(), Err(ConfigurationError::EmptySortField));
    }
}
