use std::sync::Arc;

use tracing::{debug, instrument};

use crate::search::config::{ConfigurationError, SearchOptions};
use crate::search::hit::SearchHit;
use crate::search::matcher::Matcher;
use crate::search::ranker::rank;
use crate::search::store::{Document, DocumentStore};

/// Lifecycle of a [`SearchIndex`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexState {
    /// No documents have been put yet
    Empty,
    /// At least one `put` has happened
    Loaded,
}

/// In-memory document repository answering free-text queries.
///
/// Composes a [`DocumentStore`], a [`Matcher`] and the ranking step behind
/// `configure` / `put` / `search`. Searches are pure: the same store, query
/// and options always give the same hits.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    store: DocumentStore,
    options: SearchOptions,
    matcher: Matcher,
}

impl SearchIndex {
    /// Create an empty index with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty index with the given options
    pub fn with_options(options: SearchOptions) -> Result<Self, ConfigurationError> {
        let mut index = Self::new();
        index.configure(options)?;
        Ok(index)
    }

    /// Install new options for subsequent searches.
    ///
    /// Invalid options are rejected and the active options stay in place.
    pub fn configure(&mut self, options: SearchOptions) -> Result<(), ConfigurationError> {
        options.validate()?;
        debug!(
            fuzzy = options.fuzzy,
            limit = options.limit,
            sort = ?options.sort,
            excluded = options.exclude.len(),
            "Search index configured"
        );
        self.matcher = Matcher::new(options.exclude.clone());
        self.options = options;
        Ok(())
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Replace every stored document
    #[instrument(level = "debug", skip_all)]
    pub fn put<I>(&mut self, documents: I)
    where
        I: IntoIterator<Item = Document>,
    {
        self.store.put(documents);
        debug!(documents = self.store.len(), "Search index loaded");
    }

    pub fn state(&self) -> IndexState {
        if self.store.is_loaded() {
            IndexState::Loaded
        } else {
            IndexState::Empty
        }
    }

    /// Stored documents in ingestion order
    pub fn documents(&self) -> &[Arc<Document>] {
        self.store.all()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Match, order and truncate stored documents for `query`
    #[instrument(level = "debug", skip(self))]
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let needle = query.to_lowercase();
        let documents = self.store.snapshot();

        let matched: Vec<SearchHit> = documents
            .iter()
            .enumerate()
            .filter(|(_, document)| self.matcher.matches_normalized(&needle, document, self.options.fuzzy))
            .map(|(position, document)| SearchHit::new(position, Arc::clone(document)))
            .collect();

        let total = matched.len();
        let hits = rank(matched, &self.options.sort, self.options.limit);
        debug!(matched = total, returned = hits.len(), "Search completed");
        hits
    }
}
