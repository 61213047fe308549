use std::sync::Arc;

use serde_json::{Map, Value};

/// A searchable record: an arbitrary JSON object with no enforced schema.
pub type Document = Map<String, Value>;

/// One generation of stored documents, in ingestion order.
pub type Snapshot = Arc<[Arc<Document>]>;

/// Holds the ingested document collection.
///
/// Every `put` builds a complete new generation and swaps it in with a single
/// assignment. Readers take a [`Snapshot`] and keep working against it even if
/// the store is replaced afterwards.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    documents: Snapshot,
    loaded: bool,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            documents: Arc::from(Vec::new()),
            loaded: false,
        }
    }

    /// Replace the entire collection
    pub fn put<I>(&mut self, documents: I)
    where
        I: IntoIterator<Item = Document>,
    {
        let next: Snapshot = documents.into_iter().map(Arc::new).collect();
        self.documents = next;
        self.loaded = true;
    }

    /// All documents in ingestion order
    pub fn all(&self) -> &[Arc<Document>] {
        &self.documents
    }

    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.documents)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Whether `put` has been called at least once
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}
