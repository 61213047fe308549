use std::sync::Arc;

use serde_json::Value;

use crate::search::store::Document;

/// Key under which the triggering query is exposed to templates and output
pub const QUERY_FIELD: &str = "query";

/// A matched document.
///
/// Holds a shared reference to the stored document rather than a copy.
/// Per-result annotations live on the hit so the stored original is never
/// touched.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    position: usize,
    document: Arc<Document>,
    query: Option<String>,
}

impl SearchHit {
    pub fn new(position: usize, document: Arc<Document>) -> Self {
        Self {
            position,
            document,
            query: None,
        }
    }

    /// Attach the query that produced this hit
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Ingestion position of the document in the store
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn shared_document(&self) -> &Arc<Document> {
        &self.document
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Look up a field, with the annotated query taking precedence for `query`
    pub fn field(&self, key: &str) -> Option<Value> {
        if key == QUERY_FIELD {
            if let Some(query) = &self.query {
                return Some(Value::String(query.clone()));
            }
        }
        self.document.get(key).cloned()
    }

    /// Shallow copy of the document with the annotation merged in
    pub fn to_value(&self) -> Value {
        let mut object = (*self.document).clone();
        if let Some(query) = &self.query {
            object.insert(QUERY_FIELD.to_string(), Value::String(query.clone()));
        }
        Value::Object(object)
    }
}
