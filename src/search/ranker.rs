//! Ordering and truncation of matched documents.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::search::hit::SearchHit;
use crate::search::store::Document;

/// Caller-supplied pure comparison function
pub type Comparator = Arc<dyn Fn(&Document, &Document) -> Ordering + Send + Sync>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// How matched documents are ordered before the limit is applied
#[derive(Clone, Default)]
pub enum SortStrategy {
    /// Every pair compares equal, so ingestion order is kept
    #[default]
    Ingestion,
    /// Compare one field. Strings compare case-insensitively, numbers
    /// numerically; documents without a comparable value sort last.
    Field { field: String, order: SortOrder },
    Custom(Comparator),
}

impl fmt::Debug for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ingestion => f.write_str("Ingestion"),
            Self::Field { field, order } => f
                .debug_struct("Field")
                .field("field", field)
                .field("order", order)
                .finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl SortStrategy {
    pub fn by_field(field: impl Into<String>, order: SortOrder) -> Self {
        Self::Field {
            field: field.into(),
            order,
        }
    }

    pub fn custom<F>(compare: F) -> Self
    where
        F: Fn(&Document, &Document) -> Ordering + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(compare))
    }

    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        match self {
            Self::Ingestion => Ordering::Equal,
            Self::Field { field, order } => compare_field(a.get(field), b.get(field), *order),
            Self::Custom(compare) => compare(a, b),
        }
    }
}

enum SortKey {
    Number(f64),
    Text(String),
}

fn sort_key(value: Option<&Value>) -> Option<SortKey> {
    match value? {
        Value::Number(n) => n.as_f64().map(SortKey::Number),
        Value::String(s) => Some(SortKey::Text(s.to_lowercase())),
        _ => None,
    }
}

fn compare_field(a: Option<&Value>, b: Option<&Value>, order: SortOrder) -> Ordering {
    let ordering = match (sort_key(a), sort_key(b)) {
        (Some(a), Some(b)) => match (a, b) {
            (SortKey::Number(x), SortKey::Number(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            (SortKey::Text(x), SortKey::Text(y)) => x.cmp(&y),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        },
        // Missing values stay last in both directions
        (Some(_), None) => return Ordering::Less,
        (None, Some(_)) => return Ordering::Greater,
        (None, None) => return Ordering::Equal,
    };

    match order {
        SortOrder::Ascending => ordering,
        SortOrder::Descending => ordering.reverse(),
    }
}

/// Stable-sort `matched` with `sort` and keep the first `limit` entries
pub fn rank(mut matched: Vec<SearchHit>, sort: &SortStrategy, limit: usize) -> Vec<SearchHit> {
    if limit == 0 {
        return Vec::new();
    }

    if !matches!(sort, SortStrategy::Ingestion) {
        matched.sort_by(|a, b| sort.compare(a.document(), b.document()));
    }

    matched.truncate(limit);
    matched
}
