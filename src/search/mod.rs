//! # Search Module
//!
//! In-memory document search: ingest a collection of JSON objects, match a
//! free-text query against their string fields, order the matches and cap
//! them at a limit.
//!
//! ## Key Components
//!
//! - [`store`] - Document collection with whole-collection replacement
//! - [`matcher`] - Exact substring and ordered-subsequence (fuzzy) matching
//! - [`ranker`] - Stable ordering strategies and truncation
//! - [`repository`] - [`SearchIndex`] composing the pieces above
//! - [`config`] - Search options and their validation
//! - [`outputs`] - Serializable result shapes for rendering consumers

pub mod config;
pub mod hit;
pub mod matcher;
pub mod outputs;
pub mod ranker;
pub mod repository;
pub mod store;

pub use config::{ConfigurationError, DEFAULT_SEARCH_LIMIT, SearchOptions};
pub use hit::SearchHit;
pub use matcher::Matcher;
pub use ranker::{Comparator, SortOrder, SortStrategy, rank};
pub use repository::{IndexState, SearchIndex};
pub use store::{Document, DocumentStore};
