//! Loading document collections from inline JSON, files, or URLs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::search::Document;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to get JSON ({url}): {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read JSON file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected a JSON array of objects in {origin}")]
    NotAnArray { origin: String },
}

/// Where the document collection comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonSource {
    /// Documents given directly
    Inline(Vec<Value>),
    /// An `http(s)://` URL or a file path
    Location(String),
}

impl JsonSource {
    pub fn is_remote(&self) -> bool {
        match self {
            Self::Inline(_) => false,
            Self::Location(location) => {
                location.starts_with("http://") || location.starts_with("https://")
            }
        }
    }

    /// Short description used in logs and errors
    pub fn describe(&self) -> String {
        match self {
            Self::Inline(values) => format!("inline JSON ({} entries)", values.len()),
            Self::Location(location) => location.clone(),
        }
    }
}

/// Resolve a source into documents
pub async fn load(source: &JsonSource) -> Result<Vec<Document>, LoadError> {
    let origin = source.describe();
    let value = match source {
        JsonSource::Inline(values) => Value::Array(values.clone()),
        JsonSource::Location(url) if source.is_remote() => fetch(url).await?,
        JsonSource::Location(path) => read_file(path).await?,
    };

    let documents = documents_from_json(value, &origin)?;
    debug!(origin = %origin, documents = documents.len(), "Loaded documents");
    Ok(documents)
}

async fn fetch(url: &str) -> Result<Value, LoadError> {
    let fetch_error = |source| LoadError::Fetch {
        url: url.to_string(),
        source,
    };

    let response = reqwest::get(url)
        .await
        .and_then(|response| response.error_for_status())
        .map_err(fetch_error)?;
    response.json::<Value>().await.map_err(fetch_error)
}

async fn read_file(path: &str) -> Result<Value, LoadError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Read {
            path: PathBuf::from(path),
            source,
        })?;
    parse_json(&text, path)
}

/// Parse JSON text
pub fn parse_json(text: &str, origin: &str) -> Result<Value, LoadError> {
    serde_json::from_str(text).map_err(|source| LoadError::Parse {
        origin: origin.to_string(),
        source,
    })
}

/// Turn a JSON array into documents.
///
/// Entries that are not objects are dropped with a warning so one bad record
/// does not block the rest of the collection.
pub fn documents_from_json(value: Value, origin: &str) -> Result<Vec<Document>, LoadError> {
    let Value::Array(entries) = value else {
        return Err(LoadError::NotAnArray {
            origin: origin.to_string(),
        });
    };

    let mut documents = Vec::with_capacity(entries.len());
    for (position, entry) in entries.into_iter().enumerate() {
        match entry {
            Value::Object(document) => documents.push(document),
            other => {
                warn!(origin = %origin, position, kind = json_kind(&other), "Skipping non-object entry");
            }
        }
    }
    Ok(documents)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_documents_from_json_skips_non_objects() {
        let documents = documents_from_json(
            json!([{ "title": "a" }, 42, null, { "title": "b" }, "text"]),
            "test",
        )
        .unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[1]["title"], "b");
    }

    #[test]
    fn test_documents_from_json_rejects_non_array() {
        let err = documents_from_json(json!({ "title": "a" }), "test").unwrap_err();
        assert!(matches!(err, LoadError::NotAnArray { .. }));
    }

    #[test]
    fn test_source_classification() {
        assert!(JsonSource::Location("https://example.com/search.json".into()).is_remote());
        assert!(JsonSource::Location("http://localhost/search.json".into()).is_remote());
        assert!(!JsonSource::Location("_site/search.json".into()).is_remote());
        assert!(!JsonSource::Inline(Vec::new()).is_remote());
    }

    #[test]
    fn test_source_deserializes_untagged() {
        let inline: JsonSource = serde_json::from_value(json!([{ "title": "a" }])).unwrap();
        assert_eq!(inline, JsonSource::Inline(vec![json!({ "title": "a" })]));

        let location: JsonSource = serde_json::from_value(json!("search.json")).unwrap();
        assert_eq!(location, JsonSource::Location("search.json".into()));
    }

    #[tokio::test]
    async fn test_load_inline() {
        let source = JsonSource::Inline(vec![json!({ "title": "Apple Pie" })]);
        let documents = load(&source).await.unwrap();
        assert_eq!(documents.len(), 1);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"title": "Apple Pie"}}, {{"title": "Banana Bread"}}]"#).unwrap();

        let source = JsonSource::Location(file.path().to_string_lossy().into_owned());
        let documents = load(&source).await.unwrap();
        assert_eq!(documents.len(), 2);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let source = JsonSource::Location("/definitely/not/here.json".into());
        let err = load(&source).await.unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }

    #[tokio::test]
    async fn test_load_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let source = JsonSource::Location(file.path().to_string_lossy().into_owned());
        let err = load(&source).await.unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }
}
