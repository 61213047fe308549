//! Widget options.
//!
//! Options are layered: built-in defaults, then an optional TOML config file,
//! then per-field overrides (command line or environment). Each layer only
//! replaces the fields it sets.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::loader::{JsonSource, LoadError};
use crate::search::{ConfigurationError, DEFAULT_SEARCH_LIMIT, SearchOptions, SortOrder, SortStrategy};
use crate::template::DEFAULT_TEMPLATE;

/// Options that must be present before a widget can start
pub const REQUIRED_OPTIONS: &[&str] = &["json"];

pub const DEFAULT_RESULTS_TITLE_TEXT: &str = "results found";
pub const DEFAULT_NO_RESULTS_TITLE_TEXT: &str = "No results found";
pub const DEFAULT_NO_RESULTS_TEXT: &str = "No results found";

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("You must specify the following required options: {}", .0.join(", "))]
    MissingOptions(Vec<String>),

    #[error("invalid search configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Sort by a single document field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSort {
    pub field: String,
    #[serde(default)]
    pub order: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetOptions {
    /// Document source: an inline array, a file path, or a URL
    pub json: Option<JsonSource>,
    pub search_result_template: String,
    /// Title shown while no search is active
    pub results_title: String,
    pub results_title_text: String,
    pub no_results_title_text: String,
    pub no_results_text: String,
    /// Signed so negative values reach validation instead of failing to parse
    pub limit: i64,
    pub fuzzy: bool,
    pub exclude: Vec<String>,
    pub sort: Option<FieldSort>,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            json: None,
            search_result_template: DEFAULT_TEMPLATE.to_string(),
            results_title: String::new(),
            results_title_text: DEFAULT_RESULTS_TITLE_TEXT.to_string(),
            no_results_title_text: DEFAULT_NO_RESULTS_TITLE_TEXT.to_string(),
            no_results_text: DEFAULT_NO_RESULTS_TEXT.to_string(),
            limit: DEFAULT_SEARCH_LIMIT as i64,
            fuzzy: false,
            exclude: Vec::new(),
            sort: None,
        }
    }
}

/// Field-by-field overrides applied on top of [`WidgetOptions`]
#[derive(Debug, Clone, Default)]
pub struct OptionOverrides {
    pub json: Option<JsonSource>,
    pub search_result_template: Option<String>,
    pub fuzzy: Option<bool>,
    pub limit: Option<i64>,
    pub exclude: Option<Vec<String>>,
    pub sort: Option<FieldSort>,
}

impl WidgetOptions {
    pub fn from_toml_str(text: &str) -> Result<Self, WidgetError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, WidgetError> {
        let text = std::fs::read_to_string(path).map_err(|source| WidgetError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn merge(mut self, overrides: OptionOverrides) -> Self {
        if let Some(json) = overrides.json {
            self.json = Some(json);
        }
        if let Some(template) = overrides.search_result_template {
            self.search_result_template = template;
        }
        if let Some(fuzzy) = overrides.fuzzy {
            self.fuzzy = fuzzy;
        }
        if let Some(limit) = overrides.limit {
            self.limit = limit;
        }
        if let Some(exclude) = overrides.exclude {
            self.exclude = exclude;
        }
        if let Some(sort) = overrides.sort {
            self.sort = Some(sort);
        }
        self
    }

    /// Names of required options that are not set
    pub fn missing_required(&self) -> Vec<String> {
        REQUIRED_OPTIONS
            .iter()
            .filter(|name| match **name {
                "json" => self.json.is_none(),
                _ => false,
            })
            .map(|name| name.to_string())
            .collect()
    }

    pub fn validate(&self) -> Result<(), WidgetError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(WidgetError::MissingOptions(missing));
        }
        self.search_options()?;
        Ok(())
    }

    /// Core search options described by these widget options
    pub fn search_options(&self) -> Result<SearchOptions, ConfigurationError> {
        let sort = match &self.sort {
            Some(FieldSort { field, order }) => SortStrategy::by_field(field.clone(), *order),
            None => SortStrategy::Ingestion,
        };

        let options = SearchOptions::default()
            .with_fuzzy(self.fuzzy)
            .try_with_limit(self.limit)?
            .with_sort(sort)
            .with_exclude(self.exclude.iter().cloned());
        options.validate()?;
        Ok(options)
    }
}
