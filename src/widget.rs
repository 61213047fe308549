//! Search widget: drives a [`SearchIndex`] from user input and renders the
//! results slot.

use tracing::{debug, info, instrument};

use crate::loader;
use crate::options::{WidgetError, WidgetOptions};
use crate::search::{Document, SearchHit, SearchIndex, SortStrategy};
use crate::template::{TemplateMiddleware, Templater};

/// Key codes that never trigger a search (enter, shift, caps lock, arrows, meta)
const IGNORED_KEYS: [u32; 8] = [13, 16, 20, 37, 38, 39, 40, 91];

/// Whether a keystroke with this code should run a search
pub fn is_whitelisted_key(code: u32) -> bool {
    !IGNORED_KEYS.contains(&code)
}

/// Whether a query should reach the index at all
pub fn is_valid_query(query: &str) -> bool {
    !query.trim().is_empty()
}

/// Rendered state of the results slot
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResults {
    pub title: String,
    /// Concatenated rendered hits, or the no-results text
    pub body: String,
    /// Whether the page content next to the results should be shown
    pub content_visible: bool,
    pub hits: Vec<SearchHit>,
}

impl RenderedResults {
    fn idle(title: &str) -> Self {
        Self {
            title: title.to_string(),
            body: String::new(),
            content_visible: true,
            hits: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Widget {
    index: SearchIndex,
    templater: Templater,
    options: WidgetOptions,
}

impl Widget {
    /// Build a widget over documents that are already in memory.
    ///
    /// The `json` option is not required here since the documents are given.
    pub fn with_documents(options: WidgetOptions, documents: Vec<Document>) -> Result<Self, WidgetError> {
        let search_options = options.search_options()?;
        let mut index = SearchIndex::with_options(search_options)?;
        index.put(documents);

        info!(documents = index.len(), fuzzy = options.fuzzy, "Search widget initialized");
        Ok(Self {
            templater: Templater::new(options.search_result_template.clone()),
            index,
            options,
        })
    }

    /// Validate options, load the configured documents and build the widget
    pub async fn load(options: WidgetOptions) -> Result<Self, WidgetError> {
        Self::load_with(options, |_| {}).await
    }

    /// Like [`load`](Self::load), handing the documents to `success` before
    /// they are indexed
    pub async fn load_with<F>(options: WidgetOptions, success: F) -> Result<Self, WidgetError>
    where
        F: FnOnce(&[Document]),
    {
        options.validate()?;
        let source = options
            .json
            .as_ref()
            .ok_or_else(|| WidgetError::MissingOptions(vec!["json".to_string()]))?;

        info!(source = %source.describe(), "Loading documents");
        let documents = loader::load(source).await?;
        success(&documents);
        Self::with_documents(options, documents)
    }

    /// Replace the rendering hook
    pub fn with_template_middleware(mut self, middleware: TemplateMiddleware) -> Self {
        self.templater = self.templater.with_middleware(middleware);
        self
    }

    /// Replace the sort strategy, e.g. with a custom comparator
    pub fn with_sort(mut self, sort: SortStrategy) -> Result<Self, WidgetError> {
        let search_options = self.index.options().clone().with_sort(sort);
        self.index.configure(search_options)?;
        Ok(self)
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    /// Replace the indexed documents
    pub fn put(&mut self, documents: Vec<Document>) {
        self.index.put(documents);
    }

    /// Run a query and render the results slot
    #[instrument(level = "debug", skip(self))]
    pub fn search(&self, query: &str) -> RenderedResults {
        if !is_valid_query(query) {
            debug!("Ignoring blank query");
            return RenderedResults::idle(&self.options.results_title);
        }

        let hits: Vec<SearchHit> = self
            .index
            .search(query)
            .into_iter()
            .map(|hit| hit.with_query(query))
            .collect();

        if hits.is_empty() {
            return RenderedResults {
                title: self.options.no_results_title_text.clone(),
                body: self.options.no_results_text.clone(),
                content_visible: false,
                hits,
            };
        }

        RenderedResults {
            title: format!("{} {}", hits.len(), self.options.results_title_text),
            body: hits.iter().map(|hit| self.templater.compile(hit)).collect(),
            content_visible: false,
            hits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn docs(values: Vec<Value>) -> Vec<Document> {
        values
            .into_iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect()
    }

    fn widget() -> Widget {
        let options = WidgetOptions {
            search_result_template: "<li>{title}</li>".to_string(),
            results_title: "Search".to_string(),
            ..WidgetOptions::default()
        };
        Widget::with_documents(
            options,
            docs(vec![
                json!({ "title": "Apple Pie", "url": "/apple/" }),
                json!({ "title": "Apple Crumble", "url": "/crumble/" }),
                json!({ "title": "Banana Bread", "url": "/banana/" }),
            ]),
        )
        .unwrap()
    }

    #[test]
    fn test_key_whitelist() {
        assert!(!is_whitelisted_key(13));
        assert!(!is_whitelisted_key(38));
        assert!(!is_whitelisted_key(91));
        assert!(is_whitelisted_key(65));
        assert!(is_whitelisted_key(8));
    }

    #[test]
    fn test_blank_query_restores_idle_state() {
        let rendered = widget().search("   ");
        assert_eq!(rendered.title, "Search");
        assert!(rendered.body.is_empty());
        assert!(rendered.content_visible);
    }

    #[test]
    fn test_results_are_rendered() {
        let rendered = widget().search("apple");
        assert_eq!(rendered.title, "2 results found");
        assert_eq!(rendered.body, "<li>Apple Pie</li><li>Apple Crumble</li>");
        assert!(!rendered.content_visible);
        assert!(rendered.hits.iter().all(|hit| hit.query() == Some("apple")));
    }

    #[test]
    fn test_no_results() {
        let rendered = widget().search("cherry");
        assert_eq!(rendered.title, "No results found");
        assert_eq!(rendered.body, "No results found");
        assert!(rendered.hits.is_empty());
    }

    #[test]
    fn test_annotation_does_not_leak_into_index() {
        let widget = widget();
        widget.search("apple");
        assert!(widget.index().documents().iter().all(|d| d.get("query").is_none()));
    }

    #[test]
    fn test_custom_sort() {
        let widget = widget()
            .with_sort(SortStrategy::custom(|a, b| {
                let title = |d: &Document| d["title"].as_str().unwrap_or_default().to_string();
                title(b).cmp(&title(a))
            }))
            .unwrap();
        let rendered = widget.search("apple");
        assert_eq!(rendered.body, "<li>Apple Pie</li><li>Apple Crumble</li>");

        let rendered = widget.search("a");
        assert_eq!(
            rendered.body,
            "<li>Banana Bread</li><li>Apple Pie</li><li>Apple Crumble</li>"
        );
    }

    #[test]
    fn test_template_middleware_reaches_rendered_body() {
        let options = WidgetOptions {
            search_result_template: "<li>{title} ({date})</li>".to_string(),
            ..WidgetOptions::default()
        };
        let widget = Widget::with_documents(
            options,
            docs(vec![
                json!({ "title": "Apple Pie", "date": "2024-03-01T10:00:00Z" }),
                json!({ "title": "Banana Bread", "date": "2023-12-24T08:30:00Z" }),
            ]),
        )
        .unwrap()
        .with_template_middleware(TemplateMiddleware::custom(|prop, value, _template| {
            match (prop, value.and_then(Value::as_str)) {
                ("date", Some(date)) => date.split('T').next().map(str::to_string),
                _ => None,
            }
        }));

        let rendered = widget.search("apple");
        assert_eq!(rendered.body, "<li>Apple Pie (2024-03-01)</li>");

        let rendered = widget.search("bread");
        assert_eq!(rendered.body, "<li>Banana Bread (2023-12-24)</li>");
    }

    #[test]
    fn test_put_replaces_previous_documents() {
        let mut widget = widget();
        assert_eq!(widget.search("apple").hits.len(), 2);

        widget.put(docs(vec![json!({ "title": "Cherry Tart", "url": "/cherry/" })]));
        assert_eq!(widget.index().len(), 1);

        let rendered = widget.search("apple");
        assert!(rendered.hits.is_empty());
        assert_eq!(rendered.title, "No results found");

        let rendered = widget.search("cherry");
        assert_eq!(rendered.title, "1 results found");
        assert_eq!(rendered.body, "<li>Cherry Tart</li>");
    }

    #[test]
    fn test_invalid_limit_fails_at_construction() {
        let options = WidgetOptions {
            limit: -5,
            ..WidgetOptions::default()
        };
        let err = Widget::with_documents(options, Vec::new()).unwrap_err();
        assert!(matches!(err, WidgetError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_load_requires_json() {
        let err = Widget::load(WidgetOptions::default()).await.unwrap_err();
        assert!(matches!(err, WidgetError::MissingOptions(_)));
    }

    #[tokio::test]
    async fn test_load_with_success_callback() {
        let options = WidgetOptions {
            json: Some(crate::loader::JsonSource::Inline(vec![json!({ "title": "Apple Pie" })])),
            ..WidgetOptions::default()
        };
        let mut seen = 0;
        let widget = Widget::load_with(options, |documents| seen = documents.len())
            .await
            .unwrap();
        assert_eq!(seen, 1);
        assert_eq!(widget.index().len(), 1);
    }
}
