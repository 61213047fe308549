//! Result templating.
//!
//! Templates contain `{key}` placeholders that are replaced with the matching
//! field of a [`SearchHit`]. `{query}` resolves to the query that produced the
//! hit. Placeholders with no usable value are left as written.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::search::SearchHit;

/// Default template for one rendered result
pub const DEFAULT_TEMPLATE: &str = r#"<li><a href="{url}" title="{desc}">{title}</a></li>"#;

/// Hook receiving `(placeholder, value, template)`; returning `Some` replaces
/// the substitution.
pub type MiddlewareFn = Arc<dyn Fn(&str, Option<&Value>, &str) -> Option<String> + Send + Sync>;

#[derive(Clone, Default)]
pub enum TemplateMiddleware {
    #[default]
    None,
    Custom(MiddlewareFn),
}

impl fmt::Debug for TemplateMiddleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl TemplateMiddleware {
    pub fn custom<F>(hook: F) -> Self
    where
        F: Fn(&str, Option<&Value>, &str) -> Option<String> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(hook))
    }

    fn apply(&self, prop: &str, value: Option<&Value>, template: &str) -> Option<String> {
        match self {
            Self::None => None,
            Self::Custom(hook) => hook(prop, value, template),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Templater {
    template: String,
    middleware: TemplateMiddleware,
}

impl Default for Templater {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl Templater {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            middleware: TemplateMiddleware::None,
        }
    }

    pub fn with_middleware(mut self, middleware: TemplateMiddleware) -> Self {
        self.middleware = middleware;
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render one hit
    pub fn compile(&self, hit: &SearchHit) -> String {
        let template = self.template.as_str();
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            // A placeholder ends at the first `}` on the same line
            let close = after
                .find(['}', '\n'])
                .filter(|&i| after.as_bytes()[i] == b'}');

            match close {
                Some(close) => {
                    let prop = &after[..close];
                    out.push_str(&self.substitute(prop, hit, &rest[open..open + close + 2]));
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }

    fn substitute(&self, prop: &str, hit: &SearchHit, placeholder: &str) -> String {
        let value = hit.field(prop);
        if let Some(replaced) = self.middleware.apply(prop, value.as_ref(), &self.template) {
            return replaced;
        }

        match value {
            Some(value) if is_blank(&value) => placeholder.to_string(),
            Some(Value::String(text)) => text,
            Some(other) => other.to_string(),
            None => placeholder.to_string(),
        }
    }
}

/// Values that leave their placeholder untouched: null, `""`, `false` and zero
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}
