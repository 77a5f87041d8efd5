//! Template renderer port.
//!
//! Handlers assemble a [`TemplateData`] bag and name a page; the renderer
//! turns that into HTML. The workflow never sees markup.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::forms::{Form, FormView};
use crate::domain::foundation::ErrorCode;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("Unknown page: {0}")]
    UnknownPage(String),

    #[error("Failed to render {page}: {message}")]
    Render { page: String, message: String },

    #[error("Failed to build template cache: {0}")]
    CacheBuild(String),
}

impl RenderError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::TemplateError
    }
}

/// Data bag handed to every page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TemplateData {
    pub string_map: BTreeMap<String, String>,
    pub data: Map<String, Value>,
    pub flash: Option<String>,
    pub warning: Option<String>,
    pub error: Option<String>,
    pub form: Option<FormView>,
}

impl TemplateData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(mut self, form: &Form) -> Self {
        self.form = Some(form.view());
        self
    }

    /// Adds a named value; a value that fails to serialize is stored as null.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let key = key.into();
        let value = serde_json::to_value(value).unwrap_or_else(|e| {
            tracing::warn!(key = %key, error = %e, "Template data value not serializable");
            Value::Null
        });
        self.data.insert(key, value);
        self
    }

    pub fn with_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.string_map.insert(key.into(), value.into());
        self
    }
}

/// Port for rendering named pages.
pub trait TemplateRenderer: Send + Sync {
    /// # Errors
    ///
    /// - `UnknownPage` if no template is registered under `page`
    /// - `Render` if the template fails to evaluate
    fn render(&self, page: &str, data: &TemplateData) -> Result<String, RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forms::FormValues;

    #[test]
    fn with_form_captures_errors() {
        let mut form = Form::new(FormValues::from_pairs([("email", "nope")]));
        form.is_email("email");
        let data = TemplateData::new().with_form(&form);
        let view = data.form.unwrap();
        assert!(!view.valid);
        assert!(view.errors.contains_key("email"));
    }

    #[test]
    fn with_data_serializes_values() {
        let data = TemplateData::new()
            .with_data("count", 3)
            .with_string("title", "Rooms");
        assert_eq!(data.data.get("count"), Some(&Value::from(3)));
        assert_eq!(data.string_map.get("title").map(String::as_str), Some("Rooms"));
    }
}
