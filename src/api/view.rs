//! View payloads handed to the rendering layer

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// Template name, page title and the data bag for the template.
///
/// Serialized flat: `{ "template": ..., "title": ..., <context keys> }`.
#[derive(Debug, Clone, Serialize)]
pub struct View {
    pub template: &'static str,
    pub title: String,
    #[serde(flatten)]
    pub context: Map<String, Value>,
}

impl View {
    pub fn new(template: &'static str, title: impl Into<String>) -> Self {
        Self {
            template,
            title: title.into(),
            context: Map::new(),
        }
    }

    /// Add a value to the data bag
    pub fn with(mut self, key: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or_else(|e| {
            tracing::error!("Cannot serialize '{}' for view {}: {}", key, self.template, e);
            Value::Null
        });
        self.context.insert(key.to_string(), value);
        self
    }
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
