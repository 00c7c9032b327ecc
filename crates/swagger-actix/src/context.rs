use actix_web::HttpResponse;
use serde_json::{json, Map, Value};

/// View-scoped keys removed before a context is rendered as JSON.
pub const RESERVED_CONTEXT_KEYS: [&str; 2] = ["params", "view"];

/// Context shared by the template and JSON views: the view name, the request
/// query parameters, and the view's payload.
#[derive(Debug, Clone, Default)]
pub struct ViewContext(Map<String, Value>);

impl ViewContext {
    pub fn new(view: &str, params: Map<String, Value>) -> Self {
        let mut context = Map::new();
        context.insert("view".to_string(), json!(view));
        context.insert("params".to_string(), Value::Object(params));
        Self(context)
    }

    /// Build the `params` entry from a raw query string.
    pub fn params_from_query(query: &str) -> Map<String, Value> {
        url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
            .collect()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn extend(&mut self, payload: Map<String, Value>) {
        self.0.extend(payload);
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The payload with view-scoped keys stripped.
    pub fn into_json_body(mut self) -> Map<String, Value> {
        for key in RESERVED_CONTEXT_KEYS {
            self.0.remove(key);
        }
        self.0
    }

    /// Render as an `application/json` response.
    pub fn render_json(self) -> HttpResponse {
        HttpResponse::Ok().json(self.into_json_body())
    }
}
