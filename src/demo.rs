use std::sync::Arc;

use serde_json::json;
use swagger_core::{FieldDescriptor, FieldType, HttpMethod};
use swagger_registry::{Api, ModelResource, RegistryCatalog};

/// Module path the demo registries are registered under.
pub const DEMO_MODULE: &str = "demo.api";

const STATUS_DOC: &str = r#"{
  "/api/v1/status/": {
    "get": {
      "summary": "Service status",
      "tags": ["status"],
      "responses": { "200": { "description": "Service is up" } }
    }
  }
}"#;

/// A small blog API: entries, comments and users.
pub fn v1_api() -> Api {
    Api::new("v1")
        .register(
            ModelResource::new("entry")
                .tag("blog")
                .description("Blog entries")
                .field(FieldDescriptor::new("id", FieldType::Integer).readonly())
                .field(FieldDescriptor::new("title", FieldType::String).help_text("Headline"))
                .field(FieldDescriptor::new("slug", FieldType::String))
                .field(FieldDescriptor::new("body", FieldType::String).blank())
                .field(
                    FieldDescriptor::new("published", FieldType::Boolean)
                        .default_value(json!(false)),
                )
                .field(FieldDescriptor::new("pub_date", FieldType::DateTime).nullable())
                .field(FieldDescriptor::new("user", FieldType::ToOne).help_text("Author"))
                .filter("title", &["exact", "startswith"])
                .filter("pub_date", &["gte", "lte", "range"])
                .ordering(&["pub_date", "title"])
                .into_dyn(),
        )
        .register(
            ModelResource::new("comment")
                .tag("blog")
                .field(FieldDescriptor::new("id", FieldType::Integer).readonly())
                .field(FieldDescriptor::new("entry", FieldType::ToOne))
                .field(FieldDescriptor::new("text", FieldType::String))
                .filter("entry", &["exact"])
                .into_dyn(),
        )
        .register(
            ModelResource::new("user")
                .description("Registered users")
                .field(FieldDescriptor::new("id", FieldType::Integer).readonly())
                .field(FieldDescriptor::new("username", FieldType::String))
                .field(FieldDescriptor::new("groups", FieldType::ToMany).blank())
                .list_allowed_methods(&[HttpMethod::Get])
                .detail_allowed_methods(&[HttpMethod::Get])
                .default_limit(50)
                .into_dyn(),
        )
        .register(
            ModelResource::new("status")
                .description("Service status")
                .doc(STATUS_DOC)
                .into_dyn(),
        )
}

/// Catalog with the demo registry at `demo.api` / `v1_api`.
pub fn catalog() -> RegistryCatalog {
    RegistryCatalog::new().register_instance(DEMO_MODULE, "v1_api", Arc::new(v1_api()))
}
