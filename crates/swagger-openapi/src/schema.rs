//! Field descriptors rendered as JSON schemas (OpenAPI 3) and Swagger 1.1
//! data types.

use serde_json::{json, Map, Value};
use swagger_core::{FieldDescriptor, FieldType};

/// Bare schema for a field type.
pub fn type_schema(field_type: FieldType) -> Value {
    match field_type {
        FieldType::String => json!({ "type": "string" }),
        FieldType::Integer => json!({ "type": "integer", "format": "int64" }),
        FieldType::Float => json!({ "type": "number", "format": "double" }),
        FieldType::Decimal => json!({ "type": "string", "format": "decimal" }),
        FieldType::Boolean => json!({ "type": "boolean" }),
        FieldType::Date => json!({ "type": "string", "format": "date" }),
        FieldType::DateTime => json!({ "type": "string", "format": "date-time" }),
        FieldType::Time => json!({ "type": "string", "format": "time" }),
        FieldType::List => json!({ "type": "array", "items": {} }),
        FieldType::Dict => json!({ "type": "object" }),
        FieldType::ToOne => json!({ "type": "string", "format": "uri" }),
        FieldType::ToMany => json!({
            "type": "array",
            "items": { "type": "string", "format": "uri" }
        }),
        FieldType::File => json!({ "type": "string", "format": "binary" }),
    }
}

/// Schema for a field, including its documentation and nullability.
pub fn field_schema(field: &FieldDescriptor) -> Value {
    let mut schema = type_schema(field.field_type);
    if let Value::Object(map) = &mut schema {
        if let Some(help_text) = &field.help_text {
            map.insert("description".to_string(), json!(help_text));
        }
        if field.nullable {
            map.insert("nullable".to_string(), json!(true));
        }
        if field.readonly {
            map.insert("readOnly".to_string(), json!(true));
        }
        if let Some(default) = &field.default {
            map.insert("default".to_string(), default.clone());
        }
    }
    schema
}

/// Which fields an object schema lists and which it marks required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectShape {
    /// Everything the server returns.
    Response,
    /// Writable fields, with the mandatory ones required.
    Create,
    /// Writable fields, none required.
    PartialUpdate,
}

pub fn object_schema(fields: &[FieldDescriptor], shape: ObjectShape) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in fields {
        if shape != ObjectShape::Response && field.readonly {
            continue;
        }
        properties.insert(field.name.clone(), field_schema(field));
        if shape == ObjectShape::Create && field.is_required() {
            required.push(json!(field.name));
        }
    }

    let mut schema = Map::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".to_string(), Value::Array(required));
    }
    Value::Object(schema)
}

/// Type a filter value is sent as. Multi-value terms are comma separated
/// strings; related fields are filtered by key.
pub fn filter_value_type(field_type: Option<FieldType>, term: &str) -> FieldType {
    match (term, field_type) {
        ("in" | "range", _) => FieldType::String,
        ("isnull", _) => FieldType::Boolean,
        (_, Some(field_type)) if field_type.is_related() => FieldType::String,
        (_, Some(field_type)) => field_type,
        (_, None) => FieldType::String,
    }
}

/// Swagger 1.1 `dataType` / property `type` for a field type.
pub fn legacy_data_type(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::String | FieldType::ToOne | FieldType::File => "string",
        FieldType::Integer => "int",
        FieldType::Float | FieldType::Decimal => "float",
        FieldType::Boolean => "boolean",
        FieldType::Date => "date",
        FieldType::DateTime => "dateTime",
        FieldType::Time => "time",
        FieldType::List | FieldType::ToMany => "List",
        FieldType::Dict => "Object",
    }
}
