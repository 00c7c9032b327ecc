use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value kind of a resource field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Integer,
    Float,
    Decimal,
    Boolean,
    Date,
    DateTime,
    Time,
    List,
    Dict,
    /// Reference to a single related resource, rendered as its URI.
    ToOne,
    /// References to many related resources, rendered as a list of URIs.
    ToMany,
    File,
}

impl FieldType {
    pub fn is_related(&self) -> bool {
        matches!(self, FieldType::ToOne | FieldType::ToMany)
    }
}

/// Describes one field exposed by a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub help_text: Option<String>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub blank: bool,
    #[serde(default)]
    pub readonly: bool,
    #[serde(default)]
    pub default: Option<Value>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            help_text: None,
            nullable: false,
            blank: false,
            readonly: false,
            default: None,
        }
    }

    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn blank(mut self) -> Self {
        self.blank = true;
        self
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// A writable field a client must always send on create / full update.
    pub fn is_required(&self) -> bool {
        !self.readonly && !self.nullable && !self.blank && self.default.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_excludes_optional_shapes() {
        assert!(FieldDescriptor::new("title", FieldType::String).is_required());
        assert!(!FieldDescriptor::new("id", FieldType::Integer)
            .readonly()
            .is_required());
        assert!(!FieldDescriptor::new("body", FieldType::String)
            .blank()
            .is_required());
        assert!(!FieldDescriptor::new("published", FieldType::Boolean)
            .default_value(Value::Bool(false))
            .is_required());
        assert!(!FieldDescriptor::new("parent", FieldType::ToOne)
            .nullable()
            .is_required());
    }
}
