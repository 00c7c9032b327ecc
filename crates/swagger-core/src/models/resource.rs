use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::HttpMethod;

/// Filter term meaning "equal to"; rendered without a `__term` suffix.
pub const EXACT_FILTER: &str = "exact";

/// Static description of a REST resource: its name, allowed operations and
/// query capabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceMeta {
    pub resource_name: String,
    #[serde(default = "default_list_methods")]
    pub list_allowed_methods: Vec<HttpMethod>,
    #[serde(default = "default_detail_methods")]
    pub detail_allowed_methods: Vec<HttpMethod>,
    /// Field name -> allowed filter terms (`exact`, `gte`, `in`, ...).
    #[serde(default)]
    pub filtering: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub ordering: Vec<String>,
    /// Explicit tag grouping; defaults to the resource name.
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default_limit: Option<u32>,
}

fn default_list_methods() -> Vec<HttpMethod> {
    vec![HttpMethod::Get, HttpMethod::Post]
}

fn default_detail_methods() -> Vec<HttpMethod> {
    vec![
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
    ]
}

impl ResourceMeta {
    pub fn new(resource_name: impl Into<String>) -> Self {
        Self {
            resource_name: resource_name.into(),
            list_allowed_methods: default_list_methods(),
            detail_allowed_methods: default_detail_methods(),
            filtering: BTreeMap::new(),
            ordering: Vec::new(),
            tag: None,
            description: None,
            default_limit: None,
        }
    }

    /// Tag name the resource's paths are grouped under.
    pub fn tag_name(&self) -> &str {
        self.tag.as_deref().unwrap_or(&self.resource_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_name_falls_back_to_resource_name() {
        let mut meta = ResourceMeta::new("entry");
        assert_eq!(meta.tag_name(), "entry");
        meta.tag = Some("blog".to_string());
        assert_eq!(meta.tag_name(), "blog");
    }

    #[test]
    fn deserializes_with_framework_defaults() {
        let meta: ResourceMeta =
            serde_json::from_value(serde_json::json!({ "resource_name": "user" })).unwrap();
        assert_eq!(meta.list_allowed_methods, vec![HttpMethod::Get, HttpMethod::Post]);
        assert_eq!(meta.detail_allowed_methods.len(), 4);
        assert!(meta.filtering.is_empty());
    }
}
