use std::collections::BTreeMap;
use std::sync::Arc;

use swagger_core::{FieldDescriptor, HttpMethod, ResourceMeta};
use swagger_ports::{ApiRegistry, DynResource, Resource};

/// In-memory API registry keyed by resource name.
#[derive(Clone)]
pub struct Api {
    api_name: String,
    url_prefix: String,
    registry: BTreeMap<String, DynResource>,
}

impl Api {
    pub fn new(api_name: impl Into<String>) -> Self {
        Self {
            api_name: api_name.into(),
            url_prefix: "/api".to_string(),
            registry: BTreeMap::new(),
        }
    }

    pub fn with_url_prefix(mut self, url_prefix: impl Into<String>) -> Self {
        self.url_prefix = url_prefix.into();
        self
    }

    /// Register a resource under its `resource_name`, replacing any resource
    /// already registered with that name.
    pub fn register(mut self, resource: DynResource) -> Self {
        let name = resource.meta().resource_name.clone();
        if self.registry.insert(name.clone(), resource).is_some() {
            tracing::warn!(
                api_name = %self.api_name,
                resource = %name,
                "resource registered twice; keeping the latest registration"
            );
        }
        self
    }

    pub fn unregister(&mut self, resource_name: &str) -> Option<DynResource> {
        self.registry.remove(resource_name)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

impl ApiRegistry for Api {
    fn api_name(&self) -> &str {
        &self.api_name
    }

    fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    fn resource_names(&self) -> Vec<String> {
        self.registry.keys().cloned().collect()
    }

    fn resource(&self, name: &str) -> Option<DynResource> {
        self.registry.get(name).cloned()
    }
}

/// Resource described entirely by data: metadata, fields and an optional
/// documentation string.
#[derive(Debug, Clone)]
pub struct ModelResource {
    meta: ResourceMeta,
    fields: Vec<FieldDescriptor>,
    doc: Option<String>,
}

impl ModelResource {
    pub fn new(resource_name: impl Into<String>) -> Self {
        Self::from_meta(ResourceMeta::new(resource_name))
    }

    pub fn from_meta(meta: ResourceMeta) -> Self {
        Self {
            meta,
            fields: Vec::new(),
            doc: None,
        }
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn list_allowed_methods(mut self, methods: &[HttpMethod]) -> Self {
        self.meta.list_allowed_methods = methods.to_vec();
        self
    }

    pub fn detail_allowed_methods(mut self, methods: &[HttpMethod]) -> Self {
        self.meta.detail_allowed_methods = methods.to_vec();
        self
    }

    pub fn filter(mut self, field: impl Into<String>, terms: &[&str]) -> Self {
        self.meta
            .filtering
            .insert(field.into(), terms.iter().map(|t| t.to_string()).collect());
        self
    }

    pub fn ordering(mut self, fields: &[&str]) -> Self {
        self.meta.ordering = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.meta.tag = Some(tag.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.meta.description = Some(description.into());
        self
    }

    pub fn default_limit(mut self, limit: u32) -> Self {
        self.meta.default_limit = Some(limit);
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn into_dyn(self) -> DynResource {
        Arc::new(self)
    }
}

impl Resource for ModelResource {
    fn meta(&self) -> &ResourceMeta {
        &self.meta
    }

    fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swagger_core::FieldType;

    #[test]
    fn registers_by_resource_name() {
        let api = Api::new("v1")
            .register(ModelResource::new("user").into_dyn())
            .register(
                ModelResource::new("entry")
                    .field(FieldDescriptor::new("title", FieldType::String))
                    .into_dyn(),
            );

        assert_eq!(api.api_name(), "v1");
        assert_eq!(api.url_prefix(), "/api");
        assert_eq!(api.resource_names(), vec!["entry", "user"]);
        assert_eq!(api.resource("entry").unwrap().fields().len(), 1);
        assert!(api.resource("missing").is_none());
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let mut api = Api::new("v1")
            .register(ModelResource::new("entry").into_dyn())
            .register(ModelResource::new("entry").doc("second").into_dyn());

        assert_eq!(api.len(), 1);
        assert_eq!(api.resource("entry").unwrap().doc(), Some("second"));

        assert!(api.unregister("entry").is_some());
        assert!(api.is_empty());
    }
}
