use std::sync::Arc;

use swagger_core::{FieldDescriptor, ResourceMeta};

/// A REST resource: one collection/entity type with its fields and allowed
/// operations.
pub trait Resource: Send + Sync {
    fn meta(&self) -> &ResourceMeta;

    fn fields(&self) -> &[FieldDescriptor];

    /// Free-form documentation attached to the resource.
    ///
    /// When this parses as JSON it replaces the generated path fragment.
    fn doc(&self) -> Option<&str> {
        None
    }
}

pub type DynResource = Arc<dyn Resource>;

/// An API registry: a versioned namespace mapping resource names to resources.
pub trait ApiRegistry: Send + Sync {
    /// Registry name, also the version segment of generated URLs (e.g. `v1`).
    fn api_name(&self) -> &str;

    /// URL prefix the registry is mounted under.
    fn url_prefix(&self) -> &str {
        "/api"
    }

    /// Names of all registered resources, in no particular order.
    fn resource_names(&self) -> Vec<String>;

    fn resource(&self, name: &str) -> Option<DynResource>;
}

pub type DynRegistry = Arc<dyn ApiRegistry>;
