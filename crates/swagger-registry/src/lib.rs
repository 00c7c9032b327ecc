//! Registry resolution for the documentation service.
//!
//! Host applications register their API registries in a [`RegistryCatalog`]
//! and the [`RegistryLoader`] resolves the configured entries against it on
//! every request.

pub mod api;
pub mod catalog;
pub mod loader;

pub use api::{Api, ModelResource};
pub use catalog::{RegistryCatalog, RegistryFactory};
pub use loader::RegistryLoader;

pub use swagger_ports::{ApiRegistry, DynRegistry, DynResource, Resource};
