//! Framework-agnostic domain types for the resource documentation service.
//!
//! Resource metadata, field descriptors and errors live here so that REST
//! frameworks can describe their resources without depending on the HTTP layer.

pub mod models;
pub mod urls;

pub use models::*;
