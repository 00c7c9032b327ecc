//! Resource documentation generation.
//!
//! [`ResourceSwaggerMapping`] turns one registered resource into path
//! fragments and a tag; [`DocumentBuilder`] aggregates every configured
//! registry into the OpenAPI document served to Swagger UI.

pub mod document;
pub mod mapping;
pub mod schema;

pub use document::{Aggregate, DocumentBuilder, LEGACY_SWAGGER_VERSION, OPENAPI_VERSION};
pub use mapping::ResourceSwaggerMapping;
