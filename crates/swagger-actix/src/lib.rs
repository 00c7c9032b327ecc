//! Actix-web HTTP surface for the documentation service.
//!
//! This crate intentionally contains framework-specific code (views, routing and
//! middleware). Document generation lives in `swagger-openapi`, registry
//! resolution in `swagger-registry`.

pub mod context;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use context::{ViewContext, RESERVED_CONTEXT_KEYS};
pub use middleware::{MetricsMiddleware, UNMATCHED_ROUTE};
pub use routes::configure;
pub use state::{SwaggerState, ViewSettings};
