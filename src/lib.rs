//! Library exports.
//!
//! Re-exports the extracted crates so host applications depend on a single
//! package, and ships the demo registries used by the bundled binary.

pub mod demo;

pub use swagger_actix as actix;
pub use swagger_config as config;
pub use swagger_core as core;
pub use swagger_observability as observability;
pub use swagger_openapi as openapi;
pub use swagger_ports as ports;
pub use swagger_registry as registry;
pub use swagger_server as server;
