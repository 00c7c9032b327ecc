//! Integration ports for the documentation service.
//!
//! Implement these traits for your REST framework's API registry and resource
//! types to have them documented without forking.

pub mod registry;

pub use registry::*;
