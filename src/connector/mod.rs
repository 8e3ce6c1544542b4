//! # Connector Layer
//!
//! Adapters for external services (Gemini endpoints, MongoDB Atlas) and the
//! CLI-facing container/router wiring.

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::{Container, ContainerConfig, Router};
