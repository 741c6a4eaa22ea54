//! Server module for building HTTP servers with auto-registered routes
//!
//! This module provides a `ServerBuilder` that registers:
//! - CRUD routes for all entities declared in modules
//! - Health routes for liveness probes

pub mod builder;
pub mod crud;
pub mod entity_registry;
pub mod exposure;

pub use builder::ServerBuilder;
pub use crud::CrudDescriptor;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
