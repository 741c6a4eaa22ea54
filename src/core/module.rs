//! Module system
//!
//! A module bundles the entity types of one bounded area (the school
//! registry, a library, ...) and registers their routes.

use crate::config::RegistrarConfig;
use crate::server::entity_registry::EntityRegistry;

/// Trait for a group of entity registrations
pub trait Module: Send + Sync {
    /// Unique module name
    fn name(&self) -> &str;

    /// Module version
    fn version(&self) -> &str {
        "1.0.0"
    }

    /// Singular names of the entity types managed by this module
    fn entity_types(&self) -> Vec<&str>;

    /// Register entity descriptors with the registry
    ///
    /// Implementations skip entities the configuration disables and honour
    /// plural overrides.
    fn register_entities(&self, registry: &mut EntityRegistry, config: &RegistrarConfig);
}
