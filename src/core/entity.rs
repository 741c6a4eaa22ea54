//! Entity traits defining the core abstraction for all data types

use crate::core::field::{FieldDef, FieldKind, FieldValue, find_field};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Base trait for all entities in the system.
///
/// Every record handled by the data-access layer is identified by a UUID
/// and lives under a resource name used for routing and logging.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "students", "classes")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "student", "class")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Replace the identifier (used when a store assigns a fresh id)
    fn set_id(&mut self, id: Uuid);
}

/// Trait for data entities that can be queried by field name.
///
/// Data entities extend the base Entity with:
/// - fields: the static field registry, resolved by name at query time
/// - searchable_fields: the fields matched by free-text search
/// - field_value: dynamic field access
pub trait Data: Entity + Serialize + DeserializeOwned {
    /// Static registry of every queryable field
    fn fields() -> &'static [FieldDef];

    /// Fields matched by free-text search
    ///
    /// An empty list means "every string field".
    fn searchable_fields() -> &'static [&'static str];

    /// Get the value of a specific field by its declared name
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Resolve a requested field name against the registry
    fn field(name: &str) -> Option<&'static FieldDef> {
        find_field(Self::fields(), name)
    }

    /// The string fields free-text search runs against
    ///
    /// Fails with the offending name when a declared searchable field is
    /// missing from the registry.
    fn search_targets() -> Result<Vec<&'static FieldDef>, &'static str> {
        let declared = Self::searchable_fields();
        if declared.is_empty() {
            return Ok(Self::fields()
                .iter()
                .filter(|def| def.kind == FieldKind::String)
                .collect());
        }
        declared
            .iter()
            .map(|name| Self::field(name).ok_or(*name))
            .collect()
    }
}
