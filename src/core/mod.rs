//! Core module containing fundamental traits and types for the data-access layer

pub mod deadline;
pub mod engine;
pub mod entity;
pub mod error;
pub mod field;
pub mod filter;
pub mod module;
pub mod patch;
pub mod query;
pub mod service;
pub mod store;

pub use deadline::Deadline;
pub use engine::{CompiledQuery, QueryEngine};
pub use entity::{Data, Entity};
pub use error::{
    ConfigError, EntityError, PatchError, QueryError, RegistrarError, RegistrarResult,
    RequestError, StorageError,
};
pub use field::{FieldDef, FieldKind, FieldType, FieldValue};
pub use filter::{FilterCriterion, FilterOperator};
pub use module::Module;
pub use patch::{JsonMergePatch, JsonPatch, Patch, PatchDocument};
pub use query::{ListParams, PageRequest, QueryRequest, SortOrder};
pub use service::{DataService, EntityService};
pub use store::QueryableStore;
