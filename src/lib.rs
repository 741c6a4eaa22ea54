//! # Registrar
//!
//! A generic data-access layer for school-management APIs in Rust.
//!
//! ## Features
//!
//! - **Query Engine**: filter, search, sort and paginate any entity type
//!   with validation-first error semantics
//! - **Field Registry**: compile-time field tables instead of runtime reflection
//! - **Generic CRUD**: one `EntityService<T>` per table, with deadlines
//! - **Partial Updates**: JSON Patch and JSON Merge Patch
//! - **Macro-Generated Entities**: one `impl_data_entity!` call per table
//! - **Configuration-Based**: server, query defaults and entity exposure via YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use registrar::prelude::*;
//!
//! let module = SchoolModule::in_memory();
//! module
//!     .students
//!     .create(
//!         Student::new(
//!             "Ada".to_string(),
//!             "Lovelace".to_string(),
//!             "ada@school.test".to_string(),
//!             NaiveDate::from_ymd_opt(2010, 12, 10).unwrap(),
//!             NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
//!             9,
//!             None,
//!             true,
//!         ),
//!         Deadline::none(),
//!     )
//!     .await?;
//!
//! let request = QueryRequest::page(1, 10)
//!     .filter(FilterCriterion::equal("GradeLevel", "9"))
//!     .sort("LastName", "asc");
//! let page = module.students.get(&request, Deadline::none()).await?;
//!
//! ServerBuilder::new().register_module(module).serve().await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        entity::{Data, Entity},
        field::{FieldDef, FieldKind, FieldType, FieldValue},
        module::Module,
        service::{DataService, EntityService},
        store::QueryableStore,
    };

    // === Query ===
    pub use crate::core::{
        deadline::Deadline,
        engine::{CompiledQuery, QueryEngine},
        filter::{FilterCriterion, FilterOperator},
        query::{ListParams, PageRequest, QueryRequest, SortOrder},
    };

    // === Patch ===
    pub use crate::core::patch::{JsonMergePatch, JsonPatch, Patch, PatchDocument, apply_patch};

    // === Errors ===
    pub use crate::core::error::{
        ConfigError, EntityError, PatchError, QueryError, RegistrarError, RegistrarResult,
        RequestError, StorageError,
    };

    // === Macros ===
    pub use crate::impl_data_entity;

    // === Entities ===
    pub use crate::entities::SchoolModule;
    pub use crate::entities::school::*;

    // === Storage ===
    pub use crate::storage::InMemoryDataService;

    // === Config ===
    pub use crate::config::{
        EntityConfig, LoggingConfig, QueryConfig, RegistrarConfig, ServerConfig,
    };

    // === Server ===
    pub use crate::server::{CrudDescriptor, EntityDescriptor, EntityRegistry, ServerBuilder};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;

    // === Axum ===
    pub use axum::Router;
}
