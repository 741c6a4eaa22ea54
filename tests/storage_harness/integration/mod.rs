//! Integration test infrastructure for storage backends.
//!
//! Wraps any `DataService<TestRecord>` in the real REST layer
//! (HTTP → generic handler → EntityService → DataService → response).
//!
//! # Architecture
//!
//! ```text
//! axum_test::TestServer
//!     └─ Router (built by build_test_router)
//!         ├─ GET    /health
//!         ├─ GET    /test_records        → list_entities::<TestRecord>
//!         ├─ POST   /test_records        → create_entity::<TestRecord>
//!         ├─ GET    /test_records/{id}   → get_entity::<TestRecord>
//!         ├─ PUT    /test_records/{id}   → update_entity::<TestRecord>
//!         ├─ PATCH  /test_records/{id}   → patch_entity::<TestRecord>
//!         └─ DELETE /test_records/{id}   → delete_entity::<TestRecord>
//! ```

#[macro_use]
pub mod rest_tests;

use super::TestRecord;
use axum::Router;
use registrar::config::QueryConfig;
use registrar::core::service::{DataService, EntityService};
use registrar::server::crud::CrudDescriptor;
use registrar::server::entity_registry::EntityRegistry;
use registrar::server::exposure::RestExposure;
use std::sync::Arc;

/// Build the router for `TestRecord` with the given query settings
pub fn build_test_router_with(
    data_service: Arc<dyn DataService<TestRecord>>,
    query: QueryConfig,
) -> Router {
    let mut registry = EntityRegistry::new();
    registry.register(Box::new(CrudDescriptor::new(
        EntityService::new(data_service),
        query,
    )));
    RestExposure::build_router(&registry, vec![])
}

/// Build the router with a page size large enough to see every record
pub fn build_test_router(data_service: Arc<dyn DataService<TestRecord>>) -> Router {
    build_test_router_with(
        data_service,
        QueryConfig {
            default_page_size: 50,
            request_timeout_ms: None,
        },
    )
}
