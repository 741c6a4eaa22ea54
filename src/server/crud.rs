//! Generic CRUD descriptor, one instance per exposed entity type

use crate::config::QueryConfig;
use crate::core::entity::Data;
use crate::core::service::EntityService;
use crate::server::entity_registry::EntityDescriptor;
use crate::server::exposure::rest::handlers::{
    CrudState, create_entity, delete_entity, get_entity, list_entities, patch_entity,
    update_entity,
};
use axum::{Router, routing::get};

/// Exposes an [`EntityService`] under `/{plural}`
///
/// Routes:
/// - `GET /{plural}`: list with `pageNumber`, `pageSize`, `sortField`,
///   `sortOrder`, `searchTerm` and `filters`
/// - `POST /{plural}`
/// - `GET /{plural}/{id}`
/// - `PUT /{plural}/{id}`
/// - `PATCH /{plural}/{id}`
/// - `DELETE /{plural}/{id}`
pub struct CrudDescriptor<T: Data> {
    plural: String,
    state: CrudState<T>,
}

impl<T: Data> CrudDescriptor<T> {
    pub fn new(service: EntityService<T>, query: QueryConfig) -> Self {
        Self {
            plural: T::resource_name().to_string(),
            state: CrudState { service, query },
        }
    }

    /// Serve under a different URL segment than the entity's own plural
    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = plural.into();
        self
    }
}

impl<T: Data> EntityDescriptor for CrudDescriptor<T> {
    fn entity_type(&self) -> &str {
        T::resource_name_singular()
    }

    fn plural(&self) -> &str {
        &self.plural
    }

    fn build_routes(&self) -> Router {
        let collection = format!("/{}", self.plural);
        let item = format!("/{}/{{id}}", self.plural);

        Router::new()
            .route(&collection, get(list_entities::<T>).post(create_entity::<T>))
            .route(
                &item,
                get(get_entity::<T>)
                    .put(update_entity::<T>)
                    .patch(patch_entity::<T>)
                    .delete(delete_entity::<T>),
            )
            .with_state(self.state.clone())
    }
}
