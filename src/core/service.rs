//! Persistence trait and the generic CRUD + query service

use crate::core::deadline::Deadline;
use crate::core::engine::QueryEngine;
use crate::core::entity::Data;
use crate::core::error::{EntityError, RegistrarResult};
use crate::core::patch::{PatchDocument, apply_patch};
use crate::core::query::QueryRequest;
use crate::core::store::QueryableStore;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Service trait for persisting data entities
///
/// Implementations provide single-record writes for one entity type. The
/// read side (`list` and `scan`) comes from [`QueryableStore`]. Each call
/// is one atomic operation; nothing here retries.
#[async_trait]
pub trait DataService<T: Data>: QueryableStore<T> {
    /// Insert a record under its own id
    ///
    /// Fails with [`EntityError::AlreadyExists`] when the id is taken.
    async fn create(&self, entity: T) -> RegistrarResult<T>;

    /// Get a record by id
    async fn get(&self, id: &Uuid) -> RegistrarResult<Option<T>>;

    /// Replace an existing record
    ///
    /// Fails with [`EntityError::NotFound`] when no record has this id.
    async fn update(&self, id: &Uuid, entity: T) -> RegistrarResult<T>;

    /// Delete a record
    ///
    /// Fails with [`EntityError::NotFound`] when no record has this id.
    async fn delete(&self, id: &Uuid) -> RegistrarResult<()>;
}

/// Generic CRUD + query service, instantiated once per entity type
///
/// Every operation is bounded by a [`Deadline`]; an expired deadline
/// surfaces as a storage timeout and the operation is not retried.
pub struct EntityService<T: Data> {
    store: Arc<dyn DataService<T>>,
}

impl<T: Data> Clone for EntityService<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<T: Data> EntityService<T> {
    pub fn new(store: Arc<dyn DataService<T>>) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<dyn DataService<T>> {
        &self.store
    }

    fn not_found(id: Uuid) -> EntityError {
        EntityError::NotFound {
            entity_type: T::resource_name_singular().to_string(),
            id,
        }
    }

    /// Load one record; a missing record is an error
    pub async fn get_by_id(&self, id: Uuid, deadline: Deadline) -> RegistrarResult<T> {
        match deadline.run("get", self.store.get(&id)).await?? {
            Some(entity) => Ok(entity),
            None => {
                tracing::warn!(entity = T::resource_name_singular(), %id, "record not found");
                Err(Self::not_found(id).into())
            }
        }
    }

    /// Filter, search, sort and paginate
    pub async fn get(
        &self,
        request: &QueryRequest,
        deadline: Deadline,
    ) -> RegistrarResult<Vec<T>> {
        QueryEngine::execute_store(self.store.as_ref(), request, deadline)
            .await
            .inspect_err(|e| {
                tracing::warn!(entity = T::resource_name(), error = %e, "query rejected");
            })
    }

    /// Insert a record, assigning a fresh id when it has none
    pub async fn create(&self, mut entity: T, deadline: Deadline) -> RegistrarResult<T> {
        if entity.id().is_nil() {
            entity.set_id(Uuid::new_v4());
        }
        let created = deadline.run("create", self.store.create(entity)).await??;
        tracing::info!(entity = T::resource_name_singular(), id = %created.id(), "record created");
        Ok(created)
    }

    /// Replace the record at `id`
    ///
    /// A nil payload id takes the path id; any other mismatch is rejected.
    pub async fn update(&self, id: Uuid, mut entity: T, deadline: Deadline) -> RegistrarResult<T> {
        let payload_id = entity.id();
        if payload_id.is_nil() {
            entity.set_id(id);
        } else if payload_id != id {
            tracing::warn!(
                entity = T::resource_name_singular(),
                path_id = %id,
                %payload_id,
                "id mismatch"
            );
            return Err(EntityError::IdMismatch {
                entity_type: T::resource_name_singular().to_string(),
                path_id: id,
                payload_id,
            }
            .into());
        }

        let updated = deadline.run("update", self.store.update(&id, entity)).await??;
        tracing::info!(entity = T::resource_name_singular(), %id, "record updated");
        Ok(updated)
    }

    /// Load the record at `id`, apply `patch` and store the result
    pub async fn patch<P>(&self, id: Uuid, patch: &P, deadline: Deadline) -> RegistrarResult<T>
    where
        P: PatchDocument + ?Sized,
    {
        let current = self.get_by_id(id, deadline).await?;
        let patched = apply_patch(&current, patch).inspect_err(|e| {
            tracing::warn!(entity = T::resource_name_singular(), %id, error = %e, "patch rejected");
        })?;

        let updated = deadline.run("patch", self.store.update(&id, patched)).await??;
        tracing::info!(entity = T::resource_name_singular(), %id, "record patched");
        Ok(updated)
    }

    /// Delete the record at `id`
    pub async fn delete(&self, id: Uuid, deadline: Deadline) -> RegistrarResult<()> {
        deadline.run("delete", self.store.delete(&id)).await??;
        tracing::info!(entity = T::resource_name_singular(), %id, "record deleted");
        Ok(())
    }
}
