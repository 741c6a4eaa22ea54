//! In-memory implementation of DataService for testing and development

use crate::core::engine::CompiledQuery;
use crate::core::entity::Data;
use crate::core::error::{EntityError, RegistrarResult, StorageError};
use crate::core::service::DataService;
use crate::core::store::QueryableStore;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

const BACKEND: &str = "in-memory";

/// In-memory data service implementation
///
/// Records keep their insertion order, which is the natural order queries
/// see when they do not sort. Uses RwLock for thread-safe access.
pub struct InMemoryDataService<T> {
    records: Arc<RwLock<IndexMap<Uuid, T>>>,
}

impl<T> Clone for InMemoryDataService<T> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
        }
    }
}

impl<T: Data> InMemoryDataService<T> {
    /// Create a new, empty in-memory data service
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Create a store pre-filled with `records`, in order
    ///
    /// Later records replace earlier ones with the same id.
    pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
        let map = records.into_iter().map(|r| (r.id(), r)).collect();
        Self {
            records: Arc::new(RwLock::new(map)),
        }
    }

    /// Number of stored records
    pub fn len(&self) -> RegistrarResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> RegistrarResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, IndexMap<Uuid, T>>, StorageError> {
        self.records.read().map_err(|e| StorageError::LockPoisoned {
            backend: BACKEND.to_string(),
            message: format!("Failed to acquire read lock: {}", e),
        })
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, IndexMap<Uuid, T>>, StorageError> {
        self.records.write().map_err(|e| StorageError::LockPoisoned {
            backend: BACKEND.to_string(),
            message: format!("Failed to acquire write lock: {}", e),
        })
    }

    fn not_found(id: Uuid) -> EntityError {
        EntityError::NotFound {
            entity_type: T::resource_name_singular().to_string(),
            id,
        }
    }
}

impl<T: Data> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Data> QueryableStore<T> for InMemoryDataService<T> {
    async fn list(&self) -> RegistrarResult<Vec<T>> {
        let records = self.read()?;
        Ok(records.values().cloned().collect())
    }

    // Only matching records are cloned out of the lock.
    async fn scan(&self, query: &CompiledQuery<T>) -> RegistrarResult<Vec<T>> {
        let matching: Vec<T> = {
            let records = self.read()?;
            records
                .values()
                .filter(|record| query.matches(record))
                .cloned()
                .collect()
        };
        Ok(query.paginate(matching))
    }
}

#[async_trait]
impl<T: Data> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, entity: T) -> RegistrarResult<T> {
        let mut records = self.write()?;
        let id = entity.id();
        if records.contains_key(&id) {
            return Err(EntityError::AlreadyExists {
                entity_type: T::resource_name_singular().to_string(),
                id,
            }
            .into());
        }
        records.insert(id, entity.clone());
        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> RegistrarResult<Option<T>> {
        let records = self.read()?;
        Ok(records.get(id).cloned())
    }

    async fn update(&self, id: &Uuid, entity: T) -> RegistrarResult<T> {
        let mut records = self.write()?;
        let slot = records.get_mut(id).ok_or_else(|| Self::not_found(*id))?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: &Uuid) -> RegistrarResult<()> {
        let mut records = self.write()?;
        // shift_remove keeps the remaining records in insertion order
        records
            .shift_remove(id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(*id).into())
    }
}
