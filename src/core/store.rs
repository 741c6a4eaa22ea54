//! Read side of the persistence collaborator

use crate::core::engine::CompiledQuery;
use crate::core::entity::Data;
use crate::core::error::RegistrarResult;
use async_trait::async_trait;

/// Trait for stores the query engine can read from
///
/// A store only has to enumerate its records in its natural order. Stores
/// able to evaluate predicates closer to the data override [`scan`].
///
/// [`scan`]: QueryableStore::scan
#[async_trait]
pub trait QueryableStore<T: Data>: Send + Sync {
    /// Every record, unfiltered, in the store's natural order
    async fn list(&self) -> RegistrarResult<Vec<T>>;

    /// Run an already validated query
    ///
    /// The default lists everything and lets the compiled query filter,
    /// sort and paginate in memory.
    async fn scan(&self, query: &CompiledQuery<T>) -> RegistrarResult<Vec<T>> {
        let records = self.list().await?;
        Ok(query.apply(records))
    }
}
