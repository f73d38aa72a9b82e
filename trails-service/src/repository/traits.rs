//! Repository trait definitions
//!
//! Async methods use return-position `impl Trait` so the facades stay
//! generic over the persistence engine without `async_trait` boxing.

use std::future::Future;

use super::error::RepositoryError;

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// CRUD facade over one entity type.
///
/// - `Id`: the entity's identifier type
/// - `Entity`: the stored entity
/// - `Draft`: the mutable fields supplied on create and update
///
/// Not-found is reported as `Ok(None)` from `find_by_id`, `update`, and
/// `delete`. Each operation is atomic with respect to the underlying store.
pub trait Repository<Id, Entity, Draft>: Send + Sync {
    /// Parameters accepted by [`Repository::find_all`].
    type ListParams: Send;

    /// List entities. Never fails for lack of matches.
    fn find_all(
        &self,
        params: Self::ListParams,
    ) -> impl Future<Output = RepositoryResult<Vec<Entity>>> + Send;

    fn find_by_id(&self, id: &Id) -> impl Future<Output = RepositoryResult<Option<Entity>>> + Send;

    /// Validate, assign a fresh identifier, and persist.
    fn create(&self, draft: Draft) -> impl Future<Output = RepositoryResult<Entity>> + Send;

    /// Replace every mutable field of an existing entity; the id is preserved.
    fn update(
        &self,
        id: &Id,
        draft: Draft,
    ) -> impl Future<Output = RepositoryResult<Option<Entity>>> + Send;

    /// Remove an entity and return its last state.
    fn delete(&self, id: &Id) -> impl Future<Output = RepositoryResult<Option<Entity>>> + Send;
}
