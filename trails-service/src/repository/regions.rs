//! Region and difficulty repositories
//!
//! Regions support the same CRUD surface as trails but list the whole
//! collection with no filtering, sorting, or paging. Deleting a region does
//! not cascade to trails that reference it; references are only checked when
//! a trail is created or updated.

use super::error::RepositoryOperation;
use super::store::{EntityStore, Storage};
use super::traits::{Repository, RepositoryResult};
use crate::domain::{Difficulty, Region, RegionDraft};
use crate::ids::RegionId;

/// Repository facade for regions.
#[derive(Debug, Clone)]
pub struct RegionRepository<S> {
    storage: S,
}

impl<S: Storage> RegionRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

impl<S: Storage> Repository<RegionId, Region, RegionDraft> for RegionRepository<S> {
    type ListParams = ();

    async fn find_all(&self, _params: ()) -> RepositoryResult<Vec<Region>> {
        self.storage
            .regions()
            .scan()
            .await
            .map_err(|e| e.with_operation(RepositoryOperation::FindAll))
    }

    async fn find_by_id(&self, id: &RegionId) -> RepositoryResult<Option<Region>> {
        self.storage
            .regions()
            .get(id)
            .await
            .map_err(|e| e.with_operation(RepositoryOperation::FindById))
    }

    async fn create(&self, draft: RegionDraft) -> RepositoryResult<Region> {
        let stored = self
            .storage
            .regions()
            .insert(draft.into_region(RegionId::new()))
            .await
            .map_err(|e| e.with_operation(RepositoryOperation::Create))?;
        tracing::debug!(region_id = %stored.id, code = %stored.code, "Created region");
        Ok(stored)
    }

    async fn update(&self, id: &RegionId, draft: RegionDraft) -> RepositoryResult<Option<Region>> {
        let updated = self
            .storage
            .regions()
            .update(draft.into_region(*id))
            .await
            .map_err(|e| e.with_operation(RepositoryOperation::Update))?;
        if updated.is_some() {
            tracing::debug!(region_id = %id, "Updated region");
        }
        Ok(updated)
    }

    async fn delete(&self, id: &RegionId) -> RepositoryResult<Option<Region>> {
        let removed = self
            .storage
            .regions()
            .delete(id)
            .await
            .map_err(|e| e.with_operation(RepositoryOperation::Delete))?;
        if removed.is_some() {
            tracing::debug!(region_id = %id, "Deleted region");
        }
        Ok(removed)
    }
}

/// Read-only access to difficulty reference data.
#[derive(Debug, Clone)]
pub struct DifficultyRepository<S> {
    storage: S,
}

impl<S: Storage> DifficultyRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn find_all(&self) -> RepositoryResult<Vec<Difficulty>> {
        self.storage
            .difficulties()
            .scan()
            .await
            .map_err(|e| e.with_operation(RepositoryOperation::FindAll))
    }
}
