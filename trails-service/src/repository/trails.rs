//! Trail repository
//!
//! Listing runs the full trail scan through [`TrailQuery`] and then
//! [`Pagination`]. Create and update refuse drafts whose difficulty or region
//! does not exist, before anything is written. The check and the write are
//! separate steps, so a region or difficulty deleted in between leaves the
//! trail with a dangling reference, the same state a region deletion leaves
//! behind for existing trails.

use super::error::{RepositoryError, RepositoryOperation};
use super::pagination::{Pagination, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
use super::query::TrailQuery;
use super::store::{EntityStore, Storage};
use super::traits::{Repository, RepositoryResult};
use crate::domain::{Trail, TrailDraft};
use crate::ids::TrailId;

/// Raw listing parameters, as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailListParams {
    pub filter_on: Option<String>,
    pub filter_query: Option<String>,
    pub sort_by: Option<String>,
    pub is_ascending: bool,
    pub page_number: i64,
    pub page_size: i64,
}

impl Default for TrailListParams {
    fn default() -> Self {
        Self {
            filter_on: None,
            filter_query: None,
            sort_by: None,
            is_ascending: true,
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TrailListParams {
    #[must_use]
    pub fn with_filter(mut self, field: impl Into<String>, query: impl Into<String>) -> Self {
        self.filter_on = Some(field.into());
        self.filter_query = Some(query.into());
        self
    }

    #[must_use]
    pub fn with_sort(mut self, field: impl Into<String>, is_ascending: bool) -> Self {
        self.sort_by = Some(field.into());
        self.is_ascending = is_ascending;
        self
    }

    #[must_use]
    pub fn with_page(mut self, page_number: i64, page_size: i64) -> Self {
        self.page_number = page_number;
        self.page_size = page_size;
        self
    }

    pub fn query(&self) -> TrailQuery {
        TrailQuery::from_params(
            self.filter_on.as_deref(),
            self.filter_query.as_deref(),
            self.sort_by.as_deref(),
            self.is_ascending,
        )
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::page(self.page_number, self.page_size)
    }
}

/// Repository facade for trails.
#[derive(Debug, Clone)]
pub struct TrailRepository<S> {
    storage: S,
}

impl<S: Storage> TrailRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    async fn ensure_references(
        &self,
        operation: RepositoryOperation,
        draft: &TrailDraft,
    ) -> RepositoryResult<()> {
        let storage = &self.storage;
        if !storage
            .difficulties()
            .contains(&draft.difficulty_id)
            .await
            .map_err(|e| e.with_operation(operation))?
        {
            tracing::debug!(difficulty_id = %draft.difficulty_id, %operation, "Unknown difficulty");
            return Err(RepositoryError::referential_integrity(
                operation,
                "Difficulty",
                draft.difficulty_id.to_string(),
            ));
        }
        if !storage
            .regions()
            .contains(&draft.region_id)
            .await
            .map_err(|e| e.with_operation(operation))?
        {
            tracing::debug!(region_id = %draft.region_id, %operation, "Unknown region");
            return Err(RepositoryError::referential_integrity(
                operation,
                "Region",
                draft.region_id.to_string(),
            ));
        }
        Ok(())
    }
}

impl<S: Storage> Repository<TrailId, Trail, TrailDraft> for TrailRepository<S> {
    type ListParams = TrailListParams;

    async fn find_all(&self, params: TrailListParams) -> RepositoryResult<Vec<Trail>> {
        let query = params.query();
        let page = params.pagination();

        let all = self
            .storage
            .trails()
            .scan()
            .await
            .map_err(|e| e.with_operation(RepositoryOperation::FindAll))?;
        let scanned = all.len();
        let selected = page.slice(query.apply(all));

        tracing::debug!(
            scanned,
            returned = selected.len(),
            offset = page.offset,
            limit = page.limit,
            "Listed trails"
        );
        Ok(selected)
    }

    async fn find_by_id(&self, id: &TrailId) -> RepositoryResult<Option<Trail>> {
        self.storage
            .trails()
            .get(id)
            .await
            .map_err(|e| e.with_operation(RepositoryOperation::FindById))
    }

    async fn create(&self, draft: TrailDraft) -> RepositoryResult<Trail> {
        self.ensure_references(RepositoryOperation::Create, &draft)
            .await?;

        let trail = draft.into_trail(TrailId::new());
        let stored = self
            .storage
            .trails()
            .insert(trail)
            .await
            .map_err(|e| e.with_operation(RepositoryOperation::Create))?;

        tracing::debug!(trail_id = %stored.id, "Created trail");
        Ok(stored)
    }

    async fn update(&self, id: &TrailId, draft: TrailDraft) -> RepositoryResult<Option<Trail>> {
        let trails = self.storage.trails();
        if !trails
            .contains(id)
            .await
            .map_err(|e| e.with_operation(RepositoryOperation::Update))?
        {
            return Ok(None);
        }

        self.ensure_references(RepositoryOperation::Update, &draft)
            .await?;

        let updated = trails
            .update(draft.into_trail(*id))
            .await
            .map_err(|e| e.with_operation(RepositoryOperation::Update))?;

        if updated.is_some() {
            tracing::debug!(trail_id = %id, "Updated trail");
        }
        Ok(updated)
    }

    async fn delete(&self, id: &TrailId) -> RepositoryResult<Option<Trail>> {
        let removed = self
            .storage
            .trails()
            .delete(id)
            .await
            .map_err(|e| e.with_operation(RepositoryOperation::Delete))?;

        if removed.is_some() {
            tracing::debug!(trail_id = %id, "Deleted trail");
        }
        Ok(removed)
    }
}
