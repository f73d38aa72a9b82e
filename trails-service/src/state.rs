//! Application state shared across handlers

use std::sync::Arc;

use crate::{
    config::Config,
    repository::{DifficultyRepository, RegionRepository, Storage, TrailRepository},
};

/// Application state shared across handlers
///
/// Generic over the persistence engine. Every repository shares the same
/// [`Storage`] handle, so cloning the state is cheap.
#[derive(Debug, Clone)]
pub struct AppState<S> {
    config: Arc<Config>,
    storage: S,
    trails: TrailRepository<S>,
    regions: RegionRepository<S>,
    difficulties: DifficultyRepository<S>,
}

impl<S: Storage> AppState<S> {
    pub fn new(config: Config, storage: S) -> Self {
        Self {
            config: Arc::new(config),
            trails: TrailRepository::new(storage.clone()),
            regions: RegionRepository::new(storage.clone()),
            difficulties: DifficultyRepository::new(storage.clone()),
            storage,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The underlying engine, used for readiness checks
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn trails(&self) -> &TrailRepository<S> {
        &self.trails
    }

    pub fn regions(&self) -> &RegionRepository<S> {
        &self.regions
    }

    pub fn difficulties(&self) -> &DifficultyRepository<S> {
        &self.difficulties
    }
}
