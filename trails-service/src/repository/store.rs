//! Entity store abstraction and row representations
//!
//! An [`EntityStore`] is a keyed collection with point lookup, insert,
//! update, delete, and full scan. Each call is atomic for the single row it
//! touches; nothing spans rows. Stores keep rows in their persisted shape
//! ([`TrailRow`], [`RegionRow`], [`DifficultyRow`]) and convert to and from
//! domain entities at this boundary through [`Row`].

use std::future::Future;
use std::hash::Hash;

use uuid::Uuid;

use super::traits::RepositoryResult;
use crate::domain::{Difficulty, Region, Trail};
use crate::ids::{DifficultyId, RegionId, TrailId};

/// Keyed collection of entities backed by a persistence engine.
///
/// `update` and `delete` return `Ok(None)` when the key does not resolve;
/// the store is left unchanged in that case.
pub trait EntityStore<K, E>: Send + Sync {
    fn get(&self, id: &K) -> impl Future<Output = RepositoryResult<Option<E>>> + Send;

    fn contains(&self, id: &K) -> impl Future<Output = RepositoryResult<bool>> + Send;

    fn insert(&self, entity: E) -> impl Future<Output = RepositoryResult<E>> + Send;

    fn update(&self, entity: E) -> impl Future<Output = RepositoryResult<Option<E>>> + Send;

    fn delete(&self, id: &K) -> impl Future<Output = RepositoryResult<Option<E>>> + Send;

    /// Every stored entity, in the engine's native order.
    fn scan(&self) -> impl Future<Output = RepositoryResult<Vec<E>>> + Send;
}

/// A persistence engine: one store per entity type.
pub trait Storage: Clone + Send + Sync + 'static {
    type Trails: EntityStore<TrailId, Trail>;
    type Regions: EntityStore<RegionId, Region>;
    type Difficulties: EntityStore<DifficultyId, Difficulty>;

    fn trails(&self) -> &Self::Trails;

    fn regions(&self) -> &Self::Regions;

    fn difficulties(&self) -> &Self::Difficulties;

    /// Cheap liveness probe used by the readiness endpoint.
    fn ping(&self) -> impl Future<Output = RepositoryResult<()>> + Send;
}

/// Persisted shape of an entity.
pub trait Row: Clone + Send + Sync + 'static {
    type Key: Copy + Eq + Hash + Into<Uuid> + Send + Sync + 'static;
    type Entity;

    fn key(&self) -> Self::Key;

    fn from_entity(entity: &Self::Entity) -> Self;

    fn into_entity(self) -> Self::Entity;
}

/// Stored form of a [`Trail`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct TrailRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub length_in_km: f64,
    pub walk_image_url: Option<String>,
    pub difficulty_id: Uuid,
    pub region_id: Uuid,
}

impl Row for TrailRow {
    type Key = TrailId;
    type Entity = Trail;

    fn key(&self) -> TrailId {
        TrailId::from_uuid(self.id)
    }

    fn from_entity(trail: &Trail) -> Self {
        Self {
            id: trail.id.as_uuid(),
            name: trail.name.clone(),
            description: trail.description.clone(),
            length_in_km: trail.length_in_km,
            walk_image_url: trail.image_url.clone(),
            difficulty_id: trail.difficulty_id.as_uuid(),
            region_id: trail.region_id.as_uuid(),
        }
    }

    fn into_entity(self) -> Trail {
        Trail {
            id: TrailId::from_uuid(self.id),
            name: self.name,
            description: self.description,
            length_in_km: self.length_in_km,
            image_url: self.walk_image_url,
            difficulty_id: DifficultyId::from_uuid(self.difficulty_id),
            region_id: RegionId::from_uuid(self.region_id),
        }
    }
}

/// Stored form of a [`Region`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct RegionRow {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub region_image_url: Option<String>,
}

impl Row for RegionRow {
    type Key = RegionId;
    type Entity = Region;

    fn key(&self) -> RegionId {
        RegionId::from_uuid(self.id)
    }

    fn from_entity(region: &Region) -> Self {
        Self {
            id: region.id.as_uuid(),
            code: region.code.clone(),
            name: region.name.clone(),
            region_image_url: region.image_url.clone(),
        }
    }

    fn into_entity(self) -> Region {
        Region {
            id: RegionId::from_uuid(self.id),
            code: self.code,
            name: self.name,
            image_url: self.region_image_url,
        }
    }
}

/// Stored form of a [`Difficulty`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct DifficultyRow {
    pub id: Uuid,
    pub name: String,
}

impl Row for DifficultyRow {
    type Key = DifficultyId;
    type Entity = Difficulty;

    fn key(&self) -> DifficultyId {
        DifficultyId::from_uuid(self.id)
    }

    fn from_entity(difficulty: &Difficulty) -> Self {
        Self {
            id: difficulty.id.as_uuid(),
            name: difficulty.name.clone(),
        }
    }

    fn into_entity(self) -> Difficulty {
        Difficulty {
            id: DifficultyId::from_uuid(self.id),
            name: self.name,
        }
    }
}
