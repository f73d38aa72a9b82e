//! Domain entities
//!
//! Entities carry their identifier; drafts carry every mutable field and are
//! what callers hand to `create` and `update`. An update replaces all mutable
//! fields of the stored entity with the draft's.

use crate::ids::{DifficultyId, RegionId, TrailId};

/// A walking trail.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    pub id: TrailId,
    pub name: String,
    pub description: String,
    /// Length in kilometres, never negative.
    pub length_in_km: f64,
    pub image_url: Option<String>,
    pub difficulty_id: DifficultyId,
    pub region_id: RegionId,
}

/// Mutable fields of a [`Trail`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrailDraft {
    pub name: String,
    pub description: String,
    pub length_in_km: f64,
    pub image_url: Option<String>,
    pub difficulty_id: DifficultyId,
    pub region_id: RegionId,
}

impl TrailDraft {
    /// Materializes the draft under the given identifier.
    pub fn into_trail(self, id: TrailId) -> Trail {
        Trail {
            id,
            name: self.name,
            description: self.description,
            length_in_km: self.length_in_km,
            image_url: self.image_url,
            difficulty_id: self.difficulty_id,
            region_id: self.region_id,
        }
    }
}

/// A geographic region trails belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub id: RegionId,
    /// Short code, e.g. `AKL`.
    pub code: String,
    pub name: String,
    pub image_url: Option<String>,
}

/// Mutable fields of a [`Region`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionDraft {
    pub code: String,
    pub name: String,
    pub image_url: Option<String>,
}

impl RegionDraft {
    pub fn into_region(self, id: RegionId) -> Region {
        Region {
            id,
            code: self.code,
            name: self.name,
            image_url: self.image_url,
        }
    }
}

/// Reference data: how hard a trail is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difficulty {
    pub id: DifficultyId,
    pub name: String,
}
