//! In-memory persistence engine
//!
//! Tables are sharded concurrent maps, so every single-row operation is
//! atomic without a table-wide lock and a scan never blocks unrelated writers
//! for longer than one shard visit. Each row is tagged with an insertion
//! sequence number; scans return rows in that order, and an update keeps the
//! row's original position.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use super::store::{DifficultyRow, EntityStore, RegionRow, Row, Storage, TrailRow};
use super::traits::RepositoryResult;
use crate::ids::DifficultyId;

#[derive(Debug, Clone)]
struct Slot<R> {
    seq: u64,
    row: R,
}

/// A single in-memory table of rows keyed by id.
#[derive(Debug)]
pub struct MemoryTable<R: Row> {
    rows: DashMap<R::Key, Slot<R>>,
    next_seq: AtomicU64,
}

impl<R: Row> Default for MemoryTable<R> {
    fn default() -> Self {
        Self {
            rows: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }
}

impl<R: Row> MemoryTable<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn get_row(&self, key: &R::Key) -> Option<R> {
        self.rows.get(key).map(|slot| slot.row.clone())
    }

    fn insert_row(&self, row: R) -> R {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.rows.insert(
            row.key(),
            Slot {
                seq,
                row: row.clone(),
            },
        );
        row
    }

    fn replace_row(&self, row: R) -> Option<R> {
        self.rows.get_mut(&row.key()).map(|mut slot| {
            slot.row = row;
            slot.row.clone()
        })
    }

    fn remove_row(&self, key: &R::Key) -> Option<R> {
        self.rows.remove(key).map(|(_, slot)| slot.row)
    }

    fn scan_rows(&self) -> Vec<R> {
        let mut slots: Vec<(u64, R)> = self
            .rows
            .iter()
            .map(|entry| (entry.seq, entry.row.clone()))
            .collect();
        slots.sort_unstable_by_key(|(seq, _)| *seq);
        slots.into_iter().map(|(_, row)| row).collect()
    }
}

impl<R> EntityStore<R::Key, R::Entity> for MemoryTable<R>
where
    R: Row,
    R::Entity: Send + Sync,
{
    async fn get(&self, id: &R::Key) -> RepositoryResult<Option<R::Entity>> {
        Ok(self.get_row(id).map(Row::into_entity))
    }

    async fn contains(&self, id: &R::Key) -> RepositoryResult<bool> {
        Ok(self.rows.contains_key(id))
    }

    async fn insert(&self, entity: R::Entity) -> RepositoryResult<R::Entity> {
        Ok(self.insert_row(R::from_entity(&entity)).into_entity())
    }

    async fn update(&self, entity: R::Entity) -> RepositoryResult<Option<R::Entity>> {
        Ok(self.replace_row(R::from_entity(&entity)).map(Row::into_entity))
    }

    async fn delete(&self, id: &R::Key) -> RepositoryResult<Option<R::Entity>> {
        Ok(self.remove_row(id).map(Row::into_entity))
    }

    async fn scan(&self) -> RepositoryResult<Vec<R::Entity>> {
        Ok(self.scan_rows().into_iter().map(Row::into_entity).collect())
    }
}

/// Difficulty ratings present in every seeded store.
pub const DIFFICULTY_EASY: DifficultyId =
    DifficultyId::from_uuid(Uuid::from_u128(0x54466f17_02af_48e7_8ed3_5a4a8bfacf6f));
pub const DIFFICULTY_MEDIUM: DifficultyId =
    DifficultyId::from_uuid(Uuid::from_u128(0xea294873_7a8c_4c0f_bfa7_a2eb492cbf8c));
pub const DIFFICULTY_HARD: DifficultyId =
    DifficultyId::from_uuid(Uuid::from_u128(0xf808ddcd_b5e5_4d80_b732_1ca523e48434));

const SEED_REGIONS: &[(u128, &str, &str)] = &[
    (0xf7248fc3_2585_4efb_8d1d_1c555f4087f6, "AKL", "Auckland"),
    (0x6884f7d7_ad1f_4101_8df3_7a6fa7387d81, "NTL", "Northland"),
    (0x14ceba71_4b51_4777_9b17_46602cf66153, "BOP", "Bay Of Plenty"),
    (0xcfa06ed2_bf65_4b65_93ed_c9d286ddb0de, "WGN", "Wellington"),
    (0x906cb139_415a_4bbb_a174_1a1faf9fb1f6, "NSN", "Nelson"),
    (0xf077a22e_4248_4bf6_b564_c7cf4e250263, "STL", "Southland"),
];

/// In-memory [`Storage`] with one table per entity type.
///
/// Cloning is cheap and clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    trails: Arc<MemoryTable<TrailRow>>,
    regions: Arc<MemoryTable<RegionRow>>,
    difficulties: Arc<MemoryTable<DifficultyRow>>,
}

impl MemoryStorage {
    /// Empty storage with no reference data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with the standard difficulties and regions.
    pub fn seeded() -> Self {
        let storage = Self::new();
        for (id, name) in [
            (DIFFICULTY_EASY, "Easy"),
            (DIFFICULTY_MEDIUM, "Medium"),
            (DIFFICULTY_HARD, "Hard"),
        ] {
            storage.difficulties.insert_row(DifficultyRow {
                id: id.as_uuid(),
                name: name.to_string(),
            });
        }
        for (id, code, name) in SEED_REGIONS {
            storage.regions.insert_row(RegionRow {
                id: Uuid::from_u128(*id),
                code: (*code).to_string(),
                name: (*name).to_string(),
                region_image_url: None,
            });
        }
        tracing::debug!(
            difficulties = storage.difficulties.len(),
            regions = storage.regions.len(),
            "Seeded in-memory reference data"
        );
        storage
    }
}

impl Storage for MemoryStorage {
    type Trails = MemoryTable<TrailRow>;
    type Regions = MemoryTable<RegionRow>;
    type Difficulties = MemoryTable<DifficultyRow>;

    fn trails(&self) -> &Self::Trails {
        &self.trails
    }

    fn regions(&self) -> &Self::Regions {
        &self.regions
    }

    fn difficulties(&self) -> &Self::Difficulties {
        &self.difficulties
    }

    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }
}
