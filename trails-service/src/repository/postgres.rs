//! PostgreSQL persistence engine (requires `database` feature)
//!
//! Schema management is out of scope; the engine expects these tables:
//!
//! ```sql
//! CREATE TABLE difficulties (
//!     seq  BIGSERIAL,
//!     id   UUID PRIMARY KEY,
//!     name TEXT NOT NULL
//! );
//!
//! CREATE TABLE regions (
//!     seq              BIGSERIAL,
//!     id               UUID PRIMARY KEY,
//!     code             TEXT NOT NULL,
//!     name             TEXT NOT NULL,
//!     region_image_url TEXT
//! );
//!
//! CREATE TABLE walks (
//!     seq            BIGSERIAL,
//!     id             UUID PRIMARY KEY,
//!     name           TEXT NOT NULL,
//!     description    TEXT NOT NULL,
//!     length_in_km   DOUBLE PRECISION NOT NULL,
//!     walk_image_url TEXT,
//!     difficulty_id  UUID NOT NULL,
//!     region_id      UUID NOT NULL
//! );
//! ```
//!
//! `walks` carries no foreign keys. References are validated by
//! the trail repository at create and update time, and deleting a region
//! leaves its trails in place. Scans order by `seq`, the insertion order.

use std::marker::PhantomData;

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, PgPool, Postgres};
use uuid::Uuid;

use super::error::{RepositoryError, RepositoryOperation};
use super::store::{DifficultyRow, EntityStore, RegionRow, Row, Storage, TrailRow};
use super::traits::RepositoryResult;

type RowQuery<'q, R> = QueryAs<'q, Postgres, R, PgArguments>;

/// A row type with a backing PostgreSQL table.
pub trait TableRow: Row + for<'r> FromRow<'r, PgRow> + Unpin {
    const TABLE: &'static str;
    /// Column names; the first is always `id`.
    const COLUMNS: &'static [&'static str];

    /// Binds every column value in [`TableRow::COLUMNS`] order.
    fn bind_columns(self, query: RowQuery<'_, Self>) -> RowQuery<'_, Self>;
}

impl TableRow for TrailRow {
    const TABLE: &'static str = "walks";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "description",
        "length_in_km",
        "walk_image_url",
        "difficulty_id",
        "region_id",
    ];

    fn bind_columns(self, query: RowQuery<'_, Self>) -> RowQuery<'_, Self> {
        query
            .bind(self.id)
            .bind(self.name)
            .bind(self.description)
            .bind(self.length_in_km)
            .bind(self.walk_image_url)
            .bind(self.difficulty_id)
            .bind(self.region_id)
    }
}

impl TableRow for RegionRow {
    const TABLE: &'static str = "regions";
    const COLUMNS: &'static [&'static str] = &["id", "code", "name", "region_image_url"];

    fn bind_columns(self, query: RowQuery<'_, Self>) -> RowQuery<'_, Self> {
        query
            .bind(self.id)
            .bind(self.code)
            .bind(self.name)
            .bind(self.region_image_url)
    }
}

impl TableRow for DifficultyRow {
    const TABLE: &'static str = "difficulties";
    const COLUMNS: &'static [&'static str] = &["id", "name"];

    fn bind_columns(self, query: RowQuery<'_, Self>) -> RowQuery<'_, Self> {
        query.bind(self.id).bind(self.name)
    }
}

fn select_sql<R: TableRow>(suffix: &str) -> String {
    format!("SELECT {} FROM {} {}", R::COLUMNS.join(", "), R::TABLE, suffix)
}

fn insert_sql<R: TableRow>() -> String {
    let placeholders: Vec<String> = (1..=R::COLUMNS.len()).map(|i| format!("${}", i)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        R::TABLE,
        R::COLUMNS.join(", "),
        placeholders.join(", "),
        R::COLUMNS.join(", ")
    )
}

fn update_sql<R: TableRow>() -> String {
    let assignments: Vec<String> = R::COLUMNS
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, column)| format!("{} = ${}", column, i + 1))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE id = $1 RETURNING {}",
        R::TABLE,
        assignments.join(", "),
        R::COLUMNS.join(", ")
    )
}

fn delete_sql<R: TableRow>() -> String {
    format!(
        "DELETE FROM {} WHERE id = $1 RETURNING {}",
        R::TABLE,
        R::COLUMNS.join(", ")
    )
}

fn db_error(operation: RepositoryOperation) -> impl Fn(sqlx::Error) -> RepositoryError {
    move |e| RepositoryError::from(e).with_operation(operation)
}

/// One PostgreSQL table accessed through a shared pool.
#[derive(Debug)]
pub struct PgTable<R> {
    pool: PgPool,
    _row: PhantomData<fn() -> R>,
}

impl<R> Clone for PgTable<R> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _row: PhantomData,
        }
    }
}

impl<R> PgTable<R> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _row: PhantomData,
        }
    }
}

impl<R> EntityStore<R::Key, R::Entity> for PgTable<R>
where
    R: TableRow,
    R::Entity: Send + Sync,
{
    async fn get(&self, id: &R::Key) -> RepositoryResult<Option<R::Entity>> {
        let sql = select_sql::<R>("WHERE id = $1");
        let id: Uuid = (*id).into();
        let row = sqlx::query_as::<_, R>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error(RepositoryOperation::FindById))?;
        Ok(row.map(Row::into_entity))
    }

    async fn contains(&self, id: &R::Key) -> RepositoryResult<bool> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", R::TABLE);
        let id: Uuid = (*id).into();
        sqlx::query_scalar::<_, bool>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error(RepositoryOperation::FindById))
    }

    async fn insert(&self, entity: R::Entity) -> RepositoryResult<R::Entity> {
        let sql = insert_sql::<R>();
        let row = R::from_entity(&entity)
            .bind_columns(sqlx::query_as::<_, R>(&sql))
            .fetch_one(&self.pool)
            .await
            .map_err(db_error(RepositoryOperation::Create))?;
        Ok(row.into_entity())
    }

    async fn update(&self, entity: R::Entity) -> RepositoryResult<Option<R::Entity>> {
        let sql = update_sql::<R>();
        let row = R::from_entity(&entity)
            .bind_columns(sqlx::query_as::<_, R>(&sql))
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error(RepositoryOperation::Update))?;
        Ok(row.map(Row::into_entity))
    }

    async fn delete(&self, id: &R::Key) -> RepositoryResult<Option<R::Entity>> {
        let sql = delete_sql::<R>();
        let id: Uuid = (*id).into();
        let row = sqlx::query_as::<_, R>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error(RepositoryOperation::Delete))?;
        Ok(row.map(Row::into_entity))
    }

    async fn scan(&self) -> RepositoryResult<Vec<R::Entity>> {
        let sql = select_sql::<R>("ORDER BY seq");
        let rows = sqlx::query_as::<_, R>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error(RepositoryOperation::FindAll))?;
        Ok(rows.into_iter().map(Row::into_entity).collect())
    }
}

/// PostgreSQL-backed [`Storage`].
#[derive(Debug, Clone)]
pub struct PgStorage {
    pool: PgPool,
    trails: PgTable<TrailRow>,
    regions: PgTable<RegionRow>,
    difficulties: PgTable<DifficultyRow>,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self {
            trails: PgTable::new(pool.clone()),
            regions: PgTable::new(pool.clone()),
            difficulties: PgTable::new(pool.clone()),
            pool,
        }
    }
}

impl Storage for PgStorage {
    type Trails = PgTable<TrailRow>;
    type Regions = PgTable<RegionRow>;
    type Difficulties = PgTable<DifficultyRow>;

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
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| RepositoryError::from(e).with_operation(RepositoryOperation::FindAll))
    }
}
