//! trails-service binary
//!
//! Uses PostgreSQL when built with the `database` feature and a `[database]`
//! section is configured; otherwise serves from memory.

use anyhow::Context;
use trails_service::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    init_tracing(&config)?;

    let auth = JwtAuth::new(&config.auth)?;

    #[cfg(feature = "database")]
    if let Some(db) = config.database.clone() {
        let pool = create_pool(&db).await?;
        tracing::info!("Using PostgreSQL storage");
        return run(config, PgStorage::new(pool), auth).await;
    }

    let storage = if config.storage.seed_reference_data {
        MemoryStorage::seeded()
    } else {
        MemoryStorage::new()
    };
    tracing::info!(
        seeded = config.storage.seed_reference_data,
        "Using in-memory storage"
    );
    run(config, storage, auth).await
}

async fn run<S: Storage>(config: Config, storage: S, auth: JwtAuth) -> anyhow::Result<()> {
    let state = AppState::new(config.clone(), storage);
    let app = build_router(state, auth);
    Server::new(config).serve(app).await?;
    Ok(())
}
