//! PostgreSQL connection pool management

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::{
    config::DatabaseConfig,
    error::{sanitize_url, Error, Result},
};

/// Create a PostgreSQL connection pool, retrying with exponential backoff
/// up to `max_retries` times.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let mut attempt = 0;
    let base_delay = Duration::from_secs(config.retry_delay_secs);

    loop {
        match try_create_pool(config).await {
            Ok(pool) => {
                tracing::info!(
                    attempts = attempt + 1,
                    max = config.max_connections,
                    min = config.min_connections,
                    "Database connection pool created"
                );
                return Ok(pool);
            }
            Err(e) => {
                attempt += 1;

                if attempt > config.max_retries {
                    tracing::error!(
                        "Failed to connect to database after {} attempts: {}",
                        config.max_retries + 1,
                        e
                    );
                    return Err(e);
                }

                let delay = backoff(base_delay, attempt);
                tracing::warn!(
                    "Database connection attempt {} failed: {}. Retrying in {:?}...",
                    attempt,
                    e,
                    delay
                );

                tokio::time::sleep(delay).await;
            }
        }
    }
}

fn backoff(base_delay: Duration, attempt: u32) -> Duration {
    let multiplier = 2_u32.saturating_pow(attempt.saturating_sub(1));
    base_delay.saturating_mul(multiplier)
}

async fn try_create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(|e| {
            Error::Internal(format!(
                "Failed to connect to database at '{}' ({}): {}",
                sanitize_url(&config.url),
                categorize_db_error(&e),
                e
            ))
        })
}

/// Categorize database error for better operator guidance
fn categorize_db_error(err: &sqlx::Error) -> &'static str {
    use sqlx::Error;
    match err {
        Error::Configuration(_) => "configuration error",
        Error::Database(_) => "database error",
        Error::Io(_) => "network I/O error",
        Error::Tls(_) => "TLS error",
        Error::PoolTimedOut => "connection pool timeout",
        Error::PoolClosed => "connection pool closed",
        _ => "connection error",
    }
}
