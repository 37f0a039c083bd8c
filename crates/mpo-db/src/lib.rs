//! MySQL access for the mobile office importer.
//!
//! Connection setup plus the `mobilepost` upsert. The importer is strictly
//! sequential, so the pool is capped at a single connection held for the
//! run's lifetime.

use std::{env, time::Duration};

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};

pub mod offices;

pub use offices::{classify_rows_affected, upsert_office};

const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;

// One import run means one connection; the loop is strictly sequential.
const MAX_CONNECTIONS: u32 = 1;

/// Connection parameters collected from the command line.
#[derive(Debug, Clone)]
pub struct ConnectParams {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl ConnectParams {
    #[must_use]
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
            .charset("utf8mb4")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    pub acquire_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
        }
    }
}

impl PoolConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            acquire_timeout_secs: read_u64(
                "MPO_DB_ACQUIRE_TIMEOUT_SECS",
                DEFAULT_ACQUIRE_TIMEOUT_SECS,
            ),
        }
    }
}

/// Open the single-connection pool used for the whole run.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the connection cannot be established. The
/// caller treats this as fatal; there is no retry.
pub async fn connect_pool(
    params: &ConnectParams,
    config: PoolConfig,
) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(params.connect_options())
        .await
}

/// Send a `SELECT 1` to verify the pool has a live connection.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn ping(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(pool)
        .await?;
    Ok(())
}

fn read_u64(var: &str, default: u64) -> u64 {
    env::var(var)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}
