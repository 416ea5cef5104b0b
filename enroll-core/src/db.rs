//! Primary/replica connection pool with failover.
//!
//! Every repository call resolves a pool through [`FailoverPool::read`] or
//! [`FailoverPool::write`]. Each resolution probes the primary with
//! `SELECT 1`; reads fall over to the replica when the primary is down,
//! writes fail closed so the replica never sees a write. The probe result
//! is deliberately not cached across calls.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DbConfig;

const MAX_CONNECTIONS: u32 = 20;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("all databases unavailable")]
    Unavailable,

    #[error("primary database unavailable, refusing write")]
    PrimaryUnavailable,

    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Liveness of the two pools, reported by health endpoints.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct DbHealth {
    pub primary: bool,
    pub replica: bool,
}

impl DbHealth {
    pub fn reachable(&self) -> bool {
        self.primary || self.replica
    }
}

#[derive(Clone)]
pub struct FailoverPool {
    primary: PgPool,
    replica: PgPool,
}

impl FailoverPool {
    /// Build both pools lazily; no connection is made until first use.
    pub fn connect(cfg: &DbConfig) -> Result<Self, DbError> {
        Ok(Self {
            primary: Self::options().connect_lazy(&cfg.primary_url)?,
            replica: Self::options().connect_lazy(&cfg.replica_url)?,
        })
    }

    fn options() -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
    }

    async fn probe(pool: &PgPool) -> bool {
        sqlx::query("SELECT 1").execute(pool).await.is_ok()
    }

    /// Resolve a pool for a read-only statement.
    pub async fn read(&self) -> Result<&PgPool, DbError> {
        if Self::probe(&self.primary).await {
            return Ok(&self.primary);
        }
        tracing::warn!("primary database unavailable, switching to replica");
        if Self::probe(&self.replica).await {
            return Ok(&self.replica);
        }
        Err(DbError::Unavailable)
    }

    /// Resolve a pool for a write. Fails closed when the primary is down:
    /// the replica must never receive a write.
    pub async fn write(&self) -> Result<&PgPool, DbError> {
        if Self::probe(&self.primary).await {
            return Ok(&self.primary);
        }
        tracing::error!("primary database unavailable, write refused");
        Err(DbError::PrimaryUnavailable)
    }

    pub async fn health(&self) -> DbHealth {
        DbHealth {
            primary: Self::probe(&self.primary).await,
            replica: Self::probe(&self.replica).await,
        }
    }

    /// Direct handle to the primary, for schema setup and tests.
    pub fn primary(&self) -> &PgPool {
        &self.primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DbConfig;

    fn test_config() -> DbConfig {
        DbConfig::from_lookup(|k| {
            std::env::var(k).ok().or(match k {
                "DB_NAME" => Some("enrollment_test".into()),
                _ => None,
            })
        })
    }

    #[tokio::test]
    async fn lazy_connect_does_not_touch_network() {
        // connect_lazy only parses the URL; a bogus host must still succeed.
        let cfg = DbConfig {
            primary_url: "postgres://u:p@nonexistent.invalid:5432/db".into(),
            replica_url: "postgres://u:p@nonexistent.invalid:5433/db".into(),
        };
        assert!(FailoverPool::connect(&cfg).is_ok());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn read_prefers_primary() {
        let pool = FailoverPool::connect(&test_config()).unwrap();
        let resolved = pool.read().await.unwrap();
        let row: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(resolved)
            .await
            .unwrap();
        assert_eq!(row.0, 1);
    }

    #[tokio::test]
    async fn both_down_reports_unavailable() {
        let cfg = DbConfig {
            primary_url: "postgres://u:p@127.0.0.1:1/db".into(),
            replica_url: "postgres://u:p@127.0.0.1:1/db".into(),
        };
        let pool = FailoverPool::connect(&cfg).unwrap();
        assert!(matches!(pool.read().await, Err(DbError::Unavailable)));
        assert!(matches!(pool.write().await, Err(DbError::PrimaryUnavailable)));
        let health = pool.health().await;
        assert!(!health.reachable());
    }
}
