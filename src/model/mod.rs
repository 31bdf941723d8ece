//! The persistence layer. `ModelManager` owns the connection pool and gets handed to
//! the backend model controllers (`*Bmc`) explicitly.

mod error;
pub mod subscription;

pub use error::{Error, Result};

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, Connection, PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::config::{AppConfig, DbConfig};

#[derive(Clone, Debug)]
pub struct ModelManager {
    db: PgPool,
}

impl ModelManager {
    pub async fn init(config: &AppConfig) -> Result<Self> {
        info!("{:<20} - Initializing the DB pool", "init_db");
        let db = init_db(&config.db_config).await?;

        Ok(Self { db })
    }

    /// Creates a fresh, uniquely named database, migrates it and returns a `ModelManager` for it.
    /// Used by the integration tests so every test runs against an empty store.
    pub async fn test_init(config: &AppConfig) -> Result<Self> {
        let mut db_config = config.db_config.clone();
        db_config.db_name = format!("unsub_test_{}", Uuid::new_v4().simple());

        configure_test_db(&db_config).await?;
        let db = init_db(&db_config).await?;

        Ok(Self { db })
    }

    /// Wraps an already built pool.
    #[cfg(test)]
    pub(crate) fn from_pool(db: PgPool) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &PgPool {
        &self.db
    }
}

async fn init_db(db_config: &DbConfig) -> Result<PgPool> {
    // NOTE: Tests sometimes fail if there is more than 1 max connection. This fixes it.
    let max_cons = if cfg!(test) { 1 } else { 5 };

    let db_pool = PgPoolOptions::new()
        .max_connections(max_cons)
        .acquire_timeout(Duration::from_millis(500))
        .connect_with(db_config.connection_options())
        .await
        .map_err(|ex| Error::FailToCreatePool(format!("Standard DB Pool: {ex}")))?;

    Ok(db_pool)
}

async fn configure_test_db(db_config: &DbConfig) -> Result<()> {
    let mut connection =
        PgConnection::connect_with(&db_config.connection_options_without_db()).await?;

    let sql = format!(r#"CREATE DATABASE "{}";"#, db_config.db_name);
    sqlx::query(&sql).execute(&mut connection).await?;

    // Create pool only used to migrate the DB
    let db_pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_millis(1000))
        .connect_with(db_config.connection_options())
        .await
        .map_err(|ex| Error::FailToCreatePool(format!("Test Config: {ex}")))?;
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    Ok(())
}
