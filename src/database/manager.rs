use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tracing::info;

use crate::config::{DatabaseConfig, StoreBackend};
use crate::database::memory::MemoryEmployeeStore;
use crate::database::postgres::PgEmployeeStore;
use crate::database::store::{EmployeeStore, StoreError};

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Builds the employee store selected by configuration.
pub struct DatabaseManager;

impl DatabaseManager {
    pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn EmployeeStore>, DatabaseError> {
        match config.backend {
            StoreBackend::Memory => {
                info!("Using in-memory employee store");
                Ok(Arc::new(MemoryEmployeeStore::new()))
            }
            StoreBackend::Postgres => {
                let url = config
                    .url
                    .as_deref()
                    .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;
                url::Url::parse(url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;

                let pool = PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .acquire_timeout(Duration::from_secs(config.connection_timeout))
                    .connect(url)
                    .await?;
                info!(
                    "Connected to {}",
                    config.redacted_url().unwrap_or_default()
                );

                let store = PgEmployeeStore::new(&config.table, pool)?;
                store.ensure_schema().await?;
                Ok(Arc::new(store))
            }
        }
    }
}
