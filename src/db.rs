use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::{Config, StoreBackend};
use crate::store::{LeaveStore, MemoryStore, MySqlStore};

/// Opens the configured backend and applies pending migrations.
pub async fn init_store(config: &Config) -> Result<Arc<dyn LeaveStore>> {
    let store: Arc<dyn LeaveStore> = match config.store_backend {
        StoreBackend::MySql => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set")?;
            let store = MySqlStore::connect(url, config.db_max_connections)
                .await
                .context("Failed to connect to database")?;
            info!(max_connections = config.db_max_connections, "Connected to MySQL");
            Arc::new(store)
        }
        StoreBackend::Memory => {
            warn!("Using in-memory store; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    store.migrate().await.context("Failed to migrate schema")?;
    Ok(store)
}
