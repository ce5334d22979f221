//! Storage setup and initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use vidora_core::Config;
use vidora_storage::{create_storage, Storage};

/// Build the configured media store.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage abstraction...");
    let storage = create_storage(config)
        .await
        .context("Failed to initialize media storage")?;

    tracing::info!(
        backend = %storage.backend_type(),
        public_base_url = %storage.public_base_url(),
        "Storage abstraction initialized successfully"
    );

    Ok(storage)
}
