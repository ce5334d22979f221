//! Application setup and initialization
//!
//! Everything `main` needs to go from a [`Config`] to a served router. The
//! steps are public so the integration tests can build the same router
//! around in-memory dependencies.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::services::probe::{FfprobeProbe, MediaProbe};
use crate::state::{AppState, DbState, MediaConfig};
use anyhow::{Context, Result};
use std::sync::Arc;
use vidora_core::Config;
use vidora_db::VideoRepository;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.environment())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    // Setup database
    let pool = database::setup_database(&config).await?;

    // Setup storage
    let storage = storage::setup_storage(&config).await?;

    let probe: Arc<dyn MediaProbe> = Arc::new(
        FfprobeProbe::new(config.ffprobe_path().to_string())
            .context("Invalid FFPROBE_PATH")?,
    );

    let state = Arc::new(AppState {
        db: DbState {
            videos: Arc::new(VideoRepository::new(pool)),
        },
        media: MediaConfig::from_config(&config, storage, probe),
    });

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
