//! Application state and sub-state extractors.
//!
//! AppState is split into sub-states so handlers can extract only what they
//! need via Axum's `FromRef`.

use crate::services::probe::MediaProbe;
use std::sync::Arc;
use vidora_core::Config;
use vidora_db::VideoRepositoryTrait;
use vidora_storage::Storage;

// ----- Sub-state types -----

/// Persistence handles.
#[derive(Clone)]
pub struct DbState {
    pub videos: Arc<dyn VideoRepositoryTrait>,
}

/// Media store, duration probe and upload allowlists.
#[derive(Clone)]
pub struct MediaConfig {
    pub storage: Arc<dyn Storage>,
    pub probe: Arc<dyn MediaProbe>,
    pub video_max_file_size: usize,
    pub video_allowed_extensions: Vec<String>,
    pub video_allowed_content_types: Vec<String>,
    pub thumbnail_max_file_size: usize,
    pub thumbnail_allowed_extensions: Vec<String>,
    pub thumbnail_allowed_content_types: Vec<String>,
}

/// Uploaded media kinds accepted by the video endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Thumbnail,
}

impl MediaKind {
    /// Storage folder for this kind of media.
    pub fn folder(self) -> &'static str {
        match self {
            MediaKind::Video => vidora_core::constants::VIDEO_FOLDER,
            MediaKind::Thumbnail => vidora_core::constants::THUMBNAIL_FOLDER,
        }
    }

    /// Multipart field carrying this kind of media.
    pub fn field_name(self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Thumbnail => "thumbnail",
        }
    }
}

/// Limits and allowlists for a single media kind (from MediaConfig).
#[derive(Clone, Debug)]
pub struct MediaLimits {
    pub max_file_size: usize,
    pub allowed_extensions: Vec<String>,
    pub allowed_content_types: Vec<String>,
}

impl MediaConfig {
    pub fn from_config(
        config: &Config,
        storage: Arc<dyn Storage>,
        probe: Arc<dyn MediaProbe>,
    ) -> Self {
        Self {
            storage,
            probe,
            video_max_file_size: config.max_video_size_bytes(),
            video_allowed_extensions: config.video_allowed_extensions().to_vec(),
            video_allowed_content_types: config.video_allowed_content_types().to_vec(),
            thumbnail_max_file_size: config.max_thumbnail_size_bytes(),
            thumbnail_allowed_extensions: config.thumbnail_allowed_extensions().to_vec(),
            thumbnail_allowed_content_types: config.thumbnail_allowed_content_types().to_vec(),
        }
    }

    /// Return size limits and allowlists for the given media kind.
    pub fn limits_for(&self, kind: MediaKind) -> MediaLimits {
        match kind {
            MediaKind::Video => MediaLimits {
                max_file_size: self.video_max_file_size,
                allowed_extensions: self.video_allowed_extensions.clone(),
                allowed_content_types: self.video_allowed_content_types.clone(),
            },
            MediaKind::Thumbnail => MediaLimits {
                max_file_size: self.thumbnail_max_file_size,
                allowed_extensions: self.thumbnail_allowed_extensions.clone(),
                allowed_content_types: self.thumbnail_allowed_content_types.clone(),
            },
        }
    }
}

// ----- AppState -----

/// Main application state: aggregates sub-states for dependency injection.
#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub media: MediaConfig,
}

// ----- FromRef for sub-state extraction -----

impl axum::extract::FromRef<Arc<AppState>> for DbState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.db.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for MediaConfig {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.media.clone()
    }
}
