//! Test helpers: build AppState and router for integration tests.
//!
//! The router is the production one from `setup::routes`; only its
//! dependencies are swapped for an in-memory repository, local storage on a
//! temp dir and a probe returning a fixed duration.

#![allow(dead_code)]

pub mod repository;
pub mod storage;

use async_trait::async_trait;
use axum_test::TestServer;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;
use vidora_api::auth::JwtClaims;
use vidora_api::constants;
use vidora_api::services::probe::{MediaProbe, ProbeError};
use vidora_api::setup::routes;
use vidora_api::state::{AppState, DbState, MediaConfig};
use vidora_core::{BaseConfig, Config, StorageBackend, VideoServiceConfig};
use vidora_storage::{LocalStorage, Storage};

pub use repository::MockVideoRepository;
pub use storage::{FaultyStorage, StorageFaults};

pub const TEST_JWT_SECRET: &str = "integration-test-secret-with-32-plus-chars";
pub const TEST_MEDIA_BASE_URL: &str = "http://localhost:3000/media";
pub const PROBED_DURATION: f64 = 42.5;

/// API path below the videos prefix (e.g. `/api/v1/videos/{id}`).
pub fn videos_path(path: &str) -> String {
    format!("{}{}", constants::videos_prefix(), path)
}

/// Probe that reports the same duration for every upload.
pub struct FixedProbe(pub f64);

#[async_trait]
impl MediaProbe for FixedProbe {
    async fn duration_seconds(&self, _data: &[u8], _extension: &str) -> Result<f64, ProbeError> {
        Ok(self.0)
    }
}

/// Test application: server plus handles to inspect its dependencies.
pub struct TestApp {
    pub server: TestServer,
    pub repo: Arc<MockVideoRepository>,
    pub storage: Arc<dyn Storage>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Bearer token for a fresh user id.
    pub fn token(&self) -> String {
        token_for(Uuid::new_v4())
    }
}

pub fn token_for(user_id: Uuid) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = JwtClaims {
        sub: user_id,
        exp: now + 3600,
        iat: now,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("Failed to sign test token")
}

pub fn create_test_config(storage_path: &str) -> Config {
    Config(Box::new(VideoServiceConfig {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            db_max_connections: 1,
            db_timeout_seconds: 5,
            request_timeout_seconds: 30,
            jwt_secret: TEST_JWT_SECRET.to_string(),
            environment: "test".to_string(),
        },
        database_url: "postgres://unused@localhost/unused".to_string(),
        storage_backend: StorageBackend::Local,
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        local_storage_path: storage_path.to_string(),
        local_storage_base_url: TEST_MEDIA_BASE_URL.to_string(),
        max_video_size_bytes: 1024 * 1024,
        video_allowed_extensions: vec!["mp4".to_string(), "webm".to_string()],
        video_allowed_content_types: vec!["video/mp4".to_string(), "video/webm".to_string()],
        max_thumbnail_size_bytes: 64 * 1024,
        thumbnail_allowed_extensions: vec!["png".to_string(), "jpg".to_string()],
        thumbnail_allowed_content_types: vec!["image/png".to_string(), "image/jpeg".to_string()],
        ffprobe_path: "ffprobe".to_string(),
    }))
}

/// Setup test app with an in-memory repository and local storage.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let storage: Arc<dyn Storage> = Arc::new(local_storage(&temp_dir).await);
    build_test_app(temp_dir, storage)
}

/// Setup test app whose storage injects `faults`.
pub async fn setup_test_app_with_faults(faults: StorageFaults) -> (TestApp, Arc<FaultyStorage>) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let storage = Arc::new(FaultyStorage::new(local_storage(&temp_dir).await, faults));
    let app = build_test_app(temp_dir, storage.clone());
    (app, storage)
}

async fn local_storage(temp_dir: &TempDir) -> LocalStorage {
    LocalStorage::new(temp_dir.path(), TEST_MEDIA_BASE_URL.to_string())
        .await
        .expect("Failed to create local storage")
}

fn build_test_app(temp_dir: TempDir, storage: Arc<dyn Storage>) -> TestApp {
    let storage_path = temp_dir.path().to_string_lossy().to_string();
    let config = create_test_config(&storage_path);
    let repo = Arc::new(MockVideoRepository::default());

    let state = Arc::new(AppState {
        db: DbState {
            videos: repo.clone(),
        },
        media: MediaConfig::from_config(
            &config,
            storage.clone(),
            Arc::new(FixedProbe(PROBED_DURATION)),
        ),
    });

    let router = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        repo,
        storage,
        _temp_dir: temp_dir,
    }
}
