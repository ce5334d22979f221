//! Media store operations for videos: uploads and deletion of stored files.
//!
//! Keeps handler logic thin and allows unit testing without HTTP.

use crate::error::storage_error_to_app;
use crate::state::MediaKind;
use crate::utils::upload::UploadedFile;
use std::sync::Arc;
use uuid::Uuid;
use vidora_core::models::Video;
use vidora_core::AppError;
use vidora_storage::Storage;

/// An object written to the media store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    pub key: String,
    pub url: String,
}

pub struct VideoMediaService;

impl VideoMediaService {
    /// Upload `file` under a fresh name in the folder of `kind`.
    ///
    /// A store that reports success without a URL is treated as a failed upload.
    pub async fn upload(
        storage: &Arc<dyn Storage>,
        kind: MediaKind,
        file: UploadedFile,
        extension: &str,
    ) -> Result<StoredMedia, AppError> {
        let filename = format!("{}.{}", Uuid::new_v4(), extension);
        let size = file.data.len();

        let (key, url) = storage
            .upload(kind.folder(), &filename, &file.content_type, file.data)
            .await
            .map_err(storage_error_to_app)?;

        if url.trim().is_empty() {
            tracing::error!(key = %key, "Media store returned an empty URL");
            Self::remove_key(storage, &key).await;
            return Err(AppError::InvalidInput(format!(
                "Failure while uploading {} to the media store. Try again!",
                kind.field_name()
            )));
        }

        tracing::info!(
            key = %key,
            size_bytes = size,
            original_filename = %file.filename,
            "Stored {}",
            kind.field_name()
        );

        Ok(StoredMedia { key, url })
    }

    /// Storage key behind a URL saved on a record, or `None` for blank URLs
    /// and URLs the configured store did not produce.
    pub fn key_for_url(storage: &Arc<dyn Storage>, url: &str) -> Option<String> {
        if url.trim().is_empty() {
            return None;
        }

        match storage.key_from_url(url) {
            Ok(key) => Some(key),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    url = %url,
                    "URL does not belong to the media store, skipping deletion"
                );
                None
            }
        }
    }

    /// Delete the object behind `url`; storage failures propagate.
    pub async fn remove_url(storage: &Arc<dyn Storage>, url: &str) -> Result<(), AppError> {
        let Some(key) = Self::key_for_url(storage, url) else {
            return Ok(());
        };

        storage.delete(&key).await.map_err(storage_error_to_app)
    }

    /// Best-effort delete by key: logs errors but never fails.
    pub async fn remove_key(storage: &Arc<dyn Storage>, key: &str) {
        if let Err(e) = storage.delete(key).await {
            tracing::warn!(error = %e, storage_key = %key, "Failed to delete media from storage");
        }
    }

    /// Best-effort delete by URL: logs errors but never fails.
    pub async fn remove_url_best_effort(storage: &Arc<dyn Storage>, url: &str) {
        if let Some(key) = Self::key_for_url(storage, url) {
            Self::remove_key(storage, &key).await;
        }
    }

    /// Delete the media file and thumbnail of `video`, each only when present.
    pub async fn delete_video_media(storage: &Arc<dyn Storage>, video: &Video) {
        let video_file = async {
            if video.has_video_file() {
                Self::remove_url_best_effort(storage, &video.video_file).await;
            }
        };
        let thumbnail = async {
            if video.has_thumbnail() {
                Self::remove_url_best_effort(storage, &video.thumbnail).await;
            }
        };

        futures::join!(video_file, thumbnail);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;
    use vidora_storage::LocalStorage;

    const BASE_URL: &str = "http://localhost:3000/media";

    async fn storage() -> (TempDir, Arc<dyn Storage>) {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), BASE_URL.to_string())
            .await
            .unwrap();
        (dir, Arc::new(storage))
    }

    fn png() -> UploadedFile {
        UploadedFile {
            data: b"png bytes".to_vec(),
            filename: "cover.png".to_string(),
            content_type: "image/png".to_string(),
        }
    }

    fn video_with(video_file: &str, thumbnail: &str) -> Video {
        let now = Utc::now();
        Video {
            id: Uuid::new_v4(),
            video_file: video_file.to_string(),
            thumbnail: thumbnail.to_string(),
            title: "A".to_string(),
            description: "B".to_string(),
            duration: 1.0,
            owner_id: Uuid::new_v4(),
            is_published: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_upload_places_file_in_kind_folder() {
        let (_dir, storage) = storage().await;
        let stored = VideoMediaService::upload(&storage, MediaKind::Thumbnail, png(), "png")
            .await
            .unwrap();

        assert!(stored.key.starts_with("thumbnails/"));
        assert!(stored.url.starts_with("http://localhost:3000/media/thumbnails/"));
        assert!(storage.exists(&stored.key).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_video_media_removes_both_files() {
        let (_dir, storage) = storage().await;
        let thumb = VideoMediaService::upload(&storage, MediaKind::Thumbnail, png(), "png")
            .await
            .unwrap();
        let file = VideoMediaService::upload(&storage, MediaKind::Video, png(), "mp4")
            .await
            .unwrap();

        VideoMediaService::delete_video_media(&storage, &video_with(&file.url, &thumb.url)).await;

        assert!(!storage.exists(&thumb.key).await.unwrap());
        assert!(!storage.exists(&file.key).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_video_media_tolerates_missing_and_foreign_urls() {
        let (_dir, storage) = storage().await;
        let video = video_with("", "https://elsewhere.example.com/thumb.png");
        VideoMediaService::delete_video_media(&storage, &video).await;
    }

    #[tokio::test]
    async fn test_remove_url_skips_foreign_urls() {
        let (_dir, storage) = storage().await;
        VideoMediaService::remove_url(&storage, "https://elsewhere.example.com/a.png")
            .await
            .unwrap();
        VideoMediaService::remove_url(&storage, "").await.unwrap();
    }
}
