use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::comment::CommentView;
use super::user::{OwnerProfile, OwnerSummary};
use crate::validation::not_blank;

/// Stored video record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: Uuid,
    /// Public URL of the media file, empty when unknown
    pub video_file: String,
    /// Public URL of the thumbnail, empty when unknown
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    /// Length in seconds
    pub duration: f64,
    #[serde(rename = "owner")]
    pub owner_id: Uuid,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Video {
    pub fn has_video_file(&self) -> bool {
        !self.video_file.trim().is_empty()
    }

    pub fn has_thumbnail(&self) -> bool {
        !self.thumbnail.trim().is_empty()
    }
}

/// Fields supplied when a video is published. The publish flag is left to
/// the store default.
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub title: String,
    pub description: String,
    pub video_file: String,
    pub thumbnail: String,
    pub duration: f64,
    pub owner_id: Uuid,
}

/// Entry of the published video listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub id: Uuid,
    pub video_file: String,
    pub thumbnail: String,
    pub owner: OwnerSummary,
    pub title: String,
    pub duration: f64,
    pub created_at: DateTime<Utc>,
}

/// Denormalized view of one published video.
///
/// `likes_count` is computed from like rows on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetail {
    pub id: Uuid,
    pub video_file: String,
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// `null` when the owning account no longer exists
    pub owner: Option<OwnerProfile>,
    pub comments: Vec<CommentView>,
    pub likes_count: i64,
}

/// Request DTO for replacing a video's title and description
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct UpdateVideoDetailsRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Description is required"))]
    pub description: String,
}
