use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use vidora_core::models::{NewVideo, Video, VideoDetail, VideoListQuery, VideoSummary};
use vidora_core::AppError;

use super::pipeline::{
    published_list_query, VideoDetailRow, VideoSummaryRow, PUBLISHED_DETAIL_QUERY, VIDEO_COLUMNS,
};

/// Trait for video persistence
///
/// Handlers depend on this trait so tests can swap in an in-memory store.
/// Methods that address a single record return `Ok(None)` when it is absent;
/// callers decide how to report that.
#[async_trait]
pub trait VideoRepositoryTrait: Send + Sync {
    /// Published videos matching `query`, already paginated and joined with owners.
    async fn list_published(&self, query: &VideoListQuery) -> Result<Vec<VideoSummary>, AppError>;

    /// Denormalized view of a published video.
    async fn find_published_detail(&self, id: Uuid) -> Result<Option<VideoDetail>, AppError>;

    /// Any video, published or not.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    async fn create(&self, video: NewVideo) -> Result<Video, AppError>;

    async fn update_details(
        &self,
        id: Uuid,
        title: &str,
        description: &str,
    ) -> Result<Option<Video>, AppError>;

    async fn update_thumbnail(&self, id: Uuid, thumbnail: &str)
        -> Result<Option<Video>, AppError>;

    /// Flip the publish flag and return the updated record.
    async fn toggle_published(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    /// Delete the record and return it as it was.
    async fn delete(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    /// Round-trip to the database, used by the health check.
    async fn ping(&self) -> Result<(), AppError>;
}

/// PostgreSQL video repository
#[derive(Clone)]
pub struct VideoRepository {
    pool: PgPool,
}

impl VideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoRepositoryTrait for VideoRepository {
    #[tracing::instrument(
        skip(self, query),
        fields(
            db.table = "videos",
            db.operation = "select",
            page = query.page,
            limit = query.limit
        )
    )]
    async fn list_published(&self, query: &VideoListQuery) -> Result<Vec<VideoSummary>, AppError> {
        let mut builder = published_list_query(query);
        let rows: Vec<VideoSummaryRow> = builder
            .build_query_as::<VideoSummaryRow>()
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(count = rows.len(), "Listed published videos");

        Ok(rows.into_iter().map(VideoSummary::from).collect())
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    async fn find_published_detail(&self, id: Uuid) -> Result<Option<VideoDetail>, AppError> {
        let row: Option<VideoDetailRow> =
            sqlx::query_as::<Postgres, VideoDetailRow>(PUBLISHED_DETAIL_QUERY)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(VideoDetail::from))
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let video = sqlx::query_as::<Postgres, Video>(&format!(
            "SELECT {} FROM videos WHERE id = $1",
            VIDEO_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "insert", owner_id = %video.owner_id))]
    async fn create(&self, video: NewVideo) -> Result<Video, AppError> {
        let created = sqlx::query_as::<Postgres, Video>(&format!(
            r#"
            INSERT INTO videos (id, video_file, thumbnail, title, description, duration, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            VIDEO_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&video.video_file)
        .bind(&video.thumbnail)
        .bind(&video.title)
        .bind(&video.description)
        .bind(video.duration)
        .bind(video.owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    #[tracing::instrument(skip(self, title, description), fields(db.table = "videos", db.operation = "update", db.record_id = %id))]
    async fn update_details(
        &self,
        id: Uuid,
        title: &str,
        description: &str,
    ) -> Result<Option<Video>, AppError> {
        let updated = sqlx::query_as::<Postgres, Video>(&format!(
            r#"
            UPDATE videos
            SET title = $2, description = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            VIDEO_COLUMNS
        ))
        .bind(id)
        .bind(title)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "update", db.record_id = %id))]
    async fn update_thumbnail(
        &self,
        id: Uuid,
        thumbnail: &str,
    ) -> Result<Option<Video>, AppError> {
        let updated = sqlx::query_as::<Postgres, Video>(&format!(
            r#"
            UPDATE videos
            SET thumbnail = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            VIDEO_COLUMNS
        ))
        .bind(id)
        .bind(thumbnail)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "update", db.record_id = %id))]
    async fn toggle_published(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let updated = sqlx::query_as::<Postgres, Video>(&format!(
            r#"
            UPDATE videos
            SET is_published = NOT is_published, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            VIDEO_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "delete", db.record_id = %id))]
    async fn delete(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let deleted = sqlx::query_as::<Postgres, Video>(&format!(
            "DELETE FROM videos WHERE id = $1 RETURNING {}",
            VIDEO_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
