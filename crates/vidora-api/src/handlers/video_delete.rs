use crate::auth::AuthenticatedUser;
use crate::error::{ErrorResponse, HttpAppError, ValidatedPath};
use crate::response::ApiResponse;
use crate::services::video_media::VideoMediaService;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;
use uuid::Uuid;
use vidora_core::models::Video;
use vidora_core::AppError;

#[utoipa::path(
    delete,
    path = "/api/v1/videos/{video_id}",
    tag = "videos",
    params(
        ("video_id" = Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Deleted video record", body = Video),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(user_id = %user.user_id, video_id = %video_id, operation = "delete_video")
)]
pub async fn delete_video(
    user: AuthenticatedUser,
    ValidatedPath(video_id): ValidatedPath<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let video = state
        .db
        .videos
        .find_by_id(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No such video exists to delete".to_string()))?;

    // Media goes first; a failed delete only leaves an orphaned object behind.
    VideoMediaService::delete_video_media(&state.media.storage, &video).await;

    let deleted = state
        .db
        .videos
        .delete(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No such video exists to delete".to_string()))?;

    tracing::info!("Video deleted");

    Ok(ApiResponse::ok(deleted, "Video deleted successfully."))
}
