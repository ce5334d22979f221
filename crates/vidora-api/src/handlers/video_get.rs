use crate::auth::AuthenticatedUser;
use crate::error::{ErrorResponse, HttpAppError, ValidatedPath};
use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;
use uuid::Uuid;
use vidora_core::models::VideoDetail;
use vidora_core::AppError;

#[utoipa::path(
    get,
    path = "/api/v1/videos/{video_id}",
    tag = "videos",
    params(
        ("video_id" = Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video with owner, comments and like count", body = VideoDetail),
        (status = 400, description = "Malformed video id", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(
        user_id = %user.user_id,
        video_id = %video_id,
        operation = "get_video"
    )
)]
pub async fn get_video(
    user: AuthenticatedUser,
    ValidatedPath(video_id): ValidatedPath<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let video = state
        .db
        .videos
        .find_published_detail(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    Ok(ApiResponse::ok(video, "Video fetched successfully"))
}
