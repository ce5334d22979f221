use crate::auth::AuthenticatedUser;
use crate::error::{ErrorResponse, HttpAppError, ValidatedPath};
use crate::response::ApiResponse;
use crate::state::DbState;
use axum::{extract::State, response::IntoResponse};
use uuid::Uuid;
use vidora_core::models::Video;
use vidora_core::AppError;

#[utoipa::path(
    patch,
    path = "/api/v1/videos/toggle/publish/{video_id}",
    tag = "videos",
    params(
        ("video_id" = Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Publish flag flipped", body = Video),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(db),
    fields(user_id = %user.user_id, video_id = %video_id, operation = "toggle_publish")
)]
pub async fn toggle_publish_status(
    user: AuthenticatedUser,
    ValidatedPath(video_id): ValidatedPath<Uuid>,
    State(db): State<DbState>,
) -> Result<impl IntoResponse, HttpAppError> {
    let video = db
        .videos
        .toggle_published(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No such video exists to toggle".to_string()))?;

    tracing::info!(is_published = video.is_published, "Toggled publish status");

    Ok(ApiResponse::ok(
        video,
        "Video publicity toggled successfully.",
    ))
}
