use crate::auth::AuthenticatedUser;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson, ValidatedPath};
use crate::response::ApiResponse;
use crate::services::video_media::VideoMediaService;
use crate::state::{AppState, DbState, MediaKind};
use crate::utils::upload::{extract_multipart_file, validate_upload};
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;
use vidora_core::models::{UpdateVideoDetailsRequest, Video};
use vidora_core::AppError;

#[utoipa::path(
    patch,
    path = "/api/v1/videos/update-details/{video_id}",
    tag = "videos",
    params(
        ("video_id" = Uuid, Path, description = "Video ID")
    ),
    request_body = UpdateVideoDetailsRequest,
    responses(
        (status = 200, description = "Details updated", body = Video),
        (status = 400, description = "Title or description missing", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(db, request),
    fields(user_id = %user.user_id, video_id = %video_id, operation = "update_video_details")
)]
pub async fn update_video_details(
    user: AuthenticatedUser,
    ValidatedPath(video_id): ValidatedPath<Uuid>,
    State(db): State<DbState>,
    ValidatedJson(request): ValidatedJson<UpdateVideoDetailsRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate()?;

    let video = db
        .videos
        .update_details(video_id, request.title.trim(), request.description.trim())
        .await?
        .ok_or_else(|| AppError::NotFound("No such video exists to update".to_string()))?;

    Ok(ApiResponse::ok(video, "Video details updated successfully."))
}

#[utoipa::path(
    patch,
    path = "/api/v1/videos/{video_id}",
    tag = "videos",
    params(
        ("video_id" = Uuid, Path, description = "Video ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Thumbnail replaced", body = Video),
        (status = 400, description = "Thumbnail missing or invalid", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, multipart),
    fields(user_id = %user.user_id, video_id = %video_id, operation = "update_video_thumbnail")
)]
pub async fn update_video_thumbnail(
    user: AuthenticatedUser,
    ValidatedPath(video_id): ValidatedPath<Uuid>,
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let thumbnail = extract_multipart_file(multipart, MediaKind::Thumbnail.field_name())
        .await?
        .ok_or_else(|| {
            AppError::InvalidInput("Thumbnail was not received by the server".to_string())
        })?;

    let media = &state.media;
    let extension = validate_upload(
        &thumbnail,
        MediaKind::Thumbnail,
        &media.limits_for(MediaKind::Thumbnail),
    )?;

    let existing = state
        .db
        .videos
        .find_by_id(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No such video exists to update".to_string()))?;

    let stored =
        VideoMediaService::upload(&media.storage, MediaKind::Thumbnail, thumbnail, &extension)
            .await?;

    if existing.has_thumbnail() {
        if let Err(e) = VideoMediaService::remove_url(&media.storage, &existing.thumbnail).await {
            tracing::error!(error = %e, "Failed to delete previous thumbnail");
            VideoMediaService::remove_key(&media.storage, &stored.key).await;
            return Err(e.into());
        }
    }

    let video = match state.db.videos.update_thumbnail(video_id, &stored.url).await {
        Ok(Some(video)) => video,
        Ok(None) => {
            VideoMediaService::remove_key(&media.storage, &stored.key).await;
            return Err(AppError::NotFound("No such video exists to update".to_string()).into());
        }
        Err(e) => {
            VideoMediaService::remove_key(&media.storage, &stored.key).await;
            return Err(e.into());
        }
    };

    Ok(ApiResponse::ok(
        video,
        "Video thumbnail updated successfully.",
    ))
}
