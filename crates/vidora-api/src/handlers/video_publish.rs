use crate::auth::AuthenticatedUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::response::ApiResponse;
use crate::services::video_media::VideoMediaService;
use crate::state::{AppState, MediaKind};
use crate::utils::upload::{read_publish_form, validate_upload};
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
};
use std::sync::Arc;
use vidora_core::models::{NewVideo, Video};
use vidora_core::validation::trimmed_text;
use vidora_core::AppError;

#[utoipa::path(
    post,
    path = "/api/v1/videos",
    tag = "videos",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Video published", body = Video),
        (status = 400, description = "Missing fields or files", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, multipart),
    fields(user_id = %user.user_id, operation = "publish_video")
)]
pub async fn publish_video(
    user: AuthenticatedUser,
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = read_publish_form(multipart).await?;

    let (title, description) = match (
        trimmed_text(form.title.as_deref()),
        trimmed_text(form.description.as_deref()),
    ) {
        (Some(title), Some(description)) => (title, description),
        _ => {
            return Err(AppError::InvalidInput(
                "Title and description are required".to_string(),
            )
            .into())
        }
    };

    let thumbnail = form
        .thumbnail
        .ok_or_else(|| AppError::InvalidInput("Thumbnail is required".to_string()))?;
    let video = form
        .video
        .ok_or_else(|| AppError::InvalidInput("Video is required".to_string()))?;

    let media = &state.media;
    let thumbnail_ext = validate_upload(
        &thumbnail,
        MediaKind::Thumbnail,
        &media.limits_for(MediaKind::Thumbnail),
    )?;
    let video_ext = validate_upload(&video, MediaKind::Video, &media.limits_for(MediaKind::Video))?;

    let duration = match media.probe.duration_seconds(&video.data, &video_ext).await {
        Ok(duration) => duration,
        Err(e) => {
            tracing::warn!(error = %e, "Could not probe video duration, storing 0");
            0.0
        }
    };

    let stored_thumbnail =
        VideoMediaService::upload(&media.storage, MediaKind::Thumbnail, thumbnail, &thumbnail_ext)
            .await?;
    let stored_video =
        match VideoMediaService::upload(&media.storage, MediaKind::Video, video, &video_ext).await
        {
            Ok(stored) => stored,
            Err(e) => {
                VideoMediaService::remove_key(&media.storage, &stored_thumbnail.key).await;
                return Err(e.into());
            }
        };

    let new_video = NewVideo {
        title,
        description,
        video_file: stored_video.url,
        thumbnail: stored_thumbnail.url,
        duration,
        owner_id: user.user_id,
    };

    let created = match state.db.videos.create(new_video).await {
        Ok(created) => created,
        Err(e) => {
            tracing::error!(error = %e, "Failed to insert video, removing uploaded media");
            futures::join!(
                VideoMediaService::remove_key(&media.storage, &stored_video.key),
                VideoMediaService::remove_key(&media.storage, &stored_thumbnail.key),
            );
            return Err(e.into());
        }
    };

    tracing::info!(video_id = %created.id, duration, "Video published");

    Ok(ApiResponse::created(created, "Video uploaded successfully."))
}
