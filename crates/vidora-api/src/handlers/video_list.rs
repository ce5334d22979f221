use crate::error::{ErrorResponse, HttpAppError, ValidatedQuery};
use crate::response::ApiResponse;
use crate::state::DbState;
use axum::{extract::State, response::IntoResponse};
use vidora_core::models::{VideoListParams, VideoSummary};
use vidora_core::AppError;

#[utoipa::path(
    get,
    path = "/api/v1/videos",
    tag = "videos",
    params(VideoListParams),
    responses(
        (status = 200, description = "Page of published videos", body = Vec<VideoSummary>),
        (status = 400, description = "Invalid userId", body = ErrorResponse),
        (status = 404, description = "No videos found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(db, params),
    fields(
        page = ?params.page,
        limit = ?params.limit,
        sort_by = ?params.sort_by,
        sort_type = ?params.sort_type,
        operation = "list_videos"
    )
)]
pub async fn list_videos(
    State(db): State<DbState>,
    ValidatedQuery(params): ValidatedQuery<VideoListParams>,
) -> Result<impl IntoResponse, HttpAppError> {
    let query = params.into_query()?;

    let videos = db.videos.list_published(&query).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list videos");
        HttpAppError::from(e)
    })?;

    if videos.is_empty() {
        return Err(AppError::NotFound("No videos found".to_string()).into());
    }

    Ok(ApiResponse::ok(
        videos,
        "Successfully fetched videos based on query.",
    ))
}
