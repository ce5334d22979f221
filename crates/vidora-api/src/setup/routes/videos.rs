//! Video resource routes, mounted under `/api/v1/videos`.

use crate::constants::videos_prefix;
use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, patch, post};
use axum::Router;
use std::sync::Arc;

/// Routes reachable without a token.
pub fn public_video_routes() -> Router<Arc<AppState>> {
    Router::new().route(&videos_prefix(), get(handlers::video_list::list_videos))
}

/// Routes behind the bearer token check.
pub fn protected_video_routes() -> Router<Arc<AppState>> {
    let prefix = videos_prefix();

    Router::new()
        .route(&prefix, post(handlers::video_publish::publish_video))
        .route(
            &format!("{}/{{video_id}}", prefix),
            get(handlers::video_get::get_video)
                .patch(handlers::video_update::update_video_thumbnail)
                .delete(handlers::video_delete::delete_video),
        )
        .route(
            &format!("{}/update-details/{{video_id}}", prefix),
            patch(handlers::video_update::update_video_details),
        )
        .route(
            &format!("{}/toggle/publish/{{video_id}}", prefix),
            patch(handlers::video_publish_toggle::toggle_publish_status),
        )
}
