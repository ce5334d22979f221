//! OpenAPI documentation, served as JSON at `/api/v1/openapi.json`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error;
use crate::handlers;
use vidora_core::models;

/// Registers the bearer JWT scheme used by the protected routes.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vidora API",
        version = "0.1.0",
        description = "Video hosting API (v1): listing and search, publishing with media upload, details with owner, comments and likes, metadata and thumbnail updates, deletion and publish toggling. Every response is wrapped in a {statusCode, data, message, success} envelope."
    ),
    paths(
        handlers::video_list::list_videos,
        handlers::video_get::get_video,
        handlers::video_publish::publish_video,
        handlers::video_update::update_video_details,
        handlers::video_update::update_video_thumbnail,
        handlers::video_delete::delete_video,
        handlers::video_publish_toggle::toggle_publish_status,
    ),
    components(
        schemas(
            error::ErrorResponse,
            models::Video,
            models::VideoSummary,
            models::VideoDetail,
            models::CommentView,
            models::OwnerSummary,
            models::OwnerProfile,
            models::UpdateVideoDetailsRequest,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "videos", description = "Video resource endpoints")
    )
)]
pub struct ApiDoc;
