//! API route constants

pub use vidora_core::constants::{API_PREFIX, VIDEOS_PATH};

/// Route prefix of the video resource, e.g. `/api/v1/videos`
pub fn videos_prefix() -> String {
    format!("{}{}", API_PREFIX, VIDEOS_PATH)
}
