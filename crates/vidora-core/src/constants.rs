//! Shared constants

/// Prefix for every versioned API route.
pub const API_PREFIX: &str = "/api/v1";

/// Mount point of the video resource below [`API_PREFIX`].
pub const VIDEOS_PATH: &str = "/videos";

/// First page when the client does not ask for one.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size when the client does not ask for one.
pub const DEFAULT_PAGE_LIMIT: i64 = 3;

/// Upper bound for a client supplied page size.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Storage folder for uploaded video files.
pub const VIDEO_FOLDER: &str = "videos";

/// Storage folder for uploaded thumbnails.
pub const THUMBNAIL_FOLDER: &str = "thumbnails";
