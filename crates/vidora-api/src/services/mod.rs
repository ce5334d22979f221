pub mod probe;
pub mod video_media;
