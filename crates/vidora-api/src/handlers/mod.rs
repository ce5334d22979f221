pub mod video_delete;
pub mod video_get;
pub mod video_list;
pub mod video_publish;
pub mod video_publish_toggle;
pub mod video_update;
