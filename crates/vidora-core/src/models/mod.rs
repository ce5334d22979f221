pub mod comment;
pub mod like;
pub mod query;
pub mod user;
pub mod video;

pub use comment::{Comment, CommentView};
pub use like::Like;
pub use query::{SortDirection, SortField, VideoListParams, VideoListQuery, VideoSort};
pub use user::{OwnerProfile, OwnerSummary, User};
pub use video::{NewVideo, UpdateVideoDetailsRequest, Video, VideoDetail, VideoSummary};
