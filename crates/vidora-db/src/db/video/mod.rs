//! Video persistence: the repository trait seam, its PostgreSQL
//! implementation and the query pipelines behind the read paths.

pub mod pipeline;
pub mod repository;

pub use repository::{VideoRepository, VideoRepositoryTrait};
