//! Database repositories for data access layer
//
// Video repository, its trait seam and query pipelines
pub mod video;
//
// Schema migrations
pub mod migrations;
