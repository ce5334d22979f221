//! Vidora database layer
//!
//! Repositories over PostgreSQL plus the migration runner.

pub mod db;

pub use db::migrations::run_migrations;
pub use db::video::{VideoRepository, VideoRepositoryTrait};
