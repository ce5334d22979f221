//! Vidora Storage Library
//!
//! Media store abstraction used for uploaded videos and thumbnails, with
//! implementations for S3-compatible object stores and the local filesystem.
//!
//! # Storage key format
//!
//! Keys are `{folder}/{filename}`, for example `videos/{uuid}.mp4` or
//! `thumbnails/{uuid}.png`. Keys must not contain `..` or a leading `/`.
//! Every stored object is published at `{public_base_url}/{key}`, which lets
//! [`keys::key_from_url`] recover the key from a URL saved on a record.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{generate_storage_key, key_from_url};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use vidora_core::StorageBackend;
