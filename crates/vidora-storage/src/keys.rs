//! Shared key handling for storage backends.
//!
//! Key format: `{folder}/{filename}`. Public URLs are `{base_url}/{key}` with
//! the key percent-encoded per segment by the caller's HTTP client if needed.

use crate::{StorageError, StorageResult};

/// Generate a storage key for the given folder and filename.
pub fn generate_storage_key(folder: &str, filename: &str) -> String {
    format!("{}/{}", folder.trim_matches('/'), filename)
}

/// Reject keys that could escape the store's namespace.
pub fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if storage_key.starts_with('/') || storage_key.split('/').any(|segment| segment == "..") {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

/// Extract the storage key from a public URL.
///
/// The URL must start with `base_url`. Query string and fragment are dropped
/// and the remainder is percent-decoded.
pub fn key_from_url(base_url: &str, url: &str) -> StorageResult<String> {
    let url = url.trim();
    let without_fragment = url.split('#').next().unwrap_or(url);
    let without_query = without_fragment
        .split('?')
        .next()
        .unwrap_or(without_fragment);

    let base = base_url.trim().trim_end_matches('/');
    let encoded_key = without_query
        .strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('/'))
        .ok_or_else(|| {
            StorageError::InvalidKey(format!("URL is not served by this storage: {}", url))
        })?;

    let key = urlencoding::decode(encoded_key)
        .map_err(|e| StorageError::InvalidKey(format!("Malformed URL encoding: {}", e)))?
        .into_owned();

    validate_key(&key)?;
    Ok(key)
}
