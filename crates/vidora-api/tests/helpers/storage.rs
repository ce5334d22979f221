//! Local storage wrapper that can be told to misbehave.

use async_trait::async_trait;
use std::sync::Mutex;
use vidora_storage::{LocalStorage, Storage, StorageBackend, StorageError, StorageResult};

/// Failures injected into [`FaultyStorage`].
#[derive(Debug, Default, Clone)]
pub struct StorageFaults {
    /// Report every upload as stored but without a URL
    pub empty_urls: bool,
    /// Deleting this key fails with `DeleteFailed`
    pub fail_delete_key: Option<String>,
}

pub struct FaultyStorage {
    inner: LocalStorage,
    faults: StorageFaults,
    uploaded: Mutex<Vec<String>>,
}

impl FaultyStorage {
    pub fn new(inner: LocalStorage, faults: StorageFaults) -> Self {
        Self {
            inner,
            faults,
            uploaded: Mutex::new(Vec::new()),
        }
    }

    /// Keys written through `upload`, in order.
    pub fn uploaded_keys(&self) -> Vec<String> {
        self.uploaded.lock().expect("upload log poisoned").clone()
    }
}

#[async_trait]
impl Storage for FaultyStorage {
    async fn upload(
        &self,
        folder: &str,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<(String, String)> {
        let (key, url) = self
            .inner
            .upload(folder, filename, content_type, data)
            .await?;
        self.uploaded
            .lock()
            .expect("upload log poisoned")
            .push(key.clone());

        if self.faults.empty_urls {
            return Ok((key, String::new()));
        }
        Ok((key, url))
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        self.inner.download(storage_key).await
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        if self.faults.fail_delete_key.as_deref() == Some(storage_key) {
            return Err(StorageError::DeleteFailed(format!(
                "refusing to delete {}",
                storage_key
            )));
        }
        self.inner.delete(storage_key).await
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        self.inner.exists(storage_key).await
    }

    fn backend_type(&self) -> StorageBackend {
        self.inner.backend_type()
    }

    fn public_base_url(&self) -> String {
        self.inner.public_base_url()
    }
}
