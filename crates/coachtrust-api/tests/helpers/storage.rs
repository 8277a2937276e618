use async_trait::async_trait;
use bytes::Bytes;
use coachtrust_core::StorageBackend;
use coachtrust_storage::{Storage, StorageError, StorageResult};

/// Storage whose writes always fail.
pub struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    async fn save(&self, _name: &str, _data: Bytes) -> StorageResult<String> {
        Err(StorageError::UploadFailed("disk full".to_string()))
    }

    fn url(&self, name: &str) -> StorageResult<String> {
        Ok(format!("/media/{}", name))
    }

    async fn open(&self, name: &str) -> StorageResult<Bytes> {
        Err(StorageError::NotFound(name.to_string()))
    }

    async fn exists(&self, _name: &str) -> StorageResult<bool> {
        Ok(false)
    }

    async fn delete(&self, _name: &str) -> StorageResult<()> {
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
