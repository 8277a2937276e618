#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use coachtrust_core::StorageSettings;
use std::sync::Arc;

/// Create a storage backend based on configuration
///
/// S3 is used only when bucket, endpoint and both credentials are configured;
/// otherwise files go to `MEDIA_ROOT` on the local filesystem.
pub async fn create_storage(settings: &StorageSettings) -> StorageResult<Arc<dyn Storage>> {
    match settings.backend() {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let s3 = settings.s3.clone().ok_or_else(|| {
                StorageError::ConfigError("S3 storage selected without S3 settings".to_string())
            })?;

            let storage = S3Storage::new(
                s3.bucket,
                s3.region,
                Some(s3.endpoint_url),
                s3.access_key_id,
                s3.secret_access_key,
            )?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let storage =
                LocalStorage::new(settings.media_root.clone(), settings.media_url.clone()).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
