//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// Handlers persist files through this trait without knowing which backend
/// is configured.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist `data` under `name` and return the name actually used.
    ///
    /// Backends that refuse to overwrite pick a free variant of `name`; callers
    /// must resolve URLs from the returned name, not the requested one.
    async fn save(&self, name: &str, data: Bytes) -> StorageResult<String>;

    /// Public URL for a stored name.
    fn url(&self, name: &str) -> StorageResult<String>;

    /// Read a stored file in full.
    async fn open(&self, name: &str) -> StorageResult<Bytes>;

    /// Check if a file exists
    async fn exists(&self, name: &str) -> StorageResult<bool>;

    /// Delete a file. Deleting a missing file is not an error.
    async fn delete(&self, name: &str) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
