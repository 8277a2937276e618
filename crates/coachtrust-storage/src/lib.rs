//! Coachtrust Storage Library
//!
//! Storage abstraction for uploaded media, with a local filesystem backend and
//! an S3-compatible object storage backend.
//!
//! # Storage names
//!
//! Names are relative, slash-separated paths such as
//! `uploads/ckeditor/{filename}`. They must not be empty and must not contain
//! a `..` segment, a leading `/`, a backslash or a NUL byte. Validation lives
//! in the `keys` module so every backend rejects the same names.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use coachtrust_core::StorageBackend;
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
