//! Coachtrust Core Library
//!
//! Settings assembly, error types, the storage backend enum and the static
//! configuration data (admin sidebar, rich-text editor) shared by the storage
//! and API crates.

pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod sidebar;
pub mod storage_types;

// Re-export commonly used types
pub use config::{
    BrokerSettings, CacheBackend, CacheSettings, DatabaseSettings, EmailSettings,
    ErrorTrackingSettings, SecuritySettings, Settings, StorageSettings,
};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
