//! Storage setup and initialization

use anyhow::{Context, Result};
use coachtrust_core::Settings;
use coachtrust_storage::{create_storage, Storage};
use std::sync::Arc;

pub async fn setup_storage(settings: &Settings) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage abstraction...");
    let storage = create_storage(&settings.storage)
        .await
        .context("Failed to initialize storage backend")?;

    match &settings.storage.s3 {
        Some(s3) => tracing::info!(
            backend = %storage.backend_type(),
            bucket = %s3.bucket,
            endpoint = %s3.endpoint_url,
            "Storage abstraction initialized successfully"
        ),
        None => tracing::info!(
            backend = %storage.backend_type(),
            media_root = %settings.storage.media_root.display(),
            media_url = %settings.storage.media_url,
            "Storage abstraction initialized successfully"
        ),
    }

    Ok(storage)
}
