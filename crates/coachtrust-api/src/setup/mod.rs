//! Application setup and initialization
//!
//! Kept out of main.rs so integration tests can build the same router.

pub mod routes;
pub mod server;
pub mod services;
pub mod storage;
pub mod validation;

use crate::services::email::EmailService;
use crate::state::AppState;
use anyhow::{Context, Result};
use coachtrust_core::Settings;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(settings: Settings) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(&settings.error_tracking);

    // Validate configuration - fail fast on misconfiguration
    validation::validate_settings(&settings).context("Configuration validation failed")?;

    tracing::info!("Configuration loaded and validated successfully");

    services::log_service_wiring(&settings);

    // Setup storage
    let storage = storage::setup_storage(&settings).await?;

    let email = EmailService::from_settings(&settings.email, &settings.admins)
        .map_err(|e| anyhow::anyhow!("Failed to initialize email service: {}", e))?;

    let state = Arc::new(AppState::new(settings, storage, email));

    // Setup routes
    let router = routes::setup_routes(state.clone())?;

    Ok((state, router))
}
