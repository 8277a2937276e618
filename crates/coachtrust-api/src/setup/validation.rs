//! Configuration validation
//!
//! Settings are validated when they are built; this adds the startup warnings
//! that should not stop the process.

use anyhow::Result;
use coachtrust_core::Settings;

pub fn validate_settings(settings: &Settings) -> Result<()> {
    settings.validate()?;

    let is_production = settings.is_production();

    if is_production && settings.debug {
        tracing::warn!("DJANGO_DEBUG is enabled in production - error details may leak");
    }

    if is_production && settings.secret_key.len() < 32 {
        tracing::warn!(
            "DJANGO_SECRET_KEY is shorter than 32 characters - consider using a longer, more secure secret"
        );
    }

    if is_production && settings.admin_url == "admin/" {
        tracing::warn!("DJANGO_ADMIN_URL uses the default admin/ path");
    }

    if settings.cors_allowed_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
    }

    if is_production && !settings.security.ssl_redirect {
        tracing::warn!("DJANGO_SECURE_SSL_REDIRECT is disabled in production");
    }

    tracing::info!("Configuration validation passed");
    Ok(())
}
