use axum::http::HeaderValue;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use coachtrust_core::SecuritySettings;
use std::sync::Arc;

/// Security headers configuration
#[derive(Clone)]
pub struct SecurityHeadersConfig {
    pub content_type_nosniff: bool,
    pub x_frame_options: HeaderValue,
    pub hsts: Option<HeaderValue>,
}

impl SecurityHeadersConfig {
    pub fn from_settings(settings: &SecuritySettings) -> Self {
        Self {
            content_type_nosniff: settings.content_type_nosniff,
            x_frame_options: HeaderValue::from_str(&settings.x_frame_options)
                .unwrap_or_else(|_| HeaderValue::from_static("DENY")),
            hsts: settings
                .hsts_header()
                .and_then(|value| HeaderValue::from_str(&value).ok()),
        }
    }
}

/// Security headers middleware
/// Adds security headers to all HTTP responses
pub async fn security_headers_middleware(
    State(config): State<Arc<SecurityHeadersConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();

    // X-Content-Type-Options: Prevent MIME type sniffing
    if config.content_type_nosniff {
        headers.insert(
            "X-Content-Type-Options",
            HeaderValue::from_static("nosniff"),
        );
    }

    // X-Frame-Options: Prevent clickjacking
    headers.insert("X-Frame-Options", config.x_frame_options.clone());

    headers.insert("Referrer-Policy", HeaderValue::from_static("same-origin"));

    headers.insert(
        "Cross-Origin-Opener-Policy",
        HeaderValue::from_static("same-origin"),
    );

    if let Some(ref hsts) = config.hsts {
        headers.insert("Strict-Transport-Security", hsts.clone());
    }

    response
}
