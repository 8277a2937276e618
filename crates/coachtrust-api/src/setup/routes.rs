//! Route configuration and setup

use crate::auth::middleware::identity_middleware;
use crate::handlers::{
    admin_sidebar::admin_sidebar, editor_config::editor_config, editor_upload::editor_upload,
    health::health_check,
};
use crate::middleware::host_validation::HostPolicy;
use crate::middleware::security_headers::SecurityHeadersConfig;
use crate::middleware::{
    allowed_hosts_middleware, security_headers_middleware, ssl_redirect_middleware,
};
use crate::state::AppState;
use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{any, get},
    Router,
};
use coachtrust_core::constants::EDITOR_UPLOAD_PATH;
use coachtrust_core::{Settings, StorageBackend};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Body cap for routes that take no request body.
const NON_UPLOAD_BODY_LIMIT: usize = 64 * 1024;

/// Server-level cap on in-flight requests.
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let settings = &state.settings;
    let cors = setup_cors(settings)?;

    // The upload route reads multipart itself, so its limit has to be the
    // extractor limit: overflow then surfaces as a multipart read error.
    let upload_routes = Router::new().route(
        EDITOR_UPLOAD_PATH,
        any(editor_upload).layer(DefaultBodyLimit::max(settings.upload_max_size_bytes)),
    );

    let sidebar_path = format!("{}sidebar/", settings.admin_prefix());
    let config_routes = Router::new()
        .route("/health", get(health_check))
        .route("/ckeditor5/config/", get(editor_config))
        .route(&sidebar_path, get(admin_sidebar))
        .layer(RequestBodyLimitLayer::new(NON_UPLOAD_BODY_LIMIT));

    let mut app_routes = upload_routes.merge(config_routes);

    if let Some(mount) = media_mount(settings, state.storage.backend_type()) {
        tracing::info!(
            mount = %mount,
            root = %settings.storage.media_root.display(),
            "Serving local media files"
        );
        app_routes = app_routes.nest_service(&mount, ServeDir::new(&settings.storage.media_root));
    }

    let security_headers_config = Arc::new(SecurityHeadersConfig::from_settings(
        &settings.security,
    ));
    let host_policy = Arc::new(HostPolicy {
        allowed_hosts: settings.allowed_hosts.clone(),
        ssl_redirect: settings.security.ssl_redirect,
        proxy_ssl_header: settings.security.proxy_ssl_header.clone(),
    });

    let app = app_routes
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            identity_middleware,
        ))
        .layer(ConcurrencyLimitLayer::new(HTTP_CONCURRENCY_LIMIT))
        .layer(axum::middleware::from_fn_with_state(
            security_headers_config,
            security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn_with_state(
            host_policy.clone(),
            ssl_redirect_middleware,
        ))
        .layer(axum::middleware::from_fn_with_state(
            host_policy,
            allowed_hosts_middleware,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Path local media is served under: only for the local backend with a
/// path-style `MEDIA_URL` (an absolute URL points at another host).
fn media_mount(settings: &Settings, backend: StorageBackend) -> Option<String> {
    if backend != StorageBackend::Local {
        return None;
    }
    let mount = settings.storage.media_mount_path()?.trim_end_matches('/');
    if mount.is_empty() {
        tracing::warn!("MEDIA_URL is the site root; local media will not be served");
        return None;
    }
    Some(mount.to_string())
}

/// Setup CORS configuration
fn setup_cors(settings: &Settings) -> Result<CorsLayer, anyhow::Error> {
    let cors = if settings.cors_allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = settings
            .cors_allowed_origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin: {}", o))
            })
            .collect::<Result<Vec<_>, _>>()?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
