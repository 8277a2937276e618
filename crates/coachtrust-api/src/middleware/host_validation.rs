//! Host header checks and HTTPS redirection.

use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    http::{
        header::{HOST, LOCATION},
        StatusCode, Uri,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use coachtrust_core::AppError;
use std::sync::Arc;

#[derive(Clone)]
pub struct HostPolicy {
    pub allowed_hosts: Vec<String>,
    pub ssl_redirect: bool,
    /// Header a TLS-terminating proxy sets, and the value meaning HTTPS.
    pub proxy_ssl_header: (String, String),
}

impl HostPolicy {
    /// `*` allows everything; `.example.com` allows the domain and its subdomains.
    pub fn is_allowed(&self, host: &str) -> bool {
        let host = strip_port(host).to_lowercase();
        self.allowed_hosts.iter().any(|pattern| {
            let pattern = pattern.to_lowercase();
            if pattern == "*" {
                return true;
            }
            match pattern.strip_prefix('.') {
                Some(domain) => host == domain || host.ends_with(&pattern),
                None => host == pattern,
            }
        })
    }
}

fn strip_port(host: &str) -> &str {
    // Bracketed IPv6 literals keep their colons.
    if let Some(end) = host.find(']') {
        return &host[..=end];
    }
    host.split(':').next().unwrap_or(host)
}

/// Reject requests whose `Host` header is not in the allowed hosts.
pub async fn allowed_hosts_middleware(
    State(policy): State<Arc<HostPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(host) = request.headers().get(HOST).and_then(|h| h.to_str().ok()) {
        if !policy.is_allowed(host) {
            tracing::warn!(host = %host, "Rejected request with disallowed Host header");
            return HttpAppError(AppError::BadRequest(format!("Invalid Host header: {}", host)))
                .into_response();
        }
    }
    next.run(request).await
}

/// Redirect plain HTTP requests to HTTPS with `301`, trusting the proxy header.
pub async fn ssl_redirect_middleware(
    State(policy): State<Arc<HostPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    if !policy.ssl_redirect {
        return next.run(request).await;
    }

    let (header, secure_value) = &policy.proxy_ssl_header;
    let is_secure = request.uri().scheme_str() == Some("https")
        || request
            .headers()
            .get(header.as_str())
            .and_then(|h| h.to_str().ok())
            .map(|v| v.eq_ignore_ascii_case(secure_value))
            .unwrap_or(false);
    if is_secure {
        return next.run(request).await;
    }

    let Some(host) = request.headers().get(HOST).and_then(|h| h.to_str().ok()) else {
        return next.run(request).await;
    };
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let target = format!("https://{}{}", host, path_and_query);
    match target.parse::<Uri>() {
        Ok(_) => (StatusCode::MOVED_PERMANENTLY, [(LOCATION, target)]).into_response(),
        Err(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}
