use crate::auth::models::Principal;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Resolve the caller from `Authorization: Bearer <jwt>`.
///
/// Never rejects: a missing or invalid token leaves the request anonymous.
pub async fn identity_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let principal = match request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        Some(header) => match header.strip_prefix("Bearer ") {
            Some(token) => match state.jwt.verify(token.trim()) {
                Ok(claims) => Principal::from(claims),
                Err(e) => {
                    tracing::debug!(error = %e, "Bearer token rejected, treating caller as anonymous");
                    Principal::Anonymous
                }
            },
            None => {
                tracing::debug!("Unsupported authorization scheme, treating caller as anonymous");
                Principal::Anonymous
            }
        },
        None => Principal::Anonymous,
    };

    request.extensions_mut().insert(principal);
    next.run(request).await
}
