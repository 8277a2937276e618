use crate::auth::Principal;
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{extract::State, Json};
use coachtrust_core::sidebar::{self, Sidebar};
use coachtrust_core::AppError;
use std::sync::Arc;

/// Admin navigation tree, staff only.
pub async fn admin_sidebar(
    State(state): State<Arc<AppState>>,
    principal: Principal,
) -> Result<Json<Sidebar>, HttpAppError> {
    if !principal.is_staff() {
        return Err(AppError::Forbidden("Staff access required".to_string()).into());
    }
    Ok(Json(sidebar::navigation(&state.settings.admin_prefix())))
}
