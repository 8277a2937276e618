//! Shared application state.

use crate::auth::JwtKeys;
use crate::services::email::EmailService;
use coachtrust_core::Settings;
use coachtrust_storage::Storage;
use std::sync::Arc;

/// State shared by every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub storage: Arc<dyn Storage>,
    pub jwt: JwtKeys,
    pub email: EmailService,
}

impl AppState {
    pub fn new(
        settings: Settings,
        storage: Arc<dyn Storage>,
        email: EmailService,
    ) -> Self {
        let jwt = JwtKeys::new(
            &settings.secret_key,
            settings.jwt_access_token_lifetime_minutes,
        );
        Self {
            settings,
            storage,
            jwt,
            email,
        }
    }
}
