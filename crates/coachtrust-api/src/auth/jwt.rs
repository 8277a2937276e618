//! HS256 access tokens signed with the application secret key.

use crate::auth::models::{AuthenticatedUser, JwtClaims};
use chrono::{Duration, Utc};
use coachtrust_core::AppError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// Signing material and access token lifetime.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_lifetime: Duration,
}

impl JwtKeys {
    pub fn new(secret: &str, access_lifetime_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_lifetime: Duration::minutes(access_lifetime_minutes),
        }
    }

    /// Validate signature and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> Result<JwtClaims, AppError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<JwtClaims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::Unauthorized("Token expired".to_string())
                }
                _ => AppError::Unauthorized(format!("Invalid token: {}", e)),
            })
    }
}

/// Mint an access token for `user` valid for the configured lifetime.
pub fn issue_access_token(user: &AuthenticatedUser, keys: &JwtKeys) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = JwtClaims {
        sub: user.user_id.clone(),
        username: user.username.clone(),
        is_staff: user.is_staff,
        exp: (now + keys.access_lifetime).timestamp(),
        iat: now.timestamp(),
    };

    encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding)
        .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
}
