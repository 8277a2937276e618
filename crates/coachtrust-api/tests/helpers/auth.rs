use coachtrust_api::auth::{issue_access_token, AuthenticatedUser, JwtKeys};

use super::TEST_SECRET_KEY;

fn token_for(user_id: &str, is_staff: bool, keys: &JwtKeys) -> String {
    let user = AuthenticatedUser {
        user_id: user_id.to_string(),
        username: Some(format!("user{}", user_id)),
        is_staff,
    };
    issue_access_token(&user, keys).expect("Failed to issue test token")
}

/// Bearer header value for a staff user.
pub fn staff_bearer() -> String {
    format!(
        "Bearer {}",
        token_for("1", true, &JwtKeys::new(TEST_SECRET_KEY, 60))
    )
}

/// Bearer header value for an authenticated user without the staff flag.
pub fn member_bearer() -> String {
    format!(
        "Bearer {}",
        token_for("2", false, &JwtKeys::new(TEST_SECRET_KEY, 60))
    )
}

/// Staff token signed with the wrong secret.
pub fn forged_staff_bearer() -> String {
    format!(
        "Bearer {}",
        token_for("1", true, &JwtKeys::new("not-the-application-secret", 60))
    )
}

/// Staff token that expired ten minutes ago.
pub fn expired_staff_bearer() -> String {
    format!(
        "Bearer {}",
        token_for("1", true, &JwtKeys::new(TEST_SECRET_KEY, -10))
    )
}
