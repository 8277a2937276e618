//! Request identity.
//!
//! Every request passes through [`middleware::identity_middleware`], which
//! turns an optional bearer token into a [`Principal`] stored in the request
//! extensions. Handlers decide for themselves what an anonymous or non-staff
//! caller gets.

pub mod jwt;
pub mod middleware;
pub mod models;

pub use jwt::{issue_access_token, JwtKeys};
pub use models::{AuthenticatedUser, JwtClaims, Principal};
