//! Coachtrust API Library
//!
//! HTTP handlers, middleware and application setup for the editor upload
//! endpoint and the admin configuration endpoints.

mod handlers;
mod middleware;
mod telemetry;

// Public modules
pub mod auth;
pub mod error;
pub mod services;
pub mod setup;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
