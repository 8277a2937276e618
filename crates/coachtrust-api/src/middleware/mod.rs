pub mod host_validation;
pub mod security_headers;

pub use host_validation::{allowed_hosts_middleware, ssl_redirect_middleware};
pub use security_headers::security_headers_middleware;
