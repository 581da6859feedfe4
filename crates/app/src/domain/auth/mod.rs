//! Login, logout and the session gate.

pub mod errors;
pub mod service;

pub use errors::AuthError;
pub use service::{AuthService, ClientAuthService, require_admin, require_customer};
