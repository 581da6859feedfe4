//! Auth errors.

use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password was left blank.
    #[error("please fill in all fields")]
    MissingCredentials,

    /// No account matched, or the password was wrong. Deliberately one
    /// variant for both, so callers cannot leak which part failed.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The command requires an active admin session.
    #[error("admin login required")]
    AdminRequired,

    /// The command requires an active customer session.
    #[error("customer login required")]
    CustomerRequired,

    /// The backend rejected or failed the request.
    #[error(transparent)]
    Api(#[from] ApiError),
}
