//! Accounts service errors.

use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum AccountsServiceError {
    /// The account is not present in the fetched collection.
    #[error("account not found")]
    NotFound,

    /// A registration field was left blank.
    #[error("please fill in all fields")]
    MissingFields,

    /// Password and confirmation did not match.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// The backend rejected or failed the request.
    #[error(transparent)]
    Api(#[from] ApiError),
}
