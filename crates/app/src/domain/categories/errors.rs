//! Categories service errors.

use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum CategoriesServiceError {
    /// No category with the given name exists.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// The backend rejected or failed the request.
    #[error(transparent)]
    Api(#[from] ApiError),
}
