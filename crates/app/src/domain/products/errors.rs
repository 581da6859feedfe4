//! Products service errors.

use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    /// The product does not exist on the backend.
    #[error("product not found")]
    NotFound,

    /// A product was submitted without a name.
    #[error("product name is required")]
    MissingName,

    /// A product was submitted with a negative price.
    #[error("price cannot be negative")]
    InvalidPrice,

    /// The backend acknowledged a mutation but returned an unusable record.
    #[error("malformed product in response")]
    MalformedResponse,

    /// The backend rejected or failed the request.
    #[error(transparent)]
    Api(#[from] ApiError),
}
