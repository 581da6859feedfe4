//! Images service errors.

use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum ImagesServiceError {
    /// The backend acknowledged an upload but returned an unusable record.
    #[error("malformed image in response")]
    MalformedResponse,

    /// The backend rejected or failed the request.
    #[error(transparent)]
    Api(#[from] ApiError),
}
