//! Image models.

use kotsell::ids::TypedId;
use serde::{Deserialize, Serialize};

/// Image id.
pub type ImageId = TypedId<Image>;

/// An uploaded image asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: ImageId,
    pub url: String,
}
