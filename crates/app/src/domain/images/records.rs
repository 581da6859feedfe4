//! Image wire records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::coerce;

use super::models::{Image, ImageId};

#[derive(Debug, Clone, Deserialize)]
pub struct ImageRecord {
    #[serde(default, rename = "imageId")]
    image_id: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    filename: Option<String>,
}

impl ImageRecord {
    /// Resolves to the image model. Records without a usable id or source
    /// are dropped.
    pub fn into_image(self) -> Option<Image> {
        let id = self
            .image_id
            .as_ref()
            .and_then(coerce::integer)
            .or_else(|| self.id.as_ref().and_then(coerce::integer))
            .map(ImageId::from_i64)?;

        let url = [self.source, self.url, self.path, self.filename]
            .into_iter()
            .flatten()
            .find(|candidate| !candidate.is_empty())?;

        Some(Image { id, url })
    }
}

/// Product-image link payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinkPayload {
    pub product_id: i64,
    pub image_id: i64,
}
