//! Images service.

use std::sync::Arc;

use kotsell::products::ProductId;
use tracing::info;

use super::{api::ImagesApi, errors::ImagesServiceError, models::Image};

/// Upload-and-link workflow for the admin product screens.
#[derive(Clone)]
pub struct ImagesService {
    api: Arc<dyn ImagesApi>,
}

impl std::fmt::Debug for ImagesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagesService").finish_non_exhaustive()
    }
}

impl ImagesService {
    #[must_use]
    pub fn new(api: Arc<dyn ImagesApi>) -> Self {
        Self { api }
    }

    /// Uploads an image and links it to the product in one step.
    ///
    /// # Errors
    ///
    /// Returns an error when the upload or the link call fails; an uploaded
    /// but unlinked image is left for the backend to garbage-collect.
    pub async fn attach(
        &self,
        product: ProductId,
        name: &str,
        bytes: Vec<u8>,
    ) -> Result<Image, ImagesServiceError> {
        let record = self.api.upload(name, bytes).await?;
        let image = record
            .into_image()
            .ok_or(ImagesServiceError::MalformedResponse)?;

        self.api.link(product, image.id).await?;

        info!(%product, image = %image.id, "image attached");

        Ok(image)
    }

    /// Looks up an uploaded image by id.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend call fails or the record is
    /// unusable.
    pub async fn resolve(&self, image: super::models::ImageId) -> Result<Image, ImagesServiceError> {
        let record = self.api.fetch_by_id(image).await?;

        record
            .into_image()
            .ok_or(ImagesServiceError::MalformedResponse)
    }

    /// Unlinks an image from whatever product carries it.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend call fails.
    pub async fn detach(&self, image: super::models::ImageId) -> Result<(), ImagesServiceError> {
        self.api.unlink(image).await?;

        Ok(())
    }
}
