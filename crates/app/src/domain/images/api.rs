//! Images REST access.

use async_trait::async_trait;
use kotsell::products::ProductId;
use mockall::automock;
use reqwest::multipart::{Form, Part};

use crate::api::{ApiClient, ApiError, Envelope};

use super::{
    models::ImageId,
    records::{ImageLinkPayload, ImageRecord},
};

/// Wire-level access to `/images` and `/product_images`.
#[automock]
#[async_trait]
pub trait ImagesApi: Send + Sync {
    /// `POST /images`: multipart upload.
    async fn upload(&self, name: &str, bytes: Vec<u8>) -> Result<ImageRecord, ApiError>;

    /// `GET /images/:id`.
    async fn fetch_by_id(&self, image: ImageId) -> Result<ImageRecord, ApiError>;

    /// `POST /product_images`: links an image to a product.
    async fn link(&self, product: ProductId, image: ImageId) -> Result<(), ApiError>;

    /// `DELETE /product_images?imageId=`: unlinks an image.
    async fn unlink(&self, image: ImageId) -> Result<(), ApiError>;
}

/// [`ImagesApi`] over the live REST backend.
#[derive(Debug, Clone)]
pub struct HttpImagesApi {
    client: ApiClient,
}

impl HttpImagesApi {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImagesApi for HttpImagesApi {
    async fn upload(&self, name: &str, bytes: Vec<u8>) -> Result<ImageRecord, ApiError> {
        // The upload endpoint has been seen accepting either field name, so
        // send the bytes under both, plus the display name.
        let form = Form::new()
            .part(
                "source",
                Part::bytes(bytes.clone()).file_name(name.to_owned()),
            )
            .part("file", Part::bytes(bytes).file_name(name.to_owned()))
            .text("name", name.to_owned());

        let envelope: Envelope<ImageRecord> = self.client.post_multipart("/images", form).await?;

        Ok(envelope.into_inner())
    }

    async fn fetch_by_id(&self, image: ImageId) -> Result<ImageRecord, ApiError> {
        let envelope: Envelope<ImageRecord> =
            self.client.get_json(&format!("/images/{image}")).await?;

        Ok(envelope.into_inner())
    }

    async fn link(&self, product: ProductId, image: ImageId) -> Result<(), ApiError> {
        let payload = ImageLinkPayload {
            product_id: product.into_i64(),
            image_id: image.into_i64(),
        };

        self.client
            .post_json_discard("/product_images", &payload)
            .await
    }

    async fn unlink(&self, image: ImageId) -> Result<(), ApiError> {
        self.client
            .delete_query("/product_images", &[("imageId", image.to_string())])
            .await
    }
}
