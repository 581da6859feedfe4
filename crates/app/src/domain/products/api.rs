//! Products REST access.

use async_trait::async_trait;
use kotsell::products::ProductId;
use mockall::automock;

use crate::api::{ApiClient, ApiError, Envelope};

use super::records::{ProductPayload, ProductRecord};

/// Wire-level access to `/products`.
#[automock]
#[async_trait]
pub trait ProductsApi: Send + Sync {
    /// `GET /products`: the full catalog.
    async fn fetch_all(&self) -> Result<Vec<ProductRecord>, ApiError>;

    /// `GET /products/:id`: one product, always fresh.
    async fn fetch_by_id(&self, product: ProductId) -> Result<ProductRecord, ApiError>;

    /// `POST /products`.
    async fn create(&self, payload: &ProductPayload) -> Result<ProductRecord, ApiError>;

    /// `PUT /products/:id`.
    async fn update(
        &self,
        product: ProductId,
        payload: &ProductPayload,
    ) -> Result<ProductRecord, ApiError>;

    /// `DELETE /products/:id`.
    async fn delete(&self, product: ProductId) -> Result<(), ApiError>;
}

/// [`ProductsApi`] over the live REST backend.
#[derive(Debug, Clone)]
pub struct HttpProductsApi {
    client: ApiClient,
}

impl HttpProductsApi {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProductsApi for HttpProductsApi {
    async fn fetch_all(&self) -> Result<Vec<ProductRecord>, ApiError> {
        let envelope: Envelope<Vec<ProductRecord>> = self.client.get_json("/products").await?;

        Ok(envelope.into_inner())
    }

    async fn fetch_by_id(&self, product: ProductId) -> Result<ProductRecord, ApiError> {
        let envelope: Envelope<ProductRecord> = self
            .client
            .get_json(&format!("/products/{product}"))
            .await?;

        Ok(envelope.into_inner())
    }

    async fn create(&self, payload: &ProductPayload) -> Result<ProductRecord, ApiError> {
        let envelope: Envelope<ProductRecord> =
            self.client.post_json("/products", payload).await?;

        Ok(envelope.into_inner())
    }

    async fn update(
        &self,
        product: ProductId,
        payload: &ProductPayload,
    ) -> Result<ProductRecord, ApiError> {
        let envelope: Envelope<ProductRecord> = self
            .client
            .put_json(&format!("/products/{product}"), payload)
            .await?;

        Ok(envelope.into_inner())
    }

    async fn delete(&self, product: ProductId) -> Result<(), ApiError> {
        self.client.delete(&format!("/products/{product}")).await
    }
}
