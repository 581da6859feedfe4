//! Categories REST access.

use async_trait::async_trait;
use kotsell::products::{CategoryId, ProductId};
use mockall::automock;

use crate::api::{ApiClient, ApiError, Envelope};

use super::records::{CategoryLinkPayload, CategoryLinkRecord, CategoryRecord};

/// Wire-level access to `/categories` and `/product_categories`.
#[automock]
#[async_trait]
pub trait CategoriesApi: Send + Sync {
    /// `GET /categories`.
    async fn fetch_all(&self) -> Result<Vec<CategoryRecord>, ApiError>;

    /// `GET /product_categories?productId=`: the links for one product.
    async fn fetch_links(&self, product: ProductId) -> Result<Vec<CategoryLinkRecord>, ApiError>;

    /// `POST /product_categories`: links a product to a category.
    async fn link(&self, product: ProductId, category: CategoryId) -> Result<(), ApiError>;

    /// `DELETE /product_categories?productId=`: drops every link for the
    /// product.
    async fn unlink_all(&self, product: ProductId) -> Result<(), ApiError>;
}

/// [`CategoriesApi`] over the live REST backend.
#[derive(Debug, Clone)]
pub struct HttpCategoriesApi {
    client: ApiClient,
}

impl HttpCategoriesApi {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CategoriesApi for HttpCategoriesApi {
    async fn fetch_all(&self) -> Result<Vec<CategoryRecord>, ApiError> {
        let envelope: Envelope<Vec<CategoryRecord>> = self.client.get_json("/categories").await?;

        Ok(envelope.into_inner())
    }

    async fn fetch_links(&self, product: ProductId) -> Result<Vec<CategoryLinkRecord>, ApiError> {
        let envelope: Envelope<Vec<CategoryLinkRecord>> = self
            .client
            .get_json_query("/product_categories", &[("productId", product.to_string())])
            .await?;

        Ok(envelope.into_inner())
    }

    async fn link(&self, product: ProductId, category: CategoryId) -> Result<(), ApiError> {
        let payload = CategoryLinkPayload {
            product_id: product.into_i64(),
            category_id: category.into_i64(),
        };

        self.client
            .post_json_discard("/product_categories", &payload)
            .await
    }

    async fn unlink_all(&self, product: ProductId) -> Result<(), ApiError> {
        self.client
            .delete_query("/product_categories", &[("productId", product.to_string())])
            .await
    }
}
