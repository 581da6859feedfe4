//! Orders REST access.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    api::{ApiClient, ApiError, Envelope},
    domain::accounts::models::CustomerId,
};

use super::records::{OrderPayload, OrderRecord};

/// Wire-level access to `/orders`.
#[automock]
#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// `POST /orders`: creates an order. Called at most once per submit;
    /// nothing retries this.
    async fn create(&self, payload: &OrderPayload) -> Result<OrderRecord, ApiError>;

    /// `GET /orders?customersId=`: a customer's order history.
    async fn fetch_for_customer(
        &self,
        customer: CustomerId,
    ) -> Result<Vec<OrderRecord>, ApiError>;
}

/// [`OrdersApi`] over the live REST backend.
#[derive(Debug, Clone)]
pub struct HttpOrdersApi {
    client: ApiClient,
}

impl HttpOrdersApi {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrdersApi for HttpOrdersApi {
    async fn create(&self, payload: &OrderPayload) -> Result<OrderRecord, ApiError> {
        let envelope: Envelope<OrderRecord> = self.client.post_json("/orders", payload).await?;

        Ok(envelope.into_inner())
    }

    async fn fetch_for_customer(
        &self,
        customer: CustomerId,
    ) -> Result<Vec<OrderRecord>, ApiError> {
        let envelope: Envelope<Vec<OrderRecord>> = self
            .client
            .get_json_query("/orders", &[("customersId", customer.to_string())])
            .await?;

        Ok(envelope.into_inner())
    }
}
