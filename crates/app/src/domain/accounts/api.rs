//! Accounts REST access.

use async_trait::async_trait;
use mockall::automock;

use crate::api::{ApiClient, ApiError, Envelope};

use super::{
    models::{AdminId, CustomerId},
    records::{AdminRecord, CustomerRecord, ProfilePayload, RegisterPayload},
};

/// Wire-level access to `/customers` and `/admins`.
#[automock]
#[async_trait]
pub trait AccountsApi: Send + Sync {
    /// `GET /customers`: the full collection, used for login lookup and
    /// profile loads.
    async fn fetch_customers(&self) -> Result<Vec<CustomerRecord>, ApiError>;

    /// `POST /customers`: registers a new customer.
    async fn register_customer(&self, payload: &RegisterPayload) -> Result<(), ApiError>;

    /// `PUT /customers/:id`: saves profile fields.
    async fn update_customer(
        &self,
        customer: CustomerId,
        payload: &ProfilePayload,
    ) -> Result<(), ApiError>;

    /// `GET /admins`: the full collection, used for admin login lookup.
    async fn fetch_admins(&self) -> Result<Vec<AdminRecord>, ApiError>;

    /// `PUT /admins/:id`: saves admin profile fields.
    async fn update_admin(&self, admin: AdminId, payload: &ProfilePayload)
    -> Result<(), ApiError>;
}

/// [`AccountsApi`] over the live REST backend.
#[derive(Debug, Clone)]
pub struct HttpAccountsApi {
    client: ApiClient,
}

impl HttpAccountsApi {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AccountsApi for HttpAccountsApi {
    async fn fetch_customers(&self) -> Result<Vec<CustomerRecord>, ApiError> {
        let envelope: Envelope<Vec<CustomerRecord>> = self.client.get_json("/customers").await?;

        Ok(envelope.into_inner())
    }

    async fn register_customer(&self, payload: &RegisterPayload) -> Result<(), ApiError> {
        self.client.post_json_discard("/customers", payload).await
    }

    async fn update_customer(
        &self,
        customer: CustomerId,
        payload: &ProfilePayload,
    ) -> Result<(), ApiError> {
        self.client
            .put_json_discard(&format!("/customers/{customer}"), payload)
            .await
    }

    async fn fetch_admins(&self) -> Result<Vec<AdminRecord>, ApiError> {
        let envelope: Envelope<Vec<AdminRecord>> = self.client.get_json("/admins").await?;

        Ok(envelope.into_inner())
    }

    async fn update_admin(
        &self,
        admin: AdminId,
        payload: &ProfilePayload,
    ) -> Result<(), ApiError> {
        self.client
            .put_json_discard(&format!("/admins/{admin}"), payload)
            .await
    }
}
