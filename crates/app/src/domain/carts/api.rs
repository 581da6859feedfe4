//! Carts REST access.

use async_trait::async_trait;
use kotsell::products::ProductId;
use mockall::automock;
use rust_decimal::Decimal;

use crate::{
    api::{ApiClient, ApiError, Envelope},
    domain::accounts::models::CustomerId,
};

use super::{
    models::{CartEntry, CartEntryId},
    records::{AddItemPayload, CartEntryRecord, UpdateItemPayload},
};

/// Wire-level access to `/carts`.
#[automock]
#[async_trait]
pub trait CartsApi: Send + Sync {
    /// `GET /carts?customersId=`: every row of the customer's cart.
    async fn fetch_for_customer(&self, customer: CustomerId)
    -> Result<Vec<CartEntry>, ApiError>;

    /// `GET /carts?customersId=&productId=`: the row for one product, if
    /// any.
    async fn find_entry(
        &self,
        customer: CustomerId,
        product: ProductId,
    ) -> Result<Option<CartEntry>, ApiError>;

    /// `POST /carts`: adds a row.
    async fn add_item(
        &self,
        customer: CustomerId,
        product: ProductId,
        quantity: u32,
        price: Decimal,
    ) -> Result<(), ApiError>;

    /// `PUT /carts/:cartId`: sets a row's quantity.
    async fn update_item(&self, entry: CartEntryId, quantity: u32) -> Result<(), ApiError>;

    /// `DELETE /carts/:cartId`: removes a row.
    async fn delete_item(&self, entry: CartEntryId) -> Result<(), ApiError>;
}

/// [`CartsApi`] over the live REST backend.
#[derive(Debug, Clone)]
pub struct HttpCartsApi {
    client: ApiClient,
}

impl HttpCartsApi {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn fetch(
        &self,
        query: &[(&str, String)],
    ) -> Result<Vec<CartEntry>, ApiError> {
        let envelope: Envelope<Vec<CartEntryRecord>> =
            self.client.get_json_query("/carts", query).await?;

        Ok(envelope
            .into_inner()
            .into_iter()
            .filter_map(CartEntryRecord::into_entry)
            .collect())
    }
}

#[async_trait]
impl CartsApi for HttpCartsApi {
    async fn fetch_for_customer(
        &self,
        customer: CustomerId,
    ) -> Result<Vec<CartEntry>, ApiError> {
        self.fetch(&[("customersId", customer.to_string())]).await
    }

    async fn find_entry(
        &self,
        customer: CustomerId,
        product: ProductId,
    ) -> Result<Option<CartEntry>, ApiError> {
        let entries = self
            .fetch(&[
                ("customersId", customer.to_string()),
                ("productId", product.to_string()),
            ])
            .await?;

        Ok(entries.into_iter().next())
    }

    async fn add_item(
        &self,
        customer: CustomerId,
        product: ProductId,
        quantity: u32,
        price: Decimal,
    ) -> Result<(), ApiError> {
        let payload = AddItemPayload {
            customers_id: customer.into_i64(),
            product_id: product.into_i64(),
            quantity,
            price,
        };

        self.client.post_json_discard("/carts", &payload).await
    }

    async fn update_item(&self, entry: CartEntryId, quantity: u32) -> Result<(), ApiError> {
        self.client
            .put_json_discard(&format!("/carts/{entry}"), &UpdateItemPayload { quantity })
            .await
    }

    async fn delete_item(&self, entry: CartEntryId) -> Result<(), ApiError> {
        self.client.delete(&format!("/carts/{entry}")).await
    }
}
