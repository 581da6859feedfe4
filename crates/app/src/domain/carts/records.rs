//! Cart wire records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use kotsell::products::ProductId;

use crate::api::coerce;

use super::models::{CartEntry, CartEntryId};

#[derive(Debug, Clone, Deserialize)]
pub struct CartEntryRecord {
    #[serde(default, rename = "cartId")]
    cart_id: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default, rename = "cart_id")]
    cart_id_snake: Option<Value>,
    #[serde(default, rename = "productId")]
    product_id: Option<Value>,
    #[serde(default, rename = "product_id")]
    product_id_snake: Option<Value>,
    #[serde(default)]
    quantity: Option<Value>,
    #[serde(default)]
    price: Option<Value>,
}

impl CartEntryRecord {
    /// Resolves to the entry model. Rows without a usable row id and product
    /// id are dropped.
    pub fn into_entry(self) -> Option<CartEntry> {
        let id = [&self.cart_id, &self.id, &self.cart_id_snake]
            .into_iter()
            .flatten()
            .find_map(coerce::integer)
            .map(CartEntryId::from_i64)?;

        let product_id = [&self.product_id, &self.product_id_snake]
            .into_iter()
            .flatten()
            .find_map(coerce::integer)
            .map(ProductId::from_i64)?;

        Some(CartEntry {
            id,
            product_id,
            quantity: self.quantity.as_ref().and_then(coerce::quantity).unwrap_or(0),
            price: self.price.as_ref().and_then(coerce::decimal),
        })
    }
}

/// Add-to-cart payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemPayload {
    pub customers_id: i64,
    pub product_id: i64,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Quantity update payload.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateItemPayload {
    pub quantity: u32,
}
