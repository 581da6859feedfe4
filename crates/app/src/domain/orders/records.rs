//! Order wire records.

use jiff::Timestamp;
use kotsell::{
    cart::LineItem,
    orders::{OrderId, OrderStatus, PaymentMethod},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::coerce;

/// One purchased line in the order payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemPayload {
    pub product_id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
}

impl From<&LineItem> for OrderItemPayload {
    fn from(item: &LineItem) -> Self {
        Self {
            product_id: item.product_id.into_i64(),
            name: item.name.clone(),
            price: item.price,
            quantity: item.quantity,
        }
    }
}

/// Order creation payload. `customers_id` is null for guest checkouts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub customers_id: Option<i64>,
    pub items: Vec<OrderItemPayload>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub delivery_address: String,
    pub status: OrderStatus,
}

/// An order as the backend reports it, decoded tolerantly for the history
/// screen.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRecord {
    #[serde(default, rename = "orderId")]
    order_id: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    total: Option<Value>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default, rename = "paymentMethod")]
    payment_method: Option<String>,
    #[serde(default, rename = "deliveryAddress")]
    delivery_address: Option<String>,
    #[serde(default, rename = "createdAt")]
    created_at: Option<String>,
}

impl OrderRecord {
    /// The order's id under either field name.
    pub fn order_id(&self) -> Option<OrderId> {
        self.order_id
            .as_ref()
            .and_then(coerce::integer)
            .or_else(|| self.id.as_ref().and_then(coerce::integer))
            .map(OrderId::from_i64)
    }

    /// The order total, zero when the backend omits it.
    pub fn total(&self) -> Decimal {
        self.total
            .as_ref()
            .and_then(coerce::decimal)
            .unwrap_or(Decimal::ZERO)
    }

    /// The raw status string, `"pending"` when omitted.
    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or("pending")
    }

    /// The raw payment method string, if reported.
    pub fn payment_method(&self) -> Option<&str> {
        self.payment_method.as_deref()
    }

    /// The delivery address, if reported.
    pub fn delivery_address(&self) -> Option<&str> {
        self.delivery_address.as_deref()
    }

    /// Creation time as reported, parsed when it is a well-formed timestamp.
    pub fn created_at(&self) -> Option<Timestamp> {
        self.created_at.as_deref().and_then(|raw| raw.parse().ok())
    }
}
