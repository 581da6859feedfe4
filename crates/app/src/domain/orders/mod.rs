//! Order creation and per-customer order history.

pub mod api;
pub mod records;

pub use api::{HttpOrdersApi, OrdersApi};
pub use records::{OrderItemPayload, OrderPayload, OrderRecord};
