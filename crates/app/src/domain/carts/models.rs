//! Remote cart models.

use kotsell::{ids::TypedId, products::ProductId};
use rust_decimal::Decimal;

/// Id of one row in the remote cart table.
pub type CartEntryId = TypedId<CartEntry>;

/// One row of the customer's server-held cart: a product reference and a
/// quantity, optionally with the price captured at add time. Display fields
/// are filled in from the product catalog when the cart is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct CartEntry {
    pub id: CartEntryId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Option<Decimal>,
}
