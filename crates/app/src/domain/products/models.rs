//! Admin-side product inputs.

use rust_decimal::Decimal;

/// Fields for a product being created from the admin console.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: u32,
}

/// Full-replacement edit of an existing product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: u32,
}
