//! Order total arithmetic.

use rust_decimal::Decimal;

use crate::cart::LineItem;

/// Sum of price × quantity over the given items.
pub fn subtotal(items: &[LineItem]) -> Decimal {
    items
        .iter()
        .fold(Decimal::ZERO, |acc, item| acc + item.line_total())
}

/// Final order total: `subtotal − discount + shipping`, floored at zero.
pub fn order_total(subtotal: Decimal, discount: Decimal, shipping: Decimal) -> Decimal {
    (subtotal - discount + shipping).max(Decimal::ZERO)
}
