//! Order confirmation receipt.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{cart::LineItem, pricing};

/// Immutable snapshot shown on the confirmation screen after checkout.
///
/// Built once from the purchased items; rendering it performs no further
/// lookups or network calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    items: Vec<LineItem>,
    subtotal: Decimal,
    discount: Decimal,
    shipping_fee: Decimal,
    total: Decimal,
}

impl Receipt {
    /// Snapshots the purchased items and computes the totals breakdown.
    pub fn new(items: Vec<LineItem>, discount: Decimal, shipping_fee: Decimal) -> Self {
        let subtotal = pricing::subtotal(&items);
        let total = pricing::order_total(subtotal, discount, shipping_fee);

        Self {
            items,
            subtotal,
            discount,
            shipping_fee,
            total,
        }
    }

    /// The purchased line items.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Total before discount and shipping.
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Discount applied at checkout.
    pub fn discount(&self) -> Decimal {
        self.discount
    }

    /// Flat shipping fee charged.
    pub fn shipping_fee(&self) -> Decimal {
        self.shipping_fee
    }

    /// Amount charged: `subtotal − discount + shipping`, floored at zero.
    pub fn total(&self) -> Decimal {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use crate::products::ProductId;

    use super::*;

    fn item(id: i64, price: i64, quantity: u32) -> LineItem {
        LineItem {
            product_id: ProductId::from_i64(id),
            name: format!("product {id}"),
            price: Decimal::from(price),
            images: Vec::new(),
            quantity,
            stock: None,
        }
    }

    #[test]
    fn receipt_totals_breakdown() {
        let receipt = Receipt::new(
            vec![item(1, 150, 1), item(2, 75, 2)],
            Decimal::ZERO,
            Decimal::from(50),
        );

        assert_eq!(receipt.items().len(), 2);
        assert_eq!(receipt.subtotal(), Decimal::from(300));
        assert_eq!(receipt.total(), Decimal::from(350));
    }

    #[test]
    fn discount_larger_than_subtotal_floors_total_at_zero() {
        let receipt = Receipt::new(vec![item(1, 10, 1)], Decimal::from(100), Decimal::ZERO);

        assert_eq!(receipt.total(), Decimal::ZERO);
    }
}
