//! Cart
//!
//! A cart is an ordered list of line items, keyed uniquely by product id.
//! Adding a product that is already present merges by summing quantities;
//! quantities are clamped to the product's stock when the stock is known.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{pricing, products::{Product, ProductId}};

/// Errors from cart mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The requested quantity was below 1.
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    /// Nothing could be added because the product's stock is exhausted.
    #[error("product {0} is out of stock")]
    OutOfStock(ProductId),

    /// The cart holds no entry for the given product.
    #[error("no cart entry for product {0}")]
    UnknownProduct(ProductId),
}

/// One product-quantity pair, carrying a denormalized snapshot of the
/// product's name, price and images taken at add time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub images: Vec<String>,
    pub quantity: u32,
    /// Stock bound at snapshot time, when the backend tracked one.
    pub stock: Option<u32>,
}

impl LineItem {
    /// Snapshot a product into a line item with the given quantity.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            images: product.images.clone(),
            quantity,
            stock: Some(product.stock),
        }
    }

    /// Price times quantity.
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    fn clamp_to_stock(&self, requested: u32) -> u32 {
        match self.stock {
            Some(stock) => requested.min(stock),
            None => requested,
        }
    }
}

/// An ordered collection of line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a line item, merging by product id.
    ///
    /// An existing entry has its quantity incremented by `item.quantity` and
    /// its stock bound refreshed from the incoming snapshot. Quantities are
    /// clamped to the stock bound when one is known. Returns the resulting
    /// quantity for the product.
    ///
    /// # Errors
    ///
    /// - [`CartError::ZeroQuantity`]: the item carried a quantity of 0.
    /// - [`CartError::OutOfStock`]: the stock bound leaves no room to add
    ///   even a single unit; the cart is unchanged.
    pub fn add(&mut self, item: LineItem) -> Result<u32, CartError> {
        if item.quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == item.product_id) {
            existing.stock = item.stock.or(existing.stock);
            let merged = existing.clamp_to_stock(existing.quantity.saturating_add(item.quantity));

            if merged == existing.quantity {
                return Err(CartError::OutOfStock(item.product_id));
            }

            existing.quantity = merged;
            return Ok(merged);
        }

        let quantity = item.clamp_to_stock(item.quantity);
        if quantity == 0 {
            return Err(CartError::OutOfStock(item.product_id));
        }

        let item = LineItem { quantity, ..item };
        self.items.push(item);

        Ok(quantity)
    }

    /// Sets the quantity for an existing entry, clamped to its stock bound.
    ///
    /// # Errors
    ///
    /// - [`CartError::ZeroQuantity`]: `quantity` was below 1; the cart is
    ///   unchanged (use [`Cart::remove`] to drop an entry).
    /// - [`CartError::UnknownProduct`]: no entry exists for the product.
    pub fn update_quantity(&mut self, product: ProductId, quantity: u32) -> Result<u32, CartError> {
        if quantity < 1 {
            return Err(CartError::ZeroQuantity);
        }

        let item = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product)
            .ok_or(CartError::UnknownProduct(product))?;

        item.quantity = item.clamp_to_stock(quantity).max(1);

        Ok(item.quantity)
    }

    /// Removes the entry for the given product. Removing an absent product is
    /// a no-op; returns whether an entry was removed.
    pub fn remove(&mut self, product: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product);
        self.items.len() != before
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Merges another cart into this one, summing quantities by product id.
    /// Entries whose stock bound is already exhausted keep their current
    /// quantity.
    pub fn merge(&mut self, other: Cart) {
        for item in other.items {
            _ = self.add(item);
        }
    }

    /// Looks up the entry for a product.
    pub fn get(&self, product: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product_id == product)
    }

    /// The line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Consumes the cart, returning its line items.
    #[must_use]
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    /// Sum of price × quantity over all entries.
    pub fn subtotal(&self) -> Decimal {
        pricing::subtotal(&self.items)
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<LineItem>> for Cart {
    fn from(items: Vec<LineItem>) -> Self {
        Self { items }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn item(id: i64, price: i64, quantity: u32, stock: Option<u32>) -> LineItem {
        LineItem {
            product_id: ProductId::from_i64(id),
            name: format!("product {id}"),
            price: Decimal::from(price),
            images: Vec::new(),
            quantity,
            stock,
        }
    }

    #[test]
    fn adding_same_product_sums_quantities() -> TestResult {
        let mut cart = Cart::new();

        cart.add(item(1, 100, 2, None))?;
        cart.add(item(1, 100, 3, None))?;
        cart.add(item(1, 100, 1, None))?;

        assert_eq!(cart.len(), 1);
        let entry = cart.get(ProductId::from_i64(1)).expect("entry should exist");
        assert_eq!(entry.quantity, 6);

        Ok(())
    }

    #[test]
    fn distinct_products_stay_distinct_in_order() -> TestResult {
        let mut cart = Cart::new();

        cart.add(item(2, 150, 1, None))?;
        cart.add(item(1, 75, 2, None))?;

        let ids: Vec<i64> = cart.items().iter().map(|i| i.product_id.into_i64()).collect();
        assert_eq!(ids, vec![2, 1]);

        Ok(())
    }

    #[test]
    fn add_zero_quantity_is_rejected() {
        let mut cart = Cart::new();

        let result = cart.add(item(1, 100, 0, None));

        assert_eq!(result, Err(CartError::ZeroQuantity));
        assert!(cart.is_empty());
    }

    #[test]
    fn add_clamps_to_stock() -> TestResult {
        let mut cart = Cart::new();

        let quantity = cart.add(item(1, 100, 5, Some(3)))?;

        assert_eq!(quantity, 3);

        Ok(())
    }

    #[test]
    fn add_to_exhausted_stock_is_rejected() -> TestResult {
        let mut cart = Cart::new();
        cart.add(item(1, 100, 3, Some(3)))?;

        let result = cart.add(item(1, 100, 1, Some(3)));

        assert_eq!(result, Err(CartError::OutOfStock(ProductId::from_i64(1))));
        let entry = cart.get(ProductId::from_i64(1)).expect("entry should exist");
        assert_eq!(entry.quantity, 3);

        Ok(())
    }

    #[test]
    fn add_out_of_stock_product_is_rejected() {
        let mut cart = Cart::new();

        let result = cart.add(item(1, 100, 1, Some(0)));

        assert_eq!(result, Err(CartError::OutOfStock(ProductId::from_i64(1))));
        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_below_one_leaves_cart_unchanged() -> TestResult {
        let mut cart = Cart::new();
        cart.add(item(1, 100, 2, None))?;
        let before = cart.clone();

        let result = cart.update_quantity(ProductId::from_i64(1), 0);

        assert_eq!(result, Err(CartError::ZeroQuantity));
        assert_eq!(cart, before);

        Ok(())
    }

    #[test]
    fn update_quantity_sets_and_clamps() -> TestResult {
        let mut cart = Cart::new();
        cart.add(item(1, 100, 1, Some(4)))?;

        assert_eq!(cart.update_quantity(ProductId::from_i64(1), 3)?, 3);
        assert_eq!(cart.update_quantity(ProductId::from_i64(1), 9)?, 4);

        Ok(())
    }

    #[test]
    fn update_quantity_unknown_product_errors() {
        let mut cart = Cart::new();

        let result = cart.update_quantity(ProductId::from_i64(7), 2);

        assert_eq!(result, Err(CartError::UnknownProduct(ProductId::from_i64(7))));
    }

    #[test]
    fn remove_is_idempotent() -> TestResult {
        let mut cart = Cart::new();
        cart.add(item(1, 100, 1, None))?;

        assert!(cart.remove(ProductId::from_i64(1)));
        assert!(!cart.remove(ProductId::from_i64(1)));
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn merge_sums_quantities_by_product() -> TestResult {
        let mut ours = Cart::new();
        ours.add(item(1, 100, 2, None))?;
        ours.add(item(2, 50, 1, None))?;

        let mut theirs = Cart::new();
        theirs.add(item(1, 100, 3, None))?;
        theirs.add(item(3, 25, 4, None))?;

        ours.merge(theirs);

        assert_eq!(ours.len(), 3);
        assert_eq!(
            ours.get(ProductId::from_i64(1)).map(|i| i.quantity),
            Some(5)
        );
        assert_eq!(
            ours.get(ProductId::from_i64(3)).map(|i| i.quantity),
            Some(4)
        );

        Ok(())
    }

    #[test]
    fn subtotal_sums_line_totals() -> TestResult {
        let mut cart = Cart::new();
        cart.add(item(1, 150, 1, None))?;
        cart.add(item(2, 75, 2, None))?;

        assert_eq!(cart.subtotal(), Decimal::from(300));

        Ok(())
    }
}
