//! Product and category domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::ids::TypedId;

/// Product id.
pub type ProductId = TypedId<Product>;

/// Category id.
pub type CategoryId = TypedId<Category>;

/// A catalog product in canonical shape: numeric price/stock, normalised
/// image URLs, ordered category labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: u32,
    pub categories: SmallVec<[String; 2]>,
    pub images: Vec<String>,
}

impl Product {
    /// Whether any units can still be added to a cart.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// How many more units can be added given a quantity already carted.
    pub fn max_addable(&self, already_in_cart: u32) -> u32 {
        self.stock.saturating_sub(already_in_cart)
    }
}

/// A product category label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;

    fn product(stock: u32) -> Product {
        Product {
            id: ProductId::from_i64(1),
            name: "Brembo brake kit".to_owned(),
            description: "Front brake kit".to_owned(),
            price: Decimal::from(4500),
            stock,
            categories: smallvec!["Brakes".to_owned()],
            images: vec!["http://localhost:8082/images/brembo.jpg".to_owned()],
        }
    }

    #[test]
    fn out_of_stock_product_has_nothing_addable() {
        let product = product(0);

        assert!(!product.is_in_stock());
        assert_eq!(product.max_addable(0), 0);
    }

    #[test]
    fn max_addable_accounts_for_carted_quantity() {
        let product = product(10);

        assert_eq!(product.max_addable(0), 10);
        assert_eq!(product.max_addable(4), 6);
        assert_eq!(product.max_addable(12), 0);
    }
}
