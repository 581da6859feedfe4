//! Category wire records.

use kotsell::products::{Category, CategoryId, ProductId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::coerce;

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRecord {
    #[serde(default, rename = "categoryId")]
    category_id: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    name: Option<String>,
}

impl CategoryRecord {
    /// Resolves to the category model. Records without a usable id are
    /// dropped.
    pub fn into_category(self) -> Option<Category> {
        let id = self
            .category_id
            .as_ref()
            .and_then(coerce::integer)
            .or_else(|| self.id.as_ref().and_then(coerce::integer))
            .map(CategoryId::from_i64)?;

        Some(Category {
            id,
            name: self.name.unwrap_or_default(),
        })
    }
}

/// One row of the product ↔ category junction.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryLinkRecord {
    #[serde(default, rename = "productId")]
    product_id: Option<Value>,
    #[serde(default, rename = "categoryId")]
    category_id: Option<Value>,
}

impl CategoryLinkRecord {
    pub fn product_id(&self) -> Option<ProductId> {
        self.product_id
            .as_ref()
            .and_then(coerce::integer)
            .map(ProductId::from_i64)
    }

    pub fn category_id(&self) -> Option<CategoryId> {
        self.category_id
            .as_ref()
            .and_then(coerce::integer)
            .map(CategoryId::from_i64)
    }
}

/// Link creation payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryLinkPayload {
    pub product_id: i64,
    pub category_id: i64,
}
