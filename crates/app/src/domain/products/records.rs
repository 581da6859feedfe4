//! Product wire records and the canonical transformation.
//!
//! The backend sends prices and stock as numbers or strings, ids under two
//! names, images as plain URLs or objects with half a dozen possible source
//! keys, and categories as a list or a single label. Everything funnels
//! through [`ProductRecord::into_product`] so the rest of the crate only ever
//! sees the canonical [`Product`] shape.

use kotsell::products::{Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;

use crate::api::coerce;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductRecord {
    #[serde(default, rename = "productId")]
    product_id: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    price: Option<Value>,
    #[serde(default)]
    stock: Option<Value>,
    #[serde(default)]
    categories: Option<Value>,
    #[serde(default)]
    category: Option<Value>,
    #[serde(default)]
    images: Option<Value>,
    #[serde(default)]
    image: Option<Value>,
    #[serde(default, rename = "imageUrl")]
    image_url: Option<Value>,
    #[serde(default)]
    image_src: Option<Value>,
}

impl ProductRecord {
    /// Transforms a raw record into the canonical product shape. Records
    /// without a usable id are dropped.
    pub fn into_product(self, base_host: &str) -> Option<Product> {
        let id = self
            .product_id
            .as_ref()
            .and_then(coerce::integer)
            .or_else(|| self.id.as_ref().and_then(coerce::integer))
            .map(ProductId::from_i64)?;

        let images = match &self.images {
            Some(Value::Array(entries)) => entries
                .iter()
                .filter_map(|entry| normalize_image(base_host, entry))
                .collect(),
            _ => [&self.image, &self.image_url, &self.image_src]
                .into_iter()
                .flatten()
                .filter_map(|entry| normalize_image(base_host, entry))
                .take(1)
                .collect(),
        };

        let categories = self
            .categories
            .as_ref()
            .or(self.category.as_ref())
            .map(category_labels)
            .unwrap_or_default();

        Some(Product {
            id,
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            price: self
                .price
                .as_ref()
                .and_then(coerce::decimal)
                .unwrap_or(Decimal::ZERO),
            stock: self.stock.as_ref().and_then(coerce::quantity).unwrap_or(0),
            categories,
            images,
        })
    }
}

/// Resolves one image entry to an absolute URL. Plain strings and objects
/// carrying any of the known source keys are accepted; relative paths are
/// joined onto the API host with exactly one slash.
fn normalize_image(base_host: &str, value: &Value) -> Option<String> {
    let source = match value {
        Value::String(s) => s.clone(),
        Value::Object(fields) => ["source", "url", "path", "name", "filename", "file"]
            .into_iter()
            .find_map(|key| fields.get(key).and_then(Value::as_str))
            .map(str::to_owned)?,
        _ => return None,
    };

    if source.is_empty() {
        return None;
    }

    if source.starts_with("http") {
        return Some(source);
    }

    let separator = if source.starts_with('/') { "" } else { "/" };

    Some(format!("{base_host}{separator}{source}"))
}

fn category_labels(value: &Value) -> SmallVec<[String; 2]> {
    match value {
        Value::String(label) => SmallVec::from_iter([label.clone()]),
        Value::Array(entries) => entries.iter().filter_map(category_label).collect(),
        _ => SmallVec::new(),
    }
}

fn category_label(value: &Value) -> Option<String> {
    match value {
        Value::String(label) => Some(label.clone()),
        Value::Object(fields) => fields
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_owned),
        _ => None,
    }
}

/// Create/update payload, numbers sent as JSON numbers the way the admin
/// forms always did.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: u32,
}
