//! Product catalog: typed REST access plus the read-through product cache.

pub mod api;
pub mod cache;
pub mod errors;
pub mod models;
pub mod records;
pub mod service;

pub use api::{HttpProductsApi, ProductsApi};
pub use cache::ProductCache;
pub use errors::ProductsServiceError;
pub use models::{NewProduct, ProductUpdate};
pub use service::{CachedProductsService, ProductsService};
