//! Category catalog and product-category links.

pub mod api;
pub mod errors;
pub mod records;
pub mod service;

pub use api::{CategoriesApi, HttpCategoriesApi};
pub use errors::CategoriesServiceError;
pub use service::CategoriesService;
