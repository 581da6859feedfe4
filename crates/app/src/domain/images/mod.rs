//! Image uploads and product-image links. Only the admin console writes
//! here; the storefront consumes plain URLs off the product records.

pub mod api;
pub mod errors;
pub mod models;
pub mod records;
pub mod service;

pub use api::{HttpImagesApi, ImagesApi};
pub use errors::ImagesServiceError;
pub use models::{Image, ImageId};
pub use service::ImagesService;
