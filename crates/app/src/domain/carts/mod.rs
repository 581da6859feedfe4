//! The cart store and its local/remote backing.

pub mod api;
pub mod backend;
pub mod errors;
pub mod models;
pub mod records;
pub mod store;

pub use api::{CartsApi, HttpCartsApi};
pub use backend::CartBackend;
pub use errors::CartStoreError;
pub use models::{CartEntry, CartEntryId};
pub use store::CartStore;
