//! Customer and admin accounts.

pub mod api;
pub mod errors;
pub mod models;
pub mod records;
pub mod service;

pub use api::{AccountsApi, HttpAccountsApi};
pub use errors::AccountsServiceError;
pub use models::{AdminAccount, AdminId, CustomerAccount, CustomerId, NewCustomer, ProfileUpdate};
pub use service::AccountsService;
