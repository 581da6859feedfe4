//! Cart store errors.

use thiserror::Error;

use kotsell::cart::CartError;

#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The mutation was rejected by the cart's own rules (quantity below 1,
    /// stock exhausted, unknown product).
    #[error(transparent)]
    Cart(#[from] CartError),
}
