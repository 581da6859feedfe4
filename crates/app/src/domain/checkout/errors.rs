//! Checkout errors.

use thiserror::Error;

use kotsell::{contact::ContactError, coupons::CouponError};

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A required contact field was left blank; the flow stays editable.
    #[error(transparent)]
    Contact(#[from] ContactError),

    /// There is nothing to buy.
    #[error("no items in your cart")]
    EmptyCart,

    /// The coupon was malformed.
    #[error(transparent)]
    Coupon(#[from] CouponError),

    /// The coupon code has already been spent this session.
    #[error("coupon {0} has already been used")]
    CouponAlreadyUsed(String),

    /// A submit arrived while one is already in flight.
    #[error("an order is already being processed")]
    AlreadyProcessing,

    /// The flow already completed; start a new checkout for another order.
    #[error("this checkout is already confirmed")]
    AlreadyConfirmed,

    /// The backend rejected or failed the order creation. The cart is
    /// untouched and nothing was recorded.
    #[error("failed to process order")]
    OrderRejected(#[source] ApiError),
}
