//! Kotsell prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, LineItem},
    contact::{ContactError, ContactInfo},
    coupons::{Coupon, CouponError},
    ids::TypedId,
    money::display_php,
    orders::{
        OrderId, OrderStatus, PaymentMethod, Transaction, TransactionLog, build_transaction,
    },
    pricing::{order_total, subtotal},
    products::{Category, CategoryId, Product, ProductId},
    receipt::Receipt,
};
