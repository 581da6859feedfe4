//! Orders and the session transaction history.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use jiff::Timestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{cart::LineItem, ids::TypedId, pricing};

/// Order id assigned by the backend.
pub type OrderId = TypedId<Transaction>;

/// Error for unrecognised payment method names.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(String);

/// How the shopper pays. Wire names match the backend exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[default]
    #[serde(rename = "COD")]
    Cod,

    /// GCash wallet transfer.
    #[serde(rename = "GCash")]
    GCash,

    /// Debit or credit card.
    #[serde(rename = "Card")]
    Card,
}

impl PaymentMethod {
    /// The backend's name for this method.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cod => "COD",
            Self::GCash => "GCash",
            Self::Card => "Card",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "cod" => Ok(Self::Cod),
            "gcash" => Ok(Self::GCash),
            "card" => Ok(Self::Card),
            _ => Err(UnknownPaymentMethod(value.to_owned())),
        }
    }
}

/// Lifecycle state of a backend order. Orders are created `Pending` and never
/// mutated by this client afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Created, awaiting fulfilment.
    #[default]
    Pending,

    /// Fulfilled by the shop.
    Completed,

    /// Cancelled before fulfilment.
    Cancelled,
}

/// A completed checkout, recorded once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Sequence number within this session's history. Assigned as count + 1;
    /// not unique across concurrent sessions.
    pub order_number: u64,
    /// Snapshot of the purchased line items.
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub shipping_fee: Decimal,
    pub total: Decimal,
    pub coupon_code: Option<String>,
    pub payment_method: PaymentMethod,
    pub delivery_address: String,
    pub placed_at: Timestamp,
}

/// Append-only, in-memory history of this session's completed checkouts.
/// Also remembers which coupon codes have been spent.
#[derive(Debug, Clone, Default)]
pub struct TransactionLog {
    transactions: Vec<Transaction>,
    used_coupons: FxHashSet<String>,
}

impl TransactionLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The order number the next recorded transaction should carry.
    pub fn next_order_number(&self) -> u64 {
        self.transactions.len() as u64 + 1
    }

    /// Whether a coupon code has already been spent in this session.
    pub fn is_coupon_used(&self, code: &str) -> bool {
        self.used_coupons.contains(code)
    }

    /// Appends a transaction and marks its coupon code (if any) as spent.
    pub fn record(&mut self, transaction: Transaction) {
        if let Some(code) = &transaction.coupon_code {
            self.used_coupons.insert(code.clone());
        }

        self.transactions.push(transaction);
    }

    /// Recorded transactions, oldest first.
    pub fn history(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Total revenue across the recorded history.
    pub fn revenue(&self) -> Decimal {
        self.transactions
            .iter()
            .fold(Decimal::ZERO, |acc, tx| acc + tx.total)
    }
}

/// Builds a [`Transaction`] from the purchased items and checkout selections,
/// computing subtotal and total.
#[expect(clippy::too_many_arguments, reason = "plain record constructor")]
pub fn build_transaction(
    order_number: u64,
    items: Vec<LineItem>,
    discount: Decimal,
    shipping_fee: Decimal,
    coupon_code: Option<String>,
    payment_method: PaymentMethod,
    delivery_address: String,
    placed_at: Timestamp,
) -> Transaction {
    let subtotal = pricing::subtotal(&items);
    let total = pricing::order_total(subtotal, discount, shipping_fee);

    Transaction {
        order_number,
        items,
        subtotal,
        discount,
        shipping_fee,
        total,
        coupon_code,
        payment_method,
        delivery_address,
        placed_at,
    }
}
