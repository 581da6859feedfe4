//! Discount coupons.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from coupon construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CouponError {
    /// The code was empty.
    #[error("coupon code cannot be empty")]
    EmptyCode,

    /// The discount amount was zero or negative.
    #[error("coupon amount must be positive")]
    InvalidAmount,
}

/// A flat peso discount applied once at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    code: String,
    amount: Decimal,
}

impl Coupon {
    /// Creates a coupon with a non-empty code and a strictly positive amount.
    ///
    /// # Errors
    ///
    /// - [`CouponError::EmptyCode`]: the code was blank.
    /// - [`CouponError::InvalidAmount`]: the amount was not positive.
    pub fn new(code: impl Into<String>, amount: Decimal) -> Result<Self, CouponError> {
        let code = code.into();

        if code.trim().is_empty() {
            return Err(CouponError::EmptyCode);
        }

        if amount <= Decimal::ZERO {
            return Err(CouponError::InvalidAmount);
        }

        Ok(Self { code, amount })
    }

    /// The coupon code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The discount amount in pesos.
    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn valid_coupon_is_constructed() -> TestResult {
        let coupon = Coupon::new("WELCOME50", Decimal::from(50))?;

        assert_eq!(coupon.code(), "WELCOME50");
        assert_eq!(coupon.amount(), Decimal::from(50));

        Ok(())
    }

    #[test]
    fn blank_code_is_rejected() {
        assert_eq!(
            Coupon::new("  ", Decimal::from(10)),
            Err(CouponError::EmptyCode)
        );
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        assert_eq!(
            Coupon::new("X", Decimal::ZERO),
            Err(CouponError::InvalidAmount)
        );
        assert_eq!(
            Coupon::new("X", Decimal::from(-5)),
            Err(CouponError::InvalidAmount)
        );
    }
}
