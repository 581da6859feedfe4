//! Peso display formatting.

use rust_decimal::Decimal;
use rusty_money::{Money, iso};

/// Formats an amount as Philippine pesos for display, e.g. `₱1,234.50`.
pub fn display_php(amount: Decimal) -> String {
    Money::from_decimal(amount, iso::PHP).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_peso_sign_and_separators() {
        let formatted = display_php(Decimal::new(123_450, 2));

        assert_eq!(formatted, "₱1,234.50");
    }

    #[test]
    fn formats_zero() {
        assert_eq!(display_php(Decimal::ZERO), "₱0.00");
    }
}
