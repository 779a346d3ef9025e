//! Monetary value type
//!
//! All amounts in this core carry exactly two fractional digits and a
//! currency code. Arithmetic between mismatched currencies is rejected;
//! there is no conversion between the two supported currencies.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shared::errors::{DomainError, DomainResult};

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// United States Dollar
    Usd,
    /// Tongan Pa'anga
    Top,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Top => "TOP",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::Usd
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Immutable monetary amount.
///
/// Invariant: amount >= 0 and rounded to 2 fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> DomainResult<Self> {
        if amount < Decimal::ZERO {
            return Err(DomainError::Validation(format!(
                "money amount cannot be negative: {amount}"
            )));
        }
        Ok(Self {
            amount: amount.round_dp(2),
            currency,
        })
    }

    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    fn ensure_same_currency(&self, other: &Money) -> DomainResult<()> {
        if self.currency != other.currency {
            return Err(DomainError::CurrencyMismatch {
                left: self.currency,
                right: other.currency,
            });
        }
        Ok(())
    }

    pub fn add(&self, other: &Money) -> DomainResult<Money> {
        self.ensure_same_currency(other)?;
        Money::new(self.amount + other.amount, self.currency)
    }

    /// Fails on currency mismatch or when the result would go negative.
    pub fn subtract(&self, other: &Money) -> DomainResult<Money> {
        self.ensure_same_currency(other)?;
        let result = self.amount - other.amount;
        if result < Decimal::ZERO {
            return Err(DomainError::Validation(format!(
                "subtraction would produce a negative amount: {} - {}",
                self.amount, other.amount
            )));
        }
        Money::new(result, self.currency)
    }

    pub fn multiply(&self, factor: Decimal) -> DomainResult<Money> {
        if factor < Decimal::ZERO {
            return Err(DomainError::Validation(format!(
                "multiplication factor cannot be negative: {factor}"
            )));
        }
        Money::new(self.amount * factor, self.currency)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(cents: i64) -> Money {
        Money::new(Decimal::new(cents, 2), Currency::Usd).unwrap()
    }

    #[test]
    fn new_rejects_negative_amount() {
        let err = Money::new(Decimal::new(-1, 2), Currency::Usd).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn new_rounds_to_two_decimal_places() {
        let m = Money::new(Decimal::new(123456, 4), Currency::Usd).unwrap(); // 12.3456
        assert_eq!(m.amount(), Decimal::new(1235, 2)); // 12.35
    }

    #[test]
    fn add_then_subtract_is_identity() {
        let a = usd(15025);
        let b = usd(4999);
        let sum = a.add(&b).unwrap();
        assert_eq!(sum.subtract(&b).unwrap(), a);
    }

    #[test]
    fn subtract_rejects_negative_result() {
        let err = usd(100).subtract(&usd(200)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn cross_currency_arithmetic_fails() {
        let a = usd(100);
        let b = Money::new(Decimal::new(100, 2), Currency::Top).unwrap();
        assert!(matches!(
            a.add(&b).unwrap_err(),
            DomainError::CurrencyMismatch { .. }
        ));
        assert!(matches!(
            a.subtract(&b).unwrap_err(),
            DomainError::CurrencyMismatch { .. }
        ));
    }

    #[test]
    fn multiply_rejects_negative_factor() {
        let err = usd(100).multiply(Decimal::new(-5, 1)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn multiply_rounds_result() {
        // 10.01 * 0.333 = 3.33333 -> 3.33
        let m = usd(1001).multiply(Decimal::new(333, 3)).unwrap();
        assert_eq!(m.amount(), Decimal::new(333, 2));
    }

    #[test]
    fn display_includes_currency_code() {
        assert_eq!(usd(15000).to_string(), "150.00 USD");
        assert_eq!(Money::zero(Currency::Top).to_string(), "0.00 TOP");
    }
}
