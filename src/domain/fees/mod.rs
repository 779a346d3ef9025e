//! Fee calculators and breakdown types

pub mod airport;
pub mod interest;
pub mod permit;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::money::{Currency, Money};
use crate::domain::policy::FeeCategory;
use crate::shared::errors::DomainResult;

pub use airport::{AirportFeeCalculator, AirportFeeRequest};
pub use interest::late_payment_interest;
pub use permit::PermitFeeCalculator;

/// One priced component of a fee calculation.
///
/// Amounts are signed so that discount adjustments subtract; every line
/// is independently rounded to 2 fractional digits and the lines of a
/// breakdown always sum exactly to its total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeLine {
    pub category: FeeCategory,
    pub description: String,
    pub quantity: Decimal,
    pub unit_rate: Decimal,
    pub amount: Decimal,
}

impl FeeLine {
    pub fn flat(category: FeeCategory, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            category,
            description: description.into(),
            quantity: Decimal::ONE,
            unit_rate: amount.round_dp(2),
            amount: amount.round_dp(2),
        }
    }

    pub fn per_unit(
        category: FeeCategory,
        description: impl Into<String>,
        quantity: Decimal,
        unit_rate: Decimal,
    ) -> Self {
        Self {
            category,
            description: description.into(),
            quantity,
            unit_rate,
            amount: (quantity * unit_rate).round_dp(2),
        }
    }
}

/// Itemized result of a fee calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub currency: Currency,
    pub lines: Vec<FeeLine>,
    pub total: Decimal,
}

impl FeeBreakdown {
    pub fn new(currency: Currency, lines: Vec<FeeLine>) -> Self {
        let total = lines.iter().map(|l| l.amount).sum::<Decimal>().round_dp(2);
        Self {
            currency,
            lines,
            total,
        }
    }

    pub fn total_money(&self) -> DomainResult<Money> {
        Money::new(self.total, self.currency)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_total_is_sum_of_lines() {
        let lines = vec![
            FeeLine::flat(FeeCategory::Landing, "Landing fee", Decimal::new(5000, 2)),
            FeeLine::flat(FeeCategory::Navigation, "Navigation fee", Decimal::new(500, 2)),
        ];
        let bd = FeeBreakdown::new(Currency::Usd, lines);
        assert_eq!(bd.total, Decimal::new(5500, 2));
        assert_eq!(bd.total_money().unwrap().to_string(), "55.00 USD");
    }

    #[test]
    fn per_unit_line_rounds_amount() {
        // 3 x 3.333 = 9.999 -> 10.00
        let line = FeeLine::per_unit(
            FeeCategory::FuelFlow,
            "Fuel flow fee",
            Decimal::new(3, 0),
            Decimal::new(3333, 3),
        );
        assert_eq!(line.amount, Decimal::new(1000, 2));
    }
}
