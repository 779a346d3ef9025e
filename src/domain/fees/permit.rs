//! Permit fee calculation
//!
//! Flat base plus per-seat and per-kilogram components, scaled by the
//! application type multiplier from the permit fee policy.

use std::sync::Arc;

use rust_decimal::Decimal;

use super::{FeeBreakdown, FeeLine};
use crate::domain::policy::{ApplicationType, FeeCategory, PermitFeePolicy};
use crate::shared::errors::{DomainError, DomainResult};

pub struct PermitFeeCalculator {
    policy: Arc<dyn PermitFeePolicy>,
}

impl PermitFeeCalculator {
    pub fn new(policy: Arc<dyn PermitFeePolicy>) -> Self {
        Self { policy }
    }

    pub fn calculate(
        &self,
        application_type: ApplicationType,
        seat_count: i64,
        mtow_kg: Decimal,
    ) -> DomainResult<FeeBreakdown> {
        if seat_count < 0 {
            return Err(DomainError::Validation(format!(
                "seat count cannot be negative: {seat_count}"
            )));
        }
        if mtow_kg < Decimal::ZERO {
            return Err(DomainError::Validation(format!(
                "MTOW cannot be negative: {mtow_kg}"
            )));
        }

        let mut lines = vec![
            FeeLine::flat(
                FeeCategory::PermitBase,
                format!("Permit base fee ({application_type})"),
                self.policy.base_fee(),
            ),
            FeeLine::per_unit(
                FeeCategory::PermitPerSeat,
                format!("Seat component ({seat_count} seats)"),
                Decimal::new(seat_count, 0),
                self.policy.per_seat_rate(),
            ),
            FeeLine::per_unit(
                FeeCategory::PermitPerWeight,
                format!("Weight component ({mtow_kg} kg MTOW)"),
                mtow_kg,
                self.policy.per_kg_rate(),
            ),
        ];

        let subtotal: Decimal = lines.iter().map(|l| l.amount).sum();
        let multiplier = self.policy.type_multiplier(application_type);
        let total = (subtotal * multiplier).round_dp(2);

        // Adjustment keeps the line list summing exactly to the total
        if multiplier != Decimal::ONE {
            let adjustment = total - subtotal;
            let label = if adjustment >= Decimal::ZERO {
                format!("{application_type} surcharge (x{multiplier})")
            } else {
                format!("{application_type} discount (x{multiplier})")
            };
            lines.push(FeeLine {
                category: FeeCategory::PermitAdjustment,
                description: label,
                quantity: Decimal::ONE,
                unit_rate: adjustment,
                amount: adjustment,
            });
        }

        Ok(FeeBreakdown::new(self.policy.currency(), lines))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::policy::DefaultPermitFeePolicy;

    fn calculator() -> PermitFeeCalculator {
        PermitFeeCalculator::new(Arc::new(DefaultPermitFeePolicy::default()))
    }

    #[test]
    fn one_time_permit_fee() {
        // base 150.00 + 10 seats x 10.00 + 5000 kg x 0.02 = 350.00
        let bd = calculator()
            .calculate(ApplicationType::OneTime, 10, Decimal::new(5000, 0))
            .unwrap();
        assert_eq!(bd.lines.len(), 3);
        assert_eq!(bd.lines[0].amount, Decimal::new(15000, 2));
        assert_eq!(bd.lines[1].amount, Decimal::new(10000, 2));
        assert_eq!(bd.lines[2].amount, Decimal::new(10000, 2));
        assert_eq!(bd.total, Decimal::new(35000, 2));
    }

    #[test]
    fn blanket_permit_applies_surcharge_line() {
        // 350.00 x 2.5 = 875.00, adjustment 525.00
        let bd = calculator()
            .calculate(ApplicationType::Blanket, 10, Decimal::new(5000, 0))
            .unwrap();
        assert_eq!(bd.lines.len(), 4);
        let adjustment = &bd.lines[3];
        assert_eq!(adjustment.category, FeeCategory::PermitAdjustment);
        assert_eq!(adjustment.amount, Decimal::new(52500, 2));
        assert!(adjustment.description.contains("surcharge"));
        assert_eq!(bd.total, Decimal::new(87500, 2));
    }

    #[test]
    fn amendment_applies_discount_line() {
        let bd = calculator()
            .calculate(ApplicationType::Amendment, 10, Decimal::new(5000, 0))
            .unwrap();
        let adjustment = &bd.lines[3];
        assert!(adjustment.description.contains("discount"));
        assert_eq!(adjustment.amount, Decimal::new(-17500, 2));
        assert_eq!(bd.total, Decimal::new(17500, 2));
    }

    #[test]
    fn lines_sum_exactly_to_total() {
        for t in [
            ApplicationType::OneTime,
            ApplicationType::Blanket,
            ApplicationType::Seasonal,
            ApplicationType::Amendment,
        ] {
            let bd = calculator().calculate(t, 7, Decimal::new(12345, 1)).unwrap();
            let sum: Decimal = bd.lines.iter().map(|l| l.amount).sum();
            assert_eq!(sum.round_dp(2), bd.total, "{t}");
        }
    }

    #[test]
    fn negative_inputs_are_rejected() {
        let err = calculator()
            .calculate(ApplicationType::OneTime, -1, Decimal::ZERO)
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = calculator()
            .calculate(ApplicationType::OneTime, 0, Decimal::new(-1, 0))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
