//! Airport operational fee calculation
//!
//! Itemized per-flight charges levied by the airport authority. The
//! computation is ordered; each step appends at most one breakdown line
//! and every line is independently rounded to 2 fractional digits.

use std::sync::Arc;

use rust_decimal::Decimal;

use super::{FeeBreakdown, FeeLine};
use crate::domain::operating_window::OperatingWindow;
use crate::domain::policy::{AirportFeePolicy, FeeCategory, OperationType};
use crate::domain::weight::MtowTier;
use crate::shared::errors::{DomainError, DomainResult};

/// One flight's chargeable context
#[derive(Debug, Clone)]
pub struct AirportFeeRequest {
    /// ICAO code of the handling airport
    pub airport: String,
    pub operation_type: OperationType,
    /// MTOW in pounds
    pub mtow_lbs: Decimal,
    pub passenger_count: u32,
    /// Baggage screening applies only to departing passengers
    pub passengers_departing: bool,
    pub parking_hours: u32,
    pub operating_window: Option<OperatingWindow>,
    pub fire_category_upgrade: bool,
    pub flight_plan_filed: bool,
    pub fuel_gallons: Decimal,
    /// Interisland flights pay the reduced flat development rate
    pub interisland: bool,
}

impl AirportFeeRequest {
    pub fn new(airport: impl Into<String>, operation_type: OperationType, mtow_lbs: Decimal) -> Self {
        Self {
            airport: airport.into(),
            operation_type,
            mtow_lbs,
            passenger_count: 0,
            passengers_departing: false,
            parking_hours: 0,
            operating_window: None,
            fire_category_upgrade: false,
            flight_plan_filed: false,
            fuel_gallons: Decimal::ZERO,
            interisland: false,
        }
    }
}

pub struct AirportFeeCalculator {
    policy: Arc<dyn AirportFeePolicy>,
}

impl AirportFeeCalculator {
    pub fn new(policy: Arc<dyn AirportFeePolicy>) -> Self {
        Self { policy }
    }

    pub fn calculate(&self, request: &AirportFeeRequest) -> DomainResult<FeeBreakdown> {
        if request.mtow_lbs < Decimal::ZERO {
            return Err(DomainError::Validation(format!(
                "MTOW cannot be negative: {}",
                request.mtow_lbs
            )));
        }
        if request.fuel_gallons < Decimal::ZERO {
            return Err(DomainError::Validation(format!(
                "fuel gallons cannot be negative: {}",
                request.fuel_gallons
            )));
        }

        let tier = MtowTier::from_pounds(request.mtow_lbs)?;
        let mut lines = Vec::new();

        // 1. Landing fee, floored at the operation type's minimum.
        //    Government/military/emergency operations are fully exempt.
        let landing_fee = if request.operation_type.is_landing_exempt() {
            Decimal::ZERO
        } else {
            let units = (request.mtow_lbs / Decimal::new(1000, 0)).ceil();
            let rate = self.policy.landing_rate(request.operation_type, tier);
            let fee = (units * rate)
                .round_dp(2)
                .max(self.policy.landing_minimum(request.operation_type));
            lines.push(FeeLine {
                category: FeeCategory::Landing,
                description: format!(
                    "Landing fee ({} x 1,000 lbs, {})",
                    units, request.operation_type
                ),
                quantity: units,
                unit_rate: rate,
                amount: fee,
            });
            fee
        };

        // 2. Navigation fee, flat by tier
        lines.push(FeeLine::flat(
            FeeCategory::Navigation,
            format!("Navigation fee ({tier})"),
            self.policy.navigation_rate(tier),
        ));

        // 3. Fire category upgrade
        if request.fire_category_upgrade {
            lines.push(FeeLine::flat(
                FeeCategory::FireUpgrade,
                "Fire category upgrade fee",
                self.policy.fire_upgrade_fee(),
            ));
        }

        // 4. Parking: 20% of the landing fee per started 8-hour block
        if request.parking_hours > 0 {
            let blocks = Decimal::from((request.parking_hours + 7) / 8);
            let amount = (landing_fee * self.policy.parking_fee_percentage() * blocks).round_dp(2);
            if amount > Decimal::ZERO {
                lines.push(FeeLine {
                    category: FeeCategory::Parking,
                    description: format!(
                        "Parking fee ({} hours, {} block(s))",
                        request.parking_hours, blocks
                    ),
                    quantity: blocks,
                    unit_rate: (landing_fee * self.policy.parking_fee_percentage()).round_dp(2),
                    amount,
                });
            }
        }

        // 5. Per-passenger charges
        if request.passenger_count > 0 {
            let pax = Decimal::from(request.passenger_count);
            let development_rate = if request.interisland {
                self.policy.interisland_development_rate()
            } else {
                self.policy.airport_development_rate(&request.airport)
            };
            lines.push(FeeLine::per_unit(
                FeeCategory::AirportDevelopment,
                format!("Airport development fee ({} pax)", request.passenger_count),
                pax,
                development_rate,
            ));
            lines.push(FeeLine::per_unit(
                FeeCategory::Security,
                format!("Security charge ({} pax)", request.passenger_count),
                pax,
                self.policy.security_charge(),
            ));
            if request.passengers_departing {
                lines.push(FeeLine::per_unit(
                    FeeCategory::BaggageScreening,
                    format!("Baggage screening ({} pax)", request.passenger_count),
                    pax,
                    self.policy.baggage_screening_fee(),
                ));
            }
        }

        if let Some(window) = &request.operating_window {
            // 6. Extended operations band by scheduled arrival hour
            if window.requires_extended_operations() {
                let fee = self.policy.extended_operations_fee(window.arrival_hour());
                if fee > Decimal::ZERO {
                    lines.push(FeeLine::flat(
                        FeeCategory::ExtendedOperations,
                        format!("Extended operations fee (arrival {:02}:00)", window.arrival_hour()),
                        fee,
                    ));
                }
            }

            // 7. Runway lighting per qualifying hour
            if window.requires_lighting() {
                lines.push(FeeLine::per_unit(
                    FeeCategory::Lighting,
                    format!("Runway lighting ({} hour(s))", window.lighting_hours()),
                    Decimal::from(window.lighting_hours()),
                    self.policy.lighting_rate(),
                ));
            }
        }

        // 8. Flight plan filing
        if request.flight_plan_filed {
            lines.push(FeeLine::flat(
                FeeCategory::FlightPlan,
                "Flight plan filing fee",
                self.policy.flight_plan_fee(),
            ));
        }

        // 9. Fuel flow
        if request.fuel_gallons > Decimal::ZERO {
            lines.push(FeeLine::per_unit(
                FeeCategory::FuelFlow,
                format!("Fuel flow fee ({} gal)", request.fuel_gallons),
                request.fuel_gallons,
                self.policy.fuel_flow_rate(),
            ));
        }

        Ok(FeeBreakdown::new(self.policy.currency(), lines))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::policy::DefaultAirportFeePolicy;
    use chrono::NaiveTime;

    fn calculator() -> AirportFeeCalculator {
        AirportFeeCalculator::new(Arc::new(DefaultAirportFeePolicy::default()))
    }

    fn line<'a>(bd: &'a FeeBreakdown, category: FeeCategory) -> Option<&'a FeeLine> {
        bd.lines.iter().find(|l| l.category == category)
    }

    #[test]
    fn ga_tier1_landing_and_navigation() {
        // ceil(10000/1000) x 5.00 = 50.00 >= min 20.00; nav 5.00; total 55.00
        let req = AirportFeeRequest::new("NFTF", OperationType::GeneralAviation, Decimal::new(10_000, 0));
        let bd = calculator().calculate(&req).unwrap();
        assert_eq!(bd.lines.len(), 2);
        assert_eq!(line(&bd, FeeCategory::Landing).unwrap().amount, Decimal::new(5000, 2));
        assert_eq!(line(&bd, FeeCategory::Navigation).unwrap().amount, Decimal::new(500, 2));
        assert_eq!(bd.total, Decimal::new(5500, 2));
    }

    #[test]
    fn landing_minimum_floors_small_aircraft() {
        // ceil(2000/1000) x 5.00 = 10.00 -> floored at 20.00
        let req = AirportFeeRequest::new("NFTF", OperationType::GeneralAviation, Decimal::new(2000, 0));
        let bd = calculator().calculate(&req).unwrap();
        assert_eq!(line(&bd, FeeCategory::Landing).unwrap().amount, Decimal::new(2000, 2));
    }

    #[test]
    fn government_operations_are_landing_exempt() {
        let req = AirportFeeRequest::new("NFTF", OperationType::Government, Decimal::new(150_000, 0));
        let bd = calculator().calculate(&req).unwrap();
        assert!(line(&bd, FeeCategory::Landing).is_none());
        // Navigation still applies
        assert_eq!(line(&bd, FeeCategory::Navigation).unwrap().amount, Decimal::new(5000, 2));
    }

    #[test]
    fn parking_uses_started_blocks() {
        // Landing: ceil(10) x 5.00 = 50.00; 9 hours -> 2 blocks; 20% x 50 x 2 = 20.00
        let mut req =
            AirportFeeRequest::new("NFTF", OperationType::GeneralAviation, Decimal::new(10_000, 0));
        req.parking_hours = 9;
        let bd = calculator().calculate(&req).unwrap();
        assert_eq!(line(&bd, FeeCategory::Parking).unwrap().amount, Decimal::new(2000, 2));
    }

    #[test]
    fn passenger_charges_itemized() {
        let mut req =
            AirportFeeRequest::new("NFTF", OperationType::Commercial, Decimal::new(90_000, 0));
        req.passenger_count = 100;
        req.passengers_departing = true;
        let bd = calculator().calculate(&req).unwrap();
        // development 100 x 15.00, security 100 x 3.50, baggage 100 x 2.00
        assert_eq!(
            line(&bd, FeeCategory::AirportDevelopment).unwrap().amount,
            Decimal::new(150_000, 2)
        );
        assert_eq!(line(&bd, FeeCategory::Security).unwrap().amount, Decimal::new(35_000, 2));
        assert_eq!(
            line(&bd, FeeCategory::BaggageScreening).unwrap().amount,
            Decimal::new(20_000, 2)
        );
    }

    #[test]
    fn interisland_uses_reduced_development_rate() {
        let mut req =
            AirportFeeRequest::new("NFTF", OperationType::Commercial, Decimal::new(50_000, 0));
        req.passenger_count = 40;
        req.interisland = true;
        let bd = calculator().calculate(&req).unwrap();
        // 40 x 5.00 = 200.00
        assert_eq!(
            line(&bd, FeeCategory::AirportDevelopment).unwrap().amount,
            Decimal::new(20_000, 2)
        );
    }

    #[test]
    fn arriving_passengers_skip_baggage_screening() {
        let mut req =
            AirportFeeRequest::new("NFTF", OperationType::Commercial, Decimal::new(50_000, 0));
        req.passenger_count = 40;
        req.passengers_departing = false;
        let bd = calculator().calculate(&req).unwrap();
        assert!(line(&bd, FeeCategory::BaggageScreening).is_none());
    }

    #[test]
    fn extended_operations_and_lighting() {
        let mut req =
            AirportFeeRequest::new("NFTF", OperationType::GeneralAviation, Decimal::new(10_000, 0));
        req.operating_window = Some(OperatingWindow::new(
            NaiveTime::from_hms_opt(23, 30, 0).unwrap(),
            NaiveTime::from_hms_opt(1, 0, 0).unwrap(),
        ));
        let bd = calculator().calculate(&req).unwrap();
        // Late band (23:00): 150.00; lighting 2 hours x 50.00 = 100.00
        assert_eq!(
            line(&bd, FeeCategory::ExtendedOperations).unwrap().amount,
            Decimal::new(15_000, 2)
        );
        assert_eq!(line(&bd, FeeCategory::Lighting).unwrap().amount, Decimal::new(10_000, 2));
    }

    #[test]
    fn flight_plan_fire_upgrade_and_fuel() {
        let mut req =
            AirportFeeRequest::new("NFTF", OperationType::Cargo, Decimal::new(80_000, 0));
        req.flight_plan_filed = true;
        req.fire_category_upgrade = true;
        req.fuel_gallons = Decimal::new(1200, 0);
        let bd = calculator().calculate(&req).unwrap();
        assert_eq!(line(&bd, FeeCategory::FlightPlan).unwrap().amount, Decimal::new(2500, 2));
        assert_eq!(line(&bd, FeeCategory::FireUpgrade).unwrap().amount, Decimal::new(15_000, 2));
        // 1200 x 0.05 = 60.00
        assert_eq!(line(&bd, FeeCategory::FuelFlow).unwrap().amount, Decimal::new(6000, 2));
    }

    #[test]
    fn negative_mtow_is_rejected() {
        let req = AirportFeeRequest::new("NFTF", OperationType::Commercial, Decimal::new(-1, 0));
        let err = calculator().calculate(&req).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn total_is_sum_of_lines() {
        let mut req =
            AirportFeeRequest::new("NFTF", OperationType::Commercial, Decimal::new(90_500, 0));
        req.passenger_count = 120;
        req.passengers_departing = true;
        req.parking_hours = 10;
        req.fuel_gallons = Decimal::new(850, 0);
        req.flight_plan_filed = true;
        let bd = calculator().calculate(&req).unwrap();
        let sum: Decimal = bd.lines.iter().map(|l| l.amount).sum();
        assert_eq!(sum.round_dp(2), bd.total);
    }
}
