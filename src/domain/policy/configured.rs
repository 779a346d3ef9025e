//! Configuration-backed fee policies
//!
//! Resolve rates from the catalog for a fixed effective date, falling back
//! to the hardcoded defaults when no record matches. The specificity
//! tie-break lives in `model::select_best` and is applied on every lookup.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::catalog::RateCatalog;
use super::default::{DefaultAirportFeePolicy, DefaultPermitFeePolicy};
use super::model::{select_best, ApplicationType, FeeCategory, OperationType};
use super::{AirportFeePolicy, PermitFeePolicy};
use crate::domain::money::Currency;
use crate::domain::weight::MtowTier;

/// Permit fee policy resolved against the rate catalog.
///
/// Constructed per quote with the effective date; callers may cache one
/// instance per (tenant, date) as long as the cache is invalidated when
/// rates change.
pub struct ConfiguredPermitFeePolicy {
    catalog: Arc<dyn RateCatalog>,
    fallback: DefaultPermitFeePolicy,
    effective: NaiveDate,
}

impl ConfiguredPermitFeePolicy {
    pub fn new(catalog: Arc<dyn RateCatalog>, currency: Currency, effective: NaiveDate) -> Self {
        Self {
            catalog,
            fallback: DefaultPermitFeePolicy::new(currency),
            effective,
        }
    }

    fn lookup(&self, category: FeeCategory) -> Option<Decimal> {
        let candidates = self
            .catalog
            .candidate_rates(category, None, None, None, self.effective);
        let matching: Vec<_> = candidates
            .into_iter()
            .filter(|r| r.matches(category, None, None, None, self.effective))
            .collect();
        select_best(&matching).map(|r| r.rate)
    }
}

impl PermitFeePolicy for ConfiguredPermitFeePolicy {
    fn currency(&self) -> Currency {
        self.fallback.currency()
    }

    fn base_fee(&self) -> Decimal {
        self.lookup(FeeCategory::PermitBase)
            .unwrap_or_else(|| self.fallback.base_fee())
    }

    fn per_seat_rate(&self) -> Decimal {
        self.lookup(FeeCategory::PermitPerSeat)
            .unwrap_or_else(|| self.fallback.per_seat_rate())
    }

    fn per_kg_rate(&self) -> Decimal {
        self.lookup(FeeCategory::PermitPerWeight)
            .unwrap_or_else(|| self.fallback.per_kg_rate())
    }

    // Multipliers are structural, not configurable rates
    fn type_multiplier(&self, application_type: ApplicationType) -> Decimal {
        self.fallback.type_multiplier(application_type)
    }
}

/// Airport fee policy resolved against the rate catalog for one airport
/// and effective date.
pub struct ConfiguredAirportFeePolicy {
    catalog: Arc<dyn RateCatalog>,
    fallback: DefaultAirportFeePolicy,
    airport: Option<String>,
    effective: NaiveDate,
}

impl ConfiguredAirportFeePolicy {
    pub fn new(
        catalog: Arc<dyn RateCatalog>,
        currency: Currency,
        airport: Option<String>,
        effective: NaiveDate,
    ) -> Self {
        Self {
            catalog,
            fallback: DefaultAirportFeePolicy::new(currency),
            airport,
            effective,
        }
    }

    fn lookup(
        &self,
        category: FeeCategory,
        operation_type: Option<OperationType>,
        airport: Option<&str>,
        tier: Option<MtowTier>,
    ) -> Option<Decimal> {
        let candidates =
            self.catalog
                .candidate_rates(category, operation_type, airport, tier, self.effective);
        let matching: Vec<_> = candidates
            .into_iter()
            .filter(|r| r.matches(category, operation_type, airport, tier, self.effective))
            .collect();
        select_best(&matching).map(|r| r.rate)
    }

    fn airport_key(&self) -> Option<&str> {
        self.airport.as_deref()
    }
}

impl AirportFeePolicy for ConfiguredAirportFeePolicy {
    fn currency(&self) -> Currency {
        self.fallback.currency()
    }

    fn landing_rate(&self, operation_type: OperationType, tier: MtowTier) -> Decimal {
        if operation_type.is_landing_exempt() {
            return Decimal::ZERO;
        }
        self.lookup(
            FeeCategory::Landing,
            Some(operation_type),
            self.airport_key(),
            Some(tier),
        )
        .unwrap_or_else(|| self.fallback.landing_rate(operation_type, tier))
    }

    fn landing_minimum(&self, operation_type: OperationType) -> Decimal {
        if operation_type.is_landing_exempt() {
            return Decimal::ZERO;
        }
        let candidates = self.catalog.candidate_rates(
            FeeCategory::Landing,
            Some(operation_type),
            self.airport_key(),
            None,
            self.effective,
        );
        let matching: Vec<_> = candidates
            .into_iter()
            .filter(|r| {
                r.matches(
                    FeeCategory::Landing,
                    Some(operation_type),
                    self.airport_key(),
                    None,
                    self.effective,
                )
            })
            .collect();
        select_best(&matching)
            .and_then(|r| r.minimum_fee)
            .unwrap_or_else(|| self.fallback.landing_minimum(operation_type))
    }

    fn navigation_rate(&self, tier: MtowTier) -> Decimal {
        self.lookup(FeeCategory::Navigation, None, self.airport_key(), Some(tier))
            .unwrap_or_else(|| self.fallback.navigation_rate(tier))
    }

    fn security_charge(&self) -> Decimal {
        self.lookup(FeeCategory::Security, None, self.airport_key(), None)
            .unwrap_or_else(|| self.fallback.security_charge())
    }

    fn baggage_screening_fee(&self) -> Decimal {
        self.lookup(FeeCategory::BaggageScreening, None, self.airport_key(), None)
            .unwrap_or_else(|| self.fallback.baggage_screening_fee())
    }

    fn airport_development_rate(&self, airport: &str) -> Decimal {
        self.lookup(FeeCategory::AirportDevelopment, None, Some(airport), None)
            .unwrap_or_else(|| self.fallback.airport_development_rate(airport))
    }

    fn interisland_development_rate(&self) -> Decimal {
        self.fallback.interisland_development_rate()
    }

    fn parking_fee_percentage(&self) -> Decimal {
        self.fallback.parking_fee_percentage()
    }

    fn fire_upgrade_fee(&self) -> Decimal {
        self.lookup(FeeCategory::FireUpgrade, None, self.airport_key(), None)
            .unwrap_or_else(|| self.fallback.fire_upgrade_fee())
    }

    fn flight_plan_fee(&self) -> Decimal {
        self.lookup(FeeCategory::FlightPlan, None, self.airport_key(), None)
            .unwrap_or_else(|| self.fallback.flight_plan_fee())
    }

    fn fuel_flow_rate(&self) -> Decimal {
        self.lookup(FeeCategory::FuelFlow, None, self.airport_key(), None)
            .unwrap_or_else(|| self.fallback.fuel_flow_rate())
    }

    fn lighting_rate(&self) -> Decimal {
        self.lookup(FeeCategory::Lighting, None, self.airport_key(), None)
            .unwrap_or_else(|| self.fallback.lighting_rate())
    }

    fn late_payment_monthly_rate(&self) -> Decimal {
        self.lookup(FeeCategory::LatePaymentInterest, None, self.airport_key(), None)
            .unwrap_or_else(|| self.fallback.late_payment_monthly_rate())
    }

    fn extended_operations_fee(&self, arrival_hour: u32) -> Decimal {
        self.fallback.extended_operations_fee(arrival_hour)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::policy::catalog::StaticRateCatalog;
    use crate::domain::policy::model::FeeRate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn landing_rate_record(
        airport: Option<&str>,
        tier: Option<MtowTier>,
        from: NaiveDate,
        cents: i64,
    ) -> FeeRate {
        FeeRate {
            category: FeeCategory::Landing,
            operation_type: Some(OperationType::Commercial),
            airport: airport.map(str::to_string),
            mtow_tier: tier,
            rate: Decimal::new(cents, 2),
            currency: Currency::Usd,
            per_unit: true,
            minimum_fee: Some(Decimal::new(7500, 2)),
            effective_from: from,
            effective_to: None,
            is_active: true,
        }
    }

    #[test]
    fn falls_back_to_defaults_when_catalog_is_empty() {
        let catalog = Arc::new(StaticRateCatalog::default());
        let policy = ConfiguredAirportFeePolicy::new(
            catalog,
            Currency::Usd,
            Some("NFTF".into()),
            date(2025, 6, 1),
        );
        assert_eq!(
            policy.landing_rate(OperationType::Commercial, MtowTier::Tier2),
            DefaultAirportFeePolicy::default().landing_rate(OperationType::Commercial, MtowTier::Tier2)
        );
        assert_eq!(
            policy.landing_minimum(OperationType::Commercial),
            Decimal::new(5000, 2)
        );
    }

    #[test]
    fn configured_rate_overrides_default() {
        let catalog = Arc::new(StaticRateCatalog::new(vec![landing_rate_record(
            Some("NFTF"),
            Some(MtowTier::Tier2),
            date(2025, 1, 1),
            1450,
        )]));
        let policy = ConfiguredAirportFeePolicy::new(
            catalog,
            Currency::Usd,
            Some("NFTF".into()),
            date(2025, 6, 1),
        );
        assert_eq!(
            policy.landing_rate(OperationType::Commercial, MtowTier::Tier2),
            Decimal::new(1450, 2)
        );
    }

    #[test]
    fn rate_not_yet_effective_is_ignored() {
        let catalog = Arc::new(StaticRateCatalog::new(vec![landing_rate_record(
            Some("NFTF"),
            Some(MtowTier::Tier2),
            date(2026, 1, 1),
            9999,
        )]));
        let policy = ConfiguredAirportFeePolicy::new(
            catalog,
            Currency::Usd,
            Some("NFTF".into()),
            date(2025, 6, 1),
        );
        assert_eq!(
            policy.landing_rate(OperationType::Commercial, MtowTier::Tier2),
            Decimal::new(1200, 2)
        );
    }

    #[test]
    fn airport_specific_wins_over_general() {
        let catalog = Arc::new(StaticRateCatalog::new(vec![
            landing_rate_record(None, Some(MtowTier::Tier2), date(2025, 3, 1), 1300),
            landing_rate_record(Some("NFTF"), Some(MtowTier::Tier2), date(2025, 1, 1), 1450),
        ]));
        let policy = ConfiguredAirportFeePolicy::new(
            catalog,
            Currency::Usd,
            Some("NFTF".into()),
            date(2025, 6, 1),
        );
        assert_eq!(
            policy.landing_rate(OperationType::Commercial, MtowTier::Tier2),
            Decimal::new(1450, 2)
        );
    }

    #[test]
    fn minimum_comes_from_tier_agnostic_record() {
        let catalog = Arc::new(StaticRateCatalog::new(vec![landing_rate_record(
            Some("NFTF"),
            None,
            date(2025, 1, 1),
            1100,
        )]));
        let policy = ConfiguredAirportFeePolicy::new(
            catalog,
            Currency::Usd,
            Some("NFTF".into()),
            date(2025, 6, 1),
        );
        assert_eq!(
            policy.landing_minimum(OperationType::Commercial),
            Decimal::new(7500, 2)
        );
    }

    #[test]
    fn configured_permit_base_overrides_default() {
        let catalog = Arc::new(StaticRateCatalog::new(vec![FeeRate {
            category: FeeCategory::PermitBase,
            operation_type: None,
            airport: None,
            mtow_tier: None,
            rate: Decimal::new(20000, 2),
            currency: Currency::Usd,
            per_unit: false,
            minimum_fee: None,
            effective_from: date(2025, 1, 1),
            effective_to: None,
            is_active: true,
        }]));
        let policy = ConfiguredPermitFeePolicy::new(catalog, Currency::Usd, date(2025, 6, 1));
        assert_eq!(policy.base_fee(), Decimal::new(20000, 2));
        // Untouched rates fall back
        assert_eq!(policy.per_seat_rate(), Decimal::new(1000, 2));
    }
}
