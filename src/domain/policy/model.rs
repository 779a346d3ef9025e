//! Fee rate records and the classification enums they are keyed by

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::money::Currency;
use crate::domain::weight::MtowTier;

/// Permit application type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationType {
    /// Single-flight permit
    OneTime,
    /// Blanket permit covering a period of operations
    Blanket,
    /// Seasonal schedule permit
    Seasonal,
    /// Amendment to an existing permit
    Amendment,
}

impl std::fmt::Display for ApplicationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OneTime => write!(f, "OneTime"),
            Self::Blanket => write!(f, "Blanket"),
            Self::Seasonal => write!(f, "Seasonal"),
            Self::Amendment => write!(f, "Amendment"),
        }
    }
}

/// Flight operation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationType {
    GeneralAviation,
    Commercial,
    Cargo,
    Training,
    Government,
    Military,
    Emergency,
}

impl OperationType {
    /// Government, military and emergency operations pay no landing fee.
    pub fn is_landing_exempt(&self) -> bool {
        matches!(self, Self::Government | Self::Military | Self::Emergency)
    }
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GeneralAviation => write!(f, "GeneralAviation"),
            Self::Commercial => write!(f, "Commercial"),
            Self::Cargo => write!(f, "Cargo"),
            Self::Training => write!(f, "Training"),
            Self::Government => write!(f, "Government"),
            Self::Military => write!(f, "Military"),
            Self::Emergency => write!(f, "Emergency"),
        }
    }
}

/// Fee category, shared between rate records, fee breakdown lines and
/// invoice line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeeCategory {
    Landing,
    Navigation,
    FireUpgrade,
    Parking,
    AirportDevelopment,
    Security,
    BaggageScreening,
    ExtendedOperations,
    Lighting,
    FlightPlan,
    FuelFlow,
    PermitBase,
    PermitPerSeat,
    PermitPerWeight,
    PermitAdjustment,
    LatePaymentInterest,
}

impl std::fmt::Display for FeeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Landing => "Landing",
            Self::Navigation => "Navigation",
            Self::FireUpgrade => "FireUpgrade",
            Self::Parking => "Parking",
            Self::AirportDevelopment => "AirportDevelopment",
            Self::Security => "Security",
            Self::BaggageScreening => "BaggageScreening",
            Self::ExtendedOperations => "ExtendedOperations",
            Self::Lighting => "Lighting",
            Self::FlightPlan => "FlightPlan",
            Self::FuelFlow => "FuelFlow",
            Self::PermitBase => "PermitBase",
            Self::PermitPerSeat => "PermitPerSeat",
            Self::PermitPerWeight => "PermitPerWeight",
            Self::PermitAdjustment => "PermitAdjustment",
            Self::LatePaymentInterest => "LatePaymentInterest",
        };
        write!(f, "{name}")
    }
}

/// Configured fee rate record.
///
/// Owned by the rate catalog; the core only reads these during lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeRate {
    pub category: FeeCategory,
    pub operation_type: Option<OperationType>,
    /// ICAO airport code; `None` means the rate applies at every airport
    pub airport: Option<String>,
    pub mtow_tier: Option<MtowTier>,
    pub rate: Decimal,
    pub currency: Currency,
    /// When set, the rate applies per billing unit (per 1,000 lbs,
    /// per passenger, per gallon, per hour) rather than flat
    pub per_unit: bool,
    pub minimum_fee: Option<Decimal>,
    pub effective_from: NaiveDate,
    pub effective_to: Option<NaiveDate>,
    pub is_active: bool,
}

impl FeeRate {
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        if !self.is_active || self.effective_from > date {
            return false;
        }
        match self.effective_to {
            Some(to) => to >= date,
            None => true,
        }
    }

    fn matches_tier(&self, tier: Option<MtowTier>) -> bool {
        match (self.mtow_tier, tier) {
            (None, _) => true,
            (Some(own), Some(wanted)) => own == wanted,
            (Some(_), None) => false,
        }
    }

    fn matches_airport(&self, airport: Option<&str>) -> bool {
        match (self.airport.as_deref(), airport) {
            (None, _) => true,
            (Some(own), Some(wanted)) => own == wanted,
            (Some(_), None) => false,
        }
    }

    fn matches_operation(&self, operation_type: Option<OperationType>) -> bool {
        match (self.operation_type, operation_type) {
            (None, _) => true,
            (Some(own), Some(wanted)) => own == wanted,
            (Some(_), None) => false,
        }
    }

    pub fn matches(
        &self,
        category: FeeCategory,
        operation_type: Option<OperationType>,
        airport: Option<&str>,
        tier: Option<MtowTier>,
        date: NaiveDate,
    ) -> bool {
        self.category == category
            && self.is_effective_on(date)
            && self.matches_operation(operation_type)
            && self.matches_airport(airport)
            && self.matches_tier(tier)
    }
}

/// Specificity ordering for rate lookup, applied as one explicit
/// comparator so precedence never depends on insertion order:
/// tier-specific beats tier-agnostic, then airport-specific beats
/// general, then the most recent `effective_from` wins.
pub fn specificity_order(a: &FeeRate, b: &FeeRate) -> std::cmp::Ordering {
    a.mtow_tier
        .is_some()
        .cmp(&b.mtow_tier.is_some())
        .then(a.airport.is_some().cmp(&b.airport.is_some()))
        .then(a.effective_from.cmp(&b.effective_from))
}

/// Pick the winning record among matching candidates; `None` when empty.
pub fn select_best<'a>(candidates: &'a [FeeRate]) -> Option<&'a FeeRate> {
    candidates.iter().max_by(|a, b| specificity_order(a, b))
}

// ── Tests ──────────────────────────────────────────────────────
