//! Unified revenue engine
//!
//! Composes the permit calculator (regulator) and the airport calculator
//! (airport authority) into a single quote, and exposes the eligibility
//! check consulted before permit approval is allowed to proceed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::fees::{AirportFeeCalculator, AirportFeeRequest, FeeLine, PermitFeeCalculator};
use crate::domain::money::{Currency, Money};
use crate::domain::operating_window::OperatingWindow;
use crate::domain::policy::{ApplicationType, OperationType};
use crate::domain::weight::{Weight, WeightUnit};
use crate::shared::errors::DomainResult;

/// Which authority a quote line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeAuthority {
    /// Civil aviation regulator (permit fees)
    Regulator,
    /// Airport operating authority (operational fees)
    Airport,
}

impl std::fmt::Display for FeeAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Regulator => write!(f, "Regulator"),
            Self::Airport => write!(f, "Airport"),
        }
    }
}

/// A fee line tagged with its originating authority
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedFeeLine {
    pub authority: FeeAuthority,
    #[serde(flatten)]
    pub line: FeeLine,
}

/// Combined permit + airport quote for one flight/application context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedFeeQuote {
    pub currency: Currency,
    pub lines: Vec<TaggedFeeLine>,
    pub permit_total: Decimal,
    pub airport_total: Decimal,
    pub grand_total: Decimal,
}

/// Everything the engine needs for one combined quote.
///
/// MTOW is supplied in kilograms and converted to pounds before the
/// airport calculation.
#[derive(Debug, Clone)]
pub struct UnifiedFeeRequest {
    pub application_type: ApplicationType,
    pub seat_count: i64,
    pub mtow_kg: Decimal,
    pub airport: String,
    pub operation_type: OperationType,
    pub passenger_count: u32,
    pub passengers_departing: bool,
    pub parking_hours: u32,
    pub operating_window: Option<OperatingWindow>,
    pub fire_category_upgrade: bool,
    pub flight_plan_filed: bool,
    pub fuel_gallons: Decimal,
    pub interisland: bool,
}

/// Result of the permit-issuance eligibility check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub eligible: bool,
    pub reasons: Vec<String>,
}

impl EligibilityResult {
    pub fn eligible() -> Self {
        Self {
            eligible: true,
            reasons: Vec::new(),
        }
    }
}

pub struct RevenueEngine {
    permit: PermitFeeCalculator,
    airport: AirportFeeCalculator,
}

impl RevenueEngine {
    pub fn new(permit: PermitFeeCalculator, airport: AirportFeeCalculator) -> Self {
        Self { permit, airport }
    }

    pub fn calculate_unified_fee(&self, request: &UnifiedFeeRequest) -> DomainResult<UnifiedFeeQuote> {
        let permit_breakdown = self.permit.calculate(
            request.application_type,
            request.seat_count,
            request.mtow_kg,
        )?;

        let mtow_lbs = Weight::new(request.mtow_kg, WeightUnit::Kilograms)?.in_pounds();
        let airport_request = AirportFeeRequest {
            airport: request.airport.clone(),
            operation_type: request.operation_type,
            mtow_lbs,
            passenger_count: request.passenger_count,
            passengers_departing: request.passengers_departing,
            parking_hours: request.parking_hours,
            operating_window: request.operating_window,
            fire_category_upgrade: request.fire_category_upgrade,
            flight_plan_filed: request.flight_plan_filed,
            fuel_gallons: request.fuel_gallons,
            interisland: request.interisland,
        };
        let airport_breakdown = self.airport.calculate(&airport_request)?;

        let mut lines = Vec::with_capacity(permit_breakdown.lines.len() + airport_breakdown.lines.len());
        lines.extend(permit_breakdown.lines.iter().cloned().map(|line| TaggedFeeLine {
            authority: FeeAuthority::Regulator,
            line,
        }));
        lines.extend(airport_breakdown.lines.iter().cloned().map(|line| TaggedFeeLine {
            authority: FeeAuthority::Airport,
            line,
        }));

        Ok(UnifiedFeeQuote {
            currency: permit_breakdown.currency,
            lines,
            permit_total: permit_breakdown.total,
            airport_total: airport_breakdown.total,
            grand_total: (permit_breakdown.total + airport_breakdown.total).round_dp(2),
        })
    }

    /// Pure gate consulted before permit approval: eligible iff the
    /// operator carries no overdue debt at all.
    pub fn check_permit_issuance_eligibility(
        outstanding_overdue: &Money,
        overdue_invoice_count: u32,
    ) -> EligibilityResult {
        if outstanding_overdue.is_zero() {
            return EligibilityResult::eligible();
        }
        EligibilityResult {
            eligible: false,
            reasons: vec![
                format!("operator has overdue debt of {outstanding_overdue}"),
                format!("{overdue_invoice_count} invoice(s) overdue"),
            ],
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
