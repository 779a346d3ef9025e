//! Fee policy interfaces and implementations
//!
//! Two independent policy families: permit fees (regulator) and airport
//! operational fees (airport authority). Each has a hardcoded default and
//! a configuration-backed implementation resolved by effective date and
//! record specificity.

pub mod catalog;
pub mod configured;
pub mod default;
pub mod model;

use rust_decimal::Decimal;

use crate::domain::money::Currency;
use crate::domain::weight::MtowTier;

pub use catalog::{RateCatalog, StaticRateCatalog};
pub use configured::{ConfiguredAirportFeePolicy, ConfiguredPermitFeePolicy};
pub use default::{DefaultAirportFeePolicy, DefaultPermitFeePolicy};
pub use model::{
    select_best, specificity_order, ApplicationType, FeeCategory, FeeRate, OperationType,
};

/// Regulator's permit fee schedule
pub trait PermitFeePolicy: Send + Sync {
    fn currency(&self) -> Currency;
    fn base_fee(&self) -> Decimal;
    fn per_seat_rate(&self) -> Decimal;
    fn per_kg_rate(&self) -> Decimal;
    fn type_multiplier(&self, application_type: ApplicationType) -> Decimal;
}

/// Airport authority's operational fee schedule
pub trait AirportFeePolicy: Send + Sync {
    fn currency(&self) -> Currency;
    /// Landing rate per 1,000 lbs of MTOW for (operation type, tier)
    fn landing_rate(&self, operation_type: OperationType, tier: MtowTier) -> Decimal;
    fn landing_minimum(&self, operation_type: OperationType) -> Decimal;
    /// Flat navigation rate keyed only by tier
    fn navigation_rate(&self, tier: MtowTier) -> Decimal;
    /// Per passenger
    fn security_charge(&self) -> Decimal;
    /// Per departing passenger
    fn baggage_screening_fee(&self) -> Decimal;
    /// Per passenger at the named airport
    fn airport_development_rate(&self, airport: &str) -> Decimal;
    /// Reduced flat per-passenger rate for interisland flights
    fn interisland_development_rate(&self) -> Decimal;
    /// Fraction of the landing fee charged per 8-hour parking block
    fn parking_fee_percentage(&self) -> Decimal;
    fn fire_upgrade_fee(&self) -> Decimal;
    fn flight_plan_fee(&self) -> Decimal;
    /// Per gallon
    fn fuel_flow_rate(&self) -> Decimal;
    /// Per lighting hour
    fn lighting_rate(&self) -> Decimal;
    /// Monthly interest rate applied to overdue balances
    fn late_payment_monthly_rate(&self) -> Decimal;
    /// Flat fee selected by the scheduled arrival hour band
    fn extended_operations_fee(&self, arrival_hour: u32) -> Decimal;
}
