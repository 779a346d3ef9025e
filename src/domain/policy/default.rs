//! Hardcoded default fee policies
//!
//! These constants are the single authority for the schedule of charges;
//! configured rate records may override individual rates but never the
//! unit descriptions or the schedule's structure.

use rust_decimal::Decimal;

use super::{AirportFeePolicy, PermitFeePolicy};
use crate::domain::money::Currency;
use crate::domain::policy::model::{ApplicationType, OperationType};
use crate::domain::weight::MtowTier;

const fn dec(num: i64, scale: u32) -> Decimal {
    Decimal::from_parts(num as u32, 0, 0, false, scale)
}

/// Default permit fee schedule
#[derive(Debug, Clone)]
pub struct DefaultPermitFeePolicy {
    currency: Currency,
}

impl DefaultPermitFeePolicy {
    pub fn new(currency: Currency) -> Self {
        Self { currency }
    }
}

impl Default for DefaultPermitFeePolicy {
    fn default() -> Self {
        Self::new(Currency::Usd)
    }
}

impl PermitFeePolicy for DefaultPermitFeePolicy {
    fn currency(&self) -> Currency {
        self.currency
    }

    /// 150.00 flat
    fn base_fee(&self) -> Decimal {
        dec(15000, 2)
    }

    /// 10.00 per seat
    fn per_seat_rate(&self) -> Decimal {
        dec(1000, 2)
    }

    /// 0.02 per kilogram of MTOW
    fn per_kg_rate(&self) -> Decimal {
        dec(2, 2)
    }

    fn type_multiplier(&self, application_type: ApplicationType) -> Decimal {
        match application_type {
            ApplicationType::OneTime => Decimal::ONE,
            ApplicationType::Blanket => dec(25, 1),
            ApplicationType::Seasonal => dec(15, 1),
            ApplicationType::Amendment => dec(5, 1),
        }
    }
}

/// Default airport operational fee schedule
#[derive(Debug, Clone)]
pub struct DefaultAirportFeePolicy {
    currency: Currency,
}

impl DefaultAirportFeePolicy {
    pub fn new(currency: Currency) -> Self {
        Self { currency }
    }
}

impl Default for DefaultAirportFeePolicy {
    fn default() -> Self {
        Self::new(Currency::Usd)
    }
}

impl AirportFeePolicy for DefaultAirportFeePolicy {
    fn currency(&self) -> Currency {
        self.currency
    }

    /// Rate per 1,000 lbs of MTOW. Exempt operation types rate at zero.
    fn landing_rate(&self, operation_type: OperationType, tier: MtowTier) -> Decimal {
        if operation_type.is_landing_exempt() {
            return Decimal::ZERO;
        }
        let cents = match (operation_type, tier) {
            (OperationType::GeneralAviation, MtowTier::Tier1) => 500,
            (OperationType::GeneralAviation, MtowTier::Tier2) => 650,
            (OperationType::GeneralAviation, MtowTier::Tier3) => 800,
            (OperationType::GeneralAviation, MtowTier::Tier4) => 1000,
            (OperationType::Training, MtowTier::Tier1) => 250,
            (OperationType::Training, MtowTier::Tier2) => 350,
            (OperationType::Training, MtowTier::Tier3) => 450,
            (OperationType::Training, MtowTier::Tier4) => 600,
            (OperationType::Commercial, MtowTier::Tier1) => 800,
            (OperationType::Commercial, MtowTier::Tier2) => 1200,
            (OperationType::Commercial, MtowTier::Tier3) => 1600,
            (OperationType::Commercial, MtowTier::Tier4) => 2000,
            (OperationType::Cargo, MtowTier::Tier1) => 900,
            (OperationType::Cargo, MtowTier::Tier2) => 1350,
            (OperationType::Cargo, MtowTier::Tier3) => 1800,
            (OperationType::Cargo, MtowTier::Tier4) => 2250,
            _ => 0,
        };
        Decimal::new(cents, 2)
    }

    fn landing_minimum(&self, operation_type: OperationType) -> Decimal {
        let cents = match operation_type {
            OperationType::GeneralAviation => 2000,
            OperationType::Training => 1000,
            OperationType::Commercial | OperationType::Cargo => 5000,
            _ => 0,
        };
        Decimal::new(cents, 2)
    }

    fn navigation_rate(&self, tier: MtowTier) -> Decimal {
        let cents = match tier {
            MtowTier::Tier1 => 500,
            MtowTier::Tier2 => 1500,
            MtowTier::Tier3 => 3000,
            MtowTier::Tier4 => 5000,
        };
        Decimal::new(cents, 2)
    }

    /// 3.50 per passenger
    fn security_charge(&self) -> Decimal {
        dec(350, 2)
    }

    /// 2.00 per departing passenger
    fn baggage_screening_fee(&self) -> Decimal {
        dec(200, 2)
    }

    /// Per-passenger development fee at the named airport
    fn airport_development_rate(&self, airport: &str) -> Decimal {
        let cents = match airport {
            "NFTF" => 1500,
            "NFTV" | "NFHA" => 1000,
            _ => 1000,
        };
        Decimal::new(cents, 2)
    }

    /// Reduced flat per-passenger rate for interisland flights
    fn interisland_development_rate(&self) -> Decimal {
        dec(500, 2)
    }

    /// Parking charges 20% of the landing fee per 8-hour block
    fn parking_fee_percentage(&self) -> Decimal {
        dec(20, 2)
    }

    fn fire_upgrade_fee(&self) -> Decimal {
        dec(15000, 2)
    }

    fn flight_plan_fee(&self) -> Decimal {
        dec(2500, 2)
    }

    /// 0.05 per gallon
    fn fuel_flow_rate(&self) -> Decimal {
        dec(5, 2)
    }

    /// 50.00 per lighting hour
    fn lighting_rate(&self) -> Decimal {
        dec(5000, 2)
    }

    /// 1.5% per month on overdue balances
    fn late_payment_monthly_rate(&self) -> Decimal {
        dec(15, 3)
    }

    /// Extended-operations band by scheduled arrival hour:
    /// early 04:00–06:00, late 22:00–24:00, very late 00:00–02:00.
    fn extended_operations_fee(&self, arrival_hour: u32) -> Decimal {
        let cents = match arrival_hour {
            4..=5 => 10000,
            22..=23 => 15000,
            0..=1 => 20000,
            _ => 0,
        };
        Decimal::new(cents, 2)
    }
}

// ── Tests ──────────────────────────────────────────────────────
