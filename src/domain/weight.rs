//! Aircraft weight value type and MTOW tier classification

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shared::errors::{DomainError, DomainResult};

/// 1 kg = 2.20462 lbs
const KG_TO_LBS: Decimal = Decimal::from_parts(220462, 0, 0, false, 5);

/// Weight unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightUnit {
    Kilograms,
    Pounds,
}

/// Aircraft weight.
///
/// Equality is computed on the canonical form (kilograms), so
/// 1000 kg == 2204.62 lbs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Weight {
    value: Decimal,
    unit: WeightUnit,
}

impl Weight {
    pub fn new(value: Decimal, unit: WeightUnit) -> DomainResult<Self> {
        if value < Decimal::ZERO {
            return Err(DomainError::Validation(format!(
                "weight cannot be negative: {value}"
            )));
        }
        Ok(Self { value, unit })
    }

    pub fn kilograms(value: Decimal) -> DomainResult<Self> {
        Self::new(value, WeightUnit::Kilograms)
    }

    pub fn pounds(value: Decimal) -> DomainResult<Self> {
        Self::new(value, WeightUnit::Pounds)
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn unit(&self) -> WeightUnit {
        self.unit
    }

    pub fn in_kilograms(&self) -> Decimal {
        match self.unit {
            WeightUnit::Kilograms => self.value,
            WeightUnit::Pounds => self.value / KG_TO_LBS,
        }
    }

    pub fn in_pounds(&self) -> Decimal {
        match self.unit {
            WeightUnit::Kilograms => self.value * KG_TO_LBS,
            WeightUnit::Pounds => self.value,
        }
    }
}

impl PartialEq for Weight {
    fn eq(&self, other: &Self) -> bool {
        // Canonical comparison in kilograms, tolerant of conversion rounding
        self.in_kilograms().round_dp(3) == other.in_kilograms().round_dp(3)
    }
}

/// MTOW regulatory band.
///
/// Derived, never stored: a pure function of weight in pounds with fixed
/// upper bounds of 12,500 / 75,000 / 100,000 lbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MtowTier {
    Tier1,
    Tier2,
    Tier3,
    Tier4,
}

impl MtowTier {
    pub fn from_pounds(mtow_lbs: Decimal) -> DomainResult<Self> {
        if mtow_lbs < Decimal::ZERO {
            return Err(DomainError::Validation(format!(
                "MTOW cannot be negative: {mtow_lbs}"
            )));
        }
        let tier = if mtow_lbs <= Decimal::new(12_500, 0) {
            Self::Tier1
        } else if mtow_lbs <= Decimal::new(75_000, 0) {
            Self::Tier2
        } else if mtow_lbs <= Decimal::new(100_000, 0) {
            Self::Tier3
        } else {
            Self::Tier4
        };
        Ok(tier)
    }

    pub fn from_weight(weight: &Weight) -> DomainResult<Self> {
        Self::from_pounds(weight.in_pounds())
    }
}

impl std::fmt::Display for MtowTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tier1 => write!(f, "Tier1"),
            Self::Tier2 => write!(f, "Tier2"),
            Self::Tier3 => write!(f, "Tier3"),
            Self::Tier4 => write!(f, "Tier4"),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_weight_is_rejected() {
        let err = Weight::kilograms(Decimal::new(-1, 0)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn kg_to_lbs_conversion() {
        let w = Weight::kilograms(Decimal::new(1000, 0)).unwrap();
        assert_eq!(w.in_pounds(), Decimal::new(220462, 2));
    }

    #[test]
    fn equality_uses_canonical_kilograms() {
        let kg = Weight::kilograms(Decimal::new(1000, 0)).unwrap();
        let lbs = Weight::pounds(Decimal::new(220462, 2)).unwrap();
        assert_eq!(kg, lbs);
    }

    #[test]
    fn tier_boundaries() {
        let cases = [
            (12_500, MtowTier::Tier1),
            (12_501, MtowTier::Tier2),
            (75_000, MtowTier::Tier2),
            (75_001, MtowTier::Tier3),
            (100_000, MtowTier::Tier3),
            (100_001, MtowTier::Tier4),
        ];
        for (lbs, expected) in cases {
            let tier = MtowTier::from_pounds(Decimal::new(lbs, 0)).unwrap();
            assert_eq!(tier, expected, "{lbs} lbs");
        }
    }

    #[test]
    fn tier_rejects_negative_weight() {
        let err = MtowTier::from_pounds(Decimal::new(-1, 0)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn tier_from_weight_converts_units() {
        // 45,360 kg ~ 100,000 lbs -> just over, Tier4
        let w = Weight::kilograms(Decimal::new(45_360, 0)).unwrap();
        assert_eq!(MtowTier::from_weight(&w).unwrap(), MtowTier::Tier4);
    }
}
