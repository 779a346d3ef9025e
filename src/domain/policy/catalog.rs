//! Rate catalog lookup interface

use chrono::NaiveDate;

use super::model::{FeeCategory, FeeRate, OperationType};
use crate::domain::weight::MtowTier;

/// External rate catalog collaborator.
///
/// Implementations return candidate records for a lookup key; the
/// configured policies apply the specificity tie-break themselves, so a
/// catalog is free to over-return loosely matching records.
pub trait RateCatalog: Send + Sync {
    fn candidate_rates(
        &self,
        category: FeeCategory,
        operation_type: Option<OperationType>,
        airport: Option<&str>,
        tier: Option<MtowTier>,
        on: NaiveDate,
    ) -> Vec<FeeRate>;
}

/// Fixed in-memory catalog, used in tests and as the seed catalog for the
/// in-memory storage.
#[derive(Debug, Default, Clone)]
pub struct StaticRateCatalog {
    rates: Vec<FeeRate>,
}

impl StaticRateCatalog {
    pub fn new(rates: Vec<FeeRate>) -> Self {
        Self { rates }
    }

    pub fn push(&mut self, rate: FeeRate) {
        self.rates.push(rate);
    }
}

impl RateCatalog for StaticRateCatalog {
    fn candidate_rates(
        &self,
        category: FeeCategory,
        operation_type: Option<OperationType>,
        airport: Option<&str>,
        tier: Option<MtowTier>,
        on: NaiveDate,
    ) -> Vec<FeeRate> {
        self.rates
            .iter()
            .filter(|r| r.matches(category, operation_type, airport, tier, on))
            .cloned()
            .collect()
    }
}
