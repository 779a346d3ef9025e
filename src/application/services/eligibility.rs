//! Permit-issuance eligibility checks

use std::sync::Arc;

use tracing::info;

use crate::domain::{EligibilityResult, Money, RevenueEngine};
use crate::infrastructure::Storage;
use crate::shared::DomainResult;

/// Gate consulted by the permit workflow before approval may proceed.
pub struct EligibilityService {
    storage: Arc<dyn Storage>,
}

impl EligibilityService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// An operator with no account yet has no debt and is eligible.
    pub async fn check_permit_issuance(&self, operator_id: &str) -> DomainResult<EligibilityResult> {
        let result = match self.storage.get_account_balance(operator_id).await? {
            None => EligibilityResult::eligible(),
            Some(account) => {
                let overdue = Money::new(account.total_overdue, account.currency)?;
                RevenueEngine::check_permit_issuance_eligibility(
                    &overdue,
                    account.overdue_invoice_count,
                )
            }
        };
        if !result.eligible {
            info!(operator_id, reasons = ?result.reasons, "Permit issuance blocked");
        }
        Ok(result)
    }
}

// ── Tests ──────────────────────────────────────────────────────
