//! Application services

mod billing;
mod eligibility;
mod ledger;

pub use billing::BillingService;
pub use eligibility::EligibilityService;
pub use ledger::LedgerService;
