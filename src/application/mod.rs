//! Application layer - use cases orchestrating the domain

pub mod services;

pub use services::{BillingService, EligibilityService, LedgerService};
