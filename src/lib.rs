//! # CAA Revenue Service
//!
//! Regulatory fee calculation, invoicing and operator debt ledger for a
//! civil aviation authority.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, fee policies and calculators
//! - **application**: Billing, ledger and eligibility services
//! - **infrastructure**: Persistence (storage trait + in-memory impl)
//! - **shared**: Error types used across layers

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use config::BillingConfig;

// Re-export the service layer for easy access
pub use application::{BillingService, EligibilityService, LedgerService};

// Re-export core domain types
pub use domain::{
    AirportFeeCalculator, AirportFeeRequest, Currency, FeeBreakdown, Invoice, InvoiceStatus,
    Money, MtowTier, OperatorAccountBalance, PermitFeeCalculator, RevenueEngine,
    UnifiedFeeQuote, UnifiedFeeRequest, Weight,
};

pub use infrastructure::{InMemoryStorage, Storage};
pub use shared::{DomainError, DomainResult};
