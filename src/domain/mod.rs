pub mod account;
pub mod events;
pub mod fees;
pub mod invoice;
pub mod money;
pub mod operating_window;
pub mod policy;
pub mod revenue;
pub mod weight;

// Re-export commonly used types
pub use account::OperatorAccountBalance;
pub use events::{EventMessage, InvoiceEvent};
pub use fees::{AirportFeeCalculator, AirportFeeRequest, FeeBreakdown, FeeLine, PermitFeeCalculator};
pub use invoice::{Invoice, InvoiceLineItem, InvoiceStatus, Payment, PaymentMethod, PaymentStatus};
pub use money::{Currency, Money};
pub use operating_window::OperatingWindow;
pub use policy::{
    AirportFeePolicy, ApplicationType, FeeCategory, FeeRate, OperationType, PermitFeePolicy,
    RateCatalog,
};
pub use revenue::{EligibilityResult, RevenueEngine, UnifiedFeeQuote, UnifiedFeeRequest};
pub use weight::{MtowTier, Weight, WeightUnit};
