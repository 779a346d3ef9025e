pub mod types;

pub use types::{
    EventMessage, InterestChargedEvent, InvoiceCancelledEvent, InvoiceCreatedEvent, InvoiceEvent,
    InvoiceFinalizedEvent, InvoiceOverdueEvent, InvoicePaidInFullEvent, OverdueClearedEvent,
    PaymentReceivedEvent,
};
