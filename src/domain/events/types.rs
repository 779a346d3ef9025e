//! Invoice lifecycle events
//!
//! Raised by the invoice aggregate and consumed by the operator account
//! ledger and downstream notification/audit sinks. Events are collected
//! on the aggregate and drained after a successful save (outbox style).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::money::Currency;

/// Invoice domain events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum InvoiceEvent {
    InvoiceCreated(InvoiceCreatedEvent),
    InvoiceFinalized(InvoiceFinalizedEvent),
    PaymentReceived(PaymentReceivedEvent),
    InvoicePaidInFull(InvoicePaidInFullEvent),
    InvoiceOverdue(InvoiceOverdueEvent),
    OverdueCleared(OverdueClearedEvent),
    InterestCharged(InterestChargedEvent),
    InvoiceCancelled(InvoiceCancelledEvent),
}

impl InvoiceEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::InvoiceCreated(_) => "invoice_created",
            Self::InvoiceFinalized(_) => "invoice_finalized",
            Self::PaymentReceived(_) => "payment_received",
            Self::InvoicePaidInFull(_) => "invoice_paid_in_full",
            Self::InvoiceOverdue(_) => "invoice_overdue",
            Self::OverdueCleared(_) => "overdue_cleared",
            Self::InterestCharged(_) => "interest_charged",
            Self::InvoiceCancelled(_) => "invoice_cancelled",
        }
    }

    pub fn operator_id(&self) -> &str {
        match self {
            Self::InvoiceCreated(e) => &e.operator_id,
            Self::InvoiceFinalized(e) => &e.operator_id,
            Self::PaymentReceived(e) => &e.operator_id,
            Self::InvoicePaidInFull(e) => &e.operator_id,
            Self::InvoiceOverdue(e) => &e.operator_id,
            Self::OverdueCleared(e) => &e.operator_id,
            Self::InterestCharged(e) => &e.operator_id,
            Self::InvoiceCancelled(e) => &e.operator_id,
        }
    }

    pub fn invoice_id(&self) -> Uuid {
        match self {
            Self::InvoiceCreated(e) => e.invoice_id,
            Self::InvoiceFinalized(e) => e.invoice_id,
            Self::PaymentReceived(e) => e.invoice_id,
            Self::InvoicePaidInFull(e) => e.invoice_id,
            Self::InvoiceOverdue(e) => e.invoice_id,
            Self::OverdueCleared(e) => e.invoice_id,
            Self::InterestCharged(e) => e.invoice_id,
            Self::InvoiceCancelled(e) => e.invoice_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceCreatedEvent {
    pub invoice_id: Uuid,
    pub operator_id: String,
    pub invoice_number: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceFinalizedEvent {
    pub invoice_id: Uuid,
    pub operator_id: String,
    pub total_amount: Decimal,
    pub currency: Currency,
    pub finalized_by: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceivedEvent {
    pub invoice_id: Uuid,
    pub operator_id: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub method: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicePaidInFullEvent {
    pub invoice_id: Uuid,
    pub operator_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceOverdueEvent {
    pub invoice_id: Uuid,
    pub operator_id: String,
    /// Balance due at the moment the invoice went overdue
    pub amount: Decimal,
    pub currency: Currency,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverdueClearedEvent {
    pub invoice_id: Uuid,
    pub operator_id: String,
    /// Overdue amount being released from the ledger, including any
    /// interest added while the invoice was overdue
    pub amount: Decimal,
    pub currency: Currency,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestChargedEvent {
    pub invoice_id: Uuid,
    pub operator_id: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceCancelledEvent {
    pub invoice_id: Uuid,
    pub operator_id: String,
    pub total_amount: Decimal,
    pub currency: Currency,
    /// The ledger only reverses totals for invoices it has seen
    pub was_finalized: bool,
    pub cancelled_by: String,
    pub reason: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Wrapper carrying delivery metadata.
///
/// The id doubles as the idempotency key: the ledger records processed
/// ids and skips replays under at-least-once delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: InvoiceEvent,
}

impl EventMessage {
    pub fn new(event: InvoiceEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
