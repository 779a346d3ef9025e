//! Invoice aggregate
//!
//! A billable document with line items, payments and a fixed state
//! machine. Totals are always recomputed from the full line-item and
//! payment lists after every mutation; the lists are the single source
//! of truth. Each mutation either fully applies or fails, and pushes its
//! domain events onto a pending list drained by the persistence layer.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::events::{
    InterestChargedEvent, InvoiceCancelledEvent, InvoiceCreatedEvent, InvoiceEvent,
    InvoiceFinalizedEvent, InvoiceOverdueEvent, InvoicePaidInFullEvent, OverdueClearedEvent,
    PaymentReceivedEvent,
};
use crate::domain::money::{Currency, Money};
use crate::domain::policy::FeeCategory;
use crate::shared::errors::{DomainError, DomainResult};

/// Invoice status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Draft,
    Pending,
    PartiallyPaid,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Pending => "Pending",
            Self::PartiallyPaid => "PartiallyPaid",
            Self::Paid => "Paid",
            Self::Overdue => "Overdue",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    Card,
    Cheque,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cash => write!(f, "Cash"),
            Self::BankTransfer => write!(f, "BankTransfer"),
            Self::Card => write!(f, "Card"),
            Self::Cheque => write!(f, "Cheque"),
        }
    }
}

/// Payment status; `Refunded` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Completed,
    Refunded,
}

/// One recorded payment. Never mutated after creation except the
/// terminal refund transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub amount: Money,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub transaction_reference: Option<String>,
    pub receipt_number: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl Payment {
    fn new(amount: Money, method: PaymentMethod, transaction_reference: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            method,
            status: PaymentStatus::Completed,
            transaction_reference,
            receipt_number: None,
            received_at: Utc::now(),
        }
    }

    pub fn refund(&mut self) -> DomainResult<()> {
        if self.status == PaymentStatus::Refunded {
            return Err(DomainError::InvalidState {
                action: "refund payment",
                reason: "payment is already refunded".into(),
            });
        }
        self.status = PaymentStatus::Refunded;
        Ok(())
    }
}

/// One priced component of an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    pub id: Uuid,
    pub category: FeeCategory,
    pub description: String,
    pub quantity: Decimal,
    pub unit_rate: Decimal,
    /// quantity x unit_rate, except interest lines which carry a fixed
    /// amount
    pub amount: Decimal,
    pub is_interest_charge: bool,
    pub display_order: u32,
}

impl InvoiceLineItem {
    fn charge(
        category: FeeCategory,
        description: String,
        quantity: Decimal,
        unit_rate: Decimal,
        display_order: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            description,
            quantity,
            unit_rate,
            amount: (quantity * unit_rate).round_dp(2),
            is_interest_charge: false,
            display_order,
        }
    }

    fn interest(description: String, amount: Decimal, display_order: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: FeeCategory::LatePaymentInterest,
            description,
            quantity: Decimal::ONE,
            unit_rate: amount,
            amount,
            is_interest_charge: true,
            display_order,
        }
    }
}

/// Invoice aggregate root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub invoice_number: String,
    pub operator_id: String,
    pub currency: Currency,
    pub status: InvoiceStatus,
    pub line_items: Vec<InvoiceLineItem>,
    pub payments: Vec<Payment>,
    pub subtotal: Decimal,
    pub total_interest: Decimal,
    pub total_amount: Decimal,
    pub amount_paid: Decimal,
    pub balance_due: Decimal,
    pub issued_at: DateTime<Utc>,
    pub due_date: NaiveDate,
    pub finalized_at: Option<DateTime<Utc>>,
    pub finalized_by: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancelled_by: Option<String>,
    pub cancellation_reason: Option<String>,
    /// Amount the ledger is carrying as overdue for this invoice; grows
    /// with interest charges and is released via the overdue-cleared
    /// event when the invoice is paid off
    overdue_amount: Decimal,
    #[serde(skip)]
    pending_events: Vec<InvoiceEvent>,
}

impl Invoice {
    pub fn new(
        operator_id: impl Into<String>,
        invoice_number: impl Into<String>,
        currency: Currency,
        due_date: NaiveDate,
    ) -> DomainResult<Self> {
        let operator_id = operator_id.into();
        let invoice_number = invoice_number.into();
        if operator_id.trim().is_empty() {
            return Err(DomainError::Validation("operator id is required".into()));
        }
        if invoice_number.trim().is_empty() {
            return Err(DomainError::Validation("invoice number is required".into()));
        }

        let mut invoice = Self {
            id: Uuid::new_v4(),
            invoice_number: invoice_number.clone(),
            operator_id: operator_id.clone(),
            currency,
            status: InvoiceStatus::Draft,
            line_items: Vec::new(),
            payments: Vec::new(),
            subtotal: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            amount_paid: Decimal::ZERO,
            balance_due: Decimal::ZERO,
            issued_at: Utc::now(),
            due_date,
            finalized_at: None,
            finalized_by: None,
            cancelled_at: None,
            cancelled_by: None,
            cancellation_reason: None,
            overdue_amount: Decimal::ZERO,
            pending_events: Vec::new(),
        };
        invoice
            .pending_events
            .push(InvoiceEvent::InvoiceCreated(InvoiceCreatedEvent {
                invoice_id: invoice.id,
                operator_id,
                invoice_number,
                timestamp: invoice.issued_at,
            }));
        Ok(invoice)
    }

    /// Drain collected domain events; called by the persistence layer
    /// after a successful save.
    pub fn take_events(&mut self) -> Vec<InvoiceEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn pending_event_count(&self) -> usize {
        self.pending_events.len()
    }

    // ── Derived fields ─────────────────────────────────────────

    pub fn is_past_due_on(&self, today: NaiveDate) -> bool {
        today > self.due_date
            && !matches!(self.status, InvoiceStatus::Paid | InvoiceStatus::Cancelled)
    }

    pub fn is_past_due(&self) -> bool {
        self.is_past_due_on(Utc::now().date_naive())
    }

    pub fn days_overdue_on(&self, today: NaiveDate) -> i64 {
        if self.is_past_due_on(today) {
            (today - self.due_date).num_days()
        } else {
            0
        }
    }

    pub fn days_overdue(&self) -> i64 {
        self.days_overdue_on(Utc::now().date_naive())
    }

    pub fn balance_due_money(&self) -> DomainResult<Money> {
        Money::new(self.balance_due, self.currency)
    }

    pub fn total_amount_money(&self) -> DomainResult<Money> {
        Money::new(self.total_amount, self.currency)
    }

    fn was_finalized(&self) -> bool {
        self.finalized_at.is_some()
    }

    // ── Recompute ──────────────────────────────────────────────

    /// Full recomputation from the line-item and payment lists. No
    /// incremental counters anywhere.
    fn recompute_totals(&mut self) {
        self.subtotal = self
            .line_items
            .iter()
            .filter(|l| !l.is_interest_charge)
            .map(|l| l.amount)
            .sum::<Decimal>()
            .round_dp(2);
        self.total_interest = self
            .line_items
            .iter()
            .filter(|l| l.is_interest_charge)
            .map(|l| l.amount)
            .sum::<Decimal>()
            .round_dp(2);
        self.total_amount = (self.subtotal + self.total_interest).round_dp(2);
        self.amount_paid = self
            .payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Completed)
            .map(|p| p.amount.amount())
            .sum::<Decimal>()
            .round_dp(2);
        self.balance_due = (self.total_amount - self.amount_paid).round_dp(2);
    }

    // ── Transitions ────────────────────────────────────────────

    pub fn add_line_item(
        &mut self,
        category: FeeCategory,
        description: impl Into<String>,
        quantity: Decimal,
        unit_rate: Decimal,
    ) -> DomainResult<Uuid> {
        if self.status != InvoiceStatus::Draft {
            return Err(DomainError::InvalidState {
                action: "add line item",
                reason: format!("invoice is {}", self.status),
            });
        }
        if quantity < Decimal::ZERO {
            return Err(DomainError::Validation(format!(
                "line item quantity cannot be negative: {quantity}"
            )));
        }
        let description = description.into();
        if description.trim().is_empty() {
            return Err(DomainError::Validation(
                "line item description is required".into(),
            ));
        }

        let order = self.line_items.len() as u32;
        let line = InvoiceLineItem::charge(category, description, quantity, unit_rate, order);
        let id = line.id;
        self.line_items.push(line);
        self.recompute_totals();
        Ok(id)
    }

    pub fn remove_line_item(&mut self, line_id: Uuid) -> DomainResult<()> {
        if self.status != InvoiceStatus::Draft {
            return Err(DomainError::InvalidState {
                action: "remove line item",
                reason: format!("invoice is {}", self.status),
            });
        }
        let position = self
            .line_items
            .iter()
            .position(|l| l.id == line_id)
            .ok_or_else(|| DomainError::NotFound {
                entity: "InvoiceLineItem",
                field: "id",
                value: line_id.to_string(),
            })?;
        self.line_items.remove(position);
        self.recompute_totals();
        Ok(())
    }

    /// The only way a line amount may be superseded after creation.
    pub fn update_line_item_amount(&mut self, line_id: Uuid, amount: Decimal) -> DomainResult<()> {
        if self.status != InvoiceStatus::Draft {
            return Err(DomainError::InvalidState {
                action: "update line item",
                reason: format!("invoice is {}", self.status),
            });
        }
        if amount < Decimal::ZERO {
            return Err(DomainError::Validation(format!(
                "line item amount cannot be negative: {amount}"
            )));
        }
        let line = self
            .line_items
            .iter_mut()
            .find(|l| l.id == line_id)
            .ok_or_else(|| DomainError::NotFound {
                entity: "InvoiceLineItem",
                field: "id",
                value: line_id.to_string(),
            })?;
        line.amount = amount.round_dp(2);
        self.recompute_totals();
        Ok(())
    }

    pub fn finalize(&mut self, by: impl Into<String>) -> DomainResult<()> {
        if self.status != InvoiceStatus::Draft {
            return Err(DomainError::InvalidState {
                action: "finalize invoice",
                reason: format!("invoice is {}", self.status),
            });
        }
        if self.line_items.is_empty() {
            return Err(DomainError::InvalidState {
                action: "finalize invoice",
                reason: "invoice has no line items".into(),
            });
        }

        let by = by.into();
        let now = Utc::now();
        self.status = InvoiceStatus::Pending;
        self.finalized_at = Some(now);
        self.finalized_by = Some(by.clone());
        self.pending_events
            .push(InvoiceEvent::InvoiceFinalized(InvoiceFinalizedEvent {
                invoice_id: self.id,
                operator_id: self.operator_id.clone(),
                total_amount: self.total_amount,
                currency: self.currency,
                finalized_by: by,
                timestamp: now,
            }));
        Ok(())
    }

    pub fn record_payment(
        &mut self,
        amount: Money,
        method: PaymentMethod,
        transaction_reference: Option<String>,
    ) -> DomainResult<Uuid> {
        match self.status {
            InvoiceStatus::Pending | InvoiceStatus::PartiallyPaid | InvoiceStatus::Overdue => {}
            other => {
                return Err(DomainError::InvalidState {
                    action: "record payment",
                    reason: format!("invoice is {other}"),
                })
            }
        }
        if amount.currency() != self.currency {
            return Err(DomainError::CurrencyMismatch {
                left: self.currency,
                right: amount.currency(),
            });
        }
        if amount.is_zero() {
            return Err(DomainError::Validation(
                "payment amount must be positive".into(),
            ));
        }
        if amount.amount() > self.balance_due {
            return Err(DomainError::InvalidState {
                action: "record payment",
                reason: format!(
                    "payment {} exceeds balance due {}",
                    amount.amount(),
                    self.balance_due
                ),
            });
        }

        let payment = Payment::new(amount, method, transaction_reference);
        let payment_id = payment.id;
        let now = payment.received_at;
        self.payments.push(payment);
        self.recompute_totals();

        self.pending_events
            .push(InvoiceEvent::PaymentReceived(PaymentReceivedEvent {
                invoice_id: self.id,
                operator_id: self.operator_id.clone(),
                amount: amount.amount(),
                currency: self.currency,
                method: method.to_string(),
                timestamp: now,
            }));

        if self.balance_due.is_zero() {
            self.status = InvoiceStatus::Paid;
            self.pending_events
                .push(InvoiceEvent::InvoicePaidInFull(InvoicePaidInFullEvent {
                    invoice_id: self.id,
                    operator_id: self.operator_id.clone(),
                    timestamp: now,
                }));
            // A nonzero overdue amount means the invoice went overdue at
            // some point, even if partial payments moved it back to
            // PartiallyPaid since; the ledger is still carrying it.
            if self.overdue_amount > Decimal::ZERO {
                self.pending_events
                    .push(InvoiceEvent::OverdueCleared(OverdueClearedEvent {
                        invoice_id: self.id,
                        operator_id: self.operator_id.clone(),
                        amount: self.overdue_amount,
                        currency: self.currency,
                        timestamp: now,
                    }));
                self.overdue_amount = Decimal::ZERO;
            }
        } else {
            self.status = InvoiceStatus::PartiallyPaid;
        }
        Ok(payment_id)
    }

    pub fn mark_overdue(&mut self) -> DomainResult<()> {
        match self.status {
            InvoiceStatus::Pending | InvoiceStatus::PartiallyPaid => {}
            other => {
                return Err(DomainError::InvalidState {
                    action: "mark overdue",
                    reason: format!("invoice is {other}"),
                })
            }
        }
        if !self.is_past_due() {
            return Err(DomainError::InvalidState {
                action: "mark overdue",
                reason: format!("due date {} has not passed", self.due_date),
            });
        }

        let now = Utc::now();
        // Re-marking a previously overdue invoice: release the amount
        // the ledger is still carrying before reporting the new one, so
        // the invoice never counts twice.
        if self.overdue_amount > Decimal::ZERO {
            self.pending_events
                .push(InvoiceEvent::OverdueCleared(OverdueClearedEvent {
                    invoice_id: self.id,
                    operator_id: self.operator_id.clone(),
                    amount: self.overdue_amount,
                    currency: self.currency,
                    timestamp: now,
                }));
        }
        self.status = InvoiceStatus::Overdue;
        self.overdue_amount = self.balance_due;
        self.pending_events
            .push(InvoiceEvent::InvoiceOverdue(InvoiceOverdueEvent {
                invoice_id: self.id,
                operator_id: self.operator_id.clone(),
                amount: self.balance_due,
                currency: self.currency,
                timestamp: now,
            }));
        Ok(())
    }

    pub fn add_interest_charge(
        &mut self,
        amount: Decimal,
        description: impl Into<String>,
    ) -> DomainResult<()> {
        if self.status != InvoiceStatus::Overdue {
            return Err(DomainError::InvalidState {
                action: "add interest charge",
                reason: format!("invoice is {}", self.status),
            });
        }
        if amount <= Decimal::ZERO {
            return Err(DomainError::Validation(format!(
                "interest amount must be positive: {amount}"
            )));
        }

        let description = description.into();
        let order = self.line_items.len() as u32;
        self.line_items.push(InvoiceLineItem::interest(
            description.clone(),
            amount.round_dp(2),
            order,
        ));
        self.recompute_totals();
        self.overdue_amount += amount.round_dp(2);
        self.pending_events
            .push(InvoiceEvent::InterestCharged(InterestChargedEvent {
                invoice_id: self.id,
                operator_id: self.operator_id.clone(),
                amount: amount.round_dp(2),
                currency: self.currency,
                description,
                timestamp: Utc::now(),
            }));
        Ok(())
    }

    pub fn cancel(&mut self, by: impl Into<String>, reason: Option<String>) -> DomainResult<()> {
        match self.status {
            InvoiceStatus::Paid => {
                return Err(DomainError::InvalidState {
                    action: "cancel invoice",
                    reason: "invoice is already paid".into(),
                })
            }
            InvoiceStatus::Cancelled => {
                return Err(DomainError::InvalidState {
                    action: "cancel invoice",
                    reason: "invoice is already cancelled".into(),
                })
            }
            _ => {}
        }

        let by = by.into();
        let now = Utc::now();
        // Cancelling an invoice the ledger counts as overdue must also
        // release that debt, or the operator stays ineligible forever.
        if self.overdue_amount > Decimal::ZERO {
            self.pending_events
                .push(InvoiceEvent::OverdueCleared(OverdueClearedEvent {
                    invoice_id: self.id,
                    operator_id: self.operator_id.clone(),
                    amount: self.overdue_amount,
                    currency: self.currency,
                    timestamp: now,
                }));
            self.overdue_amount = Decimal::ZERO;
        }
        self.status = InvoiceStatus::Cancelled;
        self.cancelled_at = Some(now);
        self.cancelled_by = Some(by.clone());
        self.cancellation_reason = reason.clone();
        self.pending_events
            .push(InvoiceEvent::InvoiceCancelled(InvoiceCancelledEvent {
                invoice_id: self.id,
                operator_id: self.operator_id.clone(),
                total_amount: self.total_amount,
                currency: self.currency,
                was_finalized: self.was_finalized(),
                cancelled_by: by,
                reason,
                timestamp: now,
            }));
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
