//! Operator account balance ledger
//!
//! Per-operator running totals maintained purely by reacting to invoice
//! lifecycle events. The ledger never reads invoice internals directly;
//! `recalculate` exists for drift correction against the authoritative
//! invoice list.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::events::{
    InterestChargedEvent, InvoiceCancelledEvent, InvoiceFinalizedEvent, InvoiceOverdueEvent,
    InvoicePaidInFullEvent, OverdueClearedEvent, PaymentReceivedEvent,
};
use crate::domain::invoice::{Invoice, InvoiceStatus};
use crate::domain::money::Currency;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorAccountBalance {
    pub operator_id: String,
    pub currency: Currency,
    pub total_invoiced: Decimal,
    pub total_paid: Decimal,
    pub total_interest: Decimal,
    pub total_overdue: Decimal,
    pub current_balance: Decimal,
    pub invoice_count: u32,
    pub paid_invoice_count: u32,
    pub overdue_invoice_count: u32,
    pub updated_at: DateTime<Utc>,
}

impl OperatorAccountBalance {
    pub fn new(operator_id: impl Into<String>, currency: Currency) -> Self {
        Self {
            operator_id: operator_id.into(),
            currency,
            total_invoiced: Decimal::ZERO,
            total_paid: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            total_overdue: Decimal::ZERO,
            current_balance: Decimal::ZERO,
            invoice_count: 0,
            paid_invoice_count: 0,
            overdue_invoice_count: 0,
            updated_at: Utc::now(),
        }
    }

    // ── Derived flags ──────────────────────────────────────────

    pub fn has_outstanding_debt(&self) -> bool {
        self.current_balance > Decimal::ZERO
    }

    pub fn has_overdue_debt(&self) -> bool {
        self.total_overdue > Decimal::ZERO
    }

    pub fn eligible_for_permit_issuance(&self) -> bool {
        !self.has_overdue_debt()
    }

    // ── Event handlers ─────────────────────────────────────────

    pub fn on_invoice_finalized(&mut self, event: &InvoiceFinalizedEvent) {
        self.total_invoiced += event.total_amount;
        self.current_balance += event.total_amount;
        self.invoice_count += 1;
        self.touch();
    }

    /// Plain subtraction; a balance going negative here is drift (a
    /// payment the ledger never saw billed) and must stay visible for
    /// `recalculate` to repair rather than be clamped away.
    pub fn on_payment_received(&mut self, event: &PaymentReceivedEvent) {
        self.total_paid += event.amount;
        self.current_balance -= event.amount;
        self.touch();
    }

    pub fn on_invoice_paid_in_full(&mut self, _event: &InvoicePaidInFullEvent) {
        self.paid_invoice_count += 1;
        self.touch();
    }

    pub fn on_invoice_overdue(&mut self, event: &InvoiceOverdueEvent) {
        self.total_overdue += event.amount;
        self.overdue_invoice_count += 1;
        self.touch();
    }

    pub fn on_overdue_cleared(&mut self, event: &OverdueClearedEvent) {
        self.total_overdue = (self.total_overdue - event.amount).max(Decimal::ZERO);
        self.overdue_invoice_count = self.overdue_invoice_count.saturating_sub(1);
        self.touch();
    }

    pub fn on_interest_charged(&mut self, event: &InterestChargedEvent) {
        self.total_interest += event.amount;
        self.current_balance += event.amount;
        self.total_overdue += event.amount;
        self.touch();
    }

    /// The ledger only ever saw finalized invoices, so a draft
    /// cancellation reverses nothing.
    pub fn on_invoice_cancelled(&mut self, event: &InvoiceCancelledEvent) {
        if !event.was_finalized {
            return;
        }
        self.total_invoiced = (self.total_invoiced - event.total_amount).max(Decimal::ZERO);
        self.current_balance = (self.current_balance - event.total_amount).max(Decimal::ZERO);
        self.invoice_count = self.invoice_count.saturating_sub(1);
        self.touch();
    }

    // ── Reconciliation ─────────────────────────────────────────

    /// Rebuilds every total from the operator's full invoice list.
    /// Cancelled and draft invoices are excluded; the ledger tracks
    /// what was actually billed.
    pub fn recalculate(&mut self, invoices: &[Invoice]) {
        self.total_invoiced = Decimal::ZERO;
        self.total_paid = Decimal::ZERO;
        self.total_interest = Decimal::ZERO;
        self.total_overdue = Decimal::ZERO;
        self.current_balance = Decimal::ZERO;
        self.invoice_count = 0;
        self.paid_invoice_count = 0;
        self.overdue_invoice_count = 0;

        for invoice in invoices {
            if invoice.operator_id != self.operator_id {
                continue;
            }
            match invoice.status {
                InvoiceStatus::Draft | InvoiceStatus::Cancelled => continue,
                _ => {}
            }
            self.total_invoiced += invoice.total_amount;
            self.total_paid += invoice.amount_paid;
            self.total_interest += invoice.total_interest;
            self.current_balance += invoice.balance_due;
            self.invoice_count += 1;
            if invoice.status == InvoiceStatus::Paid {
                self.paid_invoice_count += 1;
            }
            if invoice.status == InvoiceStatus::Overdue {
                self.total_overdue += invoice.balance_due;
                self.overdue_invoice_count += 1;
            }
        }
        self.current_balance = self.current_balance.max(Decimal::ZERO);
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// ── Tests ──────────────────────────────────────────────────────
