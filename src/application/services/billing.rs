//! Billing service for issuing and settling invoices

use std::sync::Arc;

use chrono::{Datelike, Duration, Utc};
use tracing::info;
use uuid::Uuid;

use crate::config::BillingConfig;
use crate::domain::fees::late_payment_interest;
use crate::domain::policy::AirportFeePolicy;
use crate::domain::{
    EventMessage, Invoice, InvoiceEvent, InvoiceStatus, Money, PaymentMethod, UnifiedFeeQuote,
};
use crate::infrastructure::Storage;
use crate::shared::{DomainError, DomainResult};

use super::LedgerService;

/// Service for invoice lifecycle operations.
///
/// Every mutation persists the invoice and applies its drained events to
/// the account ledger in the same unit of work.
pub struct BillingService {
    storage: Arc<dyn Storage>,
    ledger: LedgerService,
    policy: Arc<dyn AirportFeePolicy>,
    config: BillingConfig,
}

impl BillingService {
    pub fn new(
        storage: Arc<dyn Storage>,
        policy: Arc<dyn AirportFeePolicy>,
        config: BillingConfig,
    ) -> Self {
        Self {
            ledger: LedgerService::new(storage.clone()),
            storage,
            policy,
            config,
        }
    }

    /// Turn a unified fee quote into a draft invoice, one line per
    /// quoted fee, and finalize it so it starts accruing on the
    /// operator's account.
    pub async fn create_invoice_from_quote(
        &self,
        operator_id: &str,
        quote: &UnifiedFeeQuote,
        finalized_by: &str,
    ) -> DomainResult<Invoice> {
        let sequence = self.storage.next_invoice_sequence().await;
        let invoice_number = format!("INV-{}-{:05}", Utc::now().year(), sequence);
        let due_date = (Utc::now() + Duration::days(self.config.invoice_due_days)).date_naive();

        let mut invoice = Invoice::new(operator_id, invoice_number, quote.currency, due_date)?;
        for tagged in &quote.lines {
            invoice.add_line_item(
                tagged.line.category,
                tagged.line.description.clone(),
                tagged.line.quantity,
                tagged.line.unit_rate,
            )?;
        }
        invoice.finalize(finalized_by)?;

        // Drain before persisting so the stored copy carries no event
        // backlog to be republished on the next mutation.
        let events = invoice.take_events();
        self.storage.save_invoice(invoice.clone()).await?;
        self.apply_events(events).await?;

        info!(
            invoice_number = %invoice.invoice_number,
            operator_id,
            total = %invoice.total_amount,
            currency = %invoice.currency,
            "Invoice issued"
        );
        Ok(invoice)
    }

    pub async fn get_invoice(&self, invoice_id: Uuid) -> DomainResult<Option<Invoice>> {
        self.storage.get_invoice(invoice_id).await
    }

    pub async fn list_invoices_for_operator(
        &self,
        operator_id: &str,
    ) -> DomainResult<Vec<Invoice>> {
        self.storage.list_invoices_for_operator(operator_id).await
    }

    pub async fn record_payment(
        &self,
        invoice_id: Uuid,
        amount: Money,
        method: PaymentMethod,
        transaction_reference: Option<String>,
    ) -> DomainResult<Invoice> {
        let mut invoice = self.load(invoice_id).await?;
        invoice.record_payment(amount, method, transaction_reference)?;
        let events = invoice.take_events();
        self.storage.update_invoice(invoice.clone()).await?;
        self.apply_events(events).await?;

        info!(
            invoice_number = %invoice.invoice_number,
            amount = %amount,
            status = %invoice.status,
            balance_due = %invoice.balance_due,
            "Payment recorded"
        );
        Ok(invoice)
    }

    pub async fn cancel_invoice(
        &self,
        invoice_id: Uuid,
        cancelled_by: &str,
        reason: Option<String>,
    ) -> DomainResult<Invoice> {
        let mut invoice = self.load(invoice_id).await?;
        invoice.cancel(cancelled_by, reason)?;
        let events = invoice.take_events();
        self.storage.update_invoice(invoice.clone()).await?;
        self.apply_events(events).await?;

        info!(invoice_number = %invoice.invoice_number, "Invoice cancelled");
        Ok(invoice)
    }

    /// Move every past-due open invoice to Overdue. Returns how many
    /// invoices were marked.
    pub async fn sweep_overdue(&self) -> DomainResult<u32> {
        let mut marked = 0;
        for mut invoice in self.storage.list_open_invoices().await? {
            let eligible = matches!(
                invoice.status,
                InvoiceStatus::Pending | InvoiceStatus::PartiallyPaid
            );
            if !eligible || !invoice.is_past_due() {
                continue;
            }
            invoice.mark_overdue()?;
            let events = invoice.take_events();
            self.storage.update_invoice(invoice.clone()).await?;
            self.apply_events(events).await?;
            info!(
                invoice_number = %invoice.invoice_number,
                days_overdue = invoice.days_overdue(),
                "Invoice marked overdue"
            );
            marked += 1;
        }
        Ok(marked)
    }

    /// Bring every overdue invoice's interest up to date. Interest is a
    /// linear proration of the monthly rate past the grace period,
    /// charged on the non-interest outstanding principal; each run
    /// charges only the delta since the last run.
    pub async fn accrue_interest(&self) -> DomainResult<u32> {
        let monthly_rate = self.policy.late_payment_monthly_rate();
        let mut charged = 0;
        for mut invoice in self.storage.list_open_invoices().await? {
            if invoice.status != InvoiceStatus::Overdue {
                continue;
            }
            let days = invoice.days_overdue();
            let principal =
                (invoice.balance_due - invoice.total_interest).max(rust_decimal::Decimal::ZERO);
            let target = late_payment_interest(principal, monthly_rate, days);
            let delta = target - invoice.total_interest;
            if delta <= rust_decimal::Decimal::ZERO {
                continue;
            }
            invoice.add_interest_charge(
                delta,
                format!("Late payment interest ({days} days overdue)"),
            )?;
            let events = invoice.take_events();
            self.storage.update_invoice(invoice.clone()).await?;
            self.apply_events(events).await?;
            info!(
                invoice_number = %invoice.invoice_number,
                interest = %delta,
                "Interest charged"
            );
            charged += 1;
        }
        Ok(charged)
    }

    async fn load(&self, invoice_id: Uuid) -> DomainResult<Invoice> {
        self.storage
            .get_invoice(invoice_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Invoice",
                field: "id",
                value: invoice_id.to_string(),
            })
    }

    async fn apply_events(&self, events: Vec<InvoiceEvent>) -> DomainResult<()> {
        for event in events {
            self.ledger.apply(&EventMessage::new(event)).await?;
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
