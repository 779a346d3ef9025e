//! Account ledger projection
//!
//! Applies invoice lifecycle events to per-operator account balances.
//! Delivery is at-least-once, so every message id is recorded before its
//! event is applied and replays are skipped.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{Currency, EventMessage, InvoiceEvent, OperatorAccountBalance};
use crate::infrastructure::Storage;
use crate::shared::DomainResult;

pub struct LedgerService {
    storage: Arc<dyn Storage>,
}

impl LedgerService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Apply one event message to the operator's account balance.
    /// Replayed message ids are a no-op.
    pub async fn apply(&self, message: &EventMessage) -> DomainResult<()> {
        if !self.storage.mark_event_processed(message.id).await? {
            debug!(event_id = %message.id, "Skipping already processed event");
            return Ok(());
        }

        let event = &message.event;
        if let InvoiceEvent::InvoiceCreated(_) = event {
            // Drafts are not billed; the ledger first sees an invoice at
            // finalization.
            return Ok(());
        }

        let operator_id = event.operator_id().to_string();
        let mut account = match self.storage.get_account_balance(&operator_id).await? {
            Some(account) => account,
            None => OperatorAccountBalance::new(
                operator_id.clone(),
                event_currency(event).unwrap_or_default(),
            ),
        };

        match event {
            InvoiceEvent::InvoiceCreated(_) => {}
            InvoiceEvent::InvoiceFinalized(e) => account.on_invoice_finalized(e),
            InvoiceEvent::PaymentReceived(e) => account.on_payment_received(e),
            InvoiceEvent::InvoicePaidInFull(e) => account.on_invoice_paid_in_full(e),
            InvoiceEvent::InvoiceOverdue(e) => account.on_invoice_overdue(e),
            InvoiceEvent::OverdueCleared(e) => account.on_overdue_cleared(e),
            InvoiceEvent::InterestCharged(e) => account.on_interest_charged(e),
            InvoiceEvent::InvoiceCancelled(e) => account.on_invoice_cancelled(e),
        }

        self.storage.save_account_balance(account).await?;
        debug!(
            event_type = event.event_type(),
            operator_id = %operator_id,
            invoice_id = %event.invoice_id(),
            "Ledger updated"
        );
        Ok(())
    }

    /// Rebuild one operator's balance from their full invoice list.
    pub async fn recalculate(&self, operator_id: &str) -> DomainResult<OperatorAccountBalance> {
        let invoices = self.storage.list_invoices_for_operator(operator_id).await?;
        let currency = invoices
            .first()
            .map(|i| i.currency)
            .unwrap_or_default();
        let mut account = self
            .storage
            .get_account_balance(operator_id)
            .await?
            .unwrap_or_else(|| OperatorAccountBalance::new(operator_id, currency));
        account.recalculate(&invoices);
        self.storage.save_account_balance(account.clone()).await?;
        info!(
            operator_id,
            invoice_count = account.invoice_count,
            current_balance = %account.current_balance,
            "Account balance recalculated"
        );
        Ok(account)
    }
}

fn event_currency(event: &InvoiceEvent) -> Option<Currency> {
    match event {
        InvoiceEvent::InvoiceCreated(_) | InvoiceEvent::InvoicePaidInFull(_) => None,
        InvoiceEvent::InvoiceFinalized(e) => Some(e.currency),
        InvoiceEvent::PaymentReceived(e) => Some(e.currency),
        InvoiceEvent::InvoiceOverdue(e) => Some(e.currency),
        InvoiceEvent::OverdueCleared(e) => Some(e.currency),
        InvoiceEvent::InterestCharged(e) => Some(e.currency),
        InvoiceEvent::InvoiceCancelled(e) => Some(e.currency),
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::InvoiceFinalizedEvent;
    use crate::infrastructure::InMemoryStorage;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn finalized_message(amount: i64) -> EventMessage {
        EventMessage::new(InvoiceEvent::InvoiceFinalized(InvoiceFinalizedEvent {
            invoice_id: Uuid::new_v4(),
            operator_id: "OP-1".into(),
            total_amount: Decimal::new(amount, 2),
            currency: Currency::Usd,
            finalized_by: "officer".into(),
            timestamp: Utc::now(),
        }))
    }

    #[tokio::test]
    async fn applies_event_and_creates_account() {
        let storage = Arc::new(InMemoryStorage::new());
        let ledger = LedgerService::new(storage.clone());

        ledger.apply(&finalized_message(10_000)).await.unwrap();

        let account = storage.get_account_balance("OP-1").await.unwrap().unwrap();
        assert_eq!(account.current_balance, Decimal::new(10_000, 2));
        assert_eq!(account.invoice_count, 1);
    }

    #[tokio::test]
    async fn replayed_message_is_not_double_counted() {
        let storage = Arc::new(InMemoryStorage::new());
        let ledger = LedgerService::new(storage.clone());

        let message = finalized_message(10_000);
        ledger.apply(&message).await.unwrap();
        ledger.apply(&message).await.unwrap();

        let account = storage.get_account_balance("OP-1").await.unwrap().unwrap();
        assert_eq!(account.current_balance, Decimal::new(10_000, 2));
        assert_eq!(account.invoice_count, 1);
    }

    #[tokio::test]
    async fn same_event_in_two_messages_counts_twice() {
        let storage = Arc::new(InMemoryStorage::new());
        let ledger = LedgerService::new(storage.clone());

        ledger.apply(&finalized_message(10_000)).await.unwrap();
        ledger.apply(&finalized_message(10_000)).await.unwrap();

        let account = storage.get_account_balance("OP-1").await.unwrap().unwrap();
        assert_eq!(account.invoice_count, 2);
    }
}
