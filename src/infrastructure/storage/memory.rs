//! In-memory storage implementation

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use uuid::Uuid;

use super::Storage;
use crate::domain::policy::RateCatalog;
use crate::domain::weight::MtowTier;
use crate::domain::{
    FeeCategory, FeeRate, Invoice, InvoiceStatus, OperationType, OperatorAccountBalance,
};
use crate::shared::{DomainError, DomainResult};

/// In-memory storage for development and testing
pub struct InMemoryStorage {
    invoices: DashMap<Uuid, Invoice>,
    accounts: DashMap<String, OperatorAccountBalance>,
    fee_rates: RwLock<Vec<FeeRate>>,
    processed_events: DashMap<Uuid, ()>,
    invoice_counter: AtomicU32,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            invoices: DashMap::new(),
            accounts: DashMap::new(),
            fee_rates: RwLock::new(Vec::new()),
            processed_events: DashMap::new(),
            invoice_counter: AtomicU32::new(1),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save_invoice(&self, invoice: Invoice) -> DomainResult<()> {
        if self.invoices.contains_key(&invoice.id) {
            return Err(DomainError::Conflict(format!(
                "invoice {} already exists",
                invoice.id
            )));
        }
        self.invoices.insert(invoice.id, invoice);
        Ok(())
    }

    async fn get_invoice(&self, id: Uuid) -> DomainResult<Option<Invoice>> {
        Ok(self.invoices.get(&id).map(|i| i.clone()))
    }

    async fn update_invoice(&self, invoice: Invoice) -> DomainResult<()> {
        if !self.invoices.contains_key(&invoice.id) {
            return Err(DomainError::NotFound {
                entity: "Invoice",
                field: "id",
                value: invoice.id.to_string(),
            });
        }
        self.invoices.insert(invoice.id, invoice);
        Ok(())
    }

    async fn list_invoices_for_operator(&self, operator_id: &str) -> DomainResult<Vec<Invoice>> {
        Ok(self
            .invoices
            .iter()
            .filter(|e| e.value().operator_id == operator_id)
            .map(|e| e.value().clone())
            .collect())
    }

    async fn list_open_invoices(&self) -> DomainResult<Vec<Invoice>> {
        Ok(self
            .invoices
            .iter()
            .filter(|e| {
                matches!(
                    e.value().status,
                    InvoiceStatus::Pending
                        | InvoiceStatus::PartiallyPaid
                        | InvoiceStatus::Overdue
                )
            })
            .map(|e| e.value().clone())
            .collect())
    }

    async fn get_account_balance(
        &self,
        operator_id: &str,
    ) -> DomainResult<Option<OperatorAccountBalance>> {
        Ok(self.accounts.get(operator_id).map(|a| a.clone()))
    }

    async fn save_account_balance(&self, balance: OperatorAccountBalance) -> DomainResult<()> {
        self.accounts.insert(balance.operator_id.clone(), balance);
        Ok(())
    }

    async fn save_fee_rate(&self, rate: FeeRate) -> DomainResult<()> {
        let mut rates = self
            .fee_rates
            .write()
            .map_err(|_| DomainError::Storage("fee rate lock poisoned".into()))?;
        rates.push(rate);
        Ok(())
    }

    async fn list_fee_rates(&self) -> DomainResult<Vec<FeeRate>> {
        let rates = self
            .fee_rates
            .read()
            .map_err(|_| DomainError::Storage("fee rate lock poisoned".into()))?;
        Ok(rates.clone())
    }

    async fn mark_event_processed(&self, event_id: Uuid) -> DomainResult<bool> {
        Ok(self.processed_events.insert(event_id, ()).is_none())
    }

    async fn next_invoice_sequence(&self) -> u32 {
        self.invoice_counter.fetch_add(1, Ordering::SeqCst)
    }
}

impl RateCatalog for InMemoryStorage {
    fn candidate_rates(
        &self,
        category: FeeCategory,
        operation_type: Option<OperationType>,
        airport: Option<&str>,
        tier: Option<MtowTier>,
        on: NaiveDate,
    ) -> Vec<FeeRate> {
        match self.fee_rates.read() {
            Ok(rates) => rates
                .iter()
                .filter(|r| r.matches(category, operation_type, airport, tier, on))
                .cloned()
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Currency;
    use chrono::{Duration, Utc};

    fn sample_invoice(operator_id: &str) -> Invoice {
        Invoice::new(
            operator_id,
            format!("INV-2026-{:05}", 1),
            Currency::Usd,
            (Utc::now() + Duration::days(30)).date_naive(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn save_then_get_invoice() {
        let storage = InMemoryStorage::new();
        let invoice = sample_invoice("OP-1");
        let id = invoice.id;
        storage.save_invoice(invoice).await.unwrap();
        let loaded = storage.get_invoice(id).await.unwrap().unwrap();
        assert_eq!(loaded.operator_id, "OP-1");
    }

    #[tokio::test]
    async fn duplicate_save_conflicts() {
        let storage = InMemoryStorage::new();
        let invoice = sample_invoice("OP-1");
        storage.save_invoice(invoice.clone()).await.unwrap();
        let err = storage.save_invoice(invoice).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_missing_invoice_is_not_found() {
        let storage = InMemoryStorage::new();
        let err = storage.update_invoice(sample_invoice("OP-1")).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn open_invoice_listing_skips_drafts() {
        let storage = InMemoryStorage::new();
        let draft = sample_invoice("OP-1");
        let mut pending = sample_invoice("OP-1");
        pending
            .add_line_item(
                crate::domain::FeeCategory::Landing,
                "Landing fee",
                rust_decimal::Decimal::ONE,
                rust_decimal::Decimal::new(5000, 2),
            )
            .unwrap();
        pending.finalize("officer").unwrap();
        storage.save_invoice(draft).await.unwrap();
        storage.save_invoice(pending).await.unwrap();

        let open = storage.list_open_invoices().await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].status, InvoiceStatus::Pending);
    }

    #[tokio::test]
    async fn event_ids_are_processed_once() {
        let storage = InMemoryStorage::new();
        let id = Uuid::new_v4();
        assert!(storage.mark_event_processed(id).await.unwrap());
        assert!(!storage.mark_event_processed(id).await.unwrap());
    }

    #[tokio::test]
    async fn invoice_sequence_increments() {
        let storage = InMemoryStorage::new();
        assert_eq!(storage.next_invoice_sequence().await, 1);
        assert_eq!(storage.next_invoice_sequence().await, 2);
    }
}
