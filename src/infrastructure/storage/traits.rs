//! Storage trait definitions

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{FeeRate, Invoice, OperatorAccountBalance};
use crate::shared::DomainResult;

/// Storage trait for persistence operations
#[async_trait]
pub trait Storage: Send + Sync {
    // Invoice operations
    async fn save_invoice(&self, invoice: Invoice) -> DomainResult<()>;
    async fn get_invoice(&self, id: Uuid) -> DomainResult<Option<Invoice>>;
    async fn update_invoice(&self, invoice: Invoice) -> DomainResult<()>;
    async fn list_invoices_for_operator(&self, operator_id: &str) -> DomainResult<Vec<Invoice>>;
    /// Invoices in Pending, PartiallyPaid or Overdue status, across all
    /// operators. This is the working set for the overdue sweep and
    /// interest accrual.
    async fn list_open_invoices(&self) -> DomainResult<Vec<Invoice>>;

    // Account balance operations
    async fn get_account_balance(
        &self,
        operator_id: &str,
    ) -> DomainResult<Option<OperatorAccountBalance>>;
    async fn save_account_balance(&self, balance: OperatorAccountBalance) -> DomainResult<()>;

    // Fee rate operations
    async fn save_fee_rate(&self, rate: FeeRate) -> DomainResult<()>;
    async fn list_fee_rates(&self) -> DomainResult<Vec<FeeRate>>;

    // Event idempotency; returns true the first time an id is seen
    async fn mark_event_processed(&self, event_id: Uuid) -> DomainResult<bool>;

    // Utility
    async fn next_invoice_sequence(&self) -> u32;
}
