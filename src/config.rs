//! Configuration module

use crate::domain::Currency;

/// Billing configuration
#[derive(Debug, Clone)]
pub struct BillingConfig {
    /// Currency invoices are issued in
    pub currency: Currency,
    /// Days between invoice issue and due date
    pub invoice_due_days: i64,
}

impl BillingConfig {
    pub fn new(currency: Currency, invoice_due_days: i64) -> Self {
        Self {
            currency,
            invoice_due_days,
        }
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            currency: Currency::Usd,
            invoice_due_days: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_terms_are_thirty_days() {
        let config = BillingConfig::default();
        assert_eq!(config.invoice_due_days, 30);
        assert_eq!(config.currency, Currency::Usd);
    }
}
