//! Late payment interest
//!
//! Linear proration, not compounding: the first 30 days accrue nothing,
//! after that each further day adds 1/30th of a month at the policy's
//! monthly rate.

use rust_decimal::Decimal;

pub const INTEREST_GRACE_DAYS: i64 = 30;

pub fn late_payment_interest(principal: Decimal, monthly_rate: Decimal, days_overdue: i64) -> Decimal {
    if days_overdue <= INTEREST_GRACE_DAYS {
        return Decimal::ZERO;
    }
    let chargeable_days = Decimal::new(days_overdue - INTEREST_GRACE_DAYS, 0);
    (principal * monthly_rate * chargeable_days / Decimal::new(30, 0)).round_dp(2)
}

// ── Tests ──────────────────────────────────────────────────────
