//! Operating window derivation
//!
//! Scheduled arrival/departure times determine whether a flight needs the
//! airport outside normal hours (06:00–22:00) and whether runway lighting
//! applies (23:00–02:00). Both are derived, never stored.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Scheduled arrival and departure times of day.
///
/// Equality is defined by the two scheduled times only; everything else
/// on this type is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingWindow {
    pub scheduled_arrival: NaiveTime,
    pub scheduled_departure: NaiveTime,
}

impl OperatingWindow {
    pub fn new(scheduled_arrival: NaiveTime, scheduled_departure: NaiveTime) -> Self {
        Self {
            scheduled_arrival,
            scheduled_departure,
        }
    }

    /// Normal airport hours are 06:00 (inclusive) to 22:00 (exclusive).
    fn outside_normal_hours(t: NaiveTime) -> bool {
        let six = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
        let twenty_two = NaiveTime::from_hms_opt(22, 0, 0).unwrap();
        t < six || t >= twenty_two
    }

    /// Lighting window wraps midnight: 23:00 (inclusive) to 02:00 (exclusive).
    fn in_lighting_window(t: NaiveTime) -> bool {
        let twenty_three = NaiveTime::from_hms_opt(23, 0, 0).unwrap();
        let two = NaiveTime::from_hms_opt(2, 0, 0).unwrap();
        t >= twenty_three || t < two
    }

    pub fn requires_extended_operations(&self) -> bool {
        Self::outside_normal_hours(self.scheduled_arrival)
            || Self::outside_normal_hours(self.scheduled_departure)
    }

    pub fn requires_lighting(&self) -> bool {
        self.lighting_hours() > 0
    }

    /// Each qualifying endpoint counts once.
    pub fn lighting_hours(&self) -> u32 {
        let mut hours = 0;
        if Self::in_lighting_window(self.scheduled_arrival) {
            hours += 1;
        }
        if Self::in_lighting_window(self.scheduled_departure) {
            hours += 1;
        }
        hours
    }

    pub fn arrival_hour(&self) -> u32 {
        self.scheduled_arrival.hour()
    }
}

// ── Tests ──────────────────────────────────────────────────────
