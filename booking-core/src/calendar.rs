//! Gregorian calendar validation
//!
//! Pure validation of (day, month, year) triples. The engine accepts
//! only valid dates for date-bearing operations; everything else in
//! the core treats [`Date`] as an opaque slot-key component.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar date as supplied by callers
///
/// Construction does not validate; call [`Date::is_valid`] (the engine
/// does this on every date-bearing operation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Date {
    /// Day of month, 1-based
    pub day: u32,

    /// Month, 1..=12
    pub month: u32,

    /// Gregorian year
    pub year: u32,
}

impl Date {
    /// Create new date (unvalidated)
    pub fn new(day: u32, month: u32, year: u32) -> Self {
        Self { day, month, year }
    }

    /// Check Gregorian validity
    pub fn is_valid(&self) -> bool {
        is_valid_date(self.day, self.month, self.year)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Gregorian leap-year rule
pub fn is_leap_year(year: u32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Days in a month for a given year
///
/// Returns 0 for an out-of-range month, which makes every day invalid.
pub fn days_in_month(month: u32, year: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Validate a (day, month, year) triple against Gregorian rules
pub fn is_valid_date(day: u32, month: u32, year: u32) -> bool {
    if !(1..=12).contains(&month) {
        return false;
    }
    day >= 1 && day <= days_in_month(month, year)
}
