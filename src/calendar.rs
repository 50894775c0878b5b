//! Calendar-day strings and advent dates
//!
//! The daily lock compares day strings, not elapsed time. Strings use the
//! browser `Date.toDateString()` shape so data written by the page stays valid.

use chrono::{Local, NaiveDate};

use crate::consts::START_DAY;

/// Format a day as e.g. `Wed Dec 17 2025`
pub fn day_string(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// Today in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// December date on which advent `day` (1-based) unlocks
pub fn unlock_date(day: u32) -> u32 {
    START_DAY + day.saturating_sub(1)
}
