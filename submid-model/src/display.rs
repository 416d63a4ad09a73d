//! Human-facing date formatting for promo cards and the detail panel.

use chrono::{DateTime, Datelike, Utc};

const MONTHS_ID: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Indonesian month name for a 1-based month number.
pub fn month_name_id(month: u32) -> Option<&'static str> {
    let idx = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTHS_ID.get(idx).copied()
}

/// Long Indonesian date, e.g. `19 Oktober 2026`. Always rendered in UTC.
pub fn format_date(at: DateTime<Utc>) -> String {
    // month() is 1..=12 so the lookup cannot miss
    let month = month_name_id(at.month()).unwrap_or_default();
    format!("{} {} {}", at.day(), month, at.year())
}
