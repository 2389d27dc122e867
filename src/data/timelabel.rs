//! Statistical-agency period labels.
//!
//! SSB's PXWeb cubes stamp periods as `2023M01` (monthly), `2023K2`
//! (quarterly) or `2023` (yearly). Anything else falls through to ISO
//! date parsing. A label is parsed once; an unparseable label yields
//! `None` so the enclosing decode skips just that point.

use chrono::NaiveDate;

/// Parse one period label into the first day of its period.
///
/// Quarter digits are not range-checked; a `K5`-style label lands on a
/// nonexistent month and comes back `None` like any other bad label.
pub fn parse_time_label(label: &str) -> Option<NaiveDate> {
    // Monthly: "2023M01".
    if let Some((year, month)) = label.split_once('M') {
        let year: i32 = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1);
    }

    // Quarterly: "2023K2". K1=Jan, K2=Apr, K3=Jul, K4=Oct.
    if let Some((year, quarter)) = label.split_once('K') {
        let year: i32 = year.parse().ok()?;
        let quarter: u32 = quarter.parse().ok()?;
        let month = quarter.checked_sub(1)? * 3 + 1;
        return NaiveDate::from_ymd_opt(year, month, 1);
    }

    // Yearly: "2023".
    if label.len() == 4 && label.bytes().all(|b| b.is_ascii_digit()) {
        let year: i32 = label.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }

    // Anything else: ISO calendar date.
    label.parse::<NaiveDate>().ok()
}
