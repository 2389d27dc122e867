//! Norwegian government periods.
//!
//! A static ordered table of cabinet date ranges with party colors, used
//! to annotate chart points with the government in office. Ranges are
//! contiguous and non-overlapping; handover days are shared by both
//! cabinets and resolve to the earlier one (first containment wins).
//! Dates outside the configured range come back `None`.

use std::sync::LazyLock;

use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct PoliticalPeriod {
    pub name: &'static str,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub party: &'static str,
    pub color: &'static str,
    pub background_color: &'static str,
}

// Party colors.
const AP_RED: (&str, &str) = ("#E11926", "rgba(225, 25, 38, 0.7)");
const H_BLUE: (&str, &str) = ("#87add7", "rgba(135, 173, 215, 0.7)");
const KRF_YELLOW: (&str, &str) = ("#FDED34", "rgba(253, 237, 52, 0.7)");

type Row = (
    &'static str,
    (i32, u32, u32),
    (i32, u32, u32),
    &'static str,
    (&'static str, &'static str),
);

const ROWS: &[Row] = &[
    ("Kjell Magne Bondevik I (KrF, Sp, V)", (1997, 10, 17), (2000, 3, 17), "KrF", KRF_YELLOW),
    ("Jens Stoltenberg I (Ap)", (2000, 3, 17), (2001, 10, 19), "Ap", AP_RED),
    ("Kjell Magne Bondevik II (KrF, H, V)", (2001, 10, 19), (2005, 10, 17), "KrF", KRF_YELLOW),
    ("Jens Stoltenberg II (Ap, SV, Sp)", (2005, 10, 17), (2013, 10, 16), "Ap", AP_RED),
    ("Erna Solberg (H, FrP; later V, KrF)", (2013, 10, 16), (2021, 10, 14), "H", H_BLUE),
    ("Jonas Gahr Støre (Ap, Sp)", (2021, 10, 14), (2025, 9, 8), "Ap", AP_RED),
];

static PERIODS: LazyLock<Vec<PoliticalPeriod>> = LazyLock::new(|| {
    ROWS.iter()
        .map(|&(name, (sy, sm, sd), (ey, em, ed), party, (color, background_color))| {
            PoliticalPeriod {
                name,
                // The table is literal and covered by tests; a bad row is
                // a programming error, not a runtime condition.
                start: NaiveDate::from_ymd_opt(sy, sm, sd).unwrap(),
                end: NaiveDate::from_ymd_opt(ey, em, ed).unwrap(),
                party,
                color,
                background_color,
            }
        })
        .collect()
});

pub fn periods() -> &'static [PoliticalPeriod] {
    &PERIODS
}

/// First period containing `date` (`start <= date <= end`), if any.
pub fn lookup(date: NaiveDate) -> Option<&'static PoliticalPeriod> {
    periods()
        .iter()
        .find(|p| p.start <= date && date <= p.end)
}
