//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - produced by any of the wire-format decoders
//! - filtered/aggregated by the dashboard pipeline
//! - exported to JSON or fed to the terminal renderer

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One normalized observation.
///
/// `value` is never NaN: every decoder drops non-numeric source values
/// before constructing a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl DataPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// How the renderer draws a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

/// The calendar period corresponding to SDMX observation offset 0.
///
/// Norges Bank's SDMX-JSON subset does not embed the series start period,
/// so it is configured per data source (2015-09 for exchange rates,
/// 2000-01 for the policy rate and government debt).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdmxEpoch {
    pub year: i32,
    /// 1-based calendar month.
    pub month: u32,
}

impl SdmxEpoch {
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

/// How the SDMX decoder picks a series out of a multi-series payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesSelector {
    /// The conventional `"0:0:0:0"` key when present, else the first key.
    First,
    /// The series with the largest observation count. Used where the key
    /// layout is not fixed (government debt).
    MostObservations,
}

/// Stable ascending date sort. Duplicate dates are permitted and keep
/// their relative order; no dedup is applied.
pub fn sort_by_date(points: &mut [DataPoint]) {
    points.sort_by_key(|p| p.date);
}

/// Drop points before January 1 of `from_year`.
pub fn filter_from_year(points: Vec<DataPoint>, from_year: i32) -> Vec<DataPoint> {
    points
        .into_iter()
        .filter(|p| p.date.year() >= from_year)
        .collect()
}

/// Collapse a series to one mean value per calendar month, dated the first
/// of the month. Used for bar charts, where sub-monthly resolution just
/// produces unreadable clutter.
pub fn aggregate_monthly(points: &[DataPoint]) -> Vec<DataPoint> {
    let mut buckets: Vec<((i32, u32), f64, usize)> = Vec::new();

    for p in points {
        let key = (p.date.year(), p.date.month());
        match buckets.iter_mut().find(|(k, _, _)| *k == key) {
            Some((_, sum, count)) => {
                *sum += p.value;
                *count += 1;
            }
            None => buckets.push((key, p.value, 1)),
        }
    }

    let mut out: Vec<DataPoint> = buckets
        .into_iter()
        .filter_map(|((year, month), sum, count)| {
            let date = NaiveDate::from_ymd_opt(year, month, 1)?;
            Some(DataPoint::new(date, sum / count as f64))
        })
        .collect();

    sort_by_date(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn sort_is_stable_for_duplicate_dates() {
        let mut points = vec![
            DataPoint::new(d(2021, 1, 1), 2.0),
            DataPoint::new(d(2020, 1, 1), 1.0),
            DataPoint::new(d(2021, 1, 1), 3.0),
        ];
        sort_by_date(&mut points);

        assert_eq!(points[0].value, 1.0);
        // Duplicates keep insertion order.
        assert_eq!(points[1].value, 2.0);
        assert_eq!(points[2].value, 3.0);
    }

    #[test]
    fn filter_from_year_drops_older_points() {
        let points = vec![
            DataPoint::new(d(1999, 12, 1), 1.0),
            DataPoint::new(d(2000, 1, 1), 2.0),
        ];
        let kept = filter_from_year(points, 2000);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].value, 2.0);
    }

    #[test]
    fn aggregate_monthly_averages_within_month() {
        let points = vec![
            DataPoint::new(d(2020, 1, 5), 10.0),
            DataPoint::new(d(2020, 1, 20), 20.0),
            DataPoint::new(d(2020, 2, 1), 7.0),
        ];
        let agg = aggregate_monthly(&points);

        assert_eq!(agg.len(), 2);
        assert_eq!(agg[0].date, d(2020, 1, 1));
        assert_eq!(agg[0].value, 15.0);
        assert_eq!(agg[1].date, d(2020, 2, 1));
        assert_eq!(agg[1].value, 7.0);
    }
}
