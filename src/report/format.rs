//! String formatting for terminal output.
//!
//! Everything here builds plain strings so output stays testable without
//! capturing stdout.

use std::fmt::Write as _;

use crate::app::pipeline::{ChartOutcome, LoadedChart};
use crate::domain::catalog::ChartSpec;
use crate::politics;

/// Summary table for a full dashboard load. Failed charts are listed in
/// place with their error, mirroring the settle-all load policy.
pub fn format_dashboard(outcomes: &[ChartOutcome]) -> String {
    let loaded = outcomes.iter().filter(|o| o.result.is_ok()).count();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Riksdata dashboard: {loaded}/{} charts loaded",
        outcomes.len()
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {:<24} {:>7}  {:<22} {:>14}  government",
        "chart", "points", "span", "latest"
    );

    for outcome in outcomes {
        match &outcome.result {
            Ok(chart) => {
                let _ = writeln!(out, "  {}", chart_row(outcome.spec, chart));
            }
            Err(err) => {
                let _ = writeln!(out, "  {:<24} {:>7}  {err}", outcome.spec.id, "-");
            }
        }
    }

    out
}

fn chart_row(spec: &ChartSpec, chart: &LoadedChart) -> String {
    let span = match (chart.points.first(), chart.points.last()) {
        (Some(first), Some(last)) => {
            format!("{} .. {}", first.date.format("%Y-%m"), last.date.format("%Y-%m"))
        }
        _ => String::from("-"),
    };
    let latest = chart
        .latest()
        .map(|p| format_value(p.value))
        .unwrap_or_else(|| String::from("-"));
    let government = chart
        .latest_government()
        .map(|p| p.party)
        .unwrap_or("-");

    format!(
        "{:<24} {:>7}  {:<22} {:>14}  {government}",
        spec.id,
        chart.points.len(),
        span,
        latest
    )
}

/// Header plus the last `tail` observations of one series, each annotated
/// with the government in office on that date.
pub fn format_series(chart: &LoadedChart, tail: usize) -> String {
    let mut out = String::new();

    let _ = write!(out, "{}", chart.spec.title);
    if let Some(unit) = chart.spec.unit {
        let _ = write!(out, " ({unit})");
    }
    let _ = writeln!(out, ": {} points", chart.points.len());

    let start = chart.points.len().saturating_sub(tail);
    for point in &chart.points[start..] {
        let government = politics::lookup(point.date)
            .map(|p| p.name)
            .unwrap_or("-");
        let _ = writeln!(
            out,
            "  {}  {:>14}  {government}",
            point.date.format("%Y-%m-%d"),
            format_value(point.value)
        );
    }

    out
}

fn format_value(value: f64) -> String {
    if value.abs() >= 1000.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::SourceKind;
    use crate::domain::{ChartKind, DataPoint};
    use chrono::NaiveDate;

    fn test_chart() -> LoadedChart {
        static SPEC: ChartSpec = ChartSpec {
            id: "cpi",
            title: "Consumer Price Index",
            unit: Some("index, 2015=100"),
            url: "unused",
            source: SourceKind::StaticPoints,
            kind: ChartKind::Line,
        };
        LoadedChart {
            spec: &SPEC,
            points: vec![
                DataPoint::new(NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(), 90.0),
                DataPoint::new(NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(), 133.4),
            ],
        }
    }

    #[test]
    fn series_listing_includes_title_unit_and_government() {
        let text = format_series(&test_chart(), 10);

        assert!(text.contains("Consumer Price Index (index, 2015=100): 2 points"));
        assert!(text.contains("2010-01-01"));
        assert!(text.contains("Jens Stoltenberg II"));
        assert!(text.contains("Jonas Gahr Støre"));
    }

    #[test]
    fn series_listing_tail_limits_rows() {
        let text = format_series(&test_chart(), 1);
        assert!(!text.contains("2010-01-01"));
        assert!(text.contains("2023-06-01"));
    }

    #[test]
    fn dashboard_table_reports_loaded_and_failed_charts() {
        let chart = test_chart();
        let outcomes = vec![
            ChartOutcome {
                spec: chart.spec,
                result: Ok(chart.clone()),
            },
            ChartOutcome {
                spec: chart.spec,
                result: Err(crate::error::AppError::fetch("Failed to load x")),
            },
        ];

        let text = format_dashboard(&outcomes);
        assert!(text.contains("1/2 charts loaded"));
        assert!(text.contains("2010-01 .. 2023-06"));
        assert!(text.contains("Failed to load x"));
    }

    #[test]
    fn large_values_drop_decimals() {
        assert_eq!(format_value(12345.678), "12346");
        assert_eq!(format_value(1.5), "1.50");
    }
}
