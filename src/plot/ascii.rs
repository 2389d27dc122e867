//! ASCII plotting for terminal output.
//!
//! Intentionally "dumb" (fixed-size grid), optimized for quick visual
//! sanity checks and deterministic output. Points are drawn with the
//! first letter of the governing party on their date (`A`, `H`, `K`);
//! dates outside the configured government range fall back to `o`.

use chrono::NaiveDate;

use crate::domain::DataPoint;
use crate::politics;

const MIN_WIDTH: usize = 16;
const MIN_HEIGHT: usize = 4;

/// Render one series into a fixed grid with y-axis labels and an x-axis
/// spanning the first to last observation date.
pub fn render_series_plot(points: &[DataPoint], width: usize, height: usize) -> String {
    let width = width.max(MIN_WIDTH);
    let height = height.max(MIN_HEIGHT);

    let Some((first, last)) = points.first().zip(points.last()) else {
        return String::from("(no data)\n");
    };

    let day_span = (last.date - first.date).num_days().max(1);
    let (y_min, y_max) = value_range(points);
    let y_span = y_max - y_min;

    let mut grid = vec![vec![' '; width]; height];
    for point in points {
        let col = ((point.date - first.date).num_days() as f64 / day_span as f64
            * (width - 1) as f64)
            .round() as usize;
        let row_from_bottom =
            ((point.value - y_min) / y_span * (height - 1) as f64).round() as usize;
        let row = height - 1 - row_from_bottom.min(height - 1);
        grid[row][col.min(width - 1)] = marker(point.date);
    }

    let mut out = String::new();
    for (i, row) in grid.iter().enumerate() {
        let label = if i == 0 {
            format_axis_value(y_max)
        } else if i == height - 1 {
            format_axis_value(y_min)
        } else {
            String::new()
        };
        out.push_str(&format!("{label:>10} |"));
        out.extend(row.iter());
        out.push('\n');
    }

    // X axis with end-point dates.
    out.push_str(&format!("{:>10} +{}\n", "", "-".repeat(width)));
    let left = first.date.format("%Y-%m").to_string();
    let right = last.date.format("%Y-%m").to_string();
    let gap = width.saturating_sub(left.len() + right.len()).max(1);
    out.push_str(&format!("{:>10}  {left}{}{right}\n", "", " ".repeat(gap)));

    out.push_str("\n  markers: A=Ap  H=H  K=KrF  o=outside configured governments\n");
    out
}

fn marker(date: NaiveDate) -> char {
    politics::lookup(date)
        .and_then(|p| p.party.chars().next())
        .unwrap_or('o')
}

fn value_range(points: &[DataPoint]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for p in points {
        min = min.min(p.value);
        max = max.max(p.value);
    }
    if min == max {
        // Flat series still needs a non-zero span to scale against.
        (min - 1.0, max + 1.0)
    } else {
        (min, max)
    }
}

fn format_axis_value(value: f64) -> String {
    if value.abs() >= 1000.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    fn series() -> Vec<DataPoint> {
        vec![
            DataPoint::new(d(2010, 1), 100.0),
            DataPoint::new(d(2015, 1), 110.0),
            DataPoint::new(d(2023, 1), 130.0),
        ]
    }

    #[test]
    fn plot_is_deterministic() {
        let a = render_series_plot(&series(), 40, 10);
        let b = render_series_plot(&series(), 40, 10);
        assert_eq!(a, b);
    }

    #[test]
    fn plot_contains_axis_labels_and_party_markers() {
        let text = render_series_plot(&series(), 40, 10);

        assert!(text.contains("130.00"));
        assert!(text.contains("100.00"));
        assert!(text.contains("2010-01"));
        assert!(text.contains("2023-01"));
        // 2010 was an Ap government, 2015 Høyre.
        assert!(text.contains('A'));
        assert!(text.contains('H'));
    }

    #[test]
    fn empty_series_renders_placeholder() {
        assert_eq!(render_series_plot(&[], 40, 10), "(no data)\n");
    }

    #[test]
    fn flat_series_does_not_divide_by_zero() {
        let points = vec![
            DataPoint::new(d(2020, 1), 5.0),
            DataPoint::new(d(2021, 1), 5.0),
        ];
        let text = render_series_plot(&points, 40, 10);
        assert!(text.contains("6.00"));
        assert!(text.contains("4.00"));
    }
}
