//! SSB PXWeb cube decoding.
//!
//! A cube carries its axes under `dimension` and a single row-major flat
//! `value` array. The content-series axis varies fastest, so the flat
//! offset of one observation is `time_index * num_series + target_series`.
//! We pick the target series by scanning the `ContentsCode` labels against
//! a caller-supplied predicate list.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::data::{numeric, parse_time_label};
use crate::domain::{DataPoint, sort_by_date};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
struct Cube {
    dimension: Dimension,
    value: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct Dimension {
    #[serde(rename = "Tid")]
    tid: Option<Axis>,
    #[serde(rename = "ContentsCode")]
    contents: Option<Axis>,
}

#[derive(Debug, Deserialize)]
struct Axis {
    category: Category,
}

#[derive(Debug, Deserialize)]
struct Category {
    label: HashMap<String, String>,
    index: HashMap<String, usize>,
}

/// Skip accounting for one decode. The emitted series is unaffected;
/// this exists so callers can see how lossy a cube was.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeStats {
    pub emitted: usize,
    /// Unparseable labels, out-of-bounds offsets, nulls and zero values.
    pub skipped: usize,
}

/// Decode one cube into the target content series.
pub fn decode_cube(raw: &Value, predicates: &[&str]) -> Result<Vec<DataPoint>, AppError> {
    decode_cube_with_stats(raw, predicates).map(|(points, _)| points)
}

/// As [`decode_cube`], also reporting skip counts.
pub fn decode_cube_with_stats(
    raw: &Value,
    predicates: &[&str],
) -> Result<(Vec<DataPoint>, DecodeStats), AppError> {
    // The dataset API wraps the cube in `{"dataset": ...}`; accept both.
    let cube = raw.get("dataset").unwrap_or(raw);
    let cube: Cube = Cube::deserialize(cube)
        .map_err(|e| AppError::format(format!("Malformed SSB cube: {e}")))?;

    let Some(tid) = &cube.dimension.tid else {
        return Err(AppError::format("Time dimension (Tid) not found in SSB cube"));
    };

    let (target_series, num_series) = match &cube.dimension.contents {
        Some(contents) => select_content_series(&contents.category, predicates),
        None => (0, 1),
    };

    let mut points = Vec::with_capacity(tid.category.index.len());
    let mut stats = DecodeStats::default();

    for (time_key, label) in &tid.category.label {
        let Some(&time_index) = tid.category.index.get(time_key) else {
            stats.skipped += 1;
            continue;
        };
        let Some(date) = parse_time_label(label) else {
            stats.skipped += 1;
            continue;
        };

        let value_index = time_index * num_series + target_series;
        let raw_value = cube.value.get(value_index).and_then(numeric);

        // Zero doubles as "missing" in these cubes; a true zero observation
        // is indistinguishable and gets dropped with it.
        match raw_value {
            Some(v) if v != 0.0 => points.push(DataPoint::new(date, v)),
            _ => stats.skipped += 1,
        }
    }

    sort_by_date(&mut points);
    stats.emitted = points.len();
    Ok((points, stats))
}

/// Pick the content series the predicates ask for.
///
/// Labels are scanned in the cube's own series order (their `index`
/// positions, which mirror document order); the first label containing any
/// predicate substring wins. No match falls back to the first series,
/// which may silently be the wrong one for an exotic cube.
fn select_content_series(category: &Category, predicates: &[&str]) -> (usize, usize) {
    let num_series = category.index.len();

    let mut ordered: Vec<(&String, &usize)> = category.index.iter().collect();
    ordered.sort_by_key(|&(_, &position)| position);

    for (key, &position) in ordered {
        let Some(label) = category.label.get(key) else {
            continue;
        };
        if predicates.iter().any(|p| label.contains(p)) {
            return (position, num_series);
        }
    }

    (0, num_series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::NaiveDate;
    use serde_json::json;

    fn d(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    /// Two time periods, three stacked content series, row-major values.
    fn three_series_cube() -> Value {
        json!({
            "dataset": {
                "dimension": {
                    "Tid": {
                        "category": {
                            "label": {"t0": "2023M01", "t1": "2023M02"},
                            "index": {"t0": 0, "t1": 1}
                        }
                    },
                    "ContentsCode": {
                        "category": {
                            "label": {
                                "a": "Seasonally adjusted something",
                                "b": "Consumer Price Index (2015=100)",
                                "c": "Another measure"
                            },
                            "index": {"a": 0, "b": 1, "c": 2}
                        }
                    }
                },
                "value": [10, 20, 30, 11, 21, 31]
            }
        })
    }

    #[test]
    fn selects_target_series_via_index_arithmetic() {
        let points =
            decode_cube(&three_series_cube(), &["Consumer Price Index (2015=100)"]).unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0], DataPoint::new(d(2023, 1), 20.0));
        assert_eq!(points[1], DataPoint::new(d(2023, 2), 21.0));
    }

    #[test]
    fn no_predicate_match_falls_back_to_first_series() {
        let points = decode_cube(&three_series_cube(), &["GDP"]).unwrap();
        assert_eq!(points[0].value, 10.0);
        assert_eq!(points[1].value, 11.0);
    }

    #[test]
    fn missing_tid_is_a_format_error() {
        let raw = json!({"dataset": {"dimension": {}, "value": []}});
        let err = decode_cube(&raw, &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn accepts_unwrapped_cube() {
        let raw = json!({
            "dimension": {
                "Tid": {"category": {
                    "label": {"t0": "2020"},
                    "index": {"t0": 0}
                }}
            },
            "value": [5.5]
        });
        let points = decode_cube(&raw, &[]).unwrap();
        assert_eq!(points, vec![DataPoint::new(d(2020, 1), 5.5)]);
    }

    #[test]
    fn null_and_zero_values_are_dropped() {
        let raw = json!({
            "dimension": {
                "Tid": {"category": {
                    "label": {"t0": "2020M01", "t1": "2020M02", "t2": "2020M03"},
                    "index": {"t0": 0, "t1": 1, "t2": 2}
                }}
            },
            "value": [1.0, null, 0]
        });
        let (points, stats) = decode_cube_with_stats(&raw, &[]).unwrap();

        assert_eq!(points, vec![DataPoint::new(d(2020, 1), 1.0)]);
        assert_eq!(stats.emitted, 1);
        assert_eq!(stats.skipped, 2);
    }

    #[test]
    fn unparseable_labels_and_short_value_arrays_skip_points() {
        let raw = json!({
            "dimension": {
                "Tid": {"category": {
                    "label": {"t0": "garbage", "t1": "2020M02", "t2": "2020M03"},
                    "index": {"t0": 0, "t1": 1, "t2": 2}
                }}
            },
            "value": [1.0, 2.0]
        });
        let points = decode_cube(&raw, &[]).unwrap();

        // t0 has a bad label, t2 is out of bounds; only t1 survives.
        assert_eq!(points, vec![DataPoint::new(d(2020, 2), 2.0)]);
    }

    #[test]
    fn output_is_sorted_ascending_regardless_of_key_order() {
        let raw = json!({
            "dimension": {
                "Tid": {"category": {
                    "label": {"late": "2022M01", "early": "2020M01"},
                    "index": {"late": 1, "early": 0}
                }}
            },
            "value": [3.0, 4.0]
        });
        let points = decode_cube(&raw, &[]).unwrap();

        assert_eq!(points[0].date, d(2020, 1));
        assert_eq!(points[1].date, d(2022, 1));
    }
}
