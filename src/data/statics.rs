//! Decoders for repository-local pre-shaped JSON.
//!
//! These files are produced by our own fetch scripts, so the shapes are
//! stable: `{data: [{year, total}]}` (oil fund), `{data: [{date, value}]}`
//! (generic), and the Statnett production/consumption file in either its
//! current `{data: [...]}` shape or the legacy bare-array export.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::data::numeric;
use crate::domain::{DataPoint, sort_by_date};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
struct PointsFile {
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct StaticEntry {
    date: Option<String>,
    year: Option<Value>,
    value: Option<Value>,
    total: Option<Value>,
    amount: Option<Value>,
}

/// Decode `{data: [{year, total}]}` / `{data: [{date, value}]}` files.
///
/// Entries missing both a date and a year, or without any numeric value,
/// are skipped; there is no index arithmetic to go wrong here.
pub fn decode_points(raw: &Value) -> Result<Vec<DataPoint>, AppError> {
    let file: PointsFile = PointsFile::deserialize(raw)
        .map_err(|e| AppError::format(format!("Malformed static data file: {e}")))?;

    let Some(Value::Array(entries)) = file.data else {
        return Err(AppError::format("Static data file has no data array"));
    };

    let mut points = Vec::with_capacity(entries.len());
    for entry in &entries {
        let Ok(entry) = StaticEntry::deserialize(entry) else {
            continue;
        };
        let Some(date) = entry_date(entry.date.as_deref(), entry.year.as_ref()) else {
            continue;
        };
        let value = [&entry.value, &entry.total, &entry.amount]
            .into_iter()
            .flatten()
            .find_map(numeric);
        if let Some(value) = value {
            points.push(DataPoint::new(date, value));
        }
    }

    sort_by_date(&mut points);
    Ok(points)
}

/// Statnett production/consumption series, decoded together.
#[derive(Debug, Clone, Default)]
pub struct StatnettSeries {
    pub production: Vec<DataPoint>,
    pub consumption: Vec<DataPoint>,
    pub net: Vec<DataPoint>,
}

#[derive(Debug, Deserialize)]
struct StatnettEntry {
    #[serde(alias = "Date")]
    date: Option<String>,
    year: Option<Value>,
    #[serde(alias = "Production")]
    production: Option<Value>,
    #[serde(alias = "Consumption")]
    consumption: Option<Value>,
    #[serde(alias = "Net")]
    net: Option<Value>,
}

/// Decode either Statnett shape. `net` falls back to
/// `production - consumption` when the file does not carry it.
pub fn decode_statnett(raw: &Value) -> Result<StatnettSeries, AppError> {
    let entries = match raw {
        // Legacy export: a bare array of {Date, Production, Consumption, Net?}.
        Value::Array(entries) => entries,
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(AppError::format("Statnett file has no data array")),
        },
        _ => return Err(AppError::format("Statnett file is neither array nor object")),
    };

    let mut series = StatnettSeries::default();
    for entry in entries {
        let Ok(entry) = StatnettEntry::deserialize(entry) else {
            continue;
        };
        let Some(date) = entry_date(entry.date.as_deref(), entry.year.as_ref()) else {
            continue;
        };
        let production = entry.production.as_ref().and_then(numeric);
        let consumption = entry.consumption.as_ref().and_then(numeric);
        let (Some(production), Some(consumption)) = (production, consumption) else {
            continue;
        };

        let net = entry
            .net
            .as_ref()
            .and_then(numeric)
            .unwrap_or(production - consumption);

        series.production.push(DataPoint::new(date, production));
        series.consumption.push(DataPoint::new(date, consumption));
        series.net.push(DataPoint::new(date, net));
    }

    sort_by_date(&mut series.production);
    sort_by_date(&mut series.consumption);
    sort_by_date(&mut series.net);
    Ok(series)
}

/// A `date` field wins over a `year` field. Datetime strings are accepted
/// by reading their date prefix.
fn entry_date(date: Option<&str>, year: Option<&Value>) -> Option<NaiveDate> {
    if let Some(date) = date {
        let prefix = date.get(..10).unwrap_or(date);
        return prefix.parse::<NaiveDate>().ok();
    }
    let year = numeric(year?)?;
    NaiveDate::from_ymd_opt(year as i32, 1, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn oil_fund_shape_decodes_and_sorts_ascending() {
        let raw = json!({"data": [
            {"year": 2005, "total": 1000},
            {"year": 2004, "total": 900}
        ]});
        let points = decode_points(&raw).unwrap();

        assert_eq!(
            points,
            vec![
                DataPoint::new(d(2004, 1, 1), 900.0),
                DataPoint::new(d(2005, 1, 1), 1000.0),
            ]
        );
    }

    #[test]
    fn date_value_shape_decodes() {
        let raw = json!({"data": [
            {"date": "2021-06-15", "value": 3.5},
            {"date": "2021-01-15T00:00:00", "value": 1.5}
        ]});
        let points = decode_points(&raw).unwrap();

        assert_eq!(points[0], DataPoint::new(d(2021, 1, 15), 1.5));
        assert_eq!(points[1], DataPoint::new(d(2021, 6, 15), 3.5));
    }

    #[test]
    fn amount_is_the_last_value_fallback() {
        let raw = json!({"data": [{"year": 2020, "amount": 7}]});
        let points = decode_points(&raw).unwrap();
        assert_eq!(points[0].value, 7.0);
    }

    #[test]
    fn entries_without_dates_or_values_are_skipped() {
        let raw = json!({"data": [
            {"value": 1.0},
            {"year": 2020},
            {"date": "junk", "value": 2.0},
            {"year": 2021, "value": 4.0}
        ]});
        let points = decode_points(&raw).unwrap();
        assert_eq!(points, vec![DataPoint::new(d(2021, 1, 1), 4.0)]);
    }

    #[test]
    fn missing_data_array_is_a_format_error() {
        for raw in [json!({}), json!({"data": "nope"}), json!({"data": {}})] {
            assert_eq!(decode_points(&raw).unwrap_err().kind(), ErrorKind::Format);
        }
    }

    #[test]
    fn statnett_shapes_decode_identically() {
        let legacy = json!([
            {"Date": "2020-01-01", "Production": 400.0, "Consumption": 380.0},
            {"Date": "2020-01-02", "Production": 410.0, "Consumption": 395.0, "Net": 99.0}
        ]);
        let modern = json!({"data": [
            {"date": "2020-01-01", "production": 400.0, "consumption": 380.0},
            {"date": "2020-01-02", "production": 410.0, "consumption": 395.0, "net": 99.0}
        ]});

        let a = decode_statnett(&legacy).unwrap();
        let b = decode_statnett(&modern).unwrap();

        assert_eq!(a.production, b.production);
        assert_eq!(a.consumption, b.consumption);
        assert_eq!(a.net, b.net);

        // Explicit net wins; otherwise production - consumption.
        assert_eq!(a.net[0].value, 20.0);
        assert_eq!(a.net[1].value, 99.0);
        assert_eq!(a.net[0].date, d(2020, 1, 1));
    }

    #[test]
    fn statnett_without_data_array_is_a_format_error() {
        assert_eq!(
            decode_statnett(&json!({"rows": []})).unwrap_err().kind(),
            ErrorKind::Format
        );
    }
}
