//! Norges Bank SDMX-JSON decoding.
//!
//! Observations live under `data.dataSets[0].series[<key>].observations`
//! as a map from a stringified integer offset to an observation tuple.
//! The offset counts months from the series' start period, and that start
//! period is NOT in the payload (not in the subset of the API we consume);
//! the caller supplies it as an [`SdmxEpoch`]. If the upstream start
//! period ever moves, decoding will silently shift every date, so callers
//! can compare [`DecodeStats::observations`] against what they expect.

use std::collections::BTreeMap;
use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::data::numeric;
use crate::domain::{DataPoint, SdmxEpoch, SeriesSelector, sort_by_date};
use crate::error::AppError;

/// The conventional key of single-series payloads (exchange rates, policy rate).
const FIXED_SERIES_KEY: &str = "0:0:0:0";

#[derive(Debug, Deserialize)]
struct Payload {
    data: Option<Envelope>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "dataSets", default)]
    data_sets: Vec<DataSet>,
}

#[derive(Debug, Deserialize)]
struct DataSet {
    // BTreeMap keeps series iteration deterministic when the payload
    // carries more than one key.
    series: Option<BTreeMap<String, Series>>,
}

#[derive(Debug, Deserialize)]
struct Series {
    #[serde(default)]
    observations: HashMap<String, Vec<Value>>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeStats {
    /// Observation keys present on the selected series.
    pub observations: usize,
    pub emitted: usize,
}

/// Decode one series out of an SDMX-JSON payload.
pub fn decode_series(
    raw: &Value,
    epoch: SdmxEpoch,
    selector: SeriesSelector,
) -> Result<Vec<DataPoint>, AppError> {
    decode_series_with_stats(raw, epoch, selector).map(|(points, _)| points)
}

/// As [`decode_series`], also reporting how many observation keys the
/// selected series carried.
pub fn decode_series_with_stats(
    raw: &Value,
    epoch: SdmxEpoch,
    selector: SeriesSelector,
) -> Result<(Vec<DataPoint>, DecodeStats), AppError> {
    let payload: Payload = Payload::deserialize(raw)
        .map_err(|e| AppError::format(format!("Malformed SDMX payload: {e}")))?;

    let Some(envelope) = payload.data else {
        return Err(AppError::format("SDMX payload has no data object"));
    };
    let Some(data_set) = envelope.data_sets.first() else {
        return Err(AppError::format("SDMX payload has no dataSets[0]"));
    };
    let Some(series) = &data_set.series else {
        return Err(AppError::format("SDMX dataSets[0] has no series"));
    };

    let mut stats = DecodeStats::default();
    let Some(selected) = select_series(series, selector) else {
        return Ok((Vec::new(), stats));
    };
    stats.observations = selected.observations.len();

    let mut points = Vec::with_capacity(stats.observations);
    for (obs_key, tuple) in &selected.observations {
        // The tuple's first element is the value; trailing elements are
        // status flags and ignored.
        let Ok(offset) = obs_key.parse::<i64>() else {
            continue;
        };
        let Some(value) = tuple.first().and_then(numeric) else {
            continue;
        };
        let Some(date) = offset_to_date(epoch, offset) else {
            continue;
        };
        points.push(DataPoint::new(date, value));
    }

    sort_by_date(&mut points);
    stats.emitted = points.len();
    Ok((points, stats))
}

fn select_series(
    series: &BTreeMap<String, Series>,
    selector: SeriesSelector,
) -> Option<&Series> {
    match selector {
        SeriesSelector::First => series
            .get(FIXED_SERIES_KEY)
            .or_else(|| series.values().next()),
        SeriesSelector::MostObservations => {
            // Strict > keeps the first of equally sized series, and a
            // payload of only observation-less series selects nothing.
            let mut best: Option<&Series> = None;
            let mut best_count = 0;
            for candidate in series.values() {
                let count = candidate.observations.len();
                if count > best_count {
                    best_count = count;
                    best = Some(candidate);
                }
            }
            best
        }
    }
}

/// Month arithmetic from the epoch: offset 0 is the epoch period itself.
fn offset_to_date(epoch: SdmxEpoch, offset: i64) -> Option<chrono::NaiveDate> {
    let month = i64::from(epoch.month) + offset;
    let year = i64::from(epoch.year) + (month - 1).div_euclid(12);
    let actual_month = (month - 1).rem_euclid(12) + 1;
    chrono::NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, actual_month as u32, 1)
}
