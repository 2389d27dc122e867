//! Shared chart-loading pipeline used by every front-end command.
//!
//! One chart: fetch (or read) the raw JSON, route it to the decoder its
//! catalog row names, filter to the displayed year range, aggregate for
//! bar charts. The dashboard fans all catalog rows out in parallel and
//! keeps every per-chart outcome; one failing chart never blocks or
//! cancels the rest.

use rayon::prelude::*;
use serde_json::Value;

use crate::domain::catalog::{self, ChartSpec, SourceKind};
use crate::domain::{ChartKind, DataPoint, aggregate_monthly, filter_from_year};
use crate::error::AppError;
use crate::fetch::FetchClient;
use crate::{data, politics};

/// One chart's normalized series, ready for rendering.
#[derive(Debug, Clone)]
pub struct LoadedChart {
    pub spec: &'static ChartSpec,
    pub points: Vec<DataPoint>,
}

impl LoadedChart {
    pub fn latest(&self) -> Option<&DataPoint> {
        self.points.last()
    }

    /// Government in office at the latest observation.
    pub fn latest_government(&self) -> Option<&'static politics::PoliticalPeriod> {
        self.latest().and_then(|p| politics::lookup(p.date))
    }
}

/// Per-chart result of a dashboard load; failures are data, not aborts.
#[derive(Debug)]
pub struct ChartOutcome {
    pub spec: &'static ChartSpec,
    pub result: Result<LoadedChart, AppError>,
}

/// Load every catalog chart concurrently, settle-all semantics.
pub fn load_dashboard(client: &FetchClient, from_year: i32) -> Vec<ChartOutcome> {
    catalog::charts()
        .par_iter()
        .map(|spec| ChartOutcome {
            spec,
            result: load_chart(client, spec, from_year),
        })
        .collect()
}

/// Load and normalize a single chart.
pub fn load_chart(
    client: &FetchClient,
    spec: &'static ChartSpec,
    from_year: i32,
) -> Result<LoadedChart, AppError> {
    let raw = load_raw(client, spec.url)?;
    let points = decode(&raw, spec)?;

    let points = filter_from_year(points, from_year);
    if points.is_empty() {
        return Err(AppError::empty(format!(
            "{}: no data from {from_year} onwards",
            spec.title
        )));
    }

    let points = match spec.kind {
        ChartKind::Bar => aggregate_monthly(&points),
        ChartKind::Line => points,
    };

    Ok(LoadedChart { spec, points })
}

fn decode(raw: &Value, spec: &ChartSpec) -> Result<Vec<DataPoint>, AppError> {
    match spec.source {
        SourceKind::Ssb { predicates } => data::ssb::decode_cube(raw, predicates),
        SourceKind::Sdmx { epoch, selector } => data::sdmx::decode_series(raw, epoch, selector),
        SourceKind::StaticPoints => data::statics::decode_points(raw),
        SourceKind::Statnett => {
            data::statics::decode_statnett(raw).map(|series| series.production)
        }
    }
}

/// Remote sources go through the caching client; anything else is a
/// repository-local file.
fn load_raw(client: &FetchClient, url: &str) -> Result<Value, AppError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        return client.fetch(url);
    }

    let text = std::fs::read_to_string(url)
        .map_err(|e| AppError::io(format!("Failed to read {url}: {e}")))?;
    serde_json::from_str(&text).map_err(|e| AppError::format(format!("{url} is not JSON: {e}")))
}
