//! Declarative chart catalog.
//!
//! One row per indicator: where the data lives, which decoder understands
//! it, and the per-source configuration that decoder needs (SSB content
//! predicates, SDMX epoch/selector). The pipeline consumes rows; nothing
//! here fetches or parses anything.

use crate::domain::types::{ChartKind, SdmxEpoch, SeriesSelector};

/// Which decoder handles a source, plus its out-of-band configuration.
#[derive(Debug, Clone, Copy)]
pub enum SourceKind {
    /// SSB PXWeb cube. The predicate list selects the content series.
    Ssb {
        predicates: &'static [&'static str],
    },
    /// Norges Bank SDMX-JSON. The epoch is the calendar period of
    /// observation offset 0 and cannot be derived from the payload.
    Sdmx {
        epoch: SdmxEpoch,
        selector: SeriesSelector,
    },
    /// Pre-shaped local JSON (`{data: [{year, total}]}` or `{data: [{date, value}]}`).
    StaticPoints,
    /// Statnett production/consumption JSON (either shape).
    Statnett,
}

#[derive(Debug, Clone, Copy)]
pub struct ChartSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub unit: Option<&'static str>,
    /// `https?://` URLs are fetched; anything else is read as a local path.
    pub url: &'static str,
    pub source: SourceKind,
    pub kind: ChartKind,
}

/// Content-series labels we recognise across SSB cubes, scanned in order.
/// Matching is case-sensitive substring containment against the cube's
/// `ContentsCode` labels; the first hit wins. When nothing matches the
/// decoder falls back to the first series, which may be wrong for exotic
/// cubes but keeps the chart alive.
pub const CONTENT_LABEL_PREDICATES: &[&str] = &[
    "Consumer Price Index (2015=100)",
    "CPI-ATE",
    "Unemployment rate (LFS)",
    "Producer Price Index",
    "House Price Index",
    "Wage Index",
    "GDP",
    "Trade balance",
    "Bankruptcies",
    "Population",
    "Construction cost",
    "Industrial production",
    "Retail sales",
    "Export",
    "Import",
    "Employment",
    "Credit indicator",
    "Monetary aggregates",
    "Salmon export",
];

const SSB: SourceKind = SourceKind::Ssb {
    predicates: CONTENT_LABEL_PREDICATES,
};

/// Exchange-rate series start 2015-09; policy rate and government debt
/// start 2000-01. These are upstream conventions, not payload facts.
const EPOCH_EXCHANGE: SdmxEpoch = SdmxEpoch::new(2015, 9);
const EPOCH_RATES: SdmxEpoch = SdmxEpoch::new(2000, 1);

static CHARTS: &[ChartSpec] = &[
    ChartSpec {
        id: "cpi",
        title: "Consumer Price Index",
        unit: Some("index, 2015=100"),
        url: "https://data.ssb.no/api/v0/dataset/1086.json?lang=en",
        source: SSB,
        kind: ChartKind::Line,
    },
    ChartSpec {
        id: "unemployment",
        title: "Unemployment Rate",
        unit: Some("percent"),
        url: "https://data.ssb.no/api/v0/dataset/1054.json?lang=en",
        source: SSB,
        kind: ChartKind::Line,
    },
    ChartSpec {
        id: "house-prices",
        title: "House Price Index",
        unit: None,
        url: "https://data.ssb.no/api/v0/dataset/1060.json?lang=en",
        source: SSB,
        kind: ChartKind::Line,
    },
    ChartSpec {
        id: "producer-prices",
        title: "Producer Price Index",
        unit: None,
        url: "https://data.ssb.no/api/v0/dataset/26426.json?lang=en",
        source: SSB,
        kind: ChartKind::Line,
    },
    ChartSpec {
        id: "wage-index",
        title: "Wage Index",
        unit: None,
        url: "https://data.ssb.no/api/v0/dataset/1124.json?lang=en",
        source: SSB,
        kind: ChartKind::Line,
    },
    ChartSpec {
        id: "bankruptcies",
        title: "Bankruptcies",
        unit: Some("number"),
        url: "https://data.ssb.no/api/v0/dataset/924816.json?lang=en",
        source: SSB,
        kind: ChartKind::Bar,
    },
    ChartSpec {
        id: "retail-sales",
        title: "Retail Sales",
        unit: Some("index"),
        url: "https://data.ssb.no/api/v0/dataset/1064.json?lang=en",
        source: SSB,
        kind: ChartKind::Line,
    },
    ChartSpec {
        id: "industrial-production",
        title: "Industrial Production",
        unit: Some("index"),
        url: "https://data.ssb.no/api/v0/dataset/27002.json?lang=en",
        source: SSB,
        kind: ChartKind::Line,
    },
    ChartSpec {
        id: "credit-indicator",
        title: "Credit Indicator",
        unit: Some("NOK million"),
        url: "https://data.ssb.no/api/v0/dataset/166326.json?lang=en",
        source: SSB,
        kind: ChartKind::Line,
    },
    ChartSpec {
        id: "salmon-export",
        title: "Salmon Export Value",
        unit: Some("NOK million"),
        url: "https://data.ssb.no/api/v0/dataset/1122.json?lang=en",
        source: SSB,
        kind: ChartKind::Line,
    },
    ChartSpec {
        id: "usd-nok",
        title: "USD/NOK Exchange Rate",
        unit: Some("NOK per USD"),
        url: "https://data.norges-bank.no/api/data/EXR/M.USD.NOK.SP?format=sdmx-json&startPeriod=2015-09&locale=en",
        source: SourceKind::Sdmx {
            epoch: EPOCH_EXCHANGE,
            selector: SeriesSelector::First,
        },
        kind: ChartKind::Line,
    },
    ChartSpec {
        id: "key-policy-rate",
        title: "Key Policy Rate",
        unit: Some("percent"),
        url: "https://data.norges-bank.no/api/data/IR/M.KPRA.SD.?format=sdmx-json&startPeriod=2000-01&locale=en",
        source: SourceKind::Sdmx {
            epoch: EPOCH_RATES,
            selector: SeriesSelector::First,
        },
        kind: ChartKind::Line,
    },
    ChartSpec {
        id: "government-debt",
        title: "Government Debt",
        unit: Some("NOK million"),
        url: "https://data.norges-bank.no/api/data/GOVT_KEYFIGURES/V_O+N_V+V_I+ATRI+V_IRS..B.GBON?format=sdmx-json&startPeriod=2000-01&locale=no",
        source: SourceKind::Sdmx {
            epoch: EPOCH_RATES,
            selector: SeriesSelector::MostObservations,
        },
        kind: ChartKind::Line,
    },
    ChartSpec {
        id: "oil-fund",
        title: "Oil Fund Total Value",
        unit: Some("billion NOK"),
        url: "data/oil-fund.json",
        source: SourceKind::StaticPoints,
        kind: ChartKind::Line,
    },
    ChartSpec {
        id: "statnett-production",
        title: "Electricity Production",
        unit: Some("MWh"),
        url: "data/statnett/production-consumption.json",
        source: SourceKind::Statnett,
        kind: ChartKind::Line,
    },
];

pub fn charts() -> &'static [ChartSpec] {
    CHARTS
}

pub fn find(id: &str) -> Option<&'static ChartSpec> {
    CHARTS.iter().find(|spec| spec.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_ids_are_unique() {
        for (i, a) in charts().iter().enumerate() {
            for b in &charts()[i + 1..] {
                assert_ne!(a.id, b.id, "duplicate chart id {}", a.id);
            }
        }
    }

    #[test]
    fn find_resolves_known_ids() {
        assert!(find("cpi").is_some());
        assert!(find("government-debt").is_some());
        assert!(find("nope").is_none());
    }
}
