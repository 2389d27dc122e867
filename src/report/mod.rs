//! Terminal reporting: dashboard summary table and single-series listings.

pub mod format;

pub use format::*;
