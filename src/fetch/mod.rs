//! HTTP fetching with caching and retry.
//!
//! - TTL response cache + in-flight request de-duplication (`client`)
//! - connection-quality timeout tiers and capped exponential backoff

pub mod client;

pub use client::*;
