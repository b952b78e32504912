//! Data layer for the bike rental dashboard.
//!
//! Responsible for loading the daily and hourly CSV tables, holding the
//! in-memory dataset with its date bounds, filtering by date range and
//! running the fixed set of aggregations behind each dashboard view.

pub mod aggregator;
pub mod analysis;
pub mod dataset;
pub mod loader;

pub use bikedash_core as core;
