//! Terminal UI layer for the bike rental dashboard.
//!
//! Provides themes, the three dashboard views (monthly trend, flag splits,
//! hourly means) and the main application event loop built on top of
//! [`ratatui`].

pub mod app;
pub mod hourly_view;
pub mod split_view;
pub mod themes;
pub mod trend_view;

pub use bikedash_core as core;
