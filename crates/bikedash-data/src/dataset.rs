//! Process-owned dataset state and range filtering.
//!
//! [`Dataset`] replaces ambient module-level tables with one explicitly
//! constructed value: both record vectors plus the daily table's date
//! bounds, loaded once at startup and read-only afterwards. Range filtering
//! is the only per-interaction operation that touches it.

use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use bikedash_core::error::{DashboardError, Result};
use bikedash_core::models::{DailyRecord, DateRange, HourlyRecord};

/// The two immutable source tables and their date bounds.
///
/// Selected ranges are clamped to `[min_date, max_date]`; the bounds come
/// from the daily table, which defines the selectable window.
#[derive(Debug, Clone)]
pub struct Dataset {
    daily: Vec<DailyRecord>,
    hourly: Vec<HourlyRecord>,
    min_date: NaiveDate,
    max_date: NaiveDate,
}

impl Dataset {
    /// Assemble a dataset from already-parsed tables.
    ///
    /// `source` names the daily file for error reporting. Fails with
    /// [`DashboardError::EmptyDataset`] when the daily table has no rows,
    /// since no date bounds exist to select against.
    pub fn from_tables(
        daily: Vec<DailyRecord>,
        hourly: Vec<HourlyRecord>,
        source: &Path,
    ) -> Result<Self> {
        let min_date = daily
            .iter()
            .map(|r| r.date)
            .min()
            .ok_or_else(|| DashboardError::EmptyDataset(source.to_path_buf()))?;
        // A non-empty table has both a min and a max.
        let max_date = daily.iter().map(|r| r.date).max().unwrap_or(min_date);

        debug!(
            "Dataset ready: {} daily rows, {} hourly rows, {} .. {}",
            daily.len(),
            hourly.len(),
            min_date,
            max_date
        );

        Ok(Self {
            daily,
            hourly,
            min_date,
            max_date,
        })
    }

    pub fn daily(&self) -> &[DailyRecord] {
        &self.daily
    }

    pub fn hourly(&self) -> &[HourlyRecord] {
        &self.hourly
    }

    /// Earliest date in the daily table.
    pub fn min_date(&self) -> NaiveDate {
        self.min_date
    }

    /// Latest date in the daily table.
    pub fn max_date(&self) -> NaiveDate {
        self.max_date
    }

    /// The range covering the whole dataset.
    pub fn full_range(&self) -> DateRange {
        DateRange::full(self.min_date, self.max_date)
    }

    // ── Range Filter ──────────────────────────────────────────────────────────

    /// Daily rows with `range.start <= date <= range.end`, original order
    /// preserved. An empty result is valid and flows through aggregation.
    pub fn filter_daily(&self, range: &DateRange) -> Vec<DailyRecord> {
        self.daily
            .iter()
            .filter(|r| range.contains(r.date))
            .copied()
            .collect()
    }

    /// Hourly rows with `range.start <= date <= range.end`, original order
    /// preserved.
    pub fn filter_hourly(&self, range: &DateRange) -> Vec<HourlyRecord> {
        self.hourly
            .iter()
            .filter(|r| range.contains(r.date))
            .copied()
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
