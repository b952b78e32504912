use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// One calendar day of rental activity from the daily table.
///
/// Invariant of the source data (assumed, not enforced): `cnt` equals
/// `casual + registered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Calendar date of the observation, unique within the table.
    pub date: NaiveDate,
    /// Holiday flag: 1 when the day is a public holiday, else 0.
    pub holiday: u8,
    /// Working-day flag: 1 on standard business days, else 0.
    pub workingday: u8,
    /// Ordinal weather code, 1 (clear) through 4 (severe).
    pub weather_situation: u8,
    /// Rentals by casual (unregistered) riders.
    pub casual: u32,
    /// Rentals by registered riders.
    pub registered: u32,
    /// Total rentals for the day.
    pub cnt: u32,
}

/// One (day, hour) slot of rental activity from the hourly table.
///
/// For a given date the 24 hourly `cnt` values sum to the daily table's
/// `cnt` (a consistency property of the source data, assumed here).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyRecord {
    /// Calendar date of the observation.
    pub date: NaiveDate,
    /// Hour of day, 0 through 23.
    pub hr: u8,
    /// Holiday flag: 1 when the day is a public holiday, else 0.
    pub holiday: u8,
    /// Working-day flag: 1 on standard business days, else 0.
    pub workingday: u8,
    /// Ordinal weather code, 1 (clear) through 4 (severe).
    pub weather_situation: u8,
    /// Rentals by casual (unregistered) riders.
    pub casual: u32,
    /// Rentals by registered riders.
    pub registered: u32,
    /// Total rentals for the hour.
    pub cnt: u32,
}

// ── DateRange ─────────────────────────────────────────────────────────────────

/// An inclusive pair of calendar dates selected for one analysis pass.
///
/// `start <= end` always holds; construction fails otherwise. Ranges are
/// request-scoped values: built once per user interaction, consumed by the
/// filter, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Construct a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DashboardError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The full range covering an entire dataset.
    pub fn full(min: NaiveDate, max: NaiveDate) -> Self {
        // min/max come from the same table, so min <= max.
        Self {
            start: min.min(max),
            end: max.max(min),
        }
    }

    /// A single-day range.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// `true` when `date` falls inside the range, both ends inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered, counting both endpoints.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Clamp both endpoints into `[min, max]`.
    ///
    /// Clamping is monotone, so the result still satisfies `start <= end`.
    pub fn clamp_to(&self, min: NaiveDate, max: NaiveDate) -> Self {
        Self {
            start: self.start.clamp(min, max),
            end: self.end.clamp(min, max),
        }
    }

    /// Move the start by `days`, keeping it within `[min, end]`.
    pub fn shift_start(&self, days: i64, min: NaiveDate) -> Self {
        let moved = self.start + chrono::Duration::days(days);
        Self {
            start: moved.clamp(min, self.end),
            end: self.end,
        }
    }

    /// Move the end by `days`, keeping it within `[start, max]`.
    pub fn shift_end(&self, days: i64, max: NaiveDate) -> Self {
        let moved = self.end + chrono::Duration::days(days);
        Self {
            start: self.start,
            end: moved.clamp(self.start, max),
        }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
