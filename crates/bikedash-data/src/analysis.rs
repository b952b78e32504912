//! One-pass range analysis: filter both tables to a date range and run the
//! five fixed aggregations over the result.

use std::time::Instant;

use tracing::{debug, warn};

use bikedash_core::models::DateRange;

use crate::aggregator::{
    holiday_rent, hourly_mean_trend, monthly_trend, working_day_rent, working_day_weather,
    FlagRentRow, HourlyMeanRow, MonthlyTrendRow, WorkdayWeatherRow,
};
use crate::dataset::Dataset;

// ── Results ───────────────────────────────────────────────────────────────────

/// Everything the dashboard renders for one date range.
#[derive(Debug, Clone)]
pub struct RangeAnalysis {
    /// The inclusive range this analysis covers.
    pub range: DateRange,
    /// Monthly casual/registered/total sums, ascending by month.
    pub monthly: Vec<MonthlyTrendRow>,
    /// `cnt` statistics split by the holiday flag.
    pub holiday: Vec<FlagRentRow>,
    /// `cnt` statistics split by the working-day flag.
    pub working_day: Vec<FlagRentRow>,
    /// Summed `cnt` per (working-day, weather) combination.
    pub workday_weather: Vec<WorkdayWeatherRow>,
    /// Mean hourly `cnt` per (working-day, hour) combination.
    pub hourly: Vec<HourlyMeanRow>,
    /// Row counts and headline totals for the range.
    pub metadata: AnalysisMetadata,
}

impl RangeAnalysis {
    /// True when the range matched no daily rows at all.
    pub fn is_empty(&self) -> bool {
        self.metadata.daily_rows == 0
    }
}

/// Headline figures and provenance for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisMetadata {
    /// Daily rows that fell inside the range.
    pub daily_rows: usize,
    /// Hourly rows that fell inside the range.
    pub hourly_rows: usize,
    /// Summed casual rentals over the range.
    pub casual_total: u64,
    /// Summed registered rentals over the range.
    pub registered_total: u64,
    /// Summed total rentals over the range.
    pub total_rent: u64,
    /// Wall-clock time the analysis took.
    pub compute_time_seconds: f64,
}

// ── Analysis ──────────────────────────────────────────────────────────────────

/// Filter both tables to `range` and compute all five summaries.
///
/// An empty result is not an error: a range that matches no rows produces
/// empty summary tables, which the views render as "no data".
pub fn analyze_range(dataset: &Dataset, range: &DateRange) -> RangeAnalysis {
    let start = Instant::now();

    // Step 1: restrict both tables to the range.
    let daily = dataset.filter_daily(range);
    let hourly = dataset.filter_hourly(range);

    if daily.is_empty() {
        warn!(%range, "no daily rows in range, summaries will be empty");
    }

    // Step 2: headline totals straight off the filtered daily table.
    let casual_total: u64 = daily.iter().map(|r| u64::from(r.casual)).sum();
    let registered_total: u64 = daily.iter().map(|r| u64::from(r.registered)).sum();
    let total_rent: u64 = daily.iter().map(|r| u64::from(r.cnt)).sum();

    // Step 3: the five fixed aggregations.
    let monthly = monthly_trend(&daily);
    let holiday = holiday_rent(&daily);
    let working_day = working_day_rent(&daily);
    let workday_weather = working_day_weather(&daily);
    let hourly_trend = hourly_mean_trend(&hourly);

    let metadata = AnalysisMetadata {
        daily_rows: daily.len(),
        hourly_rows: hourly.len(),
        casual_total,
        registered_total,
        total_rent,
        compute_time_seconds: start.elapsed().as_secs_f64(),
    };

    debug!(
        daily_rows = metadata.daily_rows,
        hourly_rows = metadata.hourly_rows,
        total_rent = metadata.total_rent,
        compute_time_seconds = metadata.compute_time_seconds,
        "range analysis complete"
    );

    RangeAnalysis {
        range: *range,
        monthly,
        holiday,
        working_day,
        workday_weather,
        hourly: hourly_trend,
        metadata,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
