//! The five fixed aggregations over filtered rental tables.
//!
//! Each function is a pure fold from one filtered table to one summary
//! table: grouping keys go through a `BTreeMap` so the output is ordered by
//! key with every present group appearing exactly once (absent groups are
//! omitted, never zero-filled). Empty input yields empty output.

use std::collections::BTreeMap;

use bikedash_core::models::{DailyRecord, HourlyRecord};

// ── Summary rows ──────────────────────────────────────────────────────────────

/// One calendar month of summed rentals.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTrendRow {
    /// Month key formatted `"YYYY-MM"`.
    pub month: String,
    /// Summed casual rentals for the month.
    pub casual_sum: u64,
    /// Summed registered rentals for the month.
    pub registered_sum: u64,
    /// Summed total rentals (`cnt`) for the month.
    pub total_rent: u64,
}

/// Max / mean / min / sum of `cnt` within one group.
#[derive(Debug, Clone, PartialEq)]
pub struct RentStats {
    pub cnt_max: u32,
    pub cnt_mean: f64,
    pub cnt_min: u32,
    pub cnt_sum: u64,
}

/// Rental statistics for one value of a binary day flag.
///
/// Only flag values present in the filtered input appear; consumers must
/// treat a missing flag as "no data", not index blindly.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagRentRow {
    /// The flag value this row describes (0 or 1).
    pub flag: u8,
    pub stats: RentStats,
}

/// Summed rentals for one (working-day, weather) combination.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkdayWeatherRow {
    pub workingday: u8,
    pub weather_situation: u8,
    pub cnt_sum: u64,
}

/// Mean hourly rentals for one (working-day, hour) combination.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyMeanRow {
    pub workingday: u8,
    /// Hour of day, ascending within each `workingday` partition.
    pub hr: u8,
    pub cnt_mean: f64,
}

// ── Accumulators ──────────────────────────────────────────────────────────────

/// Running max/mean/min/sum over `cnt` values.
#[derive(Debug, Clone, Default)]
struct CntStatsAcc {
    cnt_max: u32,
    cnt_min: u32,
    cnt_sum: u64,
    count: u64,
}

impl CntStatsAcc {
    fn add(&mut self, cnt: u32) {
        if self.count == 0 {
            self.cnt_max = cnt;
            self.cnt_min = cnt;
        } else {
            self.cnt_max = self.cnt_max.max(cnt);
            self.cnt_min = self.cnt_min.min(cnt);
        }
        self.cnt_sum += u64::from(cnt);
        self.count += 1;
    }

    fn finish(&self) -> RentStats {
        // Callers only finish groups that accumulated at least one row.
        let mean = if self.count == 0 {
            0.0
        } else {
            self.cnt_sum as f64 / self.count as f64
        };
        RentStats {
            cnt_max: self.cnt_max,
            cnt_mean: mean,
            cnt_min: self.cnt_min,
            cnt_sum: self.cnt_sum,
        }
    }
}

/// Running sum and count for a mean.
#[derive(Debug, Clone, Default)]
struct MeanAcc {
    sum: u64,
    count: u64,
}

impl MeanAcc {
    fn add(&mut self, cnt: u32) {
        self.sum += u64::from(cnt);
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }
}

// ── Aggregations ──────────────────────────────────────────────────────────────

/// Group daily rows by calendar month, summing `casual`, `registered` and
/// `cnt`. Key format: `"%Y-%m"`. Output ascending by month; months with no
/// rows in the input are absent.
pub fn monthly_trend(daily: &[DailyRecord]) -> Vec<MonthlyTrendRow> {
    let mut map: BTreeMap<String, (u64, u64, u64)> = BTreeMap::new();

    for rec in daily {
        let key = rec.date.format("%Y-%m").to_string();
        let entry = map.entry(key).or_default();
        entry.0 += u64::from(rec.casual);
        entry.1 += u64::from(rec.registered);
        entry.2 += u64::from(rec.cnt);
    }

    map.into_iter()
        .map(|(month, (casual_sum, registered_sum, total_rent))| MonthlyTrendRow {
            month,
            casual_sum,
            registered_sum,
            total_rent,
        })
        .collect()
}

/// Group daily rows by the `holiday` flag, computing max/mean/min/sum of
/// `cnt` per group. A flag value absent from the input is absent from the
/// output.
pub fn holiday_rent(daily: &[DailyRecord]) -> Vec<FlagRentRow> {
    flag_rent(daily, |rec| rec.holiday)
}

/// Group daily rows by the `workingday` flag; otherwise identical to
/// [`holiday_rent`].
pub fn working_day_rent(daily: &[DailyRecord]) -> Vec<FlagRentRow> {
    flag_rent(daily, |rec| rec.workingday)
}

/// Group daily rows by the (`workingday`, `weather_situation`) pair, summing
/// `cnt`. Every combination present in the input appears exactly once,
/// ordered by the pair; absent combinations are omitted.
pub fn working_day_weather(daily: &[DailyRecord]) -> Vec<WorkdayWeatherRow> {
    let mut map: BTreeMap<(u8, u8), u64> = BTreeMap::new();

    for rec in daily {
        *map.entry((rec.workingday, rec.weather_situation)).or_default() +=
            u64::from(rec.cnt);
    }

    map.into_iter()
        .map(|((workingday, weather_situation), cnt_sum)| WorkdayWeatherRow {
            workingday,
            weather_situation,
            cnt_sum,
        })
        .collect()
}

/// Group hourly rows by the (`workingday`, `hr`) pair, computing the
/// arithmetic mean of `cnt`. The `BTreeMap` key order guarantees `hr`
/// ascending within each `workingday` partition, which the hourly chart
/// relies on.
pub fn hourly_mean_trend(hourly: &[HourlyRecord]) -> Vec<HourlyMeanRow> {
    let mut map: BTreeMap<(u8, u8), MeanAcc> = BTreeMap::new();

    for rec in hourly {
        map.entry((rec.workingday, rec.hr)).or_default().add(rec.cnt);
    }

    map.into_iter()
        .map(|((workingday, hr), acc)| HourlyMeanRow {
            workingday,
            hr,
            cnt_mean: acc.mean(),
        })
        .collect()
}

// ── Private ───────────────────────────────────────────────────────────────────

/// Generic flag-split driver shared by the holiday and working-day splits.
///
/// `key_fn` selects the grouping flag from a record.
fn flag_rent(daily: &[DailyRecord], key_fn: impl Fn(&DailyRecord) -> u8) -> Vec<FlagRentRow> {
    let mut map: BTreeMap<u8, CntStatsAcc> = BTreeMap::new();

    for rec in daily {
        map.entry(key_fn(rec)).or_default().add(rec.cnt);
    }

    map.into_iter()
        .map(|(flag, acc)| FlagRentRow {
            flag,
            stats: acc.finish(),
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
