//! CSV ingestion for the two rental tables.
//!
//! Reads the daily and hourly delimited files (header row, columns by name),
//! normalises the `dteday` column into [`chrono::NaiveDate`] values, and
//! produces typed records for downstream filtering and aggregation. Source
//! columns this dashboard never consumes (season, temperature, humidity, …)
//! are ignored by name.

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use bikedash_core::error::{DashboardError, Result};
use bikedash_core::models::{DailyRecord, HourlyRecord};

use crate::dataset::Dataset;

/// Date format of the `dteday` column.
const DATE_FORMAT: &str = "%Y-%m-%d";

// ── Raw rows ──────────────────────────────────────────────────────────────────

/// Daily row as it appears on disk, before date normalisation.
#[derive(Debug, Deserialize)]
struct RawDailyRow {
    dteday: String,
    holiday: u8,
    workingday: u8,
    weathersit: u8,
    casual: u32,
    registered: u32,
    cnt: u32,
}

/// Hourly row as it appears on disk, before date normalisation.
#[derive(Debug, Deserialize)]
struct RawHourlyRow {
    dteday: String,
    hr: u8,
    holiday: u8,
    workingday: u8,
    weathersit: u8,
    casual: u32,
    registered: u32,
    cnt: u32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and parse the daily table from `path`.
///
/// Row order is preserved. Fails with [`DashboardError::DateParse`] on the
/// first unparseable date (parse failures are fatal at load time), with
/// [`DashboardError::FileRead`] when the file cannot be opened, and with
/// [`DashboardError::CsvParse`] on malformed records.
pub fn load_daily(path: &Path) -> Result<Vec<DailyRecord>> {
    let mut reader = open_csv(path)?;
    let mut records = Vec::new();

    for (idx, row) in reader.deserialize::<RawDailyRow>().enumerate() {
        let row = row?;
        let date = parse_date(&row.dteday, record_number(idx))?;
        records.push(DailyRecord {
            date,
            holiday: row.holiday,
            workingday: row.workingday,
            weather_situation: row.weathersit,
            casual: row.casual,
            registered: row.registered,
            cnt: row.cnt,
        });
    }

    debug!("Loaded {} daily records from {}", records.len(), path.display());
    Ok(records)
}

/// Load and parse the hourly table from `path`.
///
/// Same contract as [`load_daily`], plus the `hr` column.
pub fn load_hourly(path: &Path) -> Result<Vec<HourlyRecord>> {
    let mut reader = open_csv(path)?;
    let mut records = Vec::new();

    for (idx, row) in reader.deserialize::<RawHourlyRow>().enumerate() {
        let row = row?;
        let date = parse_date(&row.dteday, record_number(idx))?;
        records.push(HourlyRecord {
            date,
            hr: row.hr,
            holiday: row.holiday,
            workingday: row.workingday,
            weather_situation: row.weathersit,
            casual: row.casual,
            registered: row.registered,
            cnt: row.cnt,
        });
    }

    debug!(
        "Loaded {} hourly records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Load both tables and assemble the process-wide [`Dataset`].
pub fn load_dataset(day_path: &Path, hour_path: &Path) -> Result<Dataset> {
    let daily = load_daily(day_path)?;
    let hourly = load_hourly(hour_path)?;
    Dataset::from_tables(daily, hourly, day_path)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn open_csv(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    let file = std::fs::File::open(path).map_err(|e| DashboardError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(csv::Reader::from_reader(file))
}

/// 1-based data-record number (the header row is not counted).
fn record_number(idx: usize) -> u64 {
    idx as u64 + 1
}

fn parse_date(value: &str, record: u64) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| DashboardError::DateParse {
        value: value.to_string(),
        record,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
