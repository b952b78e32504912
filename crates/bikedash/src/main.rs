mod bootstrap;

use anyhow::{Context, Result};
use bikedash_core::models::DateRange;
use bikedash_core::settings::Settings;
use bikedash_data::dataset::Dataset;
use bikedash_data::loader::load_dataset;
use bikedash_ui::app::{App, ViewMode};

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Bike rental dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Day file: {}, Hour file: {}, View: {}, Theme: {}",
        settings.day_file.display(),
        settings.hour_file.display(),
        settings.view,
        settings.theme
    );

    let dataset = load_dataset(&settings.day_file, &settings.hour_file)
        .context("failed to load the rental dataset")?;

    let range = initial_range(&dataset, &settings)?;
    tracing::info!(%range, "initial range selected");

    let app = App::new(
        dataset,
        range,
        &settings.theme,
        ViewMode::from_name(&settings.view),
    );
    app.run()?;

    Ok(())
}

/// Resolve the initial date range from the CLI dates, clamped to the dataset.
///
/// Dates the user did not supply default to the corresponding dataset bound.
/// A start after the end is rejected at startup rather than silently
/// reordered.
fn initial_range(dataset: &Dataset, settings: &Settings) -> Result<DateRange> {
    match (settings.start_date, settings.end_date) {
        (None, None) => Ok(dataset.full_range()),
        (start, end) => {
            let start = start.unwrap_or_else(|| dataset.min_date());
            let end = end.unwrap_or_else(|| dataset.max_date());
            let range = DateRange::new(start, end)
                .context("invalid --start-date/--end-date combination")?;
            Ok(range.clamp_to(dataset.min_date(), dataset.max_date()))
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bikedash_core::models::DailyRecord;
    use chrono::NaiveDate;
    use std::path::Path;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn make_dataset() -> Dataset {
        let rows: Vec<DailyRecord> = (1..=31)
            .map(|i| DailyRecord {
                date: d(2021, 1, i),
                holiday: 0,
                workingday: 1,
                weather_situation: 1,
                casual: 10,
                registered: 90,
                cnt: 100,
            })
            .collect();
        Dataset::from_tables(rows, vec![], Path::new("day.csv")).unwrap()
    }

    fn make_settings(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Settings {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut settings = Settings::load_with_last_used_impl(
            vec!["bikedash".into()],
            &tmp.path().join("last_used.json"),
        );
        settings.start_date = start;
        settings.end_date = end;
        settings
    }

    #[test]
    fn test_initial_range_defaults_to_full_span() {
        let ds = make_dataset();
        let range = initial_range(&ds, &make_settings(None, None)).unwrap();
        assert_eq!(range.start(), d(2021, 1, 1));
        assert_eq!(range.end(), d(2021, 1, 31));
    }

    #[test]
    fn test_initial_range_partial_dates_fill_from_bounds() {
        let ds = make_dataset();
        let range = initial_range(&ds, &make_settings(Some(d(2021, 1, 10)), None)).unwrap();
        assert_eq!(range.start(), d(2021, 1, 10));
        assert_eq!(range.end(), d(2021, 1, 31));
    }

    #[test]
    fn test_initial_range_clamped_to_dataset() {
        let ds = make_dataset();
        let range =
            initial_range(&ds, &make_settings(Some(d(2020, 6, 1)), Some(d(2022, 6, 1)))).unwrap();
        assert_eq!(range.start(), d(2021, 1, 1));
        assert_eq!(range.end(), d(2021, 1, 31));
    }

    #[test]
    fn test_initial_range_rejects_inverted_dates() {
        let ds = make_dataset();
        let result = initial_range(&ds, &make_settings(Some(d(2021, 1, 20)), Some(d(2021, 1, 5))));
        assert!(result.is_err());
    }
}
