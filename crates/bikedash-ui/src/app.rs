//! Main application state and TUI event loop for the bike rental dashboard.
//!
//! [`App`] owns the loaded dataset, the currently selected date range and the
//! analysis computed from it.  Every key that changes the range or the view
//! recomputes the analysis synchronously before the next draw.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame, Terminal,
};
use tracing::debug;

use bikedash_core::models::DateRange;
use bikedash_data::analysis::{analyze_range, RangeAnalysis};
use bikedash_data::dataset::Dataset;

use crate::hourly_view;
use crate::split_view;
use crate::themes::Theme;
use crate::trend_view;

// ── ViewMode ──────────────────────────────────────────────────────────────────

/// Which view the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Monthly rental trend with headline metrics.
    Trend,
    /// Holiday / working-day splits and the weather breakdown.
    Splits,
    /// Mean rentals per hour of day.
    Hourly,
}

impl ViewMode {
    /// Next view in Tab order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Trend => Self::Splits,
            Self::Splits => Self::Hourly,
            Self::Hourly => Self::Trend,
        }
    }

    /// Previous view in Tab order, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            Self::Trend => Self::Hourly,
            Self::Splits => Self::Trend,
            Self::Hourly => Self::Splits,
        }
    }

    /// Parse a view name from the CLI, defaulting to the trend view.
    pub fn from_name(name: &str) -> Self {
        match name {
            "splits" => Self::Splits,
            "hourly" => Self::Hourly,
            _ => Self::Trend,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Trend => "Trend",
            Self::Splits => "Splits",
            Self::Hourly => "Hourly",
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Current view mode.
    pub view_mode: ViewMode,
    /// The loaded dataset, fixed for the lifetime of the app.
    dataset: Dataset,
    /// Currently selected inclusive date range.
    pub range: DateRange,
    /// Analysis of the current range, recomputed on every range change.
    pub analysis: RangeAnalysis,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    /// Construct the application and compute the initial analysis.
    pub fn new(dataset: Dataset, range: DateRange, theme_name: &str, view_mode: ViewMode) -> Self {
        let analysis = analyze_range(&dataset, &range);
        Self {
            theme: Theme::from_name(theme_name),
            view_mode,
            dataset,
            range,
            analysis,
            should_quit: false,
        }
    }

    // ── Public event loop ─────────────────────────────────────────────────────

    /// Run the interactive TUI until the user quits.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so the loop stays
    /// responsive without busy-waiting.  The loop exits on `q`, `Q`, or
    /// `Ctrl+C`.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    /// Apply one key event to the application state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab => self.view_mode = self.view_mode.next(),
            KeyCode::BackTab => self.view_mode = self.view_mode.prev(),
            KeyCode::Char('a') | KeyCode::Char('A') => self.shift_start(-1),
            KeyCode::Char('d') | KeyCode::Char('D') => self.shift_start(1),
            KeyCode::Left => self.shift_end(-1),
            KeyCode::Right => self.shift_end(1),
            KeyCode::Char('r') | KeyCode::Char('R') => self.reset_range(),
            _ => {}
        }
    }

    /// Move the range start by `days`, clamped to the dataset bounds, and
    /// recompute.  The start never crosses the end, so the range stays valid.
    pub fn shift_start(&mut self, days: i64) {
        let shifted = self.range.shift_start(days, self.dataset.min_date());
        self.set_range(shifted);
    }

    /// Move the range end by `days`, clamped to the dataset bounds, and
    /// recompute.
    pub fn shift_end(&mut self, days: i64) {
        let shifted = self.range.shift_end(days, self.dataset.max_date());
        self.set_range(shifted);
    }

    /// Reset the range to the full dataset span.
    pub fn reset_range(&mut self) {
        self.set_range(self.dataset.full_range());
    }

    fn set_range(&mut self, range: DateRange) {
        if range == self.range {
            return;
        }
        debug!(%range, "range changed, recomputing analysis");
        self.range = range;
        self.analysis = analyze_range(&self.dataset, &self.range);
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    fn render(&self, frame: &mut Frame) {
        let chunks =
            Layout::vertical([Constraint::Length(4), Constraint::Min(5)]).split(frame.area());

        let header = Paragraph::new(Text::from(self.header_lines()));
        frame.render_widget(header, chunks[0]);

        if self.analysis.is_empty() {
            trend_view::render_no_data(frame, chunks[1], &self.theme);
            return;
        }

        match self.view_mode {
            ViewMode::Trend => {
                trend_view::render_trend_view(frame, chunks[1], &self.analysis, &self.theme)
            }
            ViewMode::Splits => {
                split_view::render_split_view(frame, chunks[1], &self.analysis, &self.theme)
            }
            ViewMode::Hourly => {
                hourly_view::render_hourly_view(frame, chunks[1], &self.analysis, &self.theme)
            }
        }
    }

    fn header_lines(&self) -> Vec<Line<'_>> {
        let theme = &self.theme;

        let mut tabs: Vec<Span> = vec![Span::styled("[ ", theme.label)];
        for (i, mode) in [ViewMode::Trend, ViewMode::Splits, ViewMode::Hourly]
            .into_iter()
            .enumerate()
        {
            if i > 0 {
                tabs.push(Span::styled(" | ", theme.separator));
            }
            let style = if mode == self.view_mode {
                theme.tab_active
            } else {
                theme.tab_inactive
            };
            tabs.push(Span::styled(mode.title(), style));
        }
        tabs.push(Span::styled(" ]", theme.label));
        tabs.push(Span::raw("   "));
        tabs.push(Span::styled(
            "Tab: view  a/d: start  Left/Right: end  r: reset  q: quit",
            theme.dim,
        ));

        vec![
            Line::from(Span::styled("BIKE RENTAL DASHBOARD", theme.header)),
            Line::from(Span::styled("=".repeat(70), theme.separator)),
            Line::from(vec![
                Span::styled("Range: ", theme.label),
                Span::styled(self.range.to_string(), theme.value),
                Span::styled(
                    format!("  ({} days)", self.range.num_days()),
                    theme.dim,
                ),
            ]),
            Line::from(tabs),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bikedash_core::models::{DailyRecord, HourlyRecord};
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;
    use std::path::Path;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn daily(date: NaiveDate, cnt: u32) -> DailyRecord {
        DailyRecord {
            date,
            holiday: 0,
            workingday: 1,
            weather_situation: 1,
            casual: cnt / 4,
            registered: cnt - cnt / 4,
            cnt,
        }
    }

    fn make_dataset() -> Dataset {
        let daily_rows: Vec<DailyRecord> = (1..=10).map(|i| daily(d(2021, 1, i), 100 + i)).collect();
        let hourly_rows = vec![HourlyRecord {
            date: d(2021, 1, 1),
            hr: 8,
            holiday: 0,
            workingday: 1,
            weather_situation: 1,
            casual: 10,
            registered: 90,
            cnt: 100,
        }];
        Dataset::from_tables(daily_rows, hourly_rows, Path::new("day.csv")).unwrap()
    }

    fn make_app() -> App {
        let ds = make_dataset();
        let range = ds.full_range();
        App::new(ds, range, "dark", ViewMode::Trend)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    // ── ViewMode ──────────────────────────────────────────────────────────────

    #[test]
    fn test_view_mode_cycle_wraps() {
        assert_eq!(ViewMode::Trend.next(), ViewMode::Splits);
        assert_eq!(ViewMode::Splits.next(), ViewMode::Hourly);
        assert_eq!(ViewMode::Hourly.next(), ViewMode::Trend);
        assert_eq!(ViewMode::Trend.prev(), ViewMode::Hourly);
    }

    #[test]
    fn test_view_mode_from_name() {
        assert_eq!(ViewMode::from_name("trend"), ViewMode::Trend);
        assert_eq!(ViewMode::from_name("splits"), ViewMode::Splits);
        assert_eq!(ViewMode::from_name("hourly"), ViewMode::Hourly);
        assert_eq!(ViewMode::from_name("bogus"), ViewMode::Trend);
    }

    // ── App construction ──────────────────────────────────────────────────────

    #[test]
    fn test_app_creation_computes_initial_analysis() {
        let app = make_app();
        assert!(!app.should_quit);
        assert_eq!(app.view_mode, ViewMode::Trend);
        assert_eq!(app.analysis.metadata.daily_rows, 10);
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    #[test]
    fn test_quit_on_q() {
        let mut app = make_app();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_quit_on_ctrl_c() {
        let mut app = make_app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_plain_c_does_not_quit() {
        let mut app = make_app();
        app.handle_key(key(KeyCode::Char('c')));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_tab_cycles_view() {
        let mut app = make_app();
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.view_mode, ViewMode::Splits);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.view_mode, ViewMode::Hourly);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.view_mode, ViewMode::Trend);
    }

    // ── Range adjustment ──────────────────────────────────────────────────────

    #[test]
    fn test_shift_start_narrows_and_recomputes() {
        let mut app = make_app();
        app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(app.range.start(), d(2021, 1, 2));
        assert_eq!(app.analysis.metadata.daily_rows, 9);
        assert_eq!(app.analysis.range, app.range);
    }

    #[test]
    fn test_shift_start_clamped_at_dataset_min() {
        let mut app = make_app();
        // Already at the minimum; moving further left is a no-op.
        app.handle_key(key(KeyCode::Char('a')));
        assert_eq!(app.range.start(), d(2021, 1, 1));
        assert_eq!(app.analysis.metadata.daily_rows, 10);
    }

    #[test]
    fn test_shift_end_clamped_at_dataset_max() {
        let mut app = make_app();
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.range.end(), d(2021, 1, 10));
    }

    #[test]
    fn test_shift_end_narrows_and_recomputes() {
        let mut app = make_app();
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.range.end(), d(2021, 1, 9));
        assert_eq!(app.analysis.metadata.daily_rows, 9);
    }

    #[test]
    fn test_start_never_crosses_end() {
        let mut app = make_app();
        // Push the start far past the end: it must stop at the end date.
        for _ in 0..50 {
            app.handle_key(key(KeyCode::Char('d')));
        }
        assert_eq!(app.range.start(), app.range.end());
        assert_eq!(app.range.num_days(), 1);
        assert_eq!(app.analysis.metadata.daily_rows, 1);
    }

    #[test]
    fn test_reset_restores_full_range() {
        let mut app = make_app();
        app.handle_key(key(KeyCode::Char('d')));
        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.range.start(), d(2021, 1, 1));
        assert_eq!(app.range.end(), d(2021, 1, 10));
        assert_eq!(app.analysis.metadata.daily_rows, 10);
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    #[test]
    fn test_render_all_views_do_not_panic() {
        let mut app = make_app();
        let backend = TestBackend::new(100, 35);
        let mut terminal = Terminal::new(backend).unwrap();

        for _ in 0..3 {
            terminal.draw(|frame| app.render(frame)).unwrap();
            app.handle_key(key(KeyCode::Tab));
        }
    }

    #[test]
    fn test_render_empty_range_shows_placeholder() {
        let ds = Dataset::from_tables(
            vec![daily(d(2021, 1, 1), 100), daily(d(2021, 1, 3), 100)],
            vec![],
            Path::new("day.csv"),
        )
        .unwrap();
        let range = DateRange::single(d(2021, 1, 2));
        let app = App::new(ds, range, "dark", ViewMode::Trend);
        assert!(app.analysis.is_empty());

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }
}
