use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned as the safe
/// default.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Complete theme definition carrying all UI styles used by the dashboard
/// views.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub separator: Style,
    pub tab_active: Style,
    pub tab_inactive: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Rider series ─────────────────────────────────────────────────────────
    pub series_casual: Style,
    pub series_registered: Style,
    pub series_total: Style,

    // ── Day-type series ──────────────────────────────────────────────────────
    /// Working-day line in the hourly chart.
    pub series_workday: Style,
    /// Weekend / holiday line in the hourly chart.
    pub series_offday: Style,

    // ── Weather codes ────────────────────────────────────────────────────────
    pub weather_clear: Style,
    pub weather_mist: Style,
    pub weather_light_precip: Style,
    pub weather_severe: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub chart_axis: Style,
    pub chart_labels: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_total: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::DarkGray),
            tab_active: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            series_casual: Style::default().fg(Color::Yellow),
            series_registered: Style::default().fg(Color::Cyan),
            series_total: Style::default().fg(Color::Green),

            series_workday: Style::default().fg(Color::Cyan),
            series_offday: Style::default().fg(Color::Magenta),

            weather_clear: Style::default().fg(Color::Green),
            weather_mist: Style::default().fg(Color::Cyan),
            weather_light_precip: Style::default().fg(Color::Yellow),
            weather_severe: Style::default().fg(Color::Red),

            chart_axis: Style::default().fg(Color::DarkGray),
            chart_labels: Style::default().fg(Color::Gray),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses dark colours for text and bright accent colours so that content
    /// remains legible against a white/light-grey terminal canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::Gray),
            tab_active: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            series_casual: Style::default().fg(Color::Magenta),
            series_registered: Style::default().fg(Color::Blue),
            series_total: Style::default().fg(Color::Green),

            series_workday: Style::default().fg(Color::Blue),
            series_offday: Style::default().fg(Color::Magenta),

            weather_clear: Style::default().fg(Color::Green),
            weather_mist: Style::default().fg(Color::Blue),
            weather_light_precip: Style::default().fg(Color::Yellow),
            weather_severe: Style::default().fg(Color::Red),

            chart_axis: Style::default().fg(Color::Gray),
            chart_labels: Style::default().fg(Color::DarkGray),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_total: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Classic terminal theme using only the basic 8-colour ANSI palette.
    ///
    /// Avoids bold modifiers to maintain a retro aesthetic and maximise
    /// compatibility with minimal terminal emulators.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            separator: Style::default().fg(Color::DarkGray),
            tab_active: Style::default().fg(Color::Yellow),
            tab_inactive: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default().fg(Color::White),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            series_casual: Style::default().fg(Color::Yellow),
            series_registered: Style::default().fg(Color::Cyan),
            series_total: Style::default().fg(Color::Green),

            series_workday: Style::default().fg(Color::Cyan),
            series_offday: Style::default().fg(Color::Magenta),

            weather_clear: Style::default().fg(Color::Green),
            weather_mist: Style::default().fg(Color::Cyan),
            weather_light_precip: Style::default().fg(Color::Yellow),
            weather_severe: Style::default().fg(Color::Red),

            chart_axis: Style::default().fg(Color::DarkGray),
            chart_labels: Style::default().fg(Color::White),

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default().fg(Color::Yellow),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Return the style for a weather situation code (1 clear .. 4 severe).
    ///
    /// Codes outside the documented range fall back to `dim` rather than
    /// panicking, since the source data is only assumed, not validated, to
    /// stay within 1–4.
    pub fn weather_style(&self, code: u8) -> Style {
        match code {
            1 => self.weather_clear,
            2 => self.weather_mist,
            3 => self.weather_light_precip,
            4 => self.weather_severe,
            _ => self.dim,
        }
    }

    /// Return the chart line style for a working-day flag.
    pub fn day_type_style(&self, workingday: u8) -> Style {
        if workingday == 1 {
            self.series_workday
        } else {
            self.series_offday
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
