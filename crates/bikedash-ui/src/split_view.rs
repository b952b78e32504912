//! Split view: rental statistics by the holiday and working-day flags, plus
//! the working-day × weather breakdown.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    widgets::{BarChart, Block, Borders, Row, Table},
    Frame,
};

use bikedash_core::formatting::{format_count, format_number};
use bikedash_data::aggregator::FlagRentRow;
use bikedash_data::analysis::RangeAnalysis;

use crate::themes::Theme;

// ── Main render ───────────────────────────────────────────────────────────────

/// Render the split view into `area`.
pub fn render_split_view(frame: &mut Frame, area: Rect, analysis: &RangeAnalysis, theme: &Theme) {
    let rows = Layout::vertical([Constraint::Length(6), Constraint::Min(6)]).split(area);
    let columns =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(rows[0]);

    render_flag_table(
        frame,
        columns[0],
        " By Holiday ",
        &analysis.holiday,
        holiday_label,
        theme,
    );
    render_flag_table(
        frame,
        columns[1],
        " By Working Day ",
        &analysis.working_day,
        working_day_label,
        theme,
    );
    render_weather_chart(frame, rows[1], analysis, theme);
}

// ── Flag tables ───────────────────────────────────────────────────────────────

fn holiday_label(flag: u8) -> &'static str {
    if flag == 1 {
        "Holiday"
    } else {
        "Regular"
    }
}

fn working_day_label(flag: u8) -> &'static str {
    if flag == 1 {
        "Workday"
    } else {
        "Off day"
    }
}

/// Cells for one flag value, or dashes when that flag has no rows in range.
///
/// Both flag values always get a table row so the layout stays stable; only
/// the numbers disappear when a group is absent.
fn stats_cells(rows: &[FlagRentRow], flag: u8) -> [String; 4] {
    match rows.iter().find(|r| r.flag == flag) {
        Some(row) => [
            format_count(u64::from(row.stats.cnt_max)),
            format_number(row.stats.cnt_mean, 1),
            format_count(u64::from(row.stats.cnt_min)),
            format_count(row.stats.cnt_sum),
        ],
        None => ["--".into(), "--".into(), "--".into(), "--".into()],
    }
}

fn render_flag_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[FlagRentRow],
    label_fn: fn(u8) -> &'static str,
    theme: &Theme,
) {
    let header = Row::new(vec!["", "Max", "Mean", "Min", "Sum"]).style(theme.table_header);

    let body: Vec<Row> = [0u8, 1u8]
        .iter()
        .map(|&flag| {
            let cells = stats_cells(rows, flag);
            let style = if flag == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                label_fn(flag).to_string(),
                cells[0].clone(),
                cells[1].clone(),
                cells[2].clone(),
                cells[3].clone(),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        body,
        [
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(9),
            Constraint::Length(8),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_string())
            .border_style(theme.table_border),
    );

    frame.render_widget(table, area);
}

// ── Weather chart ─────────────────────────────────────────────────────────────

fn weather_tag(code: u8) -> &'static str {
    match code {
        1 => "clear",
        2 => "mist",
        3 => "precip",
        4 => "severe",
        _ => "other",
    }
}

fn render_weather_chart(frame: &mut Frame, area: Rect, analysis: &RangeAnalysis, theme: &Theme) {
    let labels: Vec<String> = analysis
        .workday_weather
        .iter()
        .map(|r| {
            let day = if r.workingday == 1 { "wk" } else { "off" };
            format!("{}·{}", day, weather_tag(r.weather_situation))
        })
        .collect();
    let bars: Vec<(&str, u64)> = labels
        .iter()
        .map(String::as_str)
        .zip(analysis.workday_weather.iter().map(|r| r.cnt_sum))
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Rentals by Working Day and Weather ")
                .border_style(theme.table_border),
        )
        .data(bars.as_slice())
        .bar_width(10)
        .bar_gap(2)
        .bar_style(theme.series_total)
        .value_style(theme.value)
        .label_style(theme.chart_labels);

    frame.render_widget(chart, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
