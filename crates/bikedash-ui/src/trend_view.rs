//! Monthly trend view: headline metrics, the per-month rental chart and the
//! monthly summary table.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    symbols,
    text::{Line, Span, Text},
    widgets::{Axis, Block, Borders, Chart, Dataset as ChartDataset, GraphType, Paragraph, Row, Table},
    Frame,
};

use bikedash_core::formatting::{format_count, format_number, month_label};
use bikedash_data::analysis::RangeAnalysis;

use crate::themes::Theme;

// ── Main render ───────────────────────────────────────────────────────────────

/// Render the monthly trend view into `area`.
pub fn render_trend_view(frame: &mut Frame, area: Rect, analysis: &RangeAnalysis, theme: &Theme) {
    let chunks = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(8),
        Constraint::Percentage(40),
    ])
    .split(area);

    let metrics = Paragraph::new(Text::from(build_metric_lines(analysis, theme)));
    frame.render_widget(metrics, chunks[0]);

    render_monthly_chart(frame, chunks[1], analysis, theme);
    render_monthly_table(frame, chunks[2], analysis, theme);
}

/// Render the placeholder shown when the selected range matches no rows.
///
/// Shared across all three views since an empty analysis looks the same
/// everywhere.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No rentals in the selected range", theme.dim)),
        Line::from(""),
        Line::from(Span::styled(
            "Widen the range with a/d and Left/Right, or press 'r' to reset",
            theme.info,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    let paragraph = Paragraph::new(Text::from(text)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Bike Rentals "),
    );
    frame.render_widget(paragraph, area);
}

// ── Line builders ─────────────────────────────────────────────────────────────

/// Build the headline metric lines (extracted for testability).
pub fn build_metric_lines<'a>(analysis: &RangeAnalysis, theme: &'a Theme) -> Vec<Line<'a>> {
    let meta = &analysis.metadata;
    vec![
        Line::from(vec![
            Span::styled("Casual: ", theme.label),
            Span::styled(format_count(meta.casual_total), theme.series_casual),
            Span::styled("   Registered: ", theme.label),
            Span::styled(format_count(meta.registered_total), theme.series_registered),
            Span::styled("   Total Rent: ", theme.label),
            Span::styled(format_count(meta.total_rent), theme.series_total),
        ]),
        Line::from(vec![
            Span::styled("Days: ", theme.label),
            Span::styled(meta.daily_rows.to_string(), theme.value),
            Span::styled("   Months: ", theme.label),
            Span::styled(analysis.monthly.len().to_string(), theme.value),
            Span::styled("   Computed in: ", theme.label),
            Span::styled(
                format!("{:.3}s", meta.compute_time_seconds),
                theme.dim,
            ),
        ]),
        Line::from(""),
    ]
}

// ── Widgets ───────────────────────────────────────────────────────────────────

fn render_monthly_chart(frame: &mut Frame, area: Rect, analysis: &RangeAnalysis, theme: &Theme) {
    let monthly = &analysis.monthly;

    let casual: Vec<(f64, f64)> = monthly
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, r.casual_sum as f64))
        .collect();
    let registered: Vec<(f64, f64)> = monthly
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, r.registered_sum as f64))
        .collect();
    let total: Vec<(f64, f64)> = monthly
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, r.total_rent as f64))
        .collect();

    let y_max = monthly
        .iter()
        .map(|r| r.total_rent)
        .max()
        .unwrap_or(0)
        .max(1) as f64;
    // A single month still needs a non-degenerate x axis.
    let x_max = (monthly.len().saturating_sub(1)).max(1) as f64;

    let x_labels: Vec<Span> = match monthly.len() {
        0 => Vec::new(),
        1 => vec![Span::styled(month_label(&monthly[0].month), theme.chart_labels)],
        n => {
            let mid = n / 2;
            vec![
                Span::styled(month_label(&monthly[0].month), theme.chart_labels),
                Span::styled(month_label(&monthly[mid].month), theme.chart_labels),
                Span::styled(month_label(&monthly[n - 1].month), theme.chart_labels),
            ]
        }
    };

    let datasets = vec![
        ChartDataset::default()
            .name("casual")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.series_casual)
            .data(&casual),
        ChartDataset::default()
            .name("registered")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.series_registered)
            .data(&registered),
        ChartDataset::default()
            .name("total")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.series_total)
            .data(&total),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Monthly Rentals ")
                .border_style(theme.table_border),
        )
        .x_axis(
            Axis::default()
                .style(theme.chart_axis)
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(theme.chart_axis)
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::styled("0", theme.chart_labels),
                    Span::styled(format_number(y_max / 2.0, 0), theme.chart_labels),
                    Span::styled(format_number(y_max, 0), theme.chart_labels),
                ]),
        );

    frame.render_widget(chart, area);
}

fn render_monthly_table(frame: &mut Frame, area: Rect, analysis: &RangeAnalysis, theme: &Theme) {
    let header = Row::new(vec!["Month", "Casual", "Registered", "Total"]).style(theme.table_header);

    let rows: Vec<Row> = analysis
        .monthly
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                month_label(&r.month),
                format_count(r.casual_sum),
                format_count(r.registered_sum),
                format_count(r.total_rent),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" By Month ")
            .border_style(theme.table_border),
    );

    frame.render_widget(table, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bikedash_core::models::{DailyRecord, DateRange, HourlyRecord};
    use bikedash_data::analysis::analyze_range;
    use bikedash_data::dataset::Dataset;
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::path::Path;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn make_analysis() -> RangeAnalysis {
        let daily = vec![
            DailyRecord {
                date: d(2021, 1, 1),
                holiday: 0,
                workingday: 1,
                weather_situation: 1,
                casual: 100,
                registered: 400,
                cnt: 500,
            },
            DailyRecord {
                date: d(2021, 2, 1),
                holiday: 1,
                workingday: 0,
                weather_situation: 2,
                casual: 50,
                registered: 150,
                cnt: 200,
            },
        ];
        let hourly = vec![HourlyRecord {
            date: d(2021, 1, 1),
            hr: 8,
            holiday: 0,
            workingday: 1,
            weather_situation: 1,
            casual: 10,
            registered: 90,
            cnt: 100,
        }];
        let ds = Dataset::from_tables(daily, hourly, Path::new("day.csv")).unwrap();
        analyze_range(&ds, &ds.full_range())
    }

    fn empty_analysis() -> RangeAnalysis {
        // Rows on Jan 1 and Jan 3; a single-day range on Jan 2 matches nothing.
        let row = |day| DailyRecord {
            date: d(2021, 1, day),
            holiday: 0,
            workingday: 1,
            weather_situation: 1,
            casual: 1,
            registered: 1,
            cnt: 2,
        };
        let ds =
            Dataset::from_tables(vec![row(1), row(3)], vec![], Path::new("day.csv")).unwrap();
        analyze_range(&ds, &DateRange::single(d(2021, 1, 2)))
    }

    #[test]
    fn test_metric_lines_contain_totals() {
        let theme = Theme::dark();
        let analysis = make_analysis();
        let lines = build_metric_lines(&analysis, &theme);
        let all_text: String = lines
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.as_ref().to_string()))
            .collect::<Vec<_>>()
            .join("");
        assert!(all_text.contains("150"), "casual total: {all_text}");
        assert!(all_text.contains("550"), "registered total: {all_text}");
        assert!(all_text.contains("700"), "total rent: {all_text}");
    }

    #[test]
    fn test_render_trend_view_does_not_panic() {
        let theme = Theme::dark();
        let analysis = make_analysis();
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_trend_view(frame, frame.area(), &analysis, &theme))
            .unwrap();
    }

    #[test]
    fn test_render_trend_view_single_month() {
        let theme = Theme::dark();
        let mut analysis = make_analysis();
        analysis.monthly.truncate(1);
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_trend_view(frame, frame.area(), &analysis, &theme))
            .unwrap();
    }

    #[test]
    fn test_render_trend_view_empty_analysis() {
        let theme = Theme::dark();
        let analysis = empty_analysis();
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_trend_view(frame, frame.area(), &analysis, &theme))
            .unwrap();
    }

    #[test]
    fn test_render_no_data_does_not_panic() {
        let theme = Theme::dark();
        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_no_data(frame, frame.area(), &theme))
            .unwrap();
    }

    #[test]
    fn test_render_trend_view_tiny_area() {
        // Must not panic even in a terminal too small to show everything.
        let theme = Theme::dark();
        let analysis = make_analysis();
        let backend = TestBackend::new(20, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_trend_view(frame, frame.area(), &analysis, &theme))
            .unwrap();
    }
}
