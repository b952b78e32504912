//! Hourly view: mean rentals per hour of day, one line per day type.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    symbols,
    text::{Line, Span, Text},
    widgets::{Axis, Block, Borders, Chart, Dataset as ChartDataset, GraphType, Paragraph},
    Frame,
};

use bikedash_core::formatting::format_number;
use bikedash_data::aggregator::HourlyMeanRow;
use bikedash_data::analysis::RangeAnalysis;

use crate::themes::Theme;

// ── Main render ───────────────────────────────────────────────────────────────

/// Render the hourly mean chart with a legend line underneath.
pub fn render_hourly_view(frame: &mut Frame, area: Rect, analysis: &RangeAnalysis, theme: &Theme) {
    let chunks = Layout::vertical([Constraint::Min(8), Constraint::Length(2)]).split(area);

    render_hourly_chart(frame, chunks[0], analysis, theme);

    let legend = Paragraph::new(Text::from(vec![Line::from(vec![
        Span::styled("── working day", theme.series_workday),
        Span::raw("    "),
        Span::styled("── weekend / holiday", theme.series_offday),
    ])]));
    frame.render_widget(legend, chunks[1]);
}

// ── Series extraction ─────────────────────────────────────────────────────────

/// Chart points for one day type, `hr` ascending.
fn series_points(rows: &[HourlyMeanRow], workingday: u8) -> Vec<(f64, f64)> {
    rows.iter()
        .filter(|r| r.workingday == workingday)
        .map(|r| (f64::from(r.hr), r.cnt_mean))
        .collect()
}

fn render_hourly_chart(frame: &mut Frame, area: Rect, analysis: &RangeAnalysis, theme: &Theme) {
    let workday = series_points(&analysis.hourly, 1);
    let offday = series_points(&analysis.hourly, 0);

    let y_max = analysis
        .hourly
        .iter()
        .map(|r| r.cnt_mean)
        .fold(0.0_f64, f64::max)
        .max(1.0);

    let datasets = vec![
        ChartDataset::default()
            .name("working day")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.series_workday)
            .data(&workday),
        ChartDataset::default()
            .name("off day")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.series_offday)
            .data(&offday),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Mean Rentals by Hour ")
                .border_style(theme.table_border),
        )
        .x_axis(
            Axis::default()
                .style(theme.chart_axis)
                .bounds([0.0, 23.0])
                .labels(vec![
                    Span::styled("0", theme.chart_labels),
                    Span::styled("6", theme.chart_labels),
                    Span::styled("12", theme.chart_labels),
                    Span::styled("18", theme.chart_labels),
                    Span::styled("23", theme.chart_labels),
                ]),
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

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bikedash_core::models::{DailyRecord, HourlyRecord};
    use bikedash_data::analysis::analyze_range;
    use bikedash_data::dataset::Dataset;
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::path::Path;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn hourly(date: NaiveDate, hr: u8, workingday: u8, cnt: u32) -> HourlyRecord {
        HourlyRecord {
            date,
            hr,
            holiday: 0,
            workingday,
            weather_situation: 1,
            casual: 0,
            registered: cnt,
            cnt,
        }
    }

    fn make_analysis() -> RangeAnalysis {
        let daily = vec![DailyRecord {
            date: d(2021, 1, 1),
            holiday: 0,
            workingday: 1,
            weather_situation: 1,
            casual: 10,
            registered: 90,
            cnt: 100,
        }];
        let hourly_rows = vec![
            hourly(d(2021, 1, 1), 8, 1, 300),
            hourly(d(2021, 1, 1), 17, 1, 280),
            hourly(d(2021, 1, 1), 12, 0, 150),
        ];
        let ds = Dataset::from_tables(daily, hourly_rows, Path::new("day.csv")).unwrap();
        analyze_range(&ds, &ds.full_range())
    }

    #[test]
    fn test_series_points_splits_by_day_type() {
        let analysis = make_analysis();
        let workday = series_points(&analysis.hourly, 1);
        let offday = series_points(&analysis.hourly, 0);

        assert_eq!(workday.len(), 2);
        assert_eq!(offday.len(), 1);
        // hr ascending within the working-day series.
        assert_eq!(workday[0].0, 8.0);
        assert_eq!(workday[1].0, 17.0);
        assert_eq!(offday[0], (12.0, 150.0));
    }

    #[test]
    fn test_series_points_empty_input() {
        assert!(series_points(&[], 0).is_empty());
        assert!(series_points(&[], 1).is_empty());
    }

    #[test]
    fn test_render_hourly_view_does_not_panic() {
        let theme = Theme::dark();
        let analysis = make_analysis();
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_hourly_view(frame, frame.area(), &analysis, &theme))
            .unwrap();
    }

    #[test]
    fn test_render_hourly_view_tiny_area() {
        let theme = Theme::dark();
        let analysis = make_analysis();
        let backend = TestBackend::new(15, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_hourly_view(frame, frame.area(), &analysis, &theme))
            .unwrap();
    }
}
