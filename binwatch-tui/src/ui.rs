use binwatch_core::{BinCategory, BinRecord, GeoPoint, StatusTier};
use chrono::{DateTime, Local};
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Dataset, Gauge, GraphType,
        Paragraph, Row, Table, Tabs, Wrap,
        canvas::{Canvas, Points},
    },
};

use crate::app::{App, Screen};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];
const CARD_HEIGHT: u16 = 5;
const MAP_PADDING: f64 = 0.02;

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: navigation, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    let titles = Screen::ALL.iter().map(|screen| screen.title());
    let tabs = Tabs::new(titles)
        .select(app.screen.index())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("binwatch · Smart Waste Bin Monitoring"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, *header_area);

    match app.screen {
        Screen::Dashboard => draw_dashboard(frame, app, *content_area),
        Screen::BinMap => draw_bin_map(frame, app, *content_area),
        Screen::Reports => draw_reports(frame, app, *content_area),
    }

    // Status bar
    let nav_hint = match app.screen {
        Screen::Dashboard | Screen::BinMap => {
            "1/2/3 or Tab switch screen · ↑/↓ select bin · r refresh · q/Ctrl-C quit"
        }
        Screen::Reports => "1/2/3 or Tab switch screen · r refresh · q/Ctrl-C quit",
    };

    let status_text = if app.dashboard.is_refreshing() {
        format!("{} Refreshing… · {nav_hint}", spinner_frame(app.tick))
    } else if let Some(at) = app.dashboard.last_refresh() {
        format!(
            "{} · {nav_hint}",
            last_refresh_label(at, app.dashboard.completed_cycles())
        )
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.dashboard.is_refreshing() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_dashboard(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // refresh control
            Constraint::Length(4), // overview cards
            Constraint::Min(0),    // bin grid
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [control_area, overview_area, grid_area] = chunks else {
        return;
    };

    let control = if app.dashboard.is_refreshing() {
        Line::from(vec![
            Span::styled(
                format!("{} Refreshing...", spinner_frame(app.tick)),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw("  (trigger disabled)"),
        ])
    } else {
        Line::from(vec![
            Span::styled(
                "● Live Data",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  [r] Refresh Data"),
        ])
    };
    let control = Paragraph::new(control).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Real-time Bin Status"),
    );
    frame.render_widget(control, *control_area);

    draw_overview(frame, app, *overview_area);
    draw_bin_grid(frame, app, *grid_area);
}

fn draw_overview(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let counts = app.dashboard.counts();
    let cards = [
        ("Total Bins", counts.total(), Color::White),
        ("Low Fill", counts.low, tier_color(StatusTier::Low)),
        ("Medium Fill", counts.medium, tier_color(StatusTier::Medium)),
        ("High Fill", counts.high, tier_color(StatusTier::High)),
    ];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((title, value, color), column) in cards.into_iter().zip(columns.iter()) {
        let card = Paragraph::new(Span::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(card, *column);
    }
}

fn draw_bin_grid(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let bins = app.dashboard.bins();
    if bins.is_empty() {
        let paragraph = Paragraph::new("No bins registered.")
            .block(Block::default().borders(Borders::ALL).title("Bins"));
        frame.render_widget(paragraph, area);
        return;
    }

    // Two cards per row, scrolled so the selected card stays on screen
    let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
    let first_row = first_visible_row(app.bin_list_index / 2, visible_rows);
    let row_pairs: Vec<(usize, &[BinRecord])> = bins
        .chunks(2)
        .enumerate()
        .skip(first_row)
        .take(visible_rows)
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            row_pairs
                .iter()
                .map(|_| Constraint::Length(CARD_HEIGHT))
                .collect::<Vec<_>>(),
        )
        .split(area);

    for (&(pair_index, pair), row_area) in row_pairs.iter().zip(rows.iter()) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 2); 2])
            .split(*row_area);

        for ((offset, bin), card_area) in pair.iter().enumerate().zip(columns.iter()) {
            let selected = pair_index * 2 + offset == app.bin_list_index;
            draw_bin_card(frame, bin, selected, *card_area);
        }
    }
}

fn draw_bin_card(frame: &mut Frame<'_>, bin: &BinRecord, selected: bool, area: Rect) {
    let status = bin.status();
    let title = Line::from(vec![
        Span::styled(
            bin.category().display_name(),
            Style::default().fg(category_color(bin.category())),
        ),
        Span::raw(format!(" · ID: {} ", bin.id())),
        Span::styled(
            format!("[{status}]"),
            Style::default()
                .fg(tier_color(status))
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let border_style = if selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // fill gauge
            Constraint::Length(1), // location
            Constraint::Length(1), // last updated
        ])
        .split(inner);

    let chunks = layout_chunks.as_ref();
    let [gauge_area, location_area, updated_area] = chunks else {
        return;
    };

    let percent = bin.fill_level().percent();
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(tier_color(status)).bg(Color::DarkGray))
        .percent(u16::from(percent))
        .label(format!("Fill Level {percent}%"));
    frame.render_widget(gauge, *gauge_area);

    frame.render_widget(
        Paragraph::new(format!("Location: {}", bin.location())),
        *location_area,
    );
    frame.render_widget(
        Paragraph::new(format!("Last Updated: {}", bin.last_updated())),
        *updated_area,
    );
}

fn draw_bin_map(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [map_area, list_area] = chunks else {
        return;
    };

    // Placeholder map: pins plotted on a bare lat/lng grid
    let entries = app.map_entries();
    let markers: Vec<(&BinRecord, GeoPoint)> = entries
        .iter()
        .filter_map(|&(bin, position)| Some((bin, position?)))
        .collect();
    let positions: Vec<GeoPoint> = markers.iter().map(|&(_, position)| position).collect();
    let (x_bounds, y_bounds) = map_bounds(&positions);

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("GPS Bin Tracking (map placeholder)"),
        )
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            for &(bin, position) in &markers {
                let color = tier_color(bin.status());
                ctx.draw(&Points {
                    coords: &[(position.lng, position.lat)],
                    color,
                });
                ctx.print(
                    position.lng,
                    position.lat,
                    Span::styled(bin.id().to_string(), Style::default().fg(color)),
                );
            }
        });
    frame.render_widget(canvas, *map_area);

    let rows = entries.iter().enumerate().map(|(index, &(bin, position))| {
        let prefix = if index == app.bin_list_index { "> " } else { "  " };
        let coordinates = position.map_or_else(
            || "no position".to_owned(),
            |position| format!("{:.4}, {:.4}", position.lat, position.lng),
        );
        let status = bin.status();

        Row::new(vec![
            Cell::from(format!("{prefix}{}", bin.id())),
            Cell::from(bin.category().display_name()),
            Cell::from(coordinates),
            Cell::from(status.to_string()).style(Style::default().fg(tier_color(status))),
        ])
    });

    let column_widths = [
        Constraint::Length(10),
        Constraint::Length(19),
        Constraint::Length(18),
        Constraint::Min(7),
    ];

    let table = Table::new(rows, column_widths)
        .header(
            Row::new(vec!["Bin", "Type", "Lat, Lng", "Status"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Bin Locations"),
        )
        .column_spacing(1);
    frame.render_widget(table, *list_area);
}

fn draw_reports(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // summary cards
            Constraint::Min(10),   // charts
            Constraint::Length(7), // distribution
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [summary_area, charts_area, distribution_area] = chunks else {
        return;
    };

    draw_report_summary(frame, app, *summary_area);

    let chart_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(*charts_area);
    let [weekly_area, trend_area] = chart_chunks.as_ref() else {
        return;
    };
    draw_weekly_chart(frame, app, *weekly_area);
    draw_monthly_trend(frame, app, *trend_area);

    draw_distribution(frame, app, *distribution_area);
}

fn draw_report_summary(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let summary = app.summary();
    let cards = [
        (
            "Total Collections",
            format!(
                "{}  (+{}% from last week)",
                summary.total_collections, summary.collection_change_pct
            ),
        ),
        ("Avg Fill Level", format!("{}%", summary.average_fill)),
        (
            "Active Bins",
            format!("{}/{}  All Online", summary.active_bins, summary.total_bins),
        ),
    ];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    for ((title, value), column) in cards.into_iter().zip(columns.iter()) {
        let card = Paragraph::new(value)
            .style(Style::default().add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(card, *column);
    }
}

fn draw_weekly_chart(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let legend = Line::from(
        BinCategory::ALL
            .iter()
            .map(|category| {
                Span::styled(
                    format!(" ■ {}", category_short_name(*category)),
                    Style::default().fg(category_color(*category)),
                )
            })
            .collect::<Vec<_>>(),
    );

    let mut chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Weekly Fill Levels")
                .title_bottom(legend),
        )
        .bar_width(1)
        .bar_gap(0)
        .group_gap(2)
        .max(100);

    for entry in &app.weekly {
        let bars: Vec<Bar<'_>> = BinCategory::ALL
            .iter()
            .map(|category| {
                Bar::default()
                    .value(u64::from(entry.level(*category)))
                    .text_value(String::new())
                    .style(Style::default().fg(category_color(*category)))
            })
            .collect();
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(entry.day.to_string()))
                .bars(&bars),
        );
    }

    frame.render_widget(chart, area);
}

fn draw_monthly_trend(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let points: Vec<(f64, f64)> = app
        .monthly
        .iter()
        .zip(0_u8..)
        .map(|(entry, position)| (f64::from(position), f64::from(entry.fill_level)))
        .collect();
    let x_max = points.last().map_or(1.0, |(position, _)| *position);

    let labels: Vec<Span<'_>> = app
        .monthly
        .iter()
        .map(|entry| Span::raw(entry.month.name().get(..3).unwrap_or_default()))
        .collect();

    let dataset = Dataset::default()
        .name("avg fill %")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Monthly Trend"),
        )
        .x_axis(Axis::default().bounds([0.0, x_max]).labels(labels))
        .y_axis(
            Axis::default()
                .bounds([0.0, 100.0])
                .labels(vec![Span::raw("0"), Span::raw("50"), Span::raw("100")]),
        );

    frame.render_widget(chart, area);
}

fn draw_distribution(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let rows = app.distribution.iter().map(|share| {
        let color = category_color(share.category);
        Row::new(vec![
            Cell::from(share.category.display_name()),
            Cell::from("█".repeat(usize::from(share.percent / 2)))
                .style(Style::default().fg(color)),
            Cell::from(format!("{}%", share.percent)),
        ])
    });

    let column_widths = [
        Constraint::Length(20),
        Constraint::Min(20),
        Constraint::Length(5),
    ];

    let table = Table::new(rows, column_widths)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Waste Distribution by Type"),
        )
        .column_spacing(1);
    frame.render_widget(table, area);
}

/// First card row to draw so that `selected_row` fits in `visible_rows`.
fn first_visible_row(selected_row: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 || selected_row < visible_rows {
        0
    } else {
        selected_row + 1 - visible_rows
    }
}

fn map_bounds(positions: &[GeoPoint]) -> ([f64; 2], [f64; 2]) {
    let Some(first) = positions.first() else {
        return ([-180.0, 180.0], [-90.0, 90.0]);
    };
    let start = (first.lng, first.lng, first.lat, first.lat);
    let (min_lng, max_lng, min_lat, max_lat) =
        positions
            .iter()
            .fold(start, |(min_lng, max_lng, min_lat, max_lat), position| {
                (
                    min_lng.min(position.lng),
                    max_lng.max(position.lng),
                    min_lat.min(position.lat),
                    max_lat.max(position.lat),
                )
            });
    (
        [min_lng - MAP_PADDING, max_lng + MAP_PADDING],
        [min_lat - MAP_PADDING, max_lat + MAP_PADDING],
    )
}

fn last_refresh_label(at: DateTime<Local>, cycles: u64) -> String {
    format!("Last refresh {} (cycle {cycles})", at.format("%H:%M:%S"))
}

fn spinner_frame(tick: usize) -> &'static str {
    SPINNER.get(tick % SPINNER.len()).copied().unwrap_or("|")
}

fn tier_color(tier: StatusTier) -> Color {
    match tier {
        StatusTier::Low => Color::Green,
        StatusTier::Medium => Color::Yellow,
        StatusTier::High => Color::Red,
    }
}

fn category_short_name(category: BinCategory) -> &'static str {
    match category {
        BinCategory::TinyParticle => "Particle",
        BinCategory::Plastic => "Plastic",
        BinCategory::Metal => "Metal",
        BinCategory::SolidWaste => "Solid",
        BinCategory::SanitaryWaste => "Sanitary",
    }
}

fn category_color(category: BinCategory) -> Color {
    match category {
        BinCategory::TinyParticle => Color::Blue,
        BinCategory::Plastic => Color::Green,
        BinCategory::Metal => Color::Yellow,
        BinCategory::SolidWaste => Color::Gray,
        BinCategory::SanitaryWaste => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use binwatch_core::{
        BinId, BinLocation, Dashboard, FillLevel, LastUpdated, RefreshSimulator, seed::seed_bins,
    };
    use chrono::TimeZone;
    use ratatui::backend::TestBackend;

    use super::*;

    fn app() -> App {
        let dashboard =
            Dashboard::new(seed_bins(), RefreshSimulator::seeded(4)).expect("seed ids are unique");
        App::new(dashboard)
    }

    fn bin(id: &str, fill: i32, location: &str) -> BinRecord {
        BinRecord::new(
            id,
            BinCategory::SolidWaste,
            FillLevel::clamped(fill),
            location,
            LastUpdated::JustNow,
        )
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 45)).expect("test backend");
        terminal.draw(|frame| draw(frame, app)).expect("draw succeeds");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn dashboard_shows_every_bin_and_refresh_control() {
        let screen = render(&app());

        for id in ["BIN-001", "BIN-002", "BIN-003", "BIN-004", "BIN-005"] {
            assert!(screen.contains(id), "{id} missing");
        }
        assert!(screen.contains("[r] Refresh Data"));
        assert!(screen.contains("Cafeteria"));
    }

    #[test]
    fn refreshing_disables_trigger_in_view() {
        let mut app = app();
        let ticket = app.dashboard.begin_refresh();
        assert!(ticket.is_some());

        let screen = render(&app);
        assert!(screen.contains("Refreshing"));
        assert!(!screen.contains("[r] Refresh Data"));
    }

    #[test]
    fn map_and_reports_render() {
        let mut app = app();
        app.screen = Screen::BinMap;
        let map = render(&app);
        assert!(map.contains("Bin Locations"));
        assert!(map.contains("40.7505"));

        app.screen = Screen::Reports;
        let reports = render(&app);
        assert!(reports.contains("Total Collections"));
        assert!(reports.contains("Waste Distribution by Type"));
    }

    #[test]
    fn last_refresh_label_shows_clock_time() {
        let at = Local
            .with_ymd_and_hms(2024, 5, 17, 9, 5, 3)
            .single()
            .expect("unambiguous local time");
        assert_eq!(last_refresh_label(at, 3), "Last refresh 09:05:03 (cycle 3)");
    }

    #[test]
    fn map_lists_configured_bins() {
        let bins = vec![
            bin("BIN-100", 40, "Lobby"),
            bin("BIN-101", 90, "Loading Dock"),
        ];
        let dashboard = Dashboard::new(bins, RefreshSimulator::seeded(4)).expect("unique ids");
        let mut app = App::new(dashboard).with_locations(vec![BinLocation {
            id: BinId::from("BIN-100"),
            position: GeoPoint { lat: 51.5072, lng: -0.1276 },
        }]);
        app.screen = Screen::BinMap;

        let map = render(&app);
        assert!(map.contains("BIN-100"));
        assert!(map.contains("BIN-101"));
        assert!(map.contains("51.5072"));
        assert!(map.contains("no position"), "BIN-101 has no coordinates");
        assert!(!map.contains("BIN-001"), "seed bins are not monitored here");

        app.screen = Screen::Reports;
        assert!(render(&app).contains("2/2"));
    }

    #[test]
    fn grid_scrolls_to_selected_bin() {
        let bins = (0..20)
            .map(|idx| bin(format!("BIN-{:03}", 200 + idx).as_str(), 10, "Depot"))
            .collect();
        let dashboard = Dashboard::new(bins, RefreshSimulator::seeded(4)).expect("unique ids");
        let mut app = App::new(dashboard);

        let top = render(&app);
        assert!(top.contains("BIN-200"));
        assert!(!top.contains("BIN-219"));

        for _ in 0..19 {
            app.select_next_bin();
        }
        let bottom = render(&app);
        assert!(bottom.contains("BIN-219"));
        assert!(!bottom.contains("BIN-200"));
    }

    #[test]
    fn first_visible_row_keeps_selection_in_view() {
        assert_eq!(first_visible_row(0, 3), 0);
        assert_eq!(first_visible_row(2, 3), 0);
        assert_eq!(first_visible_row(3, 3), 1);
        assert_eq!(first_visible_row(5, 3), 3);
        assert_eq!(first_visible_row(4, 0), 0);
    }

    #[test]
    fn map_bounds_pad_extremes() {
        let positions = [
            GeoPoint { lat: 1.0, lng: 2.0 },
            GeoPoint { lat: 3.0, lng: -1.0 },
        ];
        let (x_bounds, y_bounds) = map_bounds(&positions);

        assert_eq!(x_bounds, [-1.0 - MAP_PADDING, 2.0 + MAP_PADDING]);
        assert_eq!(y_bounds, [1.0 - MAP_PADDING, 3.0 + MAP_PADDING]);
    }
}
