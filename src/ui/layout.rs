use {
    crate::state::{App, DashboardViews, DateField, Tab},
    crate::ui::renderer::{format_count, format_usd, format_usd_compact, short_day},
    ratatui::{
        layout::{Alignment, Constraint, Direction, Layout as RatLayout, Rect},
        style::{Color, Modifier, Style},
        symbols,
        text::{Line, Span},
        widgets::{
            Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
            Row, Table, Tabs,
        },
        Frame,
    },
};

const CATEGORY_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::Red,
];

/// Render the main UI layout
pub fn render_layout(f: &mut Frame, area: Rect, app: &App) -> Result<(), Box<dyn std::error::Error>> {
    // Create layout sections
    let chunks = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header + tab bar
            Constraint::Length(3), // Filter bar
            Constraint::Min(0),    // Active view
            Constraint::Length(3), // Footer/Status
        ])
        .split(area);

    render_header(f, chunks[0], app);
    render_filter_bar(f, chunks[1], app);

    match &app.views {
        Some(views) => match app.tab {
            Tab::Overview => render_overview(f, chunks[2], views),
            Tab::Products => render_products(f, chunks[2], views),
            Tab::Stores => render_stores(f, chunks[2], views),
            Tab::Patterns => render_patterns(f, chunks[2], views),
            Tab::Data => render_data_table(f, chunks[2], app),
        },
        None => render_empty_notice(f, chunks[2]),
    }

    render_footer(f, chunks[3], app);

    Ok(())
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<&str> = Tab::ALL.iter().map(|t| t.title()).collect();
    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("BrewFlow - Coffee Retail Sales Dashboard"),
        );

    f.render_widget(tabs, area);
}

fn render_filter_bar(f: &mut Frame, area: Rect, app: &App) {
    let focused = |field: DateField| {
        if app.focused_date == field {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::White)
        }
    };

    let mut spans = vec![
        Span::styled("Range: ", Style::default().fg(Color::Gray)),
        Span::styled(app.selection.start.to_string(), focused(DateField::Start)),
        Span::raw(" to "),
        Span::styled(app.selection.end.to_string(), focused(DateField::End)),
        Span::raw("  Stores: "),
    ];

    for (i, name) in app.store_names.iter().enumerate() {
        let selected = app.selection.stores.contains(name);
        let style = if selected {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
        };
        spans.push(Span::styled(format!("[{}] {}", i + 1, name), style));
        if i + 1 < app.store_names.len() {
            spans.push(Span::raw("  "));
        }
    }

    let bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Filters"));
    f.render_widget(bar, area);
}

fn render_overview(f: &mut Frame, area: Rect, views: &DashboardViews) {
    let chunks = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    render_kpi_row(f, chunks[0], views);
    render_daily_chart(f, chunks[1], views);
}

fn render_kpi_row(f: &mut Frame, area: Rect, views: &DashboardViews) {
    let tiles = RatLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(area);

    let kpis = &views.kpis;
    let cells: [(&str, String, Color); 4] = [
        ("Total Revenue", format_usd(kpis.total_revenue), Color::Green),
        (
            "Total Transactions",
            format_count(kpis.total_transactions as u64),
            Color::Cyan,
        ),
        (
            "Avg Transaction Value",
            format_usd(kpis.avg_transaction_value),
            Color::Yellow,
        ),
        ("Items Sold", format_count(kpis.total_items), Color::Magenta),
    ];

    for (i, (title, value, color)) in cells.into_iter().enumerate() {
        let tile = Paragraph::new(Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(tile, tiles[i]);
    }
}

fn render_daily_chart(f: &mut Frame, area: Rect, views: &DashboardViews) {
    let points: Vec<(f64, f64)> = views
        .daily
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.revenue))
        .collect();

    let max_y = points.iter().map(|p| p.1).fold(0.0f64, f64::max).max(1.0);
    let max_x = (points.len().saturating_sub(1)).max(1) as f64;

    let x_labels = edge_labels(&views.daily, |p| p.date.format("%Y-%m-%d").to_string());
    let y_labels = vec![
        Span::raw("$0"),
        Span::raw(format_usd_compact(max_y / 2.0)),
        Span::raw(format_usd_compact(max_y)),
    ];

    let datasets = vec![Dataset::default()
        .name("Revenue")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Daily Revenue Trend"),
        )
        .x_axis(
            Axis::default()
                .title("Date")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max_x])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Revenue ($)")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max_y * 1.1])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

fn render_products(f: &mut Frame, area: Rect, views: &DashboardViews) {
    let chunks = RatLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_top_products(f, chunks[0], views);
    render_category_mix(f, chunks[1], views);
}

fn render_top_products(f: &mut Frame, area: Rect, views: &DashboardViews) {
    let bars: Vec<Bar> = views
        .top_products
        .iter()
        .map(|p| {
            Bar::default()
                .value(p.revenue.round() as u64)
                .label(Line::from(p.product_type.clone()))
                .text_value(format_usd_compact(p.revenue))
                .style(Style::default().fg(Color::Cyan))
                .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Top 10 Products by Revenue"),
        )
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));

    f.render_widget(chart, area);
}

fn render_category_mix(f: &mut Frame, area: Rect, views: &DashboardViews) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let bar_span = inner_width.saturating_sub(30).max(8);

    let lines: Vec<Line> = views
        .categories
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let color = CATEGORY_COLORS[i % CATEGORY_COLORS.len()];
            let filled = (c.share * bar_span as f64).round() as usize;
            Line::from(vec![
                Span::raw(format!("{:<12} ", c.category)),
                Span::styled("█".repeat(filled.max(1)), Style::default().fg(color)),
                Span::raw(format!(
                    " {:>5.1}%  {}",
                    c.share * 100.0,
                    format_usd(c.revenue)
                )),
            ])
        })
        .collect();

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Sales by Category"),
    );
    f.render_widget(panel, area);
}

fn render_stores(f: &mut Frame, area: Rect, views: &DashboardViews) {
    let table_height = (views.stores.len() as u16).saturating_add(3);
    let chunks = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(table_height)])
        .split(area);

    let bars: Vec<Bar> = views
        .stores
        .iter()
        .map(|s| {
            Bar::default()
                .value(s.revenue.round() as u64)
                .label(Line::from(s.store.clone()))
                .text_value(format_usd_compact(s.revenue))
                .style(Style::default().fg(Color::Green))
                .value_style(Style::default().fg(Color::Black).bg(Color::Green))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Revenue by Store Location"),
        )
        .bar_width(16)
        .bar_gap(3)
        .data(BarGroup::default().bars(&bars));
    f.render_widget(chart, chunks[0]);

    // Item counts ride along in the table; a bar carries one value label.
    let header = Row::new(vec!["Store", "Revenue", "Transactions", "Items Sold"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = views
        .stores
        .iter()
        .map(|s| {
            Row::new(vec![
                s.store.clone(),
                format_usd(s.revenue),
                format_count(s.transactions as u64),
                format_count(s.items),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(20),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Store Detail"));
    f.render_widget(table, chunks[1]);
}

fn render_patterns(f: &mut Frame, area: Rect, views: &DashboardViews) {
    let chunks = RatLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_hourly_chart(f, chunks[0], views);
    render_weekday_chart(f, chunks[1], views);
}

fn render_hourly_chart(f: &mut Frame, area: Rect, views: &DashboardViews) {
    let points: Vec<(f64, f64)> = views
        .hourly
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.avg_revenue))
        .collect();

    let max_y = points.iter().map(|p| p.1).fold(0.0f64, f64::max).max(1.0);
    let max_x = (points.len().saturating_sub(1)).max(1) as f64;

    let x_labels = edge_labels(&views.hourly, |p| p.hour.clone());
    let y_labels = vec![
        Span::raw("$0"),
        Span::raw(format_usd_compact(max_y / 2.0)),
        Span::raw(format_usd_compact(max_y)),
    ];

    let datasets = vec![Dataset::default()
        .name("Avg sale")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Magenta))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Average Sales by Hour"),
        )
        .x_axis(
            Axis::default()
                .title("Hour of Day")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max_x])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Average Sales ($)")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max_y * 1.1])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

fn render_weekday_chart(f: &mut Frame, area: Rect, views: &DashboardViews) {
    let bars: Vec<Bar> = views
        .weekdays
        .iter()
        .map(|p| {
            // A day with no rows in range stays visibly absent; never "$0".
            let (value, text) = match p.avg_revenue {
                Some(avg) => (avg.round() as u64, format_usd(avg)),
                None => (0, "n/a".to_string()),
            };
            Bar::default()
                .value(value)
                .label(Line::from(short_day(p.day)))
                .text_value(text)
                .style(Style::default().fg(Color::Yellow))
                .value_style(Style::default().fg(Color::Black).bg(Color::Yellow))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Average Sales by Day of Week"),
        )
        .bar_width(7)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));

    f.render_widget(chart, area);
}

fn render_data_table(f: &mut Frame, area: Rect, app: &App) {
    let visible = area.height.saturating_sub(3) as usize;
    let from = app.table_offset.min(app.filtered.len());
    let to = (from + visible).min(app.filtered.len());

    let header = Row::new(vec![
        "Date", "Time", "Txn", "Store", "Category", "Product", "Qty", "Unit", "Total",
    ])
    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = app.filtered[from..to]
        .iter()
        .map(|t| {
            Row::new(vec![
                t.transaction_date.to_string(),
                t.transaction_time.clone(),
                t.transaction_id.to_string(),
                t.store_location.clone(),
                t.product_category.clone(),
                t.product_type.clone(),
                t.transaction_qty.to_string(),
                format_usd(t.unit_price),
                format_usd(t.total_price),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(10), // Date
        Constraint::Length(8),  // Time
        Constraint::Length(6),  // Txn
        Constraint::Length(16), // Store
        Constraint::Length(12), // Category
        Constraint::Length(20), // Product
        Constraint::Length(4),  // Qty
        Constraint::Length(8),  // Unit
        Constraint::Length(10), // Total
    ];

    let title = format!(
        "Transactions (rows {}-{} of {})",
        from + 1,
        to,
        app.filtered.len()
    );
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(table, area);
}

fn render_empty_notice(f: &mut Frame, area: Rect) {
    let notice = Paragraph::new(vec![
        Line::raw(""),
        Line::from(Span::styled(
            "No data available for the selected filters.",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::raw("Widen the date range, re-enable stores (1-9/a), or press 'r' to reset."),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Notice"));

    f.render_widget(notice, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let text = Line::from(vec![
        Span::styled("Rows: ", Style::default().fg(Color::Cyan)),
        Span::raw(format!(
            "{}/{}",
            format_count(app.filtered.len() as u64),
            format_count(app.total_rows() as u64)
        )),
        Span::raw(" | "),
        Span::raw("q quit | Tab views | s/e pick date, \u{2190}/\u{2192} adjust | 1-9 stores | a all | n none | r reset"),
    ]);

    let footer = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(footer, area);
}

/// First/middle/last labels for an index-positioned axis.
fn edge_labels<T, F>(items: &[T], label: F) -> Vec<Span<'static>>
where
    F: Fn(&T) -> String,
{
    match items.len() {
        0 => Vec::new(),
        1 => vec![Span::raw(label(&items[0]))],
        len => vec![
            Span::raw(label(&items[0])),
            Span::raw(label(&items[len / 2])),
            Span::raw(label(&items[len - 1])),
        ],
    }
}
