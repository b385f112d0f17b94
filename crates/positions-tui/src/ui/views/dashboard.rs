use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use positions_core::controllers::PositionField;

use crate::app::{App, DashboardFocus};
use crate::ui::styles;

/// Visible width of each form field
const FIELD_WIDTH: usize = 18;

/// Footer label before the token
const TOKEN_LABEL: &str = " Token: ";

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Greeting
            Constraint::Length(6), // Form
            Constraint::Min(5),    // Table
            Constraint::Length(1), // Token footer
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_form(frame, app, chunks[1]);
    render_table(frame, app, chunks[2]);
    render_footer(frame, app, chunks[3]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let greeting = format!(" Welcome, {}", app.display_name);
    let logout = "[l] Logout ";
    let padding = (area.width as usize)
        .saturating_sub(greeting.chars().count())
        .saturating_sub(logout.len());

    let line = Line::from(vec![
        Span::styled(greeting, styles::title_style()),
        Span::raw(" ".repeat(padding)),
        Span::styled(logout, styles::muted_style()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn field_spans(app: &App, field: PositionField) -> Vec<Span<'static>> {
    let focused = app.dashboard_focus == DashboardFocus::Field(field);
    let value = app.dashboard.form.value(field);
    let count = value.chars().count();
    let visible: String = value.chars().skip(count.saturating_sub(FIELD_WIDTH)).collect();
    let cursor = if focused { "▌" } else { " " };

    vec![
        Span::styled(format!(" {:>13} [", field.label()), styles::muted_style()),
        Span::styled(
            format!("{:<width$}{}", visible, cursor, width = FIELD_WIDTH),
            styles::focus_style(focused),
        ),
        Span::styled("]", styles::muted_style()),
    ]
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let dashboard = &app.dashboard;

    let mut first_row = field_spans(app, PositionField::Code);
    first_row.extend(field_spans(app, PositionField::Name));
    let mut second_row = field_spans(app, PositionField::Type);
    second_row.extend(field_spans(app, PositionField::Department));

    let mut buttons = vec![
        Span::raw("  "),
        Span::styled(format!("[Enter] {}", dashboard.submit_label()), styles::help_key_style()),
        Span::raw("   "),
        Span::styled(format!("[F5] {}", dashboard.refresh_label()), styles::help_key_style()),
    ];
    if dashboard.editing_id().is_some() {
        buttons.push(Span::styled("   [Esc] Cancel", styles::muted_style()));
    }

    let status = match dashboard.error() {
        Some(error) => Line::from(Span::styled(format!("  {}", error), styles::error_style())),
        None => Line::from(""),
    };

    let lines = vec![Line::from(first_row), Line::from(second_row), Line::from(buttons), status];

    let title = match dashboard.editing_id() {
        Some(id) => format!(" Edit Position #{} ", id),
        None => " New Position ".to_string(),
    };
    let focused = matches!(app.dashboard_focus, DashboardFocus::Field(_));
    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let dashboard = &app.dashboard;
    let focused = app.dashboard_focus == DashboardFocus::Table;

    let mut title = format!(" Positions ({}) ", dashboard.positions().len());
    if dashboard.loading() {
        title.push_str("Loading... ");
    }
    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    if dashboard.positions().is_empty() {
        let message = if dashboard.loading() {
            " Loading positions..."
        } else {
            " No positions yet. Fill in the form above to add one."
        };
        let paragraph = Paragraph::new(Span::styled(message, styles::muted_style())).block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new([
        Cell::from("ID"),
        Cell::from("Code"),
        Cell::from("Name"),
        Cell::from("Type"),
        Cell::from("Department"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = dashboard
        .positions()
        .iter()
        .map(|p| {
            let style = if dashboard.deleting() == Some(p.position_id) {
                styles::muted_style()
            } else {
                styles::list_item_style()
            };
            Row::new(vec![
                Cell::from(p.position_id.to_string()),
                Cell::from(p.position_code.clone()),
                Cell::from(p.position_name.clone()),
                Cell::from(p.position_type.clone()),
                Cell::from(p.department.clone()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Fill(2),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ];

    let mut table = Table::new(rows, widths).header(header).block(block);
    if focused {
        table = table.row_highlight_style(styles::selected_style());
    }

    let mut state = TableState::default();
    state.select(Some(app.table_selection));

    frame.render_stateful_widget(table, area, &mut state);
}

/// Bearer token cut to `width` characters, marked with "..." when shortened
fn token_preview(token: &str, width: usize) -> String {
    if token.chars().count() <= width {
        return token.to_string();
    }
    let head: String = token.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", head)
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let width = (area.width as usize).saturating_sub(TOKEN_LABEL.len());
    let token = app
        .session_token()
        .map(|t| token_preview(t, width))
        .unwrap_or_default();
    let line = Line::from(vec![
        Span::styled(TOKEN_LABEL, styles::muted_style()),
        Span::styled(token, styles::muted_style()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
