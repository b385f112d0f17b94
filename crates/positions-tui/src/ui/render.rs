use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use positions_core::Route;

use crate::app::{App, AppState};

use super::styles;
use super::views::{auth, dashboard, intro};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_main_content(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    // Render overlays
    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        AppState::ConfirmingDelete(position_id) => render_delete_overlay(frame, app, position_id),
        AppState::Normal | AppState::Quitting => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!("  Positions | {}", app.route.title());
    let help_hint = "[?] Help";

    let title_line = Line::from(vec![
        Span::styled(title.clone(), styles::title_style()),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub(title.chars().count() as u16 + help_hint.len() as u16 + 4)
                as usize,
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    // Nothing of a view is drawn until its guard has let it through
    if !app.guard.is_ready() {
        return;
    }

    match app.route {
        Route::Intro => intro::render(frame, app, area),
        Route::Login | Route::Register => auth::render(frame, app, area),
        Route::Dashboard => dashboard::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.route {
        Route::Intro => "[Enter] login | [r]egister | [q]uit",
        Route::Login | Route::Register => "[Tab] next | [Enter] submit | [Esc] back",
        Route::Dashboard => "[Tab] focus | [F5] refresh | [l]ogout | [q]uit",
    };

    let (left_text, left_style) = if let Some(ref msg) = app.status_message {
        (format!(" {} ", msg), styles::success_style())
    } else if app.route == Route::Dashboard {
        let updated = app
            .dashboard
            .last_loaded()
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string());
        (format!(" Updated {} ", updated), styles::muted_style())
    } else {
        (format!(" {} ", app.api.base_url()), styles::muted_style())
    };

    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());
    let status_line = Line::from(vec![
        Span::styled(left_text, left_style),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 24, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("  Positions", styles::title_style())),
        Line::from(Span::styled(
            format!("  version {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Forms", styles::highlight_style())),
        help_line("Tab/↓", "Next field"),
        help_line("S-Tab/↑", "Previous field"),
        help_line("Enter", "Submit / follow link"),
        help_line("Esc", "Back / cancel edit"),
        Line::from(""),
        Line::from(Span::styled(" Position Table", styles::highlight_style())),
        help_line("↑/↓ j/k", "Move selection"),
        help_line("e/Enter", "Edit selected position"),
        help_line("d/Del", "Delete selected position"),
        help_line("n", "New position"),
        help_line("r/F5", "Refresh the list"),
        help_line("l", "Log out"),
        Line::from(""),
        Line::from(Span::styled(" General", styles::highlight_style())),
        help_line("q", "Quit"),
        help_line("Ctrl+C", "Quit immediately"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(help_text).block(block);

    frame.render_widget(paragraph, area);
}

/// Create a centered rectangle with fixed dimensions
pub(crate) fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn confirm_line(action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled("   Press ", styles::muted_style()),
        Span::styled("[Y]", styles::help_key_style()),
        Span::styled(format!(" to {}, ", action), styles::muted_style()),
        Span::styled("[N]", styles::help_key_style()),
        Span::styled(" to cancel", styles::muted_style()),
    ])
}

fn render_confirm_dialog(frame: &mut Frame, lines: Vec<Line>) {
    let area = centered_rect_fixed(46, lines.len() as u16 + 2, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block);

    frame.render_widget(paragraph, area);
}

fn render_quit_overlay(frame: &mut Frame) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        confirm_line("quit"),
    ];
    render_confirm_dialog(frame, lines);
}

fn render_delete_overlay(frame: &mut Frame, app: &App, position_id: i64) {
    let name = app
        .dashboard
        .positions()
        .iter()
        .find(|p| p.position_id == position_id)
        .map(|p| p.position_name.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| format!("#{}", position_id));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Delete this position?",
            styles::highlight_style(),
        )),
        Line::from(Span::styled(format!("   {}", name), styles::list_item_style())),
        Line::from(""),
        confirm_line("delete"),
    ];
    render_confirm_dialog(frame, lines);
}
