use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let area = centered_rect_fixed(46, 10, area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("   Welcome to Positions", styles::title_style())),
        Line::from(Span::styled(
            "   Manage the positions of your organisation",
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   [Enter]", styles::help_key_style()),
            Span::styled(" Log in   ", styles::help_desc_style()),
            Span::styled("[r]", styles::help_key_style()),
            Span::styled(" Register", styles::help_desc_style()),
        ]),
    ];

    if app.is_authenticated() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("   [d]", styles::help_key_style()),
            Span::styled(" Open the dashboard", styles::help_desc_style()),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
