use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use positions_core::controllers::AuthFlow;

use crate::app::{App, LoginFocus};
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

/// Visible width of the text fields
const FIELD_WIDTH: usize = 20;

/// Show the tail of a value that is wider than its field
fn field_tail(value: &str) -> String {
    let count = value.chars().count();
    value.chars().skip(count.saturating_sub(FIELD_WIDTH)).collect()
}

fn field_line<'a>(label: &'a str, value: String, focused: bool) -> Line<'a> {
    let cursor = if focused { "▌" } else { "" };
    Line::from(vec![
        Span::raw("   "),
        Span::styled(label, styles::muted_style()),
        Span::styled(" [", styles::muted_style()),
        Span::styled(
            format!("{:<width$}{}", value, cursor, width = FIELD_WIDTH),
            styles::focus_style(focused),
        ),
        Span::styled("]", styles::muted_style()),
    ])
}

fn field_error_line(error: Option<&str>) -> Line<'_> {
    match error {
        Some(message) => Line::from(Span::styled(
            format!("              {}", message),
            styles::error_style(),
        )),
        None => Line::from(""),
    }
}

/// Login and register share this form; the flow picks labels and the link.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.auth_form;
    let flow = form.flow();

    let height = if form.error().is_some() { 15 } else { 13 };
    let area = centered_rect_fixed(46, height, area);

    // Clear the area
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];

    let username_focused = app.login_focus == LoginFocus::Username;
    lines.push(field_line("Username:", field_tail(&form.username), username_focused));
    lines.push(field_error_line(form.field_errors().username.as_deref()));

    let password_focused = app.login_focus == LoginFocus::Password;
    let password_masked = "*".repeat(form.password.chars().count().min(FIELD_WIDTH));
    lines.push(field_line("Password:", password_masked, password_focused));
    lines.push(field_error_line(form.field_errors().password.as_deref()));

    // Submit button, relabelled while the request is out
    let button_focused = app.login_focus == LoginFocus::Button;
    let label = if form.submitting() {
        flow.busy_label()
    } else {
        flow.action_label()
    };
    let button_text = if button_focused {
        format!(" ▶ {} ◀ ", label)
    } else {
        format!("   {}   ", label)
    };
    lines.push(Line::from(vec![
        Span::raw("            ["),
        Span::styled(button_text, styles::focus_style(button_focused)),
        Span::raw("]"),
    ]));

    // Error message
    if let Some(error) = form.error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("   {}", error),
            styles::error_style(),
        )));
    }

    lines.push(Line::from(""));
    let (prompt, link) = match flow {
        AuthFlow::Login => ("Don't have an account yet? ", "Register"),
        AuthFlow::Register => ("Already have an account? ", "Login"),
    };
    let switch_focused = app.login_focus == LoginFocus::Switch;
    let link_style = if switch_focused {
        styles::selected_style()
    } else {
        styles::highlight_style()
    };
    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled(prompt, styles::muted_style()),
        Span::styled(link, link_style),
    ]));

    let block = Block::default()
        .title(format!(" {} ", flow.action_label()))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let paragraph = Paragraph::new(lines).block(block);

    frame.render_widget(paragraph, area);
}
