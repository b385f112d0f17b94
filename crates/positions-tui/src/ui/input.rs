//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use crossterm::event::{KeyCode, KeyEvent};

use positions_core::controllers::{
    can_add_field_char, can_add_password_char, can_add_username_char, PositionField,
};
use positions_core::Route;

use crate::app::{App, AppState, DashboardFocus, LoginFocus};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return false;
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return true;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return false;
    }

    // Handle delete confirmation
    if let AppState::ConfirmingDelete(position_id) = app.state {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.confirm_delete(position_id);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return false;
    }

    // Any key acknowledges the status message
    app.status_message = None;

    match app.route {
        Route::Intro => handle_intro_input(app, key),
        Route::Login | Route::Register => handle_auth_input(app, key),
        Route::Dashboard => handle_dashboard_input(app, key),
    }
    false
}

fn handle_intro_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.navigate(Route::Login),
        KeyCode::Char('r') => app.navigate(Route::Register),
        KeyCode::Char('d') if app.is_authenticated() => app.navigate(Route::Dashboard),
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Char('q') | KeyCode::Esc => app.state = AppState::ConfirmingQuit,
        _ => {}
    }
}

fn handle_auth_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.navigate(Route::Intro),
        KeyCode::Down | KeyCode::Tab => {
            app.login_focus = app.login_focus.next();
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.login_focus = app.login_focus.prev();
        }
        KeyCode::Enter => match app.login_focus {
            LoginFocus::Username => {
                app.login_focus = LoginFocus::Password;
            }
            LoginFocus::Password | LoginFocus::Button => app.submit_auth(),
            LoginFocus::Switch => {
                let route = app.auth_form.flow().other().route();
                app.navigate(route);
            }
        },
        KeyCode::Backspace => match app.login_focus {
            LoginFocus::Username => {
                app.auth_form.username.pop();
            }
            LoginFocus::Password => {
                app.auth_form.password.pop();
            }
            LoginFocus::Button | LoginFocus::Switch => {}
        },
        KeyCode::Char(c) => match app.login_focus {
            LoginFocus::Username => {
                if can_add_username_char(app.auth_form.username.chars().count(), c) {
                    app.auth_form.username.push(c);
                }
            }
            LoginFocus::Password => {
                if can_add_password_char(app.auth_form.password.chars().count(), c) {
                    app.auth_form.password.push(c);
                }
            }
            LoginFocus::Button | LoginFocus::Switch => {
                if c == '?' {
                    app.state = AppState::ShowingHelp;
                }
            }
        },
        _ => {}
    }
}

fn handle_dashboard_input(app: &mut App, key: KeyEvent) {
    // Keys that work regardless of focus
    match key.code {
        KeyCode::F(5) => {
            app.refresh_positions();
            return;
        }
        KeyCode::Tab => {
            app.dashboard_focus = app.dashboard_focus.next();
            return;
        }
        KeyCode::BackTab => {
            app.dashboard_focus = app.dashboard_focus.prev();
            return;
        }
        _ => {}
    }

    match app.dashboard_focus {
        DashboardFocus::Field(field) => handle_form_input(app, field, key),
        DashboardFocus::Table => handle_table_input(app, key),
    }
}

fn handle_form_input(app: &mut App, field: PositionField, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_position(),
        KeyCode::Esc => {
            if app.dashboard.editing_id().is_some() {
                app.dashboard.cancel_edit();
            } else {
                app.dashboard_focus = DashboardFocus::Table;
            }
        }
        KeyCode::Down => {
            app.dashboard_focus = app.dashboard_focus.next();
        }
        KeyCode::Up => {
            app.dashboard_focus = app.dashboard_focus.prev();
        }
        KeyCode::Backspace => {
            app.dashboard.form.value_mut(field).pop();
        }
        KeyCode::Char(c) => {
            let value = app.dashboard.form.value_mut(field);
            if can_add_field_char(value.chars().count(), c) {
                value.push(c);
            }
        }
        _ => {}
    }
}

fn handle_table_input(app: &mut App, key: KeyEvent) {
    let len = app.dashboard.positions().len();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.table_selection = app.table_selection.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.table_selection + 1 < len {
                app.table_selection += 1;
            }
        }
        KeyCode::Home => app.table_selection = 0,
        KeyCode::End => app.table_selection = len.saturating_sub(1),
        KeyCode::Enter | KeyCode::Char('e') => app.edit_selected(),
        KeyCode::Delete | KeyCode::Char('d') => app.request_delete_selected(),
        KeyCode::Char('n') => {
            app.dashboard.cancel_edit();
            app.dashboard_focus = DashboardFocus::Field(PositionField::Code);
        }
        KeyCode::Char('r') => app.refresh_positions(),
        KeyCode::Char('l') => app.logout(),
        KeyCode::Esc => app.dashboard.cancel_edit(),
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        _ => {}
    }
}
