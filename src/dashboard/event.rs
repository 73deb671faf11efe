//! Keyboard handling for the dashboard.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use super::app::{Action, App, View};

/// Apply a key press to `app`. Returns the service call it asks for, if any.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Sidebar buttons and quit work on every page
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return None;
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
            return None;
        }
        KeyCode::Char('p') | KeyCode::F(1) => return app.select_view(View::Prediction),
        KeyCode::Char('m') | KeyCode::F(2) => return app.select_view(View::Metrics),
        _ => {}
    }

    match app.session.view {
        View::Prediction => handle_prediction_keys(app, key),
        View::Metrics => handle_metrics_keys(key),
    }
}

fn handle_prediction_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => return Some(Action::Submit),
        KeyCode::Tab | KeyCode::Down => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.focus_previous(),
        KeyCode::Right | KeyCode::Char('+') => app.focused_input().increment(),
        KeyCode::Left | KeyCode::Char('-') => app.focused_input().decrement(),
        KeyCode::Backspace => app.focused_input().backspace(),
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => app.focused_input().push_char(c),
        _ => {}
    }
    None
}

fn handle_metrics_keys(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('r') => Some(Action::FetchMetrics),
        _ => None,
    }
}

/// Poll for events with a timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}
