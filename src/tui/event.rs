//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, ConfirmAction, Mode};
use crate::view::SortColumn;

/// Poll for and handle events with a timeout.
///
/// Returns `Ok(true)` if an event was handled, `Ok(false)` if timeout expired.
pub fn handle_events(app: &mut App, timeout: Duration) -> std::io::Result<bool> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key_event(app, key);
            }
            return Ok(true);
        }
    }
    Ok(false)
}

/// Handle a single key event.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Global keys (work in any mode)
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // Mode-specific handling
    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Search => handle_search_mode(app, key),
        Mode::MinSize => handle_min_size_mode(app, key),
        Mode::Confirm(action) => handle_confirm_mode(app, key, action),
        Mode::Help => handle_help_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::Home | KeyCode::Char('g') => app.selected = 0,
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        KeyCode::PageUp => app.move_selection(-20),
        KeyCode::PageDown => app.move_selection(20),

        // Scanning
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.enter_selected(),
        KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => app.go_up(),
        KeyCode::Char('r') => app.start_scan(),
        KeyCode::Char('S') => app.scan(super::app::ScanTarget::System),
        KeyCode::Char('+') | KeyCode::Char('=') => app.change_depth(1),
        KeyCode::Char('-') => app.change_depth(-1),

        // Actions
        KeyCode::Char('o') => app.reveal_selected(),
        KeyCode::Char('d') => {
            if app.selected_item().is_some() {
                app.mode = Mode::Confirm(ConfirmAction::Trash);
            }
        }
        KeyCode::Char('c') => {
            if app.selected_item().is_some() {
                app.mode = Mode::Confirm(ConfirmAction::CleanFolder);
            }
        }
        KeyCode::Char('u') => app.undo(),

        // View
        KeyCode::Char('/') => {
            app.mode = Mode::Search;
            app.params.search.clear();
            app.refresh();
        }
        KeyCode::Char('f') => app.cycle_bucket(),
        KeyCode::Char('m') => {
            app.mode = Mode::MinSize;
            app.input = app.params.custom_mb.clone().unwrap_or_default();
        }
        KeyCode::Char('1') => app.sort_by(SortColumn::Category),
        KeyCode::Char('2') => app.sort_by(SortColumn::Name),
        KeyCode::Char('3') => app.sort_by(SortColumn::Path),
        KeyCode::Char('4') => app.sort_by(SortColumn::Size),

        // Help
        KeyCode::Char('?') => {
            app.mode = Mode::Help;
        }

        _ => {}
    }
}

fn handle_search_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::Normal;
            app.params.search.clear();
            app.refresh();
        }
        KeyCode::Enter => {
            app.mode = Mode::Normal;
            // Keep search query active
        }
        KeyCode::Backspace => {
            app.params.search.pop();
            app.refresh();
        }
        KeyCode::Char(c) => {
            app.params.search.push(c);
            app.refresh();
        }
        _ => {}
    }
}

fn handle_min_size_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::Normal;
            app.input.clear();
        }
        KeyCode::Enter => {
            app.apply_min_size_input();
            app.mode = Mode::Normal;
        }
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
            app.input.push(c);
        }
        _ => {}
    }
}

fn handle_confirm_mode(app: &mut App, key: KeyEvent, action: ConfirmAction) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            match action {
                ConfirmAction::Trash => app.trash_selected(),
                ConfirmAction::CleanFolder => app.clean_selected(),
            }
            app.mode = Mode::Normal;
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.mode = Mode::Normal;
        }
        _ => {}
    }
}

fn handle_help_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter => {
            app.mode = Mode::Normal;
        }
        _ => {}
    }
}
