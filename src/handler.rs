use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, AppMode, HeaderKind};
use crate::event::EventSender;

/// Handle a key event according to the current mode.
pub fn handle_key_event(app: &mut App, key: KeyEvent, tx: &EventSender) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match app.mode {
        AppMode::Normal => handle_normal(app, key, tx),
        AppMode::Rename { .. } => handle_rename(app, key),
        AppMode::DeleteConfirm { .. } => handle_delete_confirm(app, key),
    }
}

fn handle_normal(app: &mut App, key: KeyEvent, tx: &EventSender) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => app.open_selected(tx),
        KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Left => app.go_back(tx),
        KeyCode::Char('r') | KeyCode::F(2) => app.request_rename(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('u') => app.request_upload(tx),
        KeyCode::Char('R') => app.load_current(tx),
        KeyCode::Char('1') => app.set_header(HeaderKind::A),
        KeyCode::Char('2') => app.set_header(HeaderKind::B),
        KeyCode::Char('3') => app.set_header(HeaderKind::C),
        _ => {}
    }
}

fn handle_rename(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.confirm_rename(),
        KeyCode::Esc => app.cancel_rename(),
        code => {
            let Some(draft) = app.rename_draft_mut() else {
                return;
            };
            match code {
                KeyCode::Char(c) => draft.insert_char(c),
                KeyCode::Backspace => draft.delete_char(),
                KeyCode::Left => draft.move_left(),
                KeyCode::Right => draft.move_right(),
                KeyCode::Home => draft.home(),
                KeyCode::End => draft.end(),
                _ => {}
            }
        }
    }
}

fn handle_delete_confirm(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }
}
