use crate::ui::app::{App, Panel};
use crate::ui::auth::AuthIntent;
use crate::ui::inventory::{FormKind, InventoryIntent};
use crate::ui::movements::MovementsIntent;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') {
        app.request_quit();
        return;
    }

    // An open inventory form captures everything, including Tab.
    if app.focus() == Panel::Inventory && app.inventory().is_editing() {
        handle_form_key(app, key);
        return;
    }

    match key.code {
        KeyCode::Tab => {
            app.focus_next();
            return;
        }
        KeyCode::BackTab => {
            app.focus_previous();
            return;
        }
        _ => {}
    }

    match app.focus() {
        Panel::Auth => handle_auth_key(app, key),
        Panel::Inventory => handle_inventory_key(app, key),
        Panel::Movements => handle_movements_key(app, key),
    }
}

fn handle_auth_key(app: &mut App, key: KeyEvent) {
    if is_ctrl_char(key, 'r') {
        app.submit_register();
        return;
    }
    if is_ctrl_char(key, 'o') {
        app.logout();
        return;
    }

    match key.code {
        KeyCode::Up | KeyCode::Down => app.dispatch_auth(AuthIntent::FocusNext),
        KeyCode::Enter => app.submit_login(),
        KeyCode::Backspace => app.dispatch_auth(AuthIntent::Backspace),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.dispatch_auth(AuthIntent::Input(ch))
        }
        _ => {}
    }
}

fn handle_inventory_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.dispatch_inventory(InventoryIntent::MoveSelection(-1))
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.dispatch_inventory(InventoryIntent::MoveSelection(1))
        }
        KeyCode::Char('a') => app.open_inventory_form(FormKind::SetStock),
        KeyCode::Char('m') => app.open_inventory_form(FormKind::RecordMovement),
        KeyCode::Char('r') => app.load_inventory(),
        _ => {}
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.dispatch_inventory(InventoryIntent::CancelForm),
        KeyCode::Enter => {
            app.submit_inventory_form();
        }
        KeyCode::Backspace => app.dispatch_inventory(InventoryIntent::FormBackspace),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.dispatch_inventory(InventoryIntent::FormInput(ch))
        }
        _ => {}
    }
}

fn handle_movements_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return;
    }
    match key.code {
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            app.dispatch_movements(MovementsIntent::FocusNext)
        }
        KeyCode::Enter | KeyCode::Char('r') => app.load_movements(),
        KeyCode::Backspace => app.dispatch_movements(MovementsIntent::Backspace),
        KeyCode::Char(ch) if ch.is_ascii_digit() => {
            app.dispatch_movements(MovementsIntent::Input(ch))
        }
        _ => {}
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::SHIFT)
}
