//! Event handling for the TUI.

use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use super::app::{App, Mode};
use crate::geometry::Vec2;
use crate::input::{Key, Modifiers};
use crate::navigator::PointerButton;

/// Handle every event that arrives before `timeout` elapses.
pub fn handle_events(app: &mut App, timeout: Duration) -> std::io::Result<()> {
    let deadline = Instant::now() + timeout;

    while !app.should_quit {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if !event::poll(remaining)? {
            break;
        }
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(app, key),
            Event::Mouse(mouse) => handle_mouse_event(app, mouse),
            Event::FocusGained => app.navigator.focus(),
            Event::FocusLost => app.navigator.blur(),
            _ => {}
        }
    }
    Ok(())
}

/// Handle a single key event.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Global keys (work in any mode)
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Help => handle_help_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    app.input.set_modifiers(modifiers(key.modifiers));

    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }

        // Navigation, applied on the next tick
        KeyCode::Up | KeyCode::Char('k') => app.input.press(Key::Up),
        KeyCode::Down | KeyCode::Char('j') => app.input.press(Key::Down),
        KeyCode::Left | KeyCode::Char('h') => app.input.press(Key::Left),
        KeyCode::Right | KeyCode::Char('l') => app.input.press(Key::Right),

        KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input.press(Key::A);
            if !app.navigator.on_key_down(&app.tree, Key::A, &app.input) {
                app.status_message = Some("Multi-selection is disabled".to_string());
            }
        }

        KeyCode::Enter | KeyCode::Char(' ') => {
            app.toggle_expanded();
        }

        KeyCode::Char('r') => {
            if let Err(err) = app.reload() {
                tracing::warn!(error = %err, "Reload failed");
                app.status_message = Some(format!("Reload failed: {}", err));
            }
        }

        KeyCode::Char('?') => {
            app.mode = Mode::Help;
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

/// Handle a mouse event; buttons act on release over a tree row.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    if app.mode != Mode::Normal {
        return;
    }
    let button = match mouse.kind {
        MouseEventKind::Up(MouseButton::Left) => PointerButton::Left,
        MouseEventKind::Up(MouseButton::Right) => PointerButton::Right,
        _ => return,
    };
    let Some(node) = app.node_at_screen_row(mouse.row) else {
        return;
    };

    let location = Vec2::new(
        f32::from(mouse.column.saturating_sub(app.viewport.x)),
        f32::from(mouse.row.saturating_sub(app.viewport.y)),
    );
    if let Err(err) = app.navigator.pointer_up(
        &mut app.tree,
        node,
        button,
        modifiers(mouse.modifiers),
        location,
    ) {
        tracing::warn!(error = %err, "Pointer event ignored");
    }
    app.navigator.on_child_resized(&app.tree);
}

fn modifiers(keys: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: keys.contains(KeyModifiers::CONTROL),
        shift: keys.contains(KeyModifiers::SHIFT),
    }
}
