use crate::app::{App, Mode, Pane};
use crate::input::commands::{Command, DragCommand};
use crate::input::form::FormAction;
use crate::models::Quadrant;
use crate::ui::dialogs::DialogType;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

/// Handle one key press; false means quit
pub fn handle_key_input(app: &mut App, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Drag => handle_drag_mode(app, key),
        Mode::Dialog => handle_dialog_mode(app, key),
        Mode::Help => handle_help_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) -> bool {
    let Some(cmd) = match_key(key) else {
        return true;
    };
    if cmd == Command::Quit {
        return false;
    }

    execute_command(app, cmd);
    true
}

/// Map a key to a normal-mode command
pub fn match_key(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }

    match key.code {
        KeyCode::Char('q') => Some(Command::Quit),

        KeyCode::Char('j') | KeyCode::Down => Some(Command::TaskDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Command::TaskUp),
        KeyCode::Char('h') | KeyCode::Left => Some(Command::QuadrantLeft),
        KeyCode::Char('l') | KeyCode::Right => Some(Command::QuadrantRight),
        KeyCode::Char('J') => Some(Command::QuadrantDown),
        KeyCode::Char('K') => Some(Command::QuadrantUp),
        KeyCode::Tab => Some(Command::FocusNextPane),
        KeyCode::BackTab => Some(Command::FocusPrevPane),
        KeyCode::Char(c @ '1'..='4') => quadrant_for_digit(c).map(Command::FocusQuadrant),

        KeyCode::Char('a') | KeyCode::Char('n') => Some(Command::NewTask),
        KeyCode::Char('e') | KeyCode::Enter => Some(Command::EditTask),
        KeyCode::Char('x') | KeyCode::Char(' ') => Some(Command::ToggleComplete),
        KeyCode::Char('r') => Some(Command::RestoreTask),
        KeyCode::Char('d') | KeyCode::Delete => Some(Command::DeleteTask),
        KeyCode::Char('m') => Some(Command::GrabTask),

        KeyCode::Char('c') => Some(Command::ToggleCompleted),
        KeyCode::Char('R') => Some(Command::Reload),
        KeyCode::Char('?') => Some(Command::ShowHelp),
        _ => None,
    }
}

/// Map a key to a command while a task is picked up
pub fn match_drag_key(key: KeyEvent) -> Option<DragCommand> {
    match key.code {
        KeyCode::Esc => Some(DragCommand::Cancel),
        KeyCode::Enter | KeyCode::Char('m') | KeyCode::Char(' ') => Some(DragCommand::Drop),
        KeyCode::Char('h') | KeyCode::Left => Some(DragCommand::TargetLeft),
        KeyCode::Char('l') | KeyCode::Right => Some(DragCommand::TargetRight),
        KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Up => Some(DragCommand::TargetUp),
        KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Down => Some(DragCommand::TargetDown),
        KeyCode::Char(c @ '1'..='4') => quadrant_for_digit(c).map(DragCommand::Target),
        _ => None,
    }
}

fn quadrant_for_digit(c: char) -> Option<Quadrant> {
    c.to_digit(10)
        .and_then(|d| Quadrant::from_index(d as usize - 1))
}

fn execute_command(app: &mut App, cmd: Command) {
    debug!(?cmd, "command");
    match cmd {
        Command::Quit => {}
        Command::TaskDown => app.select_next(),
        Command::TaskUp => app.select_prev(),
        Command::QuadrantLeft => move_focus(app, Quadrant::left),
        Command::QuadrantRight => move_focus(app, Quadrant::right),
        Command::QuadrantDown => move_focus(app, Quadrant::down),
        Command::QuadrantUp => move_focus(app, Quadrant::up),
        Command::FocusNextPane => app.focus_next(true),
        Command::FocusPrevPane => app.focus_next(false),
        Command::FocusQuadrant(q) => app.focus_pane(Pane::Quadrant(q)),

        Command::NewTask => app.open_new_task_form(),
        Command::EditTask => {
            if app.focused_pane != Pane::Completed {
                if let Some(id) = app.selected_task_id() {
                    app.open_edit_form(id);
                }
            }
        }
        Command::ToggleComplete => app.toggle_complete_selected(),
        Command::RestoreTask => app.restore_selected(),
        Command::DeleteTask => {
            if let Some(id) = app.selected_task_id() {
                app.request_delete(id);
            }
        }
        Command::GrabTask => {
            if app.focused_pane != Pane::Completed {
                if let Some(id) = app.selected_task_id() {
                    app.start_drag(id);
                }
            }
        }

        Command::ToggleCompleted => app.toggle_completed_visibility(),
        Command::Reload => app.reload(),
        Command::ShowHelp => app.mode = Mode::Help,
    }
}

/// Move focus across the grid; from the completed pane, h/l/J/K return to the top-left quadrant
fn move_focus(app: &mut App, step: fn(Quadrant) -> Quadrant) {
    let next = match app.focused_pane {
        Pane::Quadrant(q) => step(q),
        Pane::Completed => Quadrant::UrgentImportant,
    };
    app.focus_pane(Pane::Quadrant(next));
}

fn handle_drag_mode(app: &mut App, key: KeyEvent) -> bool {
    let Some(target) = app.session.dragging().map(|d| d.target) else {
        app.mode = Mode::Normal;
        return true;
    };

    match match_drag_key(key) {
        Some(DragCommand::Cancel) => app.cancel_drag(),
        Some(DragCommand::Drop) => app.drop_drag(),
        Some(DragCommand::Target(q)) => app.drag_over(q),
        Some(DragCommand::TargetLeft) => app.drag_over(target.left()),
        Some(DragCommand::TargetRight) => app.drag_over(target.right()),
        Some(DragCommand::TargetUp) => app.drag_over(target.up()),
        Some(DragCommand::TargetDown) => app.drag_over(target.down()),
        None => {}
    }
    true
}

fn handle_dialog_mode(app: &mut App, key: KeyEvent) -> bool {
    let Some(dialog) = app.dialog.as_mut() else {
        app.mode = Mode::Normal;
        return true;
    };

    match dialog {
        DialogType::TaskForm(form) => match form.handle_key(key) {
            FormAction::Continue => {}
            FormAction::Submit => app.submit_form(),
            FormAction::Cancel => app.close_dialog(),
        },
        DialogType::Confirm { yes_selected, .. } => match key.code {
            KeyCode::Esc | KeyCode::Char('n') => app.answer_confirm(false),
            KeyCode::Char('y') => app.answer_confirm(true),
            KeyCode::Enter => {
                let confirmed = *yes_selected;
                app.answer_confirm(confirmed);
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Tab => *yes_selected = !*yes_selected,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::BackTab => *yes_selected = !*yes_selected,
            _ => {}
        },
    }
    true
}

fn handle_help_mode(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
            app.mode = Mode::Normal;
        }
        _ => {}
    }
    true
}
