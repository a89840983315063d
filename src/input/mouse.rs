use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::{App, Mode, Pane};
use crate::ui::layout::{self, BoardLayout};

/// Handle a mouse event against the layout of the last drawn frame
pub fn handle_mouse_input(app: &mut App, event: MouseEvent, area: Rect) {
    if !matches!(app.mode, Mode::Normal | Mode::Drag) {
        return;
    }
    let board_layout = BoardLayout::compute(area, app.show_completed);

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app.mode == Mode::Drag {
                // A task picked up with the keyboard is dropped where the click lands
                drop_at(app, &board_layout, event.column, event.row);
            } else {
                press_at(app, &board_layout, event.column, event.row);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(q) = board_layout.quadrant_at(event.column, event.row) {
                app.drag_over(q);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if app.mode == Mode::Drag {
                drop_at(app, &board_layout, event.column, event.row);
            }
        }
        MouseEventKind::ScrollDown => app.select_next(),
        MouseEventKind::ScrollUp => app.select_prev(),
        _ => {}
    }
}

/// Focus the pane under the pointer, select the row and pick it up
fn press_at(app: &mut App, board_layout: &BoardLayout, column: u16, row: u16) {
    let Some(pane) = board_layout.pane_at(column, row) else {
        return;
    };
    let focused_before = app.focused_pane == pane;
    app.focus_pane(pane);

    let visible = board_layout
        .pane_rect(pane)
        .map(|r| layout::list_area(r).height)
        .unwrap_or(0);
    // Unfocused panes are drawn without a selection, hence unscrolled
    let selected = focused_before.then(|| app.selected_index(pane));
    let offset = layout::scroll_offset(selected, visible);

    let Some(index) = board_layout.row_at(pane, row, offset, app.pane_len(pane)) else {
        return;
    };
    app.select(pane, index);

    if let Pane::Quadrant(_) = pane {
        if let Some(id) = app.selected_task_id() {
            app.start_drag(id);
        }
    }
}

/// Release over a quadrant drops there; anywhere else cancels
fn drop_at(app: &mut App, board_layout: &BoardLayout, column: u16, row: u16) {
    match board_layout.quadrant_at(column, row) {
        Some(q) => {
            app.drag_over(q);
            app.drop_drag();
        }
        None => app.cancel_drag(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{add, test_app, today};
    use crate::models::Quadrant;
    use crossterm::event::KeyModifiers;

    fn area() -> Rect {
        Rect::new(0, 0, 100, 42)
    }

    fn mouse(app: &mut App, kind: MouseEventKind, column: u16, row: u16) {
        handle_mouse_input(
            app,
            MouseEvent {
                kind,
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
            area(),
        );
    }

    fn first_row(quadrant: Quadrant) -> (u16, u16) {
        let rect = BoardLayout::compute(area(), false).quadrants[quadrant.index()];
        (rect.x + 2, rect.y + 1)
    }

    #[test]
    fn test_drag_between_quadrants() {
        let mut app = test_app();
        let a = add(&mut app, "a", today(), Quadrant::UrgentImportant);

        let (x, y) = first_row(Quadrant::UrgentImportant);
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), x, y);
        assert!(app.session.is_dragging(&a));

        let (tx, ty) = first_row(Quadrant::NotUrgentImportant);
        mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), tx, ty);
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), tx, ty);

        assert!(app.session.dragging().is_none());
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.board.get(&a).unwrap().quadrant, Quadrant::NotUrgentImportant);
    }

    #[test]
    fn test_release_outside_cancels() {
        let mut app = test_app();
        let a = add(&mut app, "a", today(), Quadrant::UrgentImportant);

        let (x, y) = first_row(Quadrant::UrgentImportant);
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), x, y);
        // Header row is outside every quadrant
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 5, 0);

        assert!(app.session.dragging().is_none());
        assert_eq!(app.board.get(&a).unwrap().quadrant, Quadrant::UrgentImportant);
    }

    #[test]
    fn test_click_selects_row() {
        let mut app = test_app();
        add(&mut app, "a", today(), Quadrant::UrgentNotImportant);
        let b = add(&mut app, "b", today(), Quadrant::UrgentNotImportant);

        let (x, y) = first_row(Quadrant::UrgentNotImportant);
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), x, y + 1);
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), x, y + 1);

        assert_eq!(app.focused_pane, Pane::Quadrant(Quadrant::UrgentNotImportant));
        assert_eq!(app.selected_task_id(), Some(b));
        assert_eq!(app.board.tasks_in(Quadrant::UrgentNotImportant).len(), 2);
    }

    #[test]
    fn test_mouse_ignored_while_dialog_open() {
        let mut app = test_app();
        add(&mut app, "a", today(), Quadrant::UrgentImportant);
        app.open_new_task_form();

        let (x, y) = first_row(Quadrant::UrgentImportant);
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), x, y);
        assert!(app.session.dragging().is_none());
        assert_eq!(app.mode, Mode::Dialog);
    }
}
