//! Screen geometry shared by drawing and mouse hit-testing.
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

use crate::app::Pane;
use crate::models::Quadrant;

/// Share of the body width given to the completed list when it is visible
const COMPLETED_PERCENT: u16 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    /// Title and statistics
    pub header: Rect,
    /// Indexed by `Quadrant::index()`
    pub quadrants: [Rect; 4],
    pub completed: Option<Rect>,
    /// Key hints or the drag banner
    pub footer: Rect,
}

impl BoardLayout {
    pub fn compute(area: Rect, show_completed: bool) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Min(0),    // board
                Constraint::Length(1), // footer
            ])
            .split(area);

        let (grid, completed) = if show_completed {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(100 - COMPLETED_PERCENT),
                    Constraint::Percentage(COMPLETED_PERCENT),
                ])
                .split(rows[1]);
            (body[0], Some(body[1]))
        } else {
            (rows[1], None)
        };

        let halves = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(grid);
        let mut quadrants = [Rect::default(); 4];
        for (row, half) in halves.iter().enumerate() {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(*half);
            for (col, cell) in cells.iter().enumerate() {
                quadrants[Quadrant::at(row, col).index()] = *cell;
            }
        }

        Self {
            header: rows[0],
            quadrants,
            completed,
            footer: rows[2],
        }
    }

    pub fn pane_rect(&self, pane: Pane) -> Option<Rect> {
        match pane {
            Pane::Quadrant(q) => Some(self.quadrants[q.index()]),
            Pane::Completed => self.completed,
        }
    }

    pub fn quadrant_at(&self, column: u16, row: u16) -> Option<Quadrant> {
        let pos = Position::new(column, row);
        Quadrant::ALL
            .into_iter()
            .find(|q| self.quadrants[q.index()].contains(pos))
    }

    pub fn pane_at(&self, column: u16, row: u16) -> Option<Pane> {
        if let Some(q) = self.quadrant_at(column, row) {
            return Some(Pane::Quadrant(q));
        }
        self.completed
            .filter(|r| r.contains(Position::new(column, row)))
            .map(|_| Pane::Completed)
    }

    /// Index of the task drawn at screen row `row` inside `pane`, if any
    pub fn row_at(&self, pane: Pane, row: u16, offset: usize, len: usize) -> Option<usize> {
        let rect = self.pane_rect(pane)?;
        let inner = list_area(rect);
        if row < inner.y || row >= inner.y + inner.height {
            return None;
        }
        let index = offset + (row - inner.y) as usize;
        (index < len).then_some(index)
    }
}

/// Area inside a pane's border where rows are drawn
pub fn list_area(rect: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}

/// First visible row so that `selected` stays on screen
pub fn scroll_offset(selected: Option<usize>, visible: u16) -> usize {
    let visible = visible.max(1) as usize;
    match selected {
        Some(index) if index >= visible => index + 1 - visible,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_positions() {
        let layout = BoardLayout::compute(Rect::new(0, 0, 100, 42), false);
        assert_eq!(layout.header, Rect::new(0, 0, 100, 1));
        assert_eq!(layout.footer, Rect::new(0, 41, 100, 1));
        assert_eq!(layout.completed, None);

        assert_eq!(layout.quadrant_at(10, 5), Some(Quadrant::UrgentImportant));
        assert_eq!(layout.quadrant_at(90, 5), Some(Quadrant::UrgentNotImportant));
        assert_eq!(layout.quadrant_at(10, 30), Some(Quadrant::NotUrgentImportant));
        assert_eq!(layout.quadrant_at(90, 30), Some(Quadrant::NotUrgentNotImportant));
        assert_eq!(layout.quadrant_at(10, 0), None);
    }

    #[test]
    fn test_completed_pane_hit() {
        let layout = BoardLayout::compute(Rect::new(0, 0, 100, 42), true);
        let completed = layout.completed.unwrap();
        assert_eq!(layout.pane_at(completed.x + 1, 10), Some(Pane::Completed));
        assert_eq!(layout.quadrant_at(completed.x + 1, 10), None);
        assert_eq!(layout.pane_at(1, 10), Some(Pane::Quadrant(Quadrant::UrgentImportant)));
    }

    #[test]
    fn test_row_hit_respects_border_and_scroll() {
        let layout = BoardLayout::compute(Rect::new(0, 0, 100, 42), false);
        let pane = Pane::Quadrant(Quadrant::UrgentImportant);
        let top = layout.quadrants[0].y;

        assert_eq!(layout.row_at(pane, top, 0, 5), None);
        assert_eq!(layout.row_at(pane, top + 1, 0, 5), Some(0));
        assert_eq!(layout.row_at(pane, top + 3, 0, 5), Some(2));
        assert_eq!(layout.row_at(pane, top + 3, 2, 5), Some(4));
        assert_eq!(layout.row_at(pane, top + 6, 0, 5), None);
    }

    #[test]
    fn test_scroll_keeps_selection_visible() {
        assert_eq!(scroll_offset(None, 5), 0);
        assert_eq!(scroll_offset(Some(4), 5), 0);
        assert_eq!(scroll_offset(Some(5), 5), 1);
        assert_eq!(scroll_offset(Some(3), 0), 3);
    }
}
