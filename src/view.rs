//! Read-only projection of the board for drawing.
//!
//! The UI draws `BoardView` and nothing else, so every frame reflects the current
//! board snapshot and a stale widget can never feed data back into the store.
use chrono::NaiveDate;
use std::collections::HashMap;

use crate::app::Pane;
use crate::board::{BoardStats, Countdown, TaskBoard};
use crate::input::session::{DragSession, Session};
use crate::models::{Quadrant, Task, TaskId};

/// Controller state the projection depends on
pub struct ViewContext<'a> {
    pub today: NaiveDate,
    pub session: &'a Session,
    pub focused_pane: Pane,
    pub selected: &'a HashMap<Pane, usize>,
    pub show_completed: bool,
}

impl ViewContext<'_> {
    fn selected_in(&self, pane: Pane, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let index = self.selected.get(&pane).copied().unwrap_or(0);
        Some(index.min(len - 1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: TaskId,
    pub text: String,
    pub deadline: NaiveDate,
    pub countdown: Countdown,
    pub selected: bool,
    /// Picked up by the current drag
    pub dragging: bool,
    /// Open in the editor
    pub editing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuadrantBody {
    /// Shown exactly when the quadrant has no active tasks
    Placeholder(&'static str),
    Rows(Vec<TaskRow>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuadrantView {
    pub quadrant: Quadrant,
    pub title: &'static str,
    pub count: usize,
    pub body: QuadrantBody,
    pub focused: bool,
    /// The current drag would land here
    pub drop_target: bool,
    /// Index into `Rows` of the highlighted task
    pub selected: Option<usize>,
}

impl QuadrantView {
    pub fn rows(&self) -> &[TaskRow] {
        match &self.body {
            QuadrantBody::Rows(rows) => rows,
            QuadrantBody::Placeholder(_) => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedRow {
    pub id: TaskId,
    pub text: String,
    pub deadline: NaiveDate,
    /// Quadrant a restore would return the task to
    pub original: Quadrant,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedView {
    pub rows: Vec<CompletedRow>,
    pub focused: bool,
    pub selected: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub quadrants: [QuadrantView; 4],
    /// None while the completed list is hidden
    pub completed: Option<CompletedView>,
    pub stats: BoardStats,
    pub today: NaiveDate,
    /// "Moving <text> → <quadrant>" while a drag is in progress
    pub drag_banner: Option<String>,
}

impl BoardView {
    pub fn project(board: &TaskBoard, stats: &BoardStats, ctx: &ViewContext) -> Self {
        let drag = ctx.session.dragging();
        let quadrants = Quadrant::ALL.map(|q| project_quadrant(board, q, drag, ctx));

        let completed = ctx
            .show_completed
            .then(|| project_completed(board.completed(), ctx));

        let drag_banner = drag.and_then(|d| {
            board
                .get(&d.task)
                .map(|task| format!("Moving \"{}\" → {}", task.text, d.target.label()))
        });

        Self {
            quadrants,
            completed,
            stats: *stats,
            today: ctx.today,
            drag_banner,
        }
    }

    pub fn quadrant(&self, quadrant: Quadrant) -> &QuadrantView {
        &self.quadrants[quadrant.index()]
    }
}

fn project_quadrant(
    board: &TaskBoard,
    quadrant: Quadrant,
    drag: Option<&DragSession>,
    ctx: &ViewContext,
) -> QuadrantView {
    let tasks = board.tasks_in(quadrant);
    let pane = Pane::Quadrant(quadrant);
    let focused = ctx.focused_pane == pane;
    let selected = if focused {
        ctx.selected_in(pane, tasks.len())
    } else {
        None
    };

    let body = if tasks.is_empty() {
        QuadrantBody::Placeholder(quadrant.empty_message())
    } else {
        QuadrantBody::Rows(
            tasks
                .iter()
                .enumerate()
                .map(|(i, task)| task_row(task, selected == Some(i), ctx))
                .collect(),
        )
    };

    QuadrantView {
        quadrant,
        title: quadrant.label(),
        count: tasks.len(),
        body,
        focused,
        drop_target: drag.is_some_and(|d| d.target == quadrant && d.origin != quadrant),
        selected,
    }
}

fn task_row(task: &Task, selected: bool, ctx: &ViewContext) -> TaskRow {
    TaskRow {
        id: task.id.clone(),
        text: task.text.clone(),
        deadline: task.deadline,
        countdown: task.countdown(ctx.today),
        selected,
        dragging: ctx.session.is_dragging(&task.id),
        editing: ctx.session.is_editing(&task.id),
    }
}

fn project_completed(tasks: &[Task], ctx: &ViewContext) -> CompletedView {
    let focused = ctx.focused_pane == Pane::Completed;
    let selected = if focused {
        ctx.selected_in(Pane::Completed, tasks.len())
    } else {
        None
    };

    let rows = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| CompletedRow {
            id: task.id.clone(),
            text: task.text.clone(),
            deadline: task.deadline,
            original: task.original_quadrant.unwrap_or(Quadrant::UrgentImportant),
            selected: selected == Some(i),
        })
        .collect();

    CompletedView {
        rows,
        focused,
        selected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn project(board: &TaskBoard, session: &Session, focused: Pane, show_completed: bool) -> BoardView {
        let selected = HashMap::new();
        let stats = BoardStats::compute(board, today());
        BoardView::project(
            board,
            &stats,
            &ViewContext {
                today: today(),
                session,
                focused_pane: focused,
                selected: &selected,
                show_completed,
            },
        )
    }

    #[test]
    fn test_placeholder_follows_emptiness() {
        let mut board = TaskBoard::new();
        let session = Session::new();
        let focus = Pane::Quadrant(Quadrant::UrgentImportant);

        let view = project(&board, &session, focus, false);
        for q in Quadrant::ALL {
            assert_eq!(view.quadrant(q).body, QuadrantBody::Placeholder(q.empty_message()));
            assert_eq!(view.quadrant(q).count, 0);
        }

        let task = board
            .create_at("Call mom", Some(today()), Quadrant::UrgentImportant, 1)
            .unwrap();
        let view = project(&board, &session, focus, false);
        let rows = view.quadrant(Quadrant::UrgentImportant).rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].countdown, Countdown::DueToday);
        assert!(rows[0].selected);

        board.complete(&task.id).unwrap();
        let view = project(&board, &session, focus, false);
        assert!(matches!(
            view.quadrant(Quadrant::UrgentImportant).body,
            QuadrantBody::Placeholder(_)
        ));
        assert_eq!(view.completed, None);
    }

    #[test]
    fn test_drag_and_edit_flags() {
        let mut board = TaskBoard::new();
        let a = board
            .create_at("a", Some(today()), Quadrant::UrgentImportant, 1)
            .unwrap();
        let b = board
            .create_at("b", Some(today()), Quadrant::UrgentImportant, 2)
            .unwrap();

        let mut session = Session::new();
        session.begin_drag(a.id.clone(), Quadrant::UrgentImportant);
        session.hover(Quadrant::NotUrgentImportant);
        session.begin_edit(b.id.clone());

        let view = project(&board, &session, Pane::Quadrant(Quadrant::NotUrgentImportant), false);
        let rows = view.quadrant(Quadrant::UrgentImportant).rows();
        assert!(rows[0].dragging && !rows[0].editing);
        assert!(!rows[1].dragging && rows[1].editing);
        assert!(view.quadrant(Quadrant::NotUrgentImportant).drop_target);
        assert!(!view.quadrant(Quadrant::UrgentImportant).drop_target);
        assert_eq!(
            view.drag_banner.as_deref(),
            Some("Moving \"a\" → Not Urgent & Important")
        );
    }

    #[test]
    fn test_completed_rows_carry_original_quadrant() {
        let mut board = TaskBoard::new();
        let task = board
            .create_at("done", Some(today()), Quadrant::NotUrgentNotImportant, 1)
            .unwrap();
        board.complete(&task.id).unwrap();

        let view = project(&board, &Session::new(), Pane::Completed, true);
        let completed = view.completed.unwrap();
        assert!(completed.focused);
        assert_eq!(completed.selected, Some(0));
        assert_eq!(completed.rows[0].original, Quadrant::NotUrgentNotImportant);
        assert_eq!(view.stats.completed, 1);
    }
}
