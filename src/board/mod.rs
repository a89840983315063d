//! Canonical task state: four quadrant lists plus the completed archive.
//!
//! Every task lives in exactly one list. All mutations go through [`TaskBoard`],
//! append to the end of their destination list, and either fully apply or
//! leave the board untouched.

pub mod countdown;
pub mod error;
pub mod persist;
pub mod stats;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{Quadrant, Task, TaskId};
pub use countdown::Countdown;
pub use error::{BoardError, ValidationError};
pub use stats::BoardStats;

/// Where a task currently resides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Active(Quadrant),
    Completed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskBoard {
    quadrants: [Vec<Task>; 4],
    completed: Vec<Task>,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active tasks of one quadrant, in insertion order
    pub fn tasks_in(&self, quadrant: Quadrant) -> &[Task] {
        &self.quadrants[quadrant.index()]
    }

    pub fn completed(&self) -> &[Task] {
        &self.completed
    }

    /// All active tasks, quadrant by quadrant
    pub fn active_tasks(&self) -> impl Iterator<Item = &Task> {
        self.quadrants.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.active_tasks().count() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        let (location, index) = self.position(id)?;
        Some(&self.list(location)[index])
    }

    pub fn locate(&self, id: &TaskId) -> Option<Location> {
        self.position(id).map(|(location, _)| location)
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.position(id).is_some()
    }

    /// Create an active task at the end of `quadrant`, stamped with the current time
    pub fn create(
        &mut self,
        text: &str,
        deadline: Option<NaiveDate>,
        quadrant: Quadrant,
    ) -> Result<Task, BoardError> {
        self.create_at(text, deadline, quadrant, chrono::Utc::now().timestamp_millis())
    }

    /// Same as [`TaskBoard::create`] with an explicit id seed
    pub fn create_at(
        &mut self,
        text: &str,
        deadline: Option<NaiveDate>,
        quadrant: Quadrant,
        now_millis: i64,
    ) -> Result<Task, BoardError> {
        let (text, deadline) = validate(text, deadline)?;
        let id = self.allocate_id(now_millis);
        let task = Task::new(id, text, deadline, quadrant);

        debug!(id = %task.id, quadrant = %quadrant, "create task");
        self.quadrants[quadrant.index()].push(task.clone());
        Ok(task)
    }

    /// Replace text and deadline in place; id, quadrant and completion stay as they are
    pub fn edit(
        &mut self,
        id: &TaskId,
        new_text: &str,
        new_deadline: Option<NaiveDate>,
    ) -> Result<Task, BoardError> {
        let (text, deadline) = validate(new_text, new_deadline)?;
        let (location, index) = self
            .position(id)
            .ok_or_else(|| BoardError::NotFound(id.clone()))?;

        let task = &mut self.list_mut(location)[index];
        task.text = text;
        task.deadline = deadline;

        debug!(id = %id, "edit task");
        Ok(task.clone())
    }

    /// Move an active task into the completed list.
    ///
    /// Already completed tasks are left alone; use [`TaskBoard::restore`] to undo.
    pub fn complete(&mut self, id: &TaskId) -> Result<(), BoardError> {
        match self.position(id) {
            Some((Location::Active(quadrant), index)) => {
                let mut task = self.quadrants[quadrant.index()].remove(index);
                task.completed = true;
                task.original_quadrant = Some(quadrant);
                debug!(id = %id, from = %quadrant, "complete task");
                self.completed.push(task);
                Ok(())
            }
            Some((Location::Completed, _)) => Ok(()),
            None => Err(BoardError::NotFound(id.clone())),
        }
    }

    /// Put a completed task back at the end of the quadrant it was completed from
    pub fn restore(&mut self, id: &TaskId) -> Result<Quadrant, BoardError> {
        let index = self
            .completed
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| BoardError::NotFound(id.clone()))?;

        let mut task = self.completed.remove(index);
        let quadrant = task.original_quadrant.take().unwrap_or(task.quadrant);
        task.completed = false;
        task.quadrant = quadrant;

        debug!(id = %id, to = %quadrant, "restore task");
        self.quadrants[quadrant.index()].push(task);
        Ok(quadrant)
    }

    /// Move an active task to the end of `target`. Moving within the same quadrant is a no-op.
    pub fn move_task(&mut self, id: &TaskId, target: Quadrant) -> Result<(), BoardError> {
        let (source, index) = match self.position(id) {
            Some((Location::Active(source), index)) => (source, index),
            _ => return Err(BoardError::NotFound(id.clone())),
        };
        if source == target {
            return Ok(());
        }

        let mut task = self.quadrants[source.index()].remove(index);
        task.quadrant = target;

        debug!(id = %id, from = %source, to = %target, "move task");
        self.quadrants[target.index()].push(task);
        Ok(())
    }

    /// Remove a task from wherever it is; nothing is kept afterwards
    pub fn delete(&mut self, id: &TaskId) -> Result<Task, BoardError> {
        let (location, index) = self
            .position(id)
            .ok_or_else(|| BoardError::NotFound(id.clone()))?;

        debug!(id = %id, ?location, "delete task");
        Ok(self.list_mut(location).remove(index))
    }

    /// Append a task exactly as given; used when rebuilding from storage
    pub(crate) fn insert_raw(&mut self, task: Task) {
        if task.completed {
            self.completed.push(task);
        } else {
            self.quadrants[task.quadrant.index()].push(task);
        }
    }

    /// `task-<millis>`, bumping the counter until it is unused
    fn allocate_id(&self, now_millis: i64) -> TaskId {
        let mut millis = now_millis;
        loop {
            let id = TaskId::from_millis(millis);
            if !self.contains(&id) {
                return id;
            }
            millis += 1;
        }
    }

    fn position(&self, id: &TaskId) -> Option<(Location, usize)> {
        for quadrant in Quadrant::ALL {
            if let Some(index) = self.quadrants[quadrant.index()]
                .iter()
                .position(|t| &t.id == id)
            {
                return Some((Location::Active(quadrant), index));
            }
        }
        self.completed
            .iter()
            .position(|t| &t.id == id)
            .map(|index| (Location::Completed, index))
    }

    fn list(&self, location: Location) -> &Vec<Task> {
        match location {
            Location::Active(quadrant) => &self.quadrants[quadrant.index()],
            Location::Completed => &self.completed,
        }
    }

    fn list_mut(&mut self, location: Location) -> &mut Vec<Task> {
        match location {
            Location::Active(quadrant) => &mut self.quadrants[quadrant.index()],
            Location::Completed => &mut self.completed,
        }
    }
}

/// Trimmed text and a present deadline, or the first missing field
fn validate(text: &str, deadline: Option<NaiveDate>) -> Result<(String, NaiveDate), ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyText);
    }
    let deadline = deadline.ok_or(ValidationError::MissingDeadline)?;
    Ok((text.to_string(), deadline))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        day(2024, 5, 10)
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_create_appends_to_quadrant() {
        let mut board = TaskBoard::new();
        let a = board
            .create_at("  Write report  ", Some(today()), Quadrant::UrgentImportant, 1)
            .unwrap();
        let b = board
            .create_at("Call bank", Some(today()), Quadrant::UrgentImportant, 2)
            .unwrap();

        assert_eq!(a.text, "Write report");
        assert!(!a.completed);
        assert_eq!(a.original_quadrant, None);
        assert_eq!(ids(board.tasks_in(Quadrant::UrgentImportant)), vec![a.id.as_str(), b.id.as_str()]);
        assert_eq!(board.locate(&a.id), Some(Location::Active(Quadrant::UrgentImportant)));
    }

    #[test]
    fn test_create_rejects_empty_text_and_missing_deadline() {
        let mut board = TaskBoard::new();
        assert_eq!(
            board.create("   ", Some(today()), Quadrant::UrgentImportant),
            Err(BoardError::Validation(ValidationError::EmptyText))
        );
        assert_eq!(
            board.create("Plan", None, Quadrant::UrgentImportant),
            Err(BoardError::Validation(ValidationError::MissingDeadline))
        );
        assert!(board.is_empty());
    }

    #[test]
    fn test_ids_unique_across_creates_and_deletes() {
        let mut board = TaskBoard::new();
        let mut seen = Vec::new();
        // Same millisecond seed every time forces the bump path
        for round in 0..20 {
            let quadrant = Quadrant::ALL[round % 4];
            let task = board.create_at("t", Some(today()), quadrant, 1_000).unwrap();
            seen.push(task.id.clone());
            if round % 3 == 0 {
                board.complete(&task.id).unwrap();
            }
            if round % 5 == 4 {
                let victim = seen.remove(0);
                board.delete(&victim).unwrap();
            }
        }

        let all: Vec<&TaskId> = board
            .active_tasks()
            .chain(board.completed().iter())
            .map(|t| &t.id)
            .collect();
        let unique: HashSet<&TaskId> = all.iter().copied().collect();
        assert_eq!(all.len(), unique.len());
        assert_eq!(all.len(), seen.len());
    }

    #[test]
    fn test_edit_keeps_identity_and_placement() {
        let mut board = TaskBoard::new();
        let a = board.create_at("a", Some(today()), Quadrant::NotUrgentImportant, 1).unwrap();
        let b = board.create_at("b", Some(today()), Quadrant::NotUrgentImportant, 2).unwrap();

        let edited = board.edit(&a.id, "a2", Some(day(2024, 6, 1))).unwrap();
        assert_eq!(edited.id, a.id);
        assert_eq!(edited.quadrant, Quadrant::NotUrgentImportant);
        assert_eq!(edited.text, "a2");
        assert_eq!(edited.deadline, day(2024, 6, 1));
        // No reordering on edit
        assert_eq!(ids(board.tasks_in(Quadrant::NotUrgentImportant)), vec![a.id.as_str(), b.id.as_str()]);
    }

    #[test]
    fn test_edit_errors_leave_board_unchanged() {
        let mut board = TaskBoard::new();
        let a = board.create_at("a", Some(today()), Quadrant::UrgentImportant, 1).unwrap();
        let before = board.clone();

        assert_eq!(
            board.edit(&a.id, "", Some(today())),
            Err(BoardError::Validation(ValidationError::EmptyText))
        );
        assert_eq!(
            board.edit(&a.id, "x", None),
            Err(BoardError::Validation(ValidationError::MissingDeadline))
        );
        let ghost = TaskId::new("task-0");
        assert_eq!(
            board.edit(&ghost, "x", Some(today())),
            Err(BoardError::NotFound(ghost.clone()))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_edit_completed_task_stays_completed() {
        let mut board = TaskBoard::new();
        let a = board.create_at("a", Some(today()), Quadrant::UrgentNotImportant, 1).unwrap();
        board.complete(&a.id).unwrap();

        let edited = board.edit(&a.id, "renamed", Some(today())).unwrap();
        assert!(edited.completed);
        assert_eq!(edited.original_quadrant, Some(Quadrant::UrgentNotImportant));
        assert_eq!(board.locate(&a.id), Some(Location::Completed));
    }

    #[test]
    fn test_complete_then_restore_returns_to_original_quadrant() {
        let mut board = TaskBoard::new();
        let a = board.create_at("a", Some(day(2024, 7, 1)), Quadrant::NotUrgentImportant, 1).unwrap();
        let b = board.create_at("b", Some(today()), Quadrant::NotUrgentImportant, 2).unwrap();

        board.complete(&a.id).unwrap();
        let done = &board.completed()[0];
        assert!(done.completed);
        assert_eq!(done.original_quadrant, Some(Quadrant::NotUrgentImportant));
        assert_eq!(ids(board.tasks_in(Quadrant::NotUrgentImportant)), vec![b.id.as_str()]);

        let quadrant = board.restore(&a.id).unwrap();
        assert_eq!(quadrant, Quadrant::NotUrgentImportant);
        assert!(board.completed().is_empty());

        // Re-appended at the end, fields otherwise identical
        let list = board.tasks_in(Quadrant::NotUrgentImportant);
        assert_eq!(ids(list), vec![b.id.as_str(), a.id.as_str()]);
        assert_eq!(list[1], a);
    }

    #[test]
    fn test_complete_is_noop_for_completed_and_fails_for_unknown() {
        let mut board = TaskBoard::new();
        let a = board.create_at("a", Some(today()), Quadrant::UrgentImportant, 1).unwrap();
        board.complete(&a.id).unwrap();
        let before = board.clone();

        assert_eq!(board.complete(&a.id), Ok(()));
        assert_eq!(board, before);

        let ghost = TaskId::new("nope");
        assert_eq!(board.complete(&ghost), Err(BoardError::NotFound(ghost)));
    }

    #[test]
    fn test_restore_requires_completed_task() {
        let mut board = TaskBoard::new();
        let a = board.create_at("a", Some(today()), Quadrant::UrgentImportant, 1).unwrap();
        assert_eq!(board.restore(&a.id), Err(BoardError::NotFound(a.id.clone())));
    }

    #[test]
    fn test_move_between_quadrants() {
        let mut board = TaskBoard::new();
        let a = board.create_at("a", Some(today()), Quadrant::UrgentImportant, 1).unwrap();
        let b = board.create_at("b", Some(today()), Quadrant::NotUrgentImportant, 2).unwrap();

        board.move_task(&a.id, Quadrant::NotUrgentImportant).unwrap();
        assert!(board.tasks_in(Quadrant::UrgentImportant).is_empty());
        assert_eq!(ids(board.tasks_in(Quadrant::NotUrgentImportant)), vec![b.id.as_str(), a.id.as_str()]);
        assert_eq!(board.get(&a.id).unwrap().quadrant, Quadrant::NotUrgentImportant);
    }

    #[test]
    fn test_move_to_same_quadrant_keeps_order() {
        let mut board = TaskBoard::new();
        let a = board.create_at("a", Some(today()), Quadrant::UrgentImportant, 1).unwrap();
        let b = board.create_at("b", Some(today()), Quadrant::UrgentImportant, 2).unwrap();

        board.move_task(&a.id, Quadrant::UrgentImportant).unwrap();
        assert_eq!(ids(board.tasks_in(Quadrant::UrgentImportant)), vec![a.id.as_str(), b.id.as_str()]);
    }

    #[test]
    fn test_move_rejects_completed_tasks() {
        let mut board = TaskBoard::new();
        let a = board.create_at("a", Some(today()), Quadrant::UrgentImportant, 1).unwrap();
        board.complete(&a.id).unwrap();
        assert_eq!(
            board.move_task(&a.id, Quadrant::NotUrgentNotImportant),
            Err(BoardError::NotFound(a.id.clone()))
        );
        assert_eq!(board.locate(&a.id), Some(Location::Completed));
    }

    #[test]
    fn test_delete_from_anywhere() {
        let mut board = TaskBoard::new();
        let a = board.create_at("a", Some(today()), Quadrant::UrgentImportant, 1).unwrap();
        let b = board.create_at("b", Some(today()), Quadrant::UrgentNotImportant, 2).unwrap();
        board.complete(&b.id).unwrap();

        assert_eq!(board.delete(&a.id).unwrap().id, a.id);
        assert_eq!(board.delete(&b.id).unwrap().id, b.id);
        assert!(board.is_empty());
        assert!(!board.contains(&a.id));
    }

    #[test]
    fn test_delete_unknown_leaves_board_unchanged() {
        let mut board = TaskBoard::new();
        board.create_at("a", Some(today()), Quadrant::UrgentImportant, 1).unwrap();
        let before = board.clone();

        let ghost = TaskId::new("task-42");
        assert_eq!(board.delete(&ghost), Err(BoardError::NotFound(ghost)));
        assert_eq!(board, before);
    }
}
