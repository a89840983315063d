//! Persisted document format for the board
//!
//! ```json
//! {
//!   "q1": [{ "id": "task-1", "text": "...", "deadline": "2024-05-10", "completed": false }],
//!   "q2": [], "q3": [], "q4": [],
//!   "completed": [{ "id": "...", "text": "...", "deadline": "...", "completed": true, "originalQuadrant": "q1" }]
//! }
//! ```
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

use super::TaskBoard;
use crate::models::{Quadrant, Task, TaskId};

const COMPLETED_KEY: &str = "completed";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// One task as written to storage
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredTask {
    id: String,
    text: String,
    deadline: String,
    #[serde(default)]
    completed: bool,
    #[serde(
        default,
        rename = "originalQuadrant",
        skip_serializing_if = "Option::is_none"
    )]
    original_quadrant: Option<String>,
}

impl StoredTask {
    fn from_task(task: &Task) -> Self {
        Self {
            id: task.id.as_str().to_string(),
            text: task.text.clone(),
            deadline: task.deadline.format(DATE_FORMAT).to_string(),
            completed: task.completed,
            original_quadrant: task.original_quadrant.map(|q| q.key().to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct StoredDocument {
    q1: Vec<StoredTask>,
    q2: Vec<StoredTask>,
    q3: Vec<StoredTask>,
    q4: Vec<StoredTask>,
    completed: Vec<StoredTask>,
}

impl TaskBoard {
    /// Snapshot of all five lists in their current order
    pub fn serialize(&self) -> String {
        let stored = |q: Quadrant| -> Vec<StoredTask> {
            self.tasks_in(q).iter().map(StoredTask::from_task).collect()
        };
        let document = StoredDocument {
            q1: stored(Quadrant::UrgentImportant),
            q2: stored(Quadrant::UrgentNotImportant),
            q3: stored(Quadrant::NotUrgentImportant),
            q4: stored(Quadrant::NotUrgentNotImportant),
            completed: self.completed().iter().map(StoredTask::from_task).collect(),
        };

        // Plain strings, bools and vectors only: serialization cannot fail
        serde_json::to_string(&document).unwrap_or_else(|_| "{}".to_string())
    }

    /// Rebuild a board from a persisted document.
    ///
    /// Absent or malformed input yields an empty board; unusable records are
    /// skipped one by one instead of failing the whole load.
    pub fn deserialize(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::new();
        };

        let document = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                warn!("stored task document is not an object, starting empty");
                return Self::new();
            }
            Err(e) => {
                warn!(error = %e, "stored task document is malformed, starting empty");
                return Self::new();
            }
        };

        let mut board = Self::new();
        let mut seen = HashSet::new();

        for quadrant in Quadrant::ALL {
            for record in records(document.get(quadrant.key()), quadrant.key()) {
                let Some(mut task) = into_task(record, quadrant, &mut seen) else {
                    continue;
                };
                if task.completed {
                    // Archived rather than dropped so no stored task is lost
                    warn!(id = %task.id, quadrant = %quadrant, "completed task found in quadrant list, archiving");
                    task.original_quadrant = Some(quadrant);
                } else {
                    task.original_quadrant = None;
                }
                board.insert_raw(task);
            }
        }

        for record in records(document.get(COMPLETED_KEY), COMPLETED_KEY) {
            let original = record
                .original_quadrant
                .as_deref()
                .and_then(Quadrant::from_key);
            let fallback = original.unwrap_or(Quadrant::UrgentImportant);
            let Some(mut task) = into_task(record, fallback, &mut seen) else {
                continue;
            };
            if original.is_none() {
                warn!(id = %task.id, "completed task has no usable original quadrant, using q1");
            }
            task.completed = true;
            task.original_quadrant = Some(fallback);
            board.insert_raw(task);
        }

        board
    }

    /// Replace the whole board with the persisted document
    pub fn reload(&mut self, raw: Option<&str>) {
        *self = Self::deserialize(raw);
    }
}

/// Decode the records of one list, skipping entries that do not have the task shape
fn records(value: Option<&Value>, key: &str) -> Vec<StoredTask> {
    let items = match value {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => {
            warn!(list = key, "stored list is not an array, ignoring it");
            return Vec::new();
        }
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<StoredTask>(item.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(list = key, error = %e, "skipping malformed task record");
                None
            }
        })
        .collect()
}

fn into_task(record: StoredTask, quadrant: Quadrant, seen: &mut HashSet<String>) -> Option<Task> {
    let text = record.text.trim();
    if text.is_empty() || record.id.is_empty() {
        warn!(id = %record.id, "skipping task without id or text");
        return None;
    }
    let deadline = match NaiveDate::parse_from_str(record.deadline.trim(), DATE_FORMAT) {
        Ok(date) => date,
        Err(_) => {
            warn!(id = %record.id, deadline = %record.deadline, "skipping task with unreadable deadline");
            return None;
        }
    };
    if !seen.insert(record.id.clone()) {
        warn!(id = %record.id, "skipping duplicate task id");
        return None;
    }

    let mut task = Task::new(TaskId::new(record.id), text.to_string(), deadline, quadrant);
    task.completed = record.completed;
    Some(task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Location;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_board() -> TaskBoard {
        let mut board = TaskBoard::new();
        let mut millis = 100;
        for (text, q) in [
            ("ship release", Quadrant::UrgentImportant),
            ("answer mail", Quadrant::UrgentNotImportant),
            ("learn rust", Quadrant::NotUrgentImportant),
            ("tidy desk", Quadrant::NotUrgentNotImportant),
            ("fix prod", Quadrant::UrgentImportant),
        ] {
            board.create_at(text, Some(day(2024, 5, 10)), q, millis).unwrap();
            millis += 1;
        }
        let first = board.tasks_in(Quadrant::UrgentImportant)[0].id.clone();
        board.complete(&first).unwrap();
        board
    }

    #[test]
    fn test_roundtrip_preserves_lists_order_and_fields() {
        let board = sample_board();
        let restored = TaskBoard::deserialize(Some(&board.serialize()));
        assert_eq!(restored, board);
    }

    #[test]
    fn test_document_shape() {
        let board = sample_board();
        let value: Value = serde_json::from_str(&board.serialize()).unwrap();

        for key in ["q1", "q2", "q3", "q4", "completed"] {
            assert!(value[key].is_array(), "missing list {}", key);
        }
        let done = &value["completed"][0];
        assert_eq!(done["originalQuadrant"], "q1");
        assert_eq!(done["completed"], true);
        assert_eq!(done["deadline"], "2024-05-10");
        assert!(value["q2"][0].get("originalQuadrant").is_none());
    }

    #[test]
    fn test_absent_or_malformed_input_is_empty_board() {
        assert!(TaskBoard::deserialize(None).is_empty());
        assert!(TaskBoard::deserialize(Some("")).is_empty());
        assert!(TaskBoard::deserialize(Some("{not json")).is_empty());
        assert!(TaskBoard::deserialize(Some("[1, 2, 3]")).is_empty());
        assert!(TaskBoard::deserialize(Some("null")).is_empty());
    }

    #[test]
    fn test_missing_keys_are_empty_lists() {
        let raw = r#"{"q3": [{"id": "task-1", "text": "read", "deadline": "2024-01-02", "completed": false}]}"#;
        let board = TaskBoard::deserialize(Some(raw));
        assert_eq!(board.len(), 1);
        assert_eq!(
            board.locate(&TaskId::new("task-1")),
            Some(Location::Active(Quadrant::NotUrgentImportant))
        );
    }

    #[test]
    fn test_completed_record_in_quadrant_is_archived() {
        let raw = r#"{"q2": [{"id": "task-7", "text": "done already", "deadline": "2024-01-02", "completed": true}]}"#;
        let board = TaskBoard::deserialize(Some(raw));
        let task = board.get(&TaskId::new("task-7")).unwrap();
        assert!(task.completed);
        assert_eq!(task.original_quadrant, Some(Quadrant::UrgentNotImportant));
        assert!(board.tasks_in(Quadrant::UrgentNotImportant).is_empty());
    }

    #[test]
    fn test_completed_record_without_original_quadrant_falls_back_to_q1() {
        let raw = r#"{"completed": [
            {"id": "a", "text": "x", "deadline": "2024-01-02", "completed": true, "originalQuadrant": "undefined"},
            {"id": "b", "text": "y", "deadline": "2024-01-02", "completed": true}
        ]}"#;
        let mut board = TaskBoard::deserialize(Some(raw));
        assert_eq!(board.completed().len(), 2);
        for task in board.completed() {
            assert_eq!(task.original_quadrant, Some(Quadrant::UrgentImportant));
        }

        assert_eq!(board.restore(&TaskId::new("a")), Ok(Quadrant::UrgentImportant));
    }

    #[test]
    fn test_bad_records_are_skipped_individually() {
        let raw = r#"{
            "q1": [
                {"id": "ok", "text": "fine", "deadline": "2024-01-02", "completed": false},
                {"id": "ok", "text": "duplicate", "deadline": "2024-01-02", "completed": false},
                {"id": "bad-date", "text": "x", "deadline": "someday", "completed": false},
                {"id": "blank", "text": "   ", "deadline": "2024-01-02", "completed": false},
                {"text": "no id", "deadline": "2024-01-02"},
                42
            ],
            "q4": "not a list"
        }"#;
        let board = TaskBoard::deserialize(Some(raw));
        assert_eq!(board.len(), 1);
        assert_eq!(board.tasks_in(Quadrant::UrgentImportant)[0].text, "fine");
    }

    #[test]
    fn test_reload_replaces_contents() {
        let mut board = sample_board();
        board.reload(None);
        assert!(board.is_empty());

        let other = sample_board();
        board.reload(Some(&other.serialize()));
        assert_eq!(board, other);
    }
}
