use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::quadrant::Quadrant;
use crate::board::countdown::{self, Countdown};

/// Stable task identifier, assigned once at creation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// `task-<unix millis>`
    pub fn from_millis(millis: i64) -> Self {
        Self(format!("task-{}", millis))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub deadline: NaiveDate,
    pub completed: bool,
    /// Quadrant the task lives in while active
    pub quadrant: Quadrant,
    /// Set only on completed tasks
    pub original_quadrant: Option<Quadrant>,
}

impl Task {
    pub fn new(id: TaskId, text: String, deadline: NaiveDate, quadrant: Quadrant) -> Self {
        Self {
            id,
            text,
            deadline,
            completed: false,
            quadrant,
            original_quadrant: None,
        }
    }

    pub fn countdown(&self, today: NaiveDate) -> Countdown {
        countdown::classify(self.deadline, today)
    }
}
