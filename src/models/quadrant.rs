use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four cells of the urgency/importance matrix.
///
/// Laid out as a 2x2 grid:
///
/// ```text
///  q1 urgent + important      | q2 urgent, not important
///  q3 important, not urgent   | q4 neither
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quadrant {
    #[serde(rename = "q1")]
    UrgentImportant,
    #[serde(rename = "q2")]
    UrgentNotImportant,
    #[serde(rename = "q3")]
    NotUrgentImportant,
    #[serde(rename = "q4")]
    NotUrgentNotImportant,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::UrgentImportant,
        Quadrant::UrgentNotImportant,
        Quadrant::NotUrgentImportant,
        Quadrant::NotUrgentNotImportant,
    ];

    /// Key used in the persisted document
    pub fn key(self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "q1",
            Quadrant::UrgentNotImportant => "q2",
            Quadrant::NotUrgentImportant => "q3",
            Quadrant::NotUrgentNotImportant => "q4",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.key() == key)
    }

    pub fn index(self) -> usize {
        match self {
            Quadrant::UrgentImportant => 0,
            Quadrant::UrgentNotImportant => 1,
            Quadrant::NotUrgentImportant => 2,
            Quadrant::NotUrgentNotImportant => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "Urgent & Important",
            Quadrant::UrgentNotImportant => "Urgent & Not Important",
            Quadrant::NotUrgentImportant => "Not Urgent & Important",
            Quadrant::NotUrgentNotImportant => "Not Urgent & Not Important",
        }
    }

    /// Placeholder shown while the quadrant has no active tasks
    pub fn empty_message(self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "Drag important and urgent tasks here",
            Quadrant::UrgentNotImportant => "Drag urgent but not important tasks here",
            Quadrant::NotUrgentImportant => "Drag important but not urgent tasks here",
            Quadrant::NotUrgentNotImportant => "Drag tasks that can wait here",
        }
    }

    /// Grid row (0 = urgent row)
    pub fn row(self) -> usize {
        self.index() / 2
    }

    /// Grid column (0 = important column)
    pub fn col(self) -> usize {
        self.index() % 2
    }

    pub fn at(row: usize, col: usize) -> Self {
        Self::ALL[row.min(1) * 2 + col.min(1)]
    }

    pub fn left(self) -> Self {
        Self::at(self.row(), 0)
    }

    pub fn right(self) -> Self {
        Self::at(self.row(), 1)
    }

    pub fn up(self) -> Self {
        Self::at(0, self.col())
    }

    pub fn down(self) -> Self {
        Self::at(1, self.col())
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Quadrant {
    type Err = String;

    /// Accepts `q1`..`q4`, `1`..`4` and the kebab-case names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let quadrant = match normalized.as_str() {
            "q1" | "1" | "urgent-important" => Quadrant::UrgentImportant,
            "q2" | "2" | "urgent-not-important" => Quadrant::UrgentNotImportant,
            "q3" | "3" | "not-urgent-important" => Quadrant::NotUrgentImportant,
            "q4" | "4" | "not-urgent-not-important" => Quadrant::NotUrgentNotImportant,
            _ => {
                return Err(format!(
                    "unknown quadrant '{}' (expected q1, q2, q3 or q4)",
                    s
                ))
            }
        };
        Ok(quadrant)
    }
}
