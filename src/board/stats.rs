use chrono::NaiveDate;

use super::TaskBoard;
use crate::models::Quadrant;

/// Counters derived from a full scan of the board.
///
/// Never updated incrementally: recompute after every mutation and on every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardStats {
    quadrant_counts: [usize; 4],
    pub completed: usize,
    pub due_today: usize,
    pub overdue: usize,
}

impl BoardStats {
    pub fn compute(board: &TaskBoard, today: NaiveDate) -> Self {
        let mut stats = Self {
            completed: board.completed().len(),
            ..Self::default()
        };

        for quadrant in Quadrant::ALL {
            let tasks = board.tasks_in(quadrant);
            stats.quadrant_counts[quadrant.index()] = tasks.len();

            // Only active lists are scanned, so completed tasks never count as due/overdue
            for task in tasks {
                let countdown = task.countdown(today);
                if countdown.is_due_today() {
                    stats.due_today += 1;
                } else if countdown.is_overdue() {
                    stats.overdue += 1;
                }
            }
        }

        stats
    }

    pub fn quadrant_count(&self, quadrant: Quadrant) -> usize {
        self.quadrant_counts[quadrant.index()]
    }

    pub fn active_total(&self) -> usize {
        self.quadrant_counts.iter().sum()
    }
}
