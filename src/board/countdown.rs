use chrono::NaiveDate;
use std::cmp::Ordering;

/// Urgency of a deadline relative to a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Overdue,
    DueToday,
    Upcoming { days_remaining: i64 },
}

impl Countdown {
    pub fn is_overdue(&self) -> bool {
        matches!(self, Countdown::Overdue)
    }

    pub fn is_due_today(&self) -> bool {
        matches!(self, Countdown::DueToday)
    }

    pub fn days_remaining(&self) -> Option<i64> {
        match self {
            Countdown::Upcoming { days_remaining } => Some(*days_remaining),
            _ => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Countdown::Overdue => "Overdue!".to_string(),
            Countdown::DueToday => "Due Today!".to_string(),
            Countdown::Upcoming { days_remaining: 1 } => "1 day left".to_string(),
            Countdown::Upcoming { days_remaining } => format!("{} days left", days_remaining),
        }
    }
}

/// Classify a deadline against `today`, both at day granularity.
///
/// Pure: the caller supplies `today`, so the result never depends on the wall clock.
pub fn classify(deadline: NaiveDate, today: NaiveDate) -> Countdown {
    match deadline.cmp(&today) {
        Ordering::Less => Countdown::Overdue,
        Ordering::Equal => Countdown::DueToday,
        Ordering::Greater => Countdown::Upcoming {
            days_remaining: deadline.signed_duration_since(today).num_days(),
        },
    }
}
