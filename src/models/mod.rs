pub mod quadrant;
pub mod task;

pub use quadrant::Quadrant;
pub use task::{Task, TaskId};
