use crate::models::Quadrant;

/// Normal-mode commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,

    // ===== navigation =====
    TaskDown,
    TaskUp,
    QuadrantLeft,
    QuadrantRight,
    /// Towards the less urgent row
    QuadrantDown,
    /// Towards the more urgent row
    QuadrantUp,
    FocusNextPane,
    FocusPrevPane,
    FocusQuadrant(Quadrant),

    // ===== task actions =====
    NewTask,
    EditTask,
    /// Complete in a quadrant, restore in the completed list
    ToggleComplete,
    RestoreTask,
    DeleteTask,
    /// Pick up the selected task for moving
    GrabTask,

    // ===== view =====
    ToggleCompleted,
    Reload,
    ShowHelp,
}

/// Commands available while a task is picked up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragCommand {
    Target(Quadrant),
    TargetLeft,
    TargetRight,
    TargetUp,
    TargetDown,
    Drop,
    Cancel,
}
