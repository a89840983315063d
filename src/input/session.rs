//! Transient interaction state: at most one dragged task and at most one open editor.
use crate::models::{Quadrant, TaskId};

/// A task picked up for moving
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub task: TaskId,
    /// Quadrant the task was picked up from
    pub origin: Quadrant,
    /// Quadrant it would land in if dropped now
    pub target: Quadrant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub task: TaskId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    drag: Option<DragSession>,
    edit: Option<EditSession>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up a task; any previous drag is discarded
    pub fn begin_drag(&mut self, task: TaskId, origin: Quadrant) {
        self.drag = Some(DragSession {
            task,
            origin,
            target: origin,
        });
    }

    pub fn hover(&mut self, target: Quadrant) {
        if let Some(drag) = self.drag.as_mut() {
            drag.target = target;
        }
    }

    pub fn dragging(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self, task: &TaskId) -> bool {
        self.drag.as_ref().is_some_and(|d| &d.task == task)
    }

    /// End the drag with a drop, handing back what was dragged
    pub fn take_drag(&mut self) -> Option<DragSession> {
        self.drag.take()
    }

    /// Open an editor for `task`, closing any other. Returns the editor that was closed.
    pub fn begin_edit(&mut self, task: TaskId) -> Option<EditSession> {
        self.edit.replace(EditSession { task })
    }

    pub fn editing(&self) -> Option<&TaskId> {
        self.edit.as_ref().map(|e| &e.task)
    }

    pub fn is_editing(&self, task: &TaskId) -> bool {
        self.editing() == Some(task)
    }

    pub fn end_edit(&mut self) {
        self.edit = None;
    }
}
