//! Drag-and-drop state machine.
//!
//! Two states: `Idle` and `Dragging(task)`. The payload is ephemeral; the
//! controller never touches the store itself — a successful drop yields
//! the move for the caller to apply.

use flowboard_model::task::{ColumnId, TaskId};

/// Current drag state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    /// Nothing is being dragged.
    #[default]
    Idle,
    /// A task is in flight, carrying its ID as payload.
    Dragging(TaskId),
}

/// Tracks the single in-flight drag, if any.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    /// Creates a controller in the `Idle` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> DragState {
        self.state
    }

    /// Starts dragging `task`.
    ///
    /// A drag-start while already dragging replaces the payload
    /// (last drag-start wins, matching browser drag events).
    pub const fn begin(&mut self, task: TaskId) {
        self.state = DragState::Dragging(task);
    }

    /// Completes the drag.
    ///
    /// Returns the `(task, column)` move to apply when a task was being
    /// dragged and the drop landed on a column. A drop outside any column
    /// (`target == None`) or without an active drag yields `None` and must
    /// not mutate anything. Either way the controller returns to `Idle`.
    pub const fn drop_on(&mut self, target: Option<ColumnId>) -> Option<(TaskId, ColumnId)> {
        let dropped = match (self.state, target) {
            (DragState::Dragging(task), Some(column)) => Some((task, column)),
            _ => None,
        };
        self.state = DragState::Idle;
        dropped
    }
}
