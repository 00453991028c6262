//! The board core: task store, column projection, and drag state machine.
//!
//! All state is in-memory and process-lifetime only. Mutations happen
//! synchronously in response to a single user action and either complete
//! fully or leave the store untouched.

pub mod columns;
pub mod drag;
pub mod store;

pub use columns::project_columns;
pub use drag::{DragController, DragState};
pub use store::TaskStore;

use flowboard_model::task::TaskId;
use thiserror::Error;

/// Errors that can occur during board operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    /// Task with the given ID was not found.
    ///
    /// Correct frontend flows never produce this; it indicates a stale or
    /// fabricated task reference.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Task title cannot be empty.
    #[error("task title cannot be empty")]
    EmptyTitle,
    /// Task title exceeds the maximum length.
    #[error("task title too long (max 256 characters)")]
    TitleTooLong,
}
