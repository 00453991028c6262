//! The `Column` derived view sent to frontends.
//!
//! Columns are never stored; they are projected from the task collection
//! on demand (see `flowboard::board::columns`).

use serde::{Deserialize, Serialize};

use crate::task::{ColumnId, Task};

/// One workflow column with its tasks in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Which workflow stage this column represents.
    pub id: ColumnId,
    /// Human-readable column title.
    pub title: String,
    /// Tasks in this column, sorted ascending by `order` (stable).
    pub tasks: Vec<Task>,
}

impl Column {
    /// Creates an empty column for the given stage.
    #[must_use]
    pub fn empty(id: ColumnId) -> Self {
        Self {
            id,
            title: id.title().to_string(),
            tasks: Vec::new(),
        }
    }
}
