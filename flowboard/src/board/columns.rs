//! Column projection: the derived view frontends render.

use flowboard_model::column::Column;
use flowboard_model::task::{ColumnId, Task};

use super::TaskStore;

/// Projects the task collection into the three fixed columns.
///
/// Pure over the store contents: one [`Column`] per [`ColumnId::ALL`]
/// entry, tasks filtered by status and stable-sorted ascending by `order`.
/// Equal orders keep creation order, so repeated projection of the same
/// store is byte-for-byte identical.
#[must_use]
pub fn project_columns(store: &TaskStore) -> Vec<Column> {
    project(store.tasks())
}

/// Projection over a raw task slice; `tasks` must be in insertion order
/// for the tie-break to be meaningful.
fn project(tasks: &[Task]) -> Vec<Column> {
    ColumnId::ALL
        .into_iter()
        .map(|id| {
            let mut column = Column::empty(id);
            column.tasks = tasks.iter().filter(|t| t.status == id).cloned().collect();
            // Stable: ties keep insertion order.
            column.tasks.sort_by_key(|t| t.order);
            column
        })
        .collect()
}
