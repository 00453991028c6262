//! In-memory task store: creation, column moves, priority updates.
//!
//! Tasks live in a `Vec` in insertion order with a side index by ID, so
//! the column projection's stable sort has a deterministic tie-break and
//! lookups stay O(1). Tasks are never deleted in the current scope.

use std::collections::HashMap;

use flowboard_model::task::{
    ColumnId, MAX_TASK_TITLE_LENGTH, Priority, Task, TaskDraft, TaskId,
};

use super::BoardError;

/// Owns every task on the board.
#[derive(Debug, Default)]
pub struct TaskStore {
    /// All tasks, in creation order.
    tasks: Vec<Task>,
    /// Task ID -> position in `tasks`.
    index: HashMap<TaskId, usize>,
}

impl TaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new task from a draft.
    ///
    /// The task enters the `todo` column with `order` equal to the number
    /// of tasks already there, i.e. appended to the end. The title is
    /// trimmed before validation and storage.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptyTitle`] if the trimmed title is empty,
    /// or [`BoardError::TitleTooLong`] if it exceeds 256 characters.
    pub fn create_task(&mut self, draft: TaskDraft) -> Result<&Task, BoardError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(BoardError::EmptyTitle);
        }
        if title.chars().count() > MAX_TASK_TITLE_LENGTH {
            return Err(BoardError::TitleTooLong);
        }

        let task = Task {
            id: TaskId::new(),
            title: title.to_string(),
            description: draft.description,
            assignee: draft.assignee,
            deadline: draft.deadline,
            priority: draft.priority,
            status: ColumnId::Todo,
            order: self.count_in(ColumnId::Todo),
        };
        tracing::debug!(task_id = %task.id, title = %task.title, "task created");

        self.index.insert(task.id, self.tasks.len());
        self.tasks.push(task);
        Ok(self.last_task())
    }

    /// Moves a task to the target column, appending it to the end.
    ///
    /// The new `order` is the count of tasks already in the target column
    /// (excluding the moved task itself), so a move within the same column
    /// also re-appends. Orders of other tasks are never adjusted; the
    /// source column keeps a gap rather than being reindexed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] if the task does not exist.
    pub fn move_task(&mut self, id: TaskId, target: ColumnId) -> Result<&Task, BoardError> {
        let pos = self.position(id)?;
        let order = self
            .tasks
            .iter()
            .filter(|t| t.status == target && t.id != id)
            .count();
        let task = &mut self.tasks[pos];
        task.status = target;
        task.order = to_order(order);
        tracing::debug!(task_id = %id, column = %target, order = task.order, "task moved");
        Ok(&self.tasks[pos])
    }

    /// Overwrites a task's priority. Status and order are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] if the task does not exist.
    pub fn set_priority(&mut self, id: TaskId, priority: Priority) -> Result<&Task, BoardError> {
        let pos = self.position(id)?;
        self.tasks[pos].priority = priority;
        tracing::debug!(task_id = %id, %priority, "priority updated");
        Ok(&self.tasks[pos])
    }

    /// Looks up a task by ID.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.index.get(&id).map(|&pos| &self.tasks[pos])
    }

    /// All tasks in creation order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the board has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of tasks currently in `column`, as an order value.
    fn count_in(&self, column: ColumnId) -> u32 {
        to_order(self.tasks.iter().filter(|t| t.status == column).count())
    }

    /// Position of a task in the backing vec, or `NotFound`.
    fn position(&self, id: TaskId) -> Result<usize, BoardError> {
        self.index.get(&id).copied().ok_or(BoardError::NotFound(id))
    }

    /// The most recently pushed task. Only called right after a push.
    fn last_task(&self) -> &Task {
        &self.tasks[self.tasks.len() - 1]
    }

    /// Inserts a fully-formed task, bypassing draft validation.
    ///
    /// Used by demo seeding; callers are responsible for keeping IDs
    /// unique and orders consistent.
    pub(crate) fn seed_task(&mut self, task: Task) {
        self.index.insert(task.id, self.tasks.len());
        self.tasks.push(task);
    }
}

/// Converts a task count to an order value. Board sizes are nowhere near
/// `u32::MAX`, so saturation is a formality.
fn to_order(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
