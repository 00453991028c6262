//! Application state: the command surface frontends drive.
//!
//! `BoardApp` owns the task store, the drag controller, and the chat log,
//! and exposes exactly the commands the board boundary names: create,
//! drag-start/drop, set-priority, send-chat, plus read-only views. It
//! knows nothing about rendering or transports.

use chrono::NaiveDate;
use flowboard_model::chat::ChatMessage;
use flowboard_model::column::Column;
use flowboard_model::task::{ColumnId, Priority, Task, TaskDraft, TaskId};

use crate::board::{BoardError, DragController, DragState, TaskStore, project_columns};
use crate::chat::{ChatError, ChatLog};

/// In-memory board application state.
#[derive(Debug, Default)]
pub struct BoardApp {
    store: TaskStore,
    drag: DragController,
    chat: ChatLog,
}

impl BoardApp {
    /// Creates an empty board with an empty chat log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board seeded with the demo sprint: five tasks spread
    /// across the columns and a short chat history.
    #[must_use]
    pub fn with_demo_data() -> Self {
        let mut app = Self::new();
        app.seed_demo_tasks();
        app.seed_demo_chat();
        app
    }

    /// Creates a task in the `todo` column.
    ///
    /// # Errors
    ///
    /// Propagates title validation errors from the store.
    pub fn create_task(&mut self, draft: TaskDraft) -> Result<Task, BoardError> {
        self.store.create_task(draft).map(Task::clone)
    }

    /// Begins dragging `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] if the task does not exist; the
    /// drag state stays `Idle` in that case.
    pub fn drag_start(&mut self, task_id: TaskId) -> Result<(), BoardError> {
        if self.store.get(task_id).is_none() {
            return Err(BoardError::NotFound(task_id));
        }
        self.drag.begin(task_id);
        Ok(())
    }

    /// Completes the in-flight drag.
    ///
    /// Dropping on a column moves the dragged task there (appended to the
    /// column's end) and returns the updated task. Dropping outside any
    /// column, or without an active drag, changes nothing and returns
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] if the dragged task vanished
    /// between drag-start and drop; cannot happen in correct flows since
    /// tasks are never deleted.
    pub fn drag_drop(&mut self, target: Option<ColumnId>) -> Result<Option<Task>, BoardError> {
        match self.drag.drop_on(target) {
            Some((task_id, column)) => {
                let task = self.store.move_task(task_id, column)?;
                Ok(Some(task.clone()))
            }
            None => Ok(None),
        }
    }

    /// Current drag state.
    #[must_use]
    pub const fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Overwrites a task's priority.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] if the task does not exist.
    pub fn set_priority(&mut self, task_id: TaskId, priority: Priority) -> Result<Task, BoardError> {
        self.store.set_priority(task_id, priority).map(Task::clone)
    }

    /// Appends a chat message and returns it.
    ///
    /// # Errors
    ///
    /// Propagates text validation errors from the chat log.
    pub fn send_chat_message(&mut self, user: &str, text: &str) -> Result<ChatMessage, ChatError> {
        self.chat.send(user, text).map(ChatMessage::clone)
    }

    /// The derived column view, freshly projected.
    #[must_use]
    pub fn columns(&self) -> Vec<Column> {
        project_columns(&self.store)
    }

    /// Chat messages in send order.
    #[must_use]
    pub fn chat_messages(&self) -> &[ChatMessage] {
        self.chat.messages()
    }

    /// Looks up a task by ID.
    #[must_use]
    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.store.get(task_id)
    }

    /// Read access to the task store.
    #[must_use]
    pub const fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Seeds the demo sprint board.
    fn seed_demo_tasks(&mut self) {
        let demo = [
            (
                "Setup project environment",
                None,
                Some("Alice"),
                (2024, 8, 10),
                Priority::High,
                ColumnId::Todo,
                0,
            ),
            (
                "Design UI mockups",
                Some("Create mockups for all main screens."),
                Some("Bob"),
                (2024, 8, 15),
                Priority::Medium,
                ColumnId::Todo,
                1,
            ),
            (
                "Develop login feature",
                None,
                Some("Alice"),
                (2024, 8, 20),
                Priority::High,
                ColumnId::InProgress,
                0,
            ),
            (
                "Write API documentation",
                None,
                Some("Charlie"),
                (2024, 8, 25),
                Priority::Low,
                ColumnId::Done,
                0,
            ),
            (
                "User testing session",
                Some("Conduct usability testing with 5 users."),
                None,
                (2024, 9, 1),
                Priority::Medium,
                ColumnId::Todo,
                2,
            ),
        ];

        for (title, description, assignee, (y, m, d), priority, status, order) in demo {
            self.store.seed_task(Task {
                id: TaskId::new(),
                title: title.to_string(),
                description: description.map(String::from),
                assignee: assignee.map(String::from),
                deadline: NaiveDate::from_ymd_opt(y, m, d),
                priority,
                status,
                order,
            });
        }
    }

    /// Seeds the demo chat history.
    fn seed_demo_chat(&mut self) {
        self.chat
            .seed_message("KanbanAI", "Welcome to the team chat!");
        self.chat
            .seed_message("Alice", "Hey team, how is the sprint going?");
        self.chat
            .seed_message("Bob", "Making good progress on the login feature!");
    }
}
