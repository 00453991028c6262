//! JSON lines wire protocol between frontends and the board service.
//!
//! All messages are single JSON lines tagged as
//! `{"type": "<snake_case_variant>", ...}`. Every command receives exactly
//! one event in reply, so frontends can treat the exchange as
//! request/response.

use flowboard_model::chat::ChatMessage;
use flowboard_model::column::Column;
use flowboard_model::task::{ColumnId, Priority, Task, TaskDraft, TaskId};
use serde::{Deserialize, Serialize};

use super::ServiceError;

/// Current protocol version for the frontend handshake.
pub const PROTOCOL_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Frontend -> Board commands
// ---------------------------------------------------------------------------

/// Commands sent from a frontend to the board service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientCommand {
    /// Initial handshake declaring the frontend.
    Hello {
        /// Protocol version the frontend speaks (must match
        /// [`PROTOCOL_VERSION`]).
        protocol_version: u32,
        /// Frontend name, for logging only.
        client_name: String,
    },
    /// Create a task in the `todo` column.
    CreateTask {
        /// The user-entered task fields.
        draft: TaskDraft,
    },
    /// Begin dragging a task.
    DragStart {
        /// The task being picked up.
        task_id: TaskId,
    },
    /// Complete the in-flight drag.
    DragDrop {
        /// Column the drop landed on, or `None` for outside the board.
        #[serde(default)]
        column: Option<ColumnId>,
    },
    /// Overwrite a task's priority directly.
    SetPriority {
        /// The task to update.
        task_id: TaskId,
        /// The new priority.
        priority: Priority,
    },
    /// Append a chat message.
    SendChat {
        /// Sender display name; blank falls back to the configured default.
        #[serde(default)]
        user: Option<String>,
        /// Message text.
        text: String,
    },
    /// Ask the advisor for a priority suggestion.
    SuggestPriority {
        /// The task to get a suggestion for (must have a deadline).
        task_id: TaskId,
    },
    /// Apply the pending suggestion for a task.
    ConfirmSuggestion {
        /// The task whose suggestion is accepted.
        task_id: TaskId,
    },
    /// Discard the pending suggestion for a task.
    RejectSuggestion {
        /// The task whose suggestion is declined.
        task_id: TaskId,
    },
    /// Request a fresh board snapshot.
    GetBoard,
    /// Request the full chat log.
    GetChat,
    /// Graceful disconnect.
    Goodbye,
}

// ---------------------------------------------------------------------------
// Board -> Frontend events
// ---------------------------------------------------------------------------

/// Events sent from the board service to a frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Handshake response with the full initial state.
    Welcome {
        /// Protocol version the service speaks.
        protocol_version: u32,
        /// Current board snapshot.
        columns: Vec<Column>,
        /// Current chat log.
        chat: Vec<ChatMessage>,
    },
    /// A fresh board snapshot.
    BoardState {
        /// All three columns in board order.
        columns: Vec<Column>,
    },
    /// A task was created.
    TaskCreated {
        /// The new task.
        task: Task,
    },
    /// A drag started.
    DragStarted {
        /// The task being dragged.
        task_id: TaskId,
    },
    /// A drop moved a task.
    TaskMoved {
        /// The task with its new status and order.
        task: Task,
    },
    /// A drop landed nowhere (outside the board, or no drag in flight).
    DropIgnored,
    /// A task's priority changed.
    PriorityUpdated {
        /// The task that changed.
        task_id: TaskId,
        /// Its new priority.
        priority: Priority,
    },
    /// A chat message was appended.
    ChatPosted {
        /// The stored message.
        message: ChatMessage,
    },
    /// The advisor produced a suggestion, now pending confirmation.
    Suggestion {
        /// The task the suggestion is for.
        task_id: TaskId,
        /// The parsed priority label.
        priority: Priority,
        /// The advisor's full suggestion text.
        raw: String,
    },
    /// A pending suggestion was confirmed and applied.
    SuggestionApplied {
        /// The task that was updated.
        task_id: TaskId,
        /// The priority that was applied.
        priority: Priority,
    },
    /// A pending suggestion was rejected and discarded.
    SuggestionRejected {
        /// The task whose suggestion was discarded.
        task_id: TaskId,
    },
    /// Full chat log.
    ChatLog {
        /// Messages in send order.
        messages: Vec<ChatMessage>,
    },
    /// An error. The data model is unchanged.
    Error {
        /// Machine-readable code (e.g. `"task_not_found"`,
        /// `"advisor_unavailable"`).
        code: String,
        /// Human-readable description.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Encode / Decode helpers (JSON lines)
// ---------------------------------------------------------------------------

/// Serializes a value to a JSON line (JSON + trailing newline).
///
/// # Errors
///
/// Returns [`ServiceError::Json`] if serialization fails.
pub fn encode_line<T: Serialize>(value: &T) -> Result<String, ServiceError> {
    let mut json = serde_json::to_string(value)?;
    json.push('\n');
    Ok(json)
}

/// Deserializes a JSON line into a value.
///
/// The input is trimmed before parsing so trailing newlines are tolerated.
///
/// # Errors
///
/// Returns [`ServiceError::Json`] if deserialization fails.
pub fn decode_line<T: for<'de> Deserialize<'de>>(line: &str) -> Result<T, ServiceError> {
    Ok(serde_json::from_str(line.trim())?)
}
