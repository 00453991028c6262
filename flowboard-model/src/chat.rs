//! Chat message types for the board's side chat panel.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum allowed chat message length in characters.
pub const MAX_MESSAGE_LENGTH: usize = 4096;

/// Unique identifier for a chat message, based on UUID v7 for time-ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Creates a new time-ordered message identifier (UUID v7).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `MessageId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single message in the team chat log.
///
/// Timestamps are milliseconds since the Unix epoch and strictly increase
/// in send order within one log, so sorting by timestamp never reorders
/// a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message identifier.
    pub id: MessageId,
    /// Sender's display name (user-entered, not an account).
    pub user: String,
    /// Message text. Never empty.
    pub text: String,
    /// Milliseconds since epoch, strictly monotonic per log.
    pub timestamp_ms: u64,
}
