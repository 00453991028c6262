//! Append-only chat log with strictly monotonic timestamps.

use std::time::{SystemTime, UNIX_EPOCH};

use flowboard_model::chat::{ChatMessage, MAX_MESSAGE_LENGTH, MessageId};

use super::ChatError;

/// Fallback display name when the sender left theirs blank.
pub const DEFAULT_USER: &str = "User";

/// The team chat log. Messages are only ever appended.
#[derive(Debug, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    /// Timestamp of the newest message, for monotonicity.
    last_timestamp_ms: u64,
}

impl ChatLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message from `user` and returns it.
    ///
    /// Text is trimmed before validation and storage. A blank `user` name
    /// falls back to `"User"`. The assigned timestamp is the wall clock,
    /// bumped by one millisecond whenever the clock has not advanced past
    /// the previous message, so timestamps strictly increase in send order.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::EmptyText`] if the trimmed text is empty, or
    /// [`ChatError::TextTooLong`] if it exceeds 4096 characters.
    pub fn send(&mut self, user: &str, text: &str) -> Result<&ChatMessage, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyText);
        }
        if text.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(ChatError::TextTooLong);
        }

        let user = user.trim();
        let user = if user.is_empty() { DEFAULT_USER } else { user };

        let timestamp_ms = self.next_timestamp();
        self.messages.push(ChatMessage {
            id: MessageId::new(),
            user: user.to_string(),
            text: text.to_string(),
            timestamp_ms,
        });
        tracing::debug!(user, "chat message appended");
        Ok(&self.messages[self.messages.len() - 1])
    }

    /// All messages in send order.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of messages in the log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Next strictly-monotonic timestamp.
    fn next_timestamp(&mut self) -> u64 {
        let now = now_ms();
        self.last_timestamp_ms = now.max(self.last_timestamp_ms + 1);
        self.last_timestamp_ms
    }

    /// Appends a pre-validated message with a monotonic timestamp.
    ///
    /// Used by demo seeding; skips text validation.
    pub(crate) fn seed_message(&mut self, user: &str, text: &str) {
        let timestamp_ms = self.next_timestamp();
        self.messages.push(ChatMessage {
            id: MessageId::new(),
            user: user.to_string(),
            text: text.to_string(),
            timestamp_ms,
        });
    }
}

/// Current timestamp in milliseconds since epoch.
fn now_ms() -> u64 {
    u64::try_from(
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis(),
    )
    .unwrap_or(u64::MAX)
}
