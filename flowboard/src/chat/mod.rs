//! Team chat: an append-only message log beside the board.
//!
//! The chat has no data flow into the board; it shares only the process.

pub mod log;

pub use log::{ChatLog, DEFAULT_USER};

use thiserror::Error;

/// Errors that can occur when sending a chat message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    /// Message text cannot be empty.
    #[error("message text cannot be empty")]
    EmptyText,
    /// Message text exceeds the maximum length.
    #[error("message text too long (max 4096 characters)")]
    TextTooLong,
}
