//! Frontend boundary: a Unix-socket JSON-lines command service.
//!
//! External presentation code (a web UI, a TUI, a test harness) connects
//! to the board socket, performs a Hello/Welcome handshake, and then
//! drives the board through commands, receiving one event per command.
//!
//! # Submodules
//!
//! - [`protocol`]: JSON lines wire format ([`protocol::ClientCommand`],
//!   [`protocol::ServerEvent`])
//! - [`listener`]: socket lifecycle and the sequential command loop

pub mod listener;
pub mod protocol;

pub use listener::BoardService;

/// Errors that can occur during service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Failed to create, bind, or use the Unix socket.
    #[error("socket error: {0}")]
    Socket(#[from] std::io::Error),

    /// The frontend connection was closed unexpectedly.
    #[error("connection closed")]
    ConnectionClosed,

    /// A protocol-level error (wrong version, unexpected message).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
