//! AI priority advisor integration.
//!
//! The advisor is an external text-generation collaborator: given a task
//! description and two dates it returns a sentence whose first word should
//! be a priority label. This module owns the seam ([`Advisor`]), the
//! response parsing, the confirmation session, and a Unix-socket client
//! for an out-of-process advisor.
//!
//! # Submodules
//!
//! - [`parse`]: first-token extraction and label matching
//! - [`session`]: deadline precondition, per-task busy flags, confirm/reject
//! - [`socket`]: JSON-lines Unix socket advisor client

pub mod parse;
pub mod session;
pub mod socket;

pub use parse::parse_suggestion;
pub use session::{DEFAULT_ADVISOR_TIMEOUT, PendingSuggestion, SuggestionSession};
pub use socket::SocketAdvisor;

use std::time::Duration;

use flowboard_model::advisor::{SuggestionRequest, SuggestionResponse};
use flowboard_model::task::TaskId;

/// Errors that can occur during advisor operations.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    /// The task has no deadline, so no suggestion can be requested.
    #[error("task has no deadline; set one to get a priority suggestion")]
    MissingDeadline,

    /// A suggestion request for this task is already in flight.
    #[error("a suggestion request for task {0} is already pending")]
    RequestPending(TaskId),

    /// The external advisor call failed.
    #[error("advisor unavailable: {0}")]
    Unavailable(String),

    /// The advisor did not answer before the deadline.
    #[error("advisor did not respond within {0:?}")]
    Timeout(Duration),

    /// The suggestion's first token was not a valid priority label.
    #[error("suggestion did not start with a priority label: {0:?}")]
    InvalidSuggestion(String),

    /// No suggestion is awaiting confirmation for this task.
    #[error("no pending suggestion for task {0}")]
    NothingPending(TaskId),

    /// Connecting to or talking to the advisor socket failed.
    #[error("advisor connection failed: {0}")]
    Io(#[from] std::io::Error),

    /// The advisor's reply was not valid JSON.
    #[error("malformed advisor response: {0}")]
    Json(#[from] serde_json::Error),
}

/// An asynchronous priority advisor.
///
/// Implementations may fail or hang; callers bound every invocation with
/// a timeout (see [`SuggestionSession`]).
pub trait Advisor: Send + Sync {
    /// Requests a priority suggestion for one task.
    fn suggest(
        &self,
        request: SuggestionRequest,
    ) -> impl std::future::Future<Output = Result<SuggestionResponse, AdvisorError>> + Send;
}

/// `None` behaves as a permanently unavailable advisor, so a board can run
/// without one configured.
impl<A: Advisor> Advisor for Option<A> {
    async fn suggest(&self, request: SuggestionRequest) -> Result<SuggestionResponse, AdvisorError> {
        match self {
            Some(advisor) => advisor.suggest(request).await,
            None => Err(AdvisorError::Unavailable(
                "no advisor configured".to_string(),
            )),
        }
    }
}
