//! Suggestion lifecycle: request, await, confirm or reject.
//!
//! A suggestion is never applied to the board directly. The session parses
//! it, holds it pending, and hands the priority back only on explicit
//! confirmation; the caller then feeds `TaskStore::set_priority`.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use chrono::NaiveDate;
use flowboard_model::advisor::SuggestionRequest;
use flowboard_model::task::{Priority, Task, TaskId};

use super::parse::parse_suggestion;
use super::{Advisor, AdvisorError};

/// Default bound on one advisor invocation.
pub const DEFAULT_ADVISOR_TIMEOUT: Duration = Duration::from_secs(30);

/// A parsed suggestion awaiting the user's decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSuggestion {
    /// The priority parsed from the suggestion's first token.
    pub priority: Priority,
    /// The advisor's full suggestion text, for display.
    pub raw: String,
}

/// Drives advisor requests and tracks their per-task state.
#[derive(Debug)]
pub struct SuggestionSession<A> {
    advisor: A,
    timeout: Duration,
    /// Tasks with a request currently awaiting the advisor.
    in_flight: HashSet<TaskId>,
    /// Parsed suggestions awaiting confirmation or rejection.
    pending: HashMap<TaskId, PendingSuggestion>,
}

impl<A: Advisor> SuggestionSession<A> {
    /// Creates a session with the default timeout.
    pub fn new(advisor: A) -> Self {
        Self::with_timeout(advisor, DEFAULT_ADVISOR_TIMEOUT)
    }

    /// Creates a session bounding each advisor call by `timeout`.
    pub fn with_timeout(advisor: A, timeout: Duration) -> Self {
        Self {
            advisor,
            timeout,
            in_flight: HashSet::new(),
            pending: HashMap::new(),
        }
    }

    /// Requests a priority suggestion for `task`.
    ///
    /// The task must have a deadline; that check happens before any
    /// external call. While the call is awaited the task is marked busy,
    /// and a duplicate request is refused. The parsed suggestion is
    /// stored pending and also returned for display.
    ///
    /// # Errors
    ///
    /// - [`AdvisorError::MissingDeadline`] if the task has no deadline.
    /// - [`AdvisorError::RequestPending`] if a request is already in flight.
    /// - [`AdvisorError::Timeout`] if the advisor exceeds the session bound.
    /// - [`AdvisorError::InvalidSuggestion`] if the first token is not a
    ///   priority label; nothing is stored pending in that case.
    /// - Any error the advisor itself returns.
    pub async fn request(
        &mut self,
        task: &Task,
        today: NaiveDate,
    ) -> Result<PendingSuggestion, AdvisorError> {
        let Some(deadline) = task.deadline else {
            return Err(AdvisorError::MissingDeadline);
        };
        if self.in_flight.contains(&task.id) {
            return Err(AdvisorError::RequestPending(task.id));
        }

        let request = SuggestionRequest {
            task_description: SuggestionRequest::describe(
                &task.title,
                task.description.as_deref(),
            ),
            deadline,
            current_date: today,
        };

        self.in_flight.insert(task.id);
        tracing::debug!(task_id = %task.id, "requesting priority suggestion");
        let outcome = tokio::time::timeout(self.timeout, self.advisor.suggest(request)).await;
        self.in_flight.remove(&task.id);

        let response = match outcome {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::warn!(task_id = %task.id, error = %e, "advisor call failed");
                return Err(e);
            }
            Err(_elapsed) => {
                tracing::warn!(task_id = %task.id, "advisor call timed out");
                return Err(AdvisorError::Timeout(self.timeout));
            }
        };

        let priority = parse_suggestion(&response.priority_suggestion)?;
        let suggestion = PendingSuggestion {
            priority,
            raw: response.priority_suggestion,
        };
        self.pending.insert(task.id, suggestion.clone());
        Ok(suggestion)
    }

    /// Takes the pending suggestion for `task_id` as accepted.
    ///
    /// The caller is responsible for applying the returned priority via
    /// the task store.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::NothingPending`] if no suggestion is
    /// awaiting a decision for this task.
    pub fn confirm(&mut self, task_id: TaskId) -> Result<PendingSuggestion, AdvisorError> {
        self.pending
            .remove(&task_id)
            .ok_or(AdvisorError::NothingPending(task_id))
    }

    /// Discards the pending suggestion for `task_id`. No state changes
    /// beyond forgetting the suggestion.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::NothingPending`] if no suggestion is
    /// awaiting a decision for this task.
    pub fn reject(&mut self, task_id: TaskId) -> Result<PendingSuggestion, AdvisorError> {
        self.pending
            .remove(&task_id)
            .ok_or(AdvisorError::NothingPending(task_id))
    }

    /// The suggestion awaiting a decision for `task_id`, if any.
    #[must_use]
    pub fn pending(&self, task_id: TaskId) -> Option<&PendingSuggestion> {
        self.pending.get(&task_id)
    }

    /// Whether a request for `task_id` is currently awaiting the advisor.
    #[must_use]
    pub fn is_busy(&self, task_id: TaskId) -> bool {
        self.in_flight.contains(&task_id)
    }
}
