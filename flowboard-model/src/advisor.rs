//! Wire schema for the external priority advisor.
//!
//! The advisor is an opaque text-generation collaborator: it receives a
//! task description plus two ISO dates and returns a natural-language
//! suggestion whose first word is intended to be a priority label. Field
//! names are camelCase on the wire to match the advisor's JSON schema.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Request sent to the priority advisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    /// Task title, optionally followed by the description on a new line.
    pub task_description: String,
    /// The task's deadline (`YYYY-MM-DD`).
    pub deadline: NaiveDate,
    /// Today's date (`YYYY-MM-DD`), supplied by the caller.
    pub current_date: NaiveDate,
}

impl SuggestionRequest {
    /// Builds the advisor's `taskDescription` field from a title and an
    /// optional description, joined by a newline when both are present.
    #[must_use]
    pub fn describe(title: &str, description: Option<&str>) -> String {
        match description {
            Some(desc) => format!("{title}\n{desc}"),
            None => title.to_string(),
        }
    }
}

/// Response returned by the priority advisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResponse {
    /// Free-form suggestion text; the first whitespace-delimited token is
    /// expected to be one of the priority labels.
    pub priority_suggestion: String,
}
