//! Suggestion text parsing.

use flowboard_model::task::Priority;

use super::AdvisorError;

/// Extracts the proposed priority from a suggestion's text.
///
/// The first whitespace-delimited token must match one of the four
/// priority labels exactly (case-sensitive, no punctuation), e.g.
/// `"Medium because the deadline is moderate"` parses to
/// [`Priority::Medium`].
///
/// # Errors
///
/// Returns [`AdvisorError::InvalidSuggestion`] carrying the offending
/// token when the text is empty or its first token is not a label.
pub fn parse_suggestion(text: &str) -> Result<Priority, AdvisorError> {
    let token = text.split_whitespace().next().unwrap_or_default();
    Priority::from_label(token)
        .ok_or_else(|| AdvisorError::InvalidSuggestion(token.to_string()))
}
