use serde::Serialize;

use super::QuoteResponse;

/// Outcome of the most recent submission. Exactly one variant holds at a time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum SubmissionResult {
    #[default]
    NotStarted,
    InFlight,
    Success(QuoteResponse),
    Failure(String),
}

impl SubmissionResult {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionResult::InFlight)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SubmissionResult::Failure(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmissionResult::Failure(message) => Some(message),
            _ => None,
        }
    }
}
