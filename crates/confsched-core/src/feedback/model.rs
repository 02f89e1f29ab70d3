//! Session feedback domain model.

use serde::{Deserialize, Serialize};

/// The user's feedback for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFeedback {
    pub session_id: String,
    pub total_evaluation: u8,
    pub relevancy: u8,
    pub as_expected: u8,
    pub difficulty: u8,
    pub knowledgeable: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub submitted: bool,
}

impl SessionFeedback {
    /// The value returned when nothing has been stored for `session_id`:
    /// every rating zero, empty comment, not submitted.
    pub fn empty(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            total_evaluation: 0,
            relevancy: 0,
            as_expected: 0,
            difficulty: 0,
            knowledgeable: 0,
            comment: String::new(),
            submitted: false,
        }
    }
}

/// A feedback post addressed to the external submission form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackSubmission {
    pub session_id: String,
    pub session_title: String,
    pub total_evaluation: u8,
    pub relevancy: u8,
    pub as_expected: u8,
    pub difficulty: u8,
    pub knowledgeable: u8,
    pub comment: String,
}
