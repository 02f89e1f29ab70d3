//! Session feedback domain module.

mod model;

pub use model::{FeedbackSubmission, SessionFeedback};

use crate::error::Result;
use async_trait::async_trait;

/// The external form endpoint that collects feedback.
#[async_trait]
pub trait FeedbackApi: Send + Sync {
    /// Posts one submission.
    ///
    /// # Errors
    ///
    /// Returns `Transport` when the request fails or the endpoint rejects it.
    async fn submit(&self, submission: &FeedbackSubmission) -> Result<()>;
}
