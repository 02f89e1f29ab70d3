//! Per-session feedback: lookup with default, upsert, and submission.

use confsched_core::error::Result;
use confsched_core::feedback::{FeedbackApi, FeedbackSubmission, SessionFeedback};
use confsched_core::repository::ConferenceStore;
use confsched_core::session::SpeechSession;
use std::sync::Arc;

pub struct FeedbackService {
    store: Arc<dyn ConferenceStore>,
    api: Arc<dyn FeedbackApi>,
}

impl FeedbackService {
    pub fn new(store: Arc<dyn ConferenceStore>, api: Arc<dyn FeedbackApi>) -> Self {
        Self { store, api }
    }

    /// Returns the stored feedback, or [`SessionFeedback::empty`] when the
    /// session has none.
    pub async fn get_feedback(&self, session_id: &str) -> Result<SessionFeedback> {
        let stored = self
            .store
            .feedbacks()
            .await?
            .into_iter()
            .find(|f| f.session_id == session_id);
        Ok(stored.unwrap_or_else(|| SessionFeedback::empty(session_id)))
    }

    /// Upserts by session id; the last write wins.
    pub async fn save_feedback(&self, feedback: &SessionFeedback) -> Result<()> {
        self.store.save_feedback(feedback).await
    }

    /// Sends the feedback to the submission endpoint.
    ///
    /// On success the feedback is stored with `submitted = true`. On failure
    /// the error is returned and the stored feedback is left as it was.
    pub async fn submit_feedback(
        &self,
        session: &SpeechSession,
        feedback: &SessionFeedback,
    ) -> Result<()> {
        let submission = FeedbackSubmission {
            session_id: session.id.clone(),
            session_title: session.title.ja.clone(),
            total_evaluation: feedback.total_evaluation,
            relevancy: feedback.relevancy,
            as_expected: feedback.as_expected,
            difficulty: feedback.difficulty,
            knowledgeable: feedback.knowledgeable,
            comment: feedback.comment.clone(),
        };

        self.api.submit(&submission).await.inspect_err(|e| {
            tracing::warn!(
                "[FeedbackService] Submission failed for {}: {}",
                session.id,
                e
            );
        })?;
        tracing::info!("[FeedbackService] Submitted feedback for {}", session.id);

        let submitted = SessionFeedback {
            session_id: session.id.clone(),
            submitted: true,
            ..feedback.clone()
        };
        self.store.save_feedback(&submitted).await
    }
}
