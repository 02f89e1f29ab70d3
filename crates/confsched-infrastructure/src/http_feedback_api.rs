//! `FeedbackApi` posting to a web form endpoint.

use async_trait::async_trait;
use confsched_core::config::ApiConfig;
use confsched_core::error::{ConfschedError, Result};
use confsched_core::feedback::{FeedbackApi, FeedbackSubmission};
use std::time::Duration;

/// Posts feedback as `application/x-www-form-urlencoded`.
#[derive(Debug, Clone)]
pub struct HttpFeedbackApi {
    client: reqwest::Client,
    form_url: String,
}

impl HttpFeedbackApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConfschedError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            form_url: config.feedback_form_url.clone(),
        })
    }
}

fn form_fields(submission: &FeedbackSubmission) -> Vec<(&'static str, String)> {
    vec![
        ("session_id", submission.session_id.clone()),
        ("session_title", submission.session_title.clone()),
        ("total_evaluation", submission.total_evaluation.to_string()),
        ("relevancy", submission.relevancy.to_string()),
        ("as_expected", submission.as_expected.to_string()),
        ("difficulty", submission.difficulty.to_string()),
        ("knowledgeable", submission.knowledgeable.to_string()),
        ("comment", submission.comment.clone()),
    ]
}

#[async_trait]
impl FeedbackApi for HttpFeedbackApi {
    async fn submit(&self, submission: &FeedbackSubmission) -> Result<()> {
        tracing::debug!(
            "[HttpFeedbackApi] POST feedback for session {}",
            submission.session_id
        );

        let response = self
            .client
            .post(&self.form_url)
            .form(&form_fields(submission))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConfschedError::transport(format!(
                "Feedback form rejected submission for {}: HTTP {}",
                submission.session_id, status
            )));
        }
        Ok(())
    }
}
