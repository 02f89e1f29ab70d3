//! `SessionApi` over HTTP.

use crate::dto::ApiResponseDto;
use async_trait::async_trait;
use confsched_core::config::ApiConfig;
use confsched_core::error::{ConfschedError, Result};
use confsched_core::repository::SessionApi;
use confsched_core::session::SessionsResponse;
use std::time::Duration;

/// Fetches the conference dataset with a single GET request.
#[derive(Debug, Clone)]
pub struct HttpSessionApi {
    client: reqwest::Client,
    sessions_url: String,
}

impl HttpSessionApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConfschedError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            sessions_url: config.sessions_url.clone(),
        })
    }
}

#[async_trait]
impl SessionApi for HttpSessionApi {
    async fn fetch_sessions(&self) -> Result<SessionsResponse> {
        tracing::debug!("[HttpSessionApi] GET {}", self.sessions_url);

        let response = self
            .client
            .get(&self.sessions_url)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let dto: ApiResponseDto = serde_json::from_str(&body)?;
        let sessions: SessionsResponse = dto.into();

        tracing::info!(
            "[HttpSessionApi] Fetched {} sessions and {} speakers",
            sessions.sessions.len(),
            sessions.speakers.len()
        );
        Ok(sessions)
    }
}
