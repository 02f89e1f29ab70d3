pub mod contents;
pub mod favorite;
pub mod feedback;
pub mod refresh;

use anyhow::{Context, Result, bail};
use confsched_application::SessionUseCase;
use confsched_core::config::AppConfig;
use confsched_core::repository::ConferenceStore;
use confsched_core::session::SessionContents;
use confsched_infrastructure::{
    ConfschedPaths, HttpFeedbackApi, HttpSessionApi, JsonConferenceStore, JsonFavoriteStore,
};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;

const CONTENTS_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything a command needs, wired from the loaded configuration.
pub struct AppContext {
    store: Arc<JsonConferenceStore>,
    pub usecase: SessionUseCase,
}

impl AppContext {
    pub async fn build(config: &AppConfig) -> Result<Self> {
        let paths = ConfschedPaths::new(config.storage.data_dir.as_deref());
        let store = Arc::new(JsonConferenceStore::open(&paths).await?);
        let favorites = Arc::new(JsonFavoriteStore::open(&paths).await?);
        let session_api = Arc::new(HttpSessionApi::new(&config.api)?);
        let feedback_api = Arc::new(HttpFeedbackApi::new(&config.api)?);

        let usecase = SessionUseCase::new(store.clone(), favorites, session_api, feedback_api);
        tracing::debug!(
            "[AppContext] Wired stores from {:?}, sessions from {}",
            paths.data_dir().ok(),
            config.api.sessions_url
        );
        Ok(Self { store, usecase })
    }

    /// Waits for the first aggregated snapshot of the local data.
    pub async fn current_contents(&self) -> Result<SessionContents> {
        let stored = self
            .store
            .sessions()
            .next()
            .await
            .transpose()?
            .unwrap_or_default();
        if stored.is_empty() {
            bail!("No sessions stored yet; run `confsched refresh` first");
        }

        let mut contents = self.usecase.session_contents();
        let first = tokio::time::timeout(CONTENTS_TIMEOUT, contents.next())
            .await
            .context("Timed out waiting for session contents")?
            .context("Session contents stream ended")??;
        Ok(first)
    }
}
