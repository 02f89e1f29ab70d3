use confsched_core::error::Result;
use confsched_core::repository::{ConferenceStore, SessionApi};
use std::sync::Arc;

/// Pulls the dataset from the remote API into the local store.
///
/// The store's session stream re-emits on write, so a successful refresh
/// reaches every `SessionMerger` subscriber without further wiring.
pub struct RefreshCoordinator {
    api: Arc<dyn SessionApi>,
    store: Arc<dyn ConferenceStore>,
}

impl RefreshCoordinator {
    pub fn new(api: Arc<dyn SessionApi>, store: Arc<dyn ConferenceStore>) -> Self {
        Self { api, store }
    }

    /// Fetches and stores the dataset.
    ///
    /// # Errors
    ///
    /// Fetch and store failures are returned unchanged; nothing is retried
    /// and the store is left untouched when the fetch fails.
    pub async fn refresh(&self) -> Result<()> {
        tracing::info!("[RefreshCoordinator] Refreshing sessions");
        let response = self.api.fetch_sessions().await.inspect_err(|e| {
            tracing::warn!("[RefreshCoordinator] Fetch failed: {}", e);
        })?;
        self.store.save(response).await
    }
}
