//! Data source traits consumed by the session pipeline.
//!
//! These decouple the merge logic from the concrete storage engine, the
//! favorites backend and the remote HTTP API.

use async_trait::async_trait;
use std::collections::HashSet;

use super::record::{SessionRecord, SessionsResponse, SpeakerRecord};
use crate::error::Result;
use crate::feedback::SessionFeedback;
use crate::stream::RecordStream;

/// The local structured store holding the conference dataset.
///
/// # Implementation Notes
///
/// Streams must yield the current contents on subscription and re-emit after
/// every write that touches them. An empty session list means "not loaded".
#[async_trait]
pub trait ConferenceStore: Send + Sync {
    /// Stream of all persisted session records.
    fn sessions(&self) -> RecordStream<Vec<SessionRecord>>;

    /// Stream of all persisted speaker records.
    fn speakers(&self) -> RecordStream<Vec<SpeakerRecord>>;

    /// Lists all persisted feedback records.
    async fn feedbacks(&self) -> Result<Vec<SessionFeedback>>;

    /// Replaces the session and speaker data with a freshly fetched dataset.
    async fn save(&self, response: SessionsResponse) -> Result<()>;

    /// Inserts or replaces the feedback record for its session id.
    async fn save_feedback(&self, feedback: &SessionFeedback) -> Result<()>;
}

/// The store tracking which sessions the user marked as favorite.
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// Stream of the current favorite session ids.
    fn favorite_ids(&self) -> RecordStream<HashSet<String>>;

    /// Adds the id when absent, removes it when present.
    async fn toggle_favorite(&self, session_id: &str) -> Result<()>;
}

/// The remote API serving the authoritative session dataset.
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// Fetches the full dataset.
    ///
    /// # Errors
    ///
    /// - `Transport` when the request fails
    /// - `Serialization` when the payload does not decode
    async fn fetch_sessions(&self) -> Result<SessionsResponse>;
}
