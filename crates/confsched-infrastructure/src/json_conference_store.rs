//! JSON file backed `ConferenceStore` implementation.

use crate::paths::{ConfschedPaths, ServiceType};
use crate::storage::AtomicJsonFile;
use async_trait::async_trait;
use confsched_core::error::Result;
use confsched_core::feedback::SessionFeedback;
use confsched_core::repository::ConferenceStore;
use confsched_core::session::{SessionRecord, SessionsResponse, SpeakerRecord};
use confsched_core::stream::{RecordStream, watch_stream};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, watch};

/// Everything the store persists, written as one file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConferenceSnapshot {
    #[serde(default)]
    sessions: Vec<SessionRecord>,
    #[serde(default)]
    speakers: Vec<SpeakerRecord>,
    #[serde(default)]
    feedbacks: Vec<SessionFeedback>,
}

/// Local conference store.
///
/// The snapshot is cached in memory and mirrored to `conference.json`.
/// Session and speaker streams are backed by watch channels and re-emit after
/// every `save`.
///
/// # Example
///
/// ```ignore
/// let store = JsonConferenceStore::open(&ConfschedPaths::default()).await?;
/// let mut sessions = store.sessions();
/// ```
pub struct JsonConferenceStore {
    file: Option<AtomicJsonFile<ConferenceSnapshot>>,
    snapshot: Mutex<ConferenceSnapshot>,
    sessions: watch::Sender<Vec<SessionRecord>>,
    speakers: watch::Sender<Vec<SpeakerRecord>>,
}

impl JsonConferenceStore {
    /// Opens the store at the resolved data directory, loading any existing
    /// file. A missing file starts an empty store.
    pub async fn open(paths: &ConfschedPaths) -> Result<Self> {
        let file =
            AtomicJsonFile::<ConferenceSnapshot>::new(paths.get_path(ServiceType::Conference)?);
        let snapshot = file.load().await?.unwrap_or_default();
        tracing::debug!(
            "[JsonConferenceStore] Loaded {} sessions, {} speakers, {} feedbacks from {:?}",
            snapshot.sessions.len(),
            snapshot.speakers.len(),
            snapshot.feedbacks.len(),
            file.path()
        );
        Ok(Self::from_snapshot(Some(file), snapshot))
    }

    /// Creates a store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self::from_snapshot(None, ConferenceSnapshot::default())
    }

    fn from_snapshot(
        file: Option<AtomicJsonFile<ConferenceSnapshot>>,
        snapshot: ConferenceSnapshot,
    ) -> Self {
        let (sessions, _) = watch::channel(snapshot.sessions.clone());
        let (speakers, _) = watch::channel(snapshot.speakers.clone());
        Self {
            file,
            snapshot: Mutex::new(snapshot),
            sessions,
            speakers,
        }
    }

    async fn persist(&self, snapshot: &ConferenceSnapshot) -> Result<()> {
        match &self.file {
            Some(file) => file.save(snapshot).await,
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ConferenceStore for JsonConferenceStore {
    fn sessions(&self) -> RecordStream<Vec<SessionRecord>> {
        watch_stream(self.sessions.subscribe())
    }

    fn speakers(&self) -> RecordStream<Vec<SpeakerRecord>> {
        watch_stream(self.speakers.subscribe())
    }

    async fn feedbacks(&self) -> Result<Vec<SessionFeedback>> {
        Ok(self.snapshot.lock().await.feedbacks.clone())
    }

    async fn save(&self, response: SessionsResponse) -> Result<()> {
        let mut snapshot = self.snapshot.lock().await;
        let mut updated = snapshot.clone();
        updated.sessions = response.sessions;
        updated.speakers = response.speakers;

        self.persist(&updated).await?;
        *snapshot = updated;

        tracing::info!(
            "[JsonConferenceStore] Saved {} sessions and {} speakers",
            snapshot.sessions.len(),
            snapshot.speakers.len()
        );

        // Speakers only publish on change; sessions re-emit on every save.
        self.speakers.send_if_modified(|current| {
            if *current == snapshot.speakers {
                return false;
            }
            current.clone_from(&snapshot.speakers);
            true
        });
        self.sessions.send_replace(snapshot.sessions.clone());
        Ok(())
    }

    async fn save_feedback(&self, feedback: &SessionFeedback) -> Result<()> {
        let mut snapshot = self.snapshot.lock().await;
        let mut updated = snapshot.clone();
        match updated
            .feedbacks
            .iter_mut()
            .find(|f| f.session_id == feedback.session_id)
        {
            Some(existing) => *existing = feedback.clone(),
            None => updated.feedbacks.push(feedback.clone()),
        }

        self.persist(&updated).await?;
        *snapshot = updated;

        tracing::debug!(
            "[JsonConferenceStore] Saved feedback for session {}",
            feedback.session_id
        );
        Ok(())
    }
}
