//! Session use case: the entry point the UI layer talks to.
//!
//! `SessionUseCase` wires the merge pipeline, the aggregator, feedback and
//! refresh behind one object:
//!
//! ```ignore
//! let usecase = SessionUseCase::new(store, favorites, session_api, feedback_api);
//! let mut contents = usecase.session_contents();
//! while let Some(contents) = contents.next().await {
//!     render(contents?);
//! }
//! ```

use crate::feedback_service::FeedbackService;
use crate::session::{RefreshCoordinator, SessionMerger};
use confsched_core::error::Result;
use confsched_core::feedback::{FeedbackApi, SessionFeedback};
use confsched_core::repository::{ConferenceStore, FavoriteStore, SessionApi};
use confsched_core::session::{Session, SessionContents, SpeechSession};
use confsched_core::stream::RecordStream;
use futures::StreamExt;
use std::sync::Arc;

pub struct SessionUseCase {
    merger: SessionMerger,
    favorites: Arc<dyn FavoriteStore>,
    feedback: FeedbackService,
    refresher: RefreshCoordinator,
}

impl SessionUseCase {
    pub fn new(
        store: Arc<dyn ConferenceStore>,
        favorites: Arc<dyn FavoriteStore>,
        session_api: Arc<dyn SessionApi>,
        feedback_api: Arc<dyn FeedbackApi>,
    ) -> Self {
        Self {
            merger: SessionMerger::new(store.clone(), favorites.clone()),
            favorites,
            feedback: FeedbackService::new(store.clone(), feedback_api),
            refresher: RefreshCoordinator::new(session_api, store),
        }
    }

    /// Stream of aggregated contents, one per merged session list.
    pub fn session_contents(&self) -> RecordStream<SessionContents> {
        self.merger
            .sessions()
            .map(|merged| {
                merged.map(|sessions| {
                    let contents = SessionContents::aggregate(&sessions);
                    tracing::debug!(
                        "[SessionUseCase] Contents: {} sessions, {} speakers, {} rooms",
                        contents.sessions.len(),
                        contents.speakers.len(),
                        contents.rooms.len()
                    );
                    contents
                })
            })
            .boxed()
    }

    pub async fn toggle_favorite(&self, session: &Session) -> Result<()> {
        self.favorites.toggle_favorite(session.id()).await
    }

    pub async fn session_feedback(&self, session_id: &str) -> Result<SessionFeedback> {
        self.feedback.get_feedback(session_id).await
    }

    pub async fn save_session_feedback(&self, feedback: &SessionFeedback) -> Result<()> {
        self.feedback.save_feedback(feedback).await
    }

    pub async fn submit_session_feedback(
        &self,
        session: &SpeechSession,
        feedback: &SessionFeedback,
    ) -> Result<()> {
        self.feedback.submit_feedback(session, feedback).await
    }

    pub async fn refresh(&self) -> Result<()> {
        self.refresher.refresh().await
    }
}
