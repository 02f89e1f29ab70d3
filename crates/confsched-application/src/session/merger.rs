//! Combine-latest merge of the session, speaker and favorite sources.
//!
//! ```text
//!  store.sessions() ──┐
//!  store.speakers() ──┼─▶ merge task (latest slots) ──▶ watch<MergeState> ──▶ subscribers
//!  favorite_ids()   ──┘
//! ```
//!
//! One spawned task owns the "latest value per source" slots and is the only
//! writer of the merged state. Subscribers share that task; it starts with
//! the first subscriber and is aborted when the last subscriber stream is
//! dropped.

use confsched_core::error::{ConfschedError, Result};
use confsched_core::repository::{ConferenceStore, FavoriteStore};
use confsched_core::session::{
    Session, SessionAssembler, SessionRecord, SpeakerRecord, reference_day, schedule_order,
};
use confsched_core::stream::RecordStream;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// A merged session list in schedule order.
pub type SessionList = Arc<Vec<Session>>;

#[derive(Debug, Clone)]
enum MergeState {
    /// Not every source has produced a usable value yet.
    Pending,
    Ready(SessionList),
    /// Terminal; the merge task stops consuming sources. `last` is the list
    /// published before the failure, so late readers still receive it.
    Failed {
        last: Option<SessionList>,
        error: ConfschedError,
    },
}

/// Where one subscriber stream is in its lifetime.
enum Subscriber {
    Live {
        // Keeps the shared merge task alive while this stream exists.
        task: Arc<MergeTask>,
        state: watch::Receiver<MergeState>,
        seen: Option<SessionList>,
        started: bool,
    },
    Failing(ConfschedError),
    Done,
}

enum SourceUpdate {
    Sessions(Vec<SessionRecord>),
    Speakers(Vec<SpeakerRecord>),
    FavoriteIds(HashSet<String>),
}

/// The most recent value seen from each source.
#[derive(Default)]
struct LatestSources {
    sessions: Option<Vec<SessionRecord>>,
    speakers: Option<Vec<SpeakerRecord>>,
    favorite_ids: Option<HashSet<String>>,
}

impl LatestSources {
    fn apply(&mut self, update: SourceUpdate) {
        match update {
            SourceUpdate::Sessions(records) => self.sessions = Some(records),
            SourceUpdate::Speakers(records) => self.speakers = Some(records),
            SourceUpdate::FavoriteIds(ids) => self.favorite_ids = Some(ids),
        }
    }

    /// Builds the sorted session list once every slot is filled.
    ///
    /// Returns `None` while a source is missing or the session batch is
    /// empty; an empty batch means the store has not been loaded yet.
    fn combine(&self) -> Option<Vec<Session>> {
        let records = self.sessions.as_ref()?;
        let speakers = self.speakers.as_ref()?;
        let favorite_ids = self.favorite_ids.as_ref()?;

        if records.is_empty() {
            tracing::debug!("[SessionMerger] Session batch empty, waiting for data");
            return None;
        }
        let reference_day = reference_day(records)?;

        let assembler = SessionAssembler::new(speakers, favorite_ids, reference_day);
        let mut sessions: Vec<Session> = records.iter().map(|r| assembler.assemble(r)).collect();
        sessions.sort_by(schedule_order);
        Some(sessions)
    }
}

fn source_item<T>(source_name: &str, item: Option<Result<T>>) -> Result<T> {
    match item {
        Some(Ok(value)) => {
            tracing::debug!("[SessionMerger] {} emitted", source_name);
            Ok(value)
        }
        Some(Err(err)) => Err(err.into_source_error(source_name)),
        None => Err(ConfschedError::source_unavailable(
            source_name,
            "stream ended",
        )),
    }
}

async fn run_merge(
    mut sessions: RecordStream<Vec<SessionRecord>>,
    mut speakers: RecordStream<Vec<SpeakerRecord>>,
    mut favorite_ids: RecordStream<HashSet<String>>,
    state: watch::Sender<MergeState>,
) {
    let mut latest = LatestSources::default();
    let mut last: Option<SessionList> = None;

    loop {
        let update = tokio::select! {
            item = sessions.next() => source_item("sessions", item).map(SourceUpdate::Sessions),
            item = speakers.next() => source_item("speakers", item).map(SourceUpdate::Speakers),
            item = favorite_ids.next() => {
                source_item("favorite_ids", item).map(SourceUpdate::FavoriteIds)
            }
        };

        match update {
            Ok(update) => {
                latest.apply(update);
                if let Some(merged) = latest.combine() {
                    tracing::debug!(
                        "[SessionMerger] Publishing {} merged sessions",
                        merged.len()
                    );
                    let merged = Arc::new(merged);
                    last = Some(merged.clone());
                    state.send_replace(MergeState::Ready(merged));
                }
            }
            Err(err) => {
                tracing::error!("[SessionMerger] Merge stopped: {}", err);
                state.send_replace(MergeState::Failed {
                    last: last.take(),
                    error: err,
                });
                // Keep the channel open so late subscribers still observe the failure.
                state.closed().await;
                return;
            }
        }
    }
}

/// A running merge task shared by every live subscriber stream.
struct MergeTask {
    state: watch::Receiver<MergeState>,
    handle: JoinHandle<()>,
}

impl Drop for MergeTask {
    fn drop(&mut self) {
        tracing::debug!("[SessionMerger] Last subscriber gone, stopping merge task");
        self.handle.abort();
    }
}

/// Publishes the merged, sorted session list whenever any source changes.
pub struct SessionMerger {
    store: Arc<dyn ConferenceStore>,
    favorites: Arc<dyn FavoriteStore>,
    running: Mutex<Weak<MergeTask>>,
}

impl SessionMerger {
    pub fn new(store: Arc<dyn ConferenceStore>, favorites: Arc<dyn FavoriteStore>) -> Self {
        Self {
            store,
            favorites,
            running: Mutex::new(Weak::new()),
        }
    }

    /// Subscribes to the merged session list.
    ///
    /// The stream yields the latest merged list (if any) and then every new
    /// one. It never yields before all three sources have emitted and the
    /// session batch is non-empty. A source failure is delivered as a final
    /// `Err` item, preceded by the last merged list if this subscriber has
    /// not received it yet.
    ///
    /// Must be called within a Tokio runtime.
    pub fn sessions(&self) -> RecordStream<SessionList> {
        let task = self.acquire();
        let state = task.state.clone();

        let subscriber = Subscriber::Live {
            task,
            state,
            seen: None,
            started: false,
        };

        stream::unfold(subscriber, |subscriber| async move {
            let (task, mut state, seen, started) = match subscriber {
                Subscriber::Live {
                    task,
                    state,
                    seen,
                    started,
                } => (task, state, seen, started),
                Subscriber::Failing(error) => return Some((Err(error), Subscriber::Done)),
                Subscriber::Done => return None,
            };

            let mut wait = started;
            loop {
                if wait && state.changed().await.is_err() {
                    return None;
                }
                wait = true;
                let current = state.borrow_and_update().clone();
                match current {
                    MergeState::Pending => {}
                    MergeState::Ready(sessions) => {
                        let next = Subscriber::Live {
                            task,
                            state,
                            seen: Some(sessions.clone()),
                            started: true,
                        };
                        return Some((Ok(sessions), next));
                    }
                    MergeState::Failed { last, error } => {
                        let unseen = last.filter(|last| {
                            !seen.as_ref().is_some_and(|seen| Arc::ptr_eq(seen, last))
                        });
                        return match unseen {
                            Some(last) => Some((Ok(last), Subscriber::Failing(error))),
                            None => Some((Err(error), Subscriber::Done)),
                        };
                    }
                }
            }
        })
        .boxed()
    }

    /// Number of subscriber streams currently sharing the merge task.
    pub fn subscriber_count(&self) -> usize {
        self.running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .strong_count()
    }

    fn acquire(&self) -> Arc<MergeTask> {
        let mut running = self.running.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = running.upgrade() {
            return task;
        }

        tracing::debug!("[SessionMerger] Starting merge task");
        let (tx, rx) = watch::channel(MergeState::Pending);
        let handle = tokio::spawn(run_merge(
            self.store.sessions(),
            self.store.speakers(),
            self.favorites.favorite_ids(),
            tx,
        ));
        let task = Arc::new(MergeTask { state: rx, handle });
        *running = Arc::downgrade(&task);
        task
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use confsched_core::session::{LocaleText, Room};

    fn record(id: &str, starts_at: &str, room_id: &str) -> SessionRecord {
        let starts_at = DateTime::parse_from_rfc3339(starts_at).unwrap();
        SessionRecord {
            id: id.to_string(),
            is_service_session: false,
            title: LocaleText::new(id, id),
            description: String::new(),
            starts_at,
            ends_at: starts_at,
            room: Room::new(room_id, LocaleText::new(room_id, room_id)),
            speaker_ids: vec![],
            session_type: None,
            lang: Default::default(),
            category: None,
            audience_category: Default::default(),
            intended_audience: None,
            is_interpretation_target: false,
            video_url: None,
            slide_url: None,
            message: None,
        }
    }

    fn ids(sessions: &[Session]) -> Vec<&str> {
        sessions.iter().map(Session::id).collect()
    }

    #[test]
    fn test_combine_waits_for_every_source() {
        let mut latest = LatestSources::default();
        latest.apply(SourceUpdate::Sessions(vec![record(
            "a",
            "2020-02-20T10:00:00+09:00",
            "R1",
        )]));
        assert!(latest.combine().is_none());

        latest.apply(SourceUpdate::Speakers(vec![]));
        assert!(latest.combine().is_none());

        latest.apply(SourceUpdate::FavoriteIds(HashSet::new()));
        assert_eq!(latest.combine().unwrap().len(), 1);
    }

    #[test]
    fn test_combine_skips_empty_session_batch() {
        let mut latest = LatestSources::default();
        latest.apply(SourceUpdate::Sessions(vec![]));
        latest.apply(SourceUpdate::Speakers(vec![]));
        latest.apply(SourceUpdate::FavoriteIds(["x".to_string()].into_iter().collect()));
        assert!(latest.combine().is_none());
    }

    #[test]
    fn test_combine_sorts_by_start_time_then_room() {
        let mut latest = LatestSources::default();
        latest.apply(SourceUpdate::Sessions(vec![
            record("late", "2020-02-21T10:00:00+09:00", "R1"),
            record("r2", "2020-02-20T10:00:00+09:00", "R2"),
            record("r1", "2020-02-20T10:00:00+09:00", "R1"),
        ]));
        latest.apply(SourceUpdate::Speakers(vec![]));
        latest.apply(SourceUpdate::FavoriteIds(HashSet::new()));

        let merged = latest.combine().unwrap();
        assert_eq!(ids(&merged), vec!["r1", "r2", "late"]);
        assert_eq!(merged[0].day_number(), 0);
        assert_eq!(merged[1].day_number(), 0);
        assert_eq!(merged[2].day_number(), 1);

        assert_eq!(latest.combine().unwrap(), merged);
    }

    #[test]
    fn test_source_item_maps_end_of_stream() {
        let err = source_item::<Vec<SessionRecord>>("sessions", None).unwrap_err();
        assert!(err.is_source_unavailable());
    }
}
