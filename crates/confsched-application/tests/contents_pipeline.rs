use async_trait::async_trait;
use chrono::DateTime;
use confsched_application::{SessionMerger, SessionUseCase};
use confsched_core::error::{ConfschedError, Result};
use confsched_core::feedback::{FeedbackApi, FeedbackSubmission, SessionFeedback};
use confsched_core::repository::{ConferenceStore, FavoriteStore, SessionApi};
use confsched_core::session::{
    Category, LocaleText, Room, Session, SessionContents, SessionRecord, SessionsResponse,
    SpeakerRecord,
};
use confsched_core::stream::RecordStream;
use confsched_infrastructure::{JsonConferenceStore, JsonFavoriteStore};
use futures::{StreamExt, stream};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ============================================================================
// Fixtures
// ============================================================================

fn record(id: &str, starts_at: &str, room_id: &str, speaker_ids: &[&str]) -> SessionRecord {
    let starts_at = DateTime::parse_from_rfc3339(starts_at).unwrap();
    SessionRecord {
        id: id.to_string(),
        is_service_session: false,
        title: LocaleText::new(format!("{id} ja"), format!("{id} en")),
        description: String::new(),
        starts_at,
        ends_at: starts_at + chrono::Duration::minutes(40),
        room: Room::new(room_id, LocaleText::new(room_id, room_id)),
        speaker_ids: speaker_ids.iter().map(|s| s.to_string()).collect(),
        session_type: None,
        lang: Default::default(),
        category: Some(Category {
            id: format!("cat-{id}"),
            name: LocaleText::new(id, id),
        }),
        audience_category: Default::default(),
        intended_audience: None,
        is_interpretation_target: false,
        video_url: None,
        slide_url: None,
        message: None,
    }
}

fn speaker(id: &str) -> SpeakerRecord {
    SpeakerRecord {
        id: id.to_string(),
        name: id.to_uppercase(),
        tag_line: None,
        bio: None,
        image_url: None,
    }
}

/// A `SessionApi` returning a canned response, or failing when empty.
struct StaticSessionApi {
    response: Option<SessionsResponse>,
}

#[async_trait]
impl SessionApi for StaticSessionApi {
    async fn fetch_sessions(&self) -> Result<SessionsResponse> {
        self.response
            .clone()
            .ok_or_else(|| ConfschedError::transport("connection refused"))
    }
}

/// A `FeedbackApi` that records submissions, optionally rejecting them.
#[derive(Default)]
struct RecordingFeedbackApi {
    reject: bool,
    submitted: Mutex<Vec<FeedbackSubmission>>,
}

#[async_trait]
impl FeedbackApi for RecordingFeedbackApi {
    async fn submit(&self, submission: &FeedbackSubmission) -> Result<()> {
        if self.reject {
            return Err(ConfschedError::transport("HTTP 500"));
        }
        self.submitted.lock().unwrap().push(submission.clone());
        Ok(())
    }
}

/// A store whose session stream fails immediately.
struct BrokenStore;

#[async_trait]
impl ConferenceStore for BrokenStore {
    fn sessions(&self) -> RecordStream<Vec<SessionRecord>> {
        stream::once(async { Err(ConfschedError::io("database locked")) }).boxed()
    }

    fn speakers(&self) -> RecordStream<Vec<SpeakerRecord>> {
        stream::once(async { Ok(vec![]) }).chain(stream::pending()).boxed()
    }

    async fn feedbacks(&self) -> Result<Vec<SessionFeedback>> {
        Ok(vec![])
    }

    async fn save(&self, _response: SessionsResponse) -> Result<()> {
        Ok(())
    }

    async fn save_feedback(&self, _feedback: &SessionFeedback) -> Result<()> {
        Ok(())
    }
}

/// Favorites that emit once, then fail after a short delay.
struct FailingFavorites;

#[async_trait]
impl FavoriteStore for FailingFavorites {
    fn favorite_ids(&self) -> RecordStream<HashSet<String>> {
        stream::once(async { Ok(HashSet::new()) })
            .chain(stream::once(async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Err(ConfschedError::transport("favorites backend gone"))
            }))
            .boxed()
    }

    async fn toggle_favorite(&self, _session_id: &str) -> Result<()> {
        Ok(())
    }
}

struct Harness {
    store: Arc<JsonConferenceStore>,
    favorites: Arc<JsonFavoriteStore>,
    feedback_api: Arc<RecordingFeedbackApi>,
    usecase: SessionUseCase,
}

fn harness(response: Option<SessionsResponse>, reject_feedback: bool) -> Harness {
    let store = Arc::new(JsonConferenceStore::in_memory());
    let favorites = Arc::new(JsonFavoriteStore::in_memory());
    let feedback_api = Arc::new(RecordingFeedbackApi {
        reject: reject_feedback,
        ..Default::default()
    });
    let usecase = SessionUseCase::new(
        store.clone(),
        favorites.clone(),
        Arc::new(StaticSessionApi { response }),
        feedback_api.clone(),
    );
    Harness {
        store,
        favorites,
        feedback_api,
        usecase,
    }
}

/// Waits for the next contents snapshot satisfying `pred`.
async fn next_matching(
    contents: &mut RecordStream<SessionContents>,
    pred: impl Fn(&SessionContents) -> bool,
) -> SessionContents {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let next = contents
                .next()
                .await
                .expect("contents stream ended")
                .expect("contents stream failed");
            if pred(&next) {
                return next;
            }
        }
    })
    .await
    .expect("timed out waiting for contents")
}

fn fully_joined(contents: &SessionContents) -> bool {
    contents.sessions.iter().all(|s| match s {
        Session::Speech(speech) => !speech.speakers.is_empty(),
        Session::Service(_) => true,
    })
}

fn conference() -> SessionsResponse {
    SessionsResponse {
        sessions: vec![
            record("first-r2", "2020-02-20T10:00:00+09:00", "R2", &["x"]),
            record("first-r1", "2020-02-20T10:00:00+09:00", "R1", &["y"]),
            record("day2", "2020-02-21T10:00:00+09:00", "R1", &["x"]),
        ],
        speakers: vec![speaker("x"), speaker("y")],
    }
}

// ============================================================================
// Merge pipeline
// ============================================================================

#[tokio::test]
async fn test_refresh_feeds_sorted_contents() {
    let h = harness(Some(conference()), false);
    let mut contents = h.usecase.session_contents();

    h.usecase.refresh().await.unwrap();

    let snapshot = next_matching(&mut contents, fully_joined).await;
    let ids: Vec<&str> = snapshot.sessions.iter().map(Session::id).collect();
    assert_eq!(ids, vec!["first-r1", "first-r2", "day2"]);
    assert_eq!(snapshot.sessions[0].day_number(), 0);
    assert_eq!(snapshot.sessions[1].day_number(), 0);
    assert_eq!(snapshot.sessions[2].day_number(), 1);
}

#[tokio::test]
async fn test_nothing_emitted_while_store_is_empty() {
    let h = harness(Some(conference()), false);
    let mut contents = h.usecase.session_contents();

    h.favorites.toggle_favorite("first-r1").await.unwrap();

    let early = tokio::time::timeout(Duration::from_millis(100), contents.next()).await;
    assert!(early.is_err(), "contents emitted before any session was stored");

    h.usecase.refresh().await.unwrap();
    let snapshot = next_matching(&mut contents, fully_joined).await;
    assert_eq!(snapshot.sessions.len(), 3);
}

#[tokio::test]
async fn test_speaker_and_category_facets_follow_sorted_order() {
    let h = harness(Some(conference()), false);
    let mut contents = h.usecase.session_contents();
    h.usecase.refresh().await.unwrap();

    let snapshot = next_matching(&mut contents, fully_joined).await;

    // Raw order lists speaker x first, but the R1 session (speaker y) sorts first.
    let speaker_ids: Vec<&str> = snapshot.speakers.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(speaker_ids, vec!["y", "x"]);

    let category_ids: Vec<&str> = snapshot.category.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(category_ids, vec!["cat-first-r1", "cat-first-r2", "cat-day2"]);
}

#[tokio::test]
async fn test_room_facet_is_sorted_by_name() {
    let response = SessionsResponse {
        sessions: vec![
            record("b", "2020-02-20T10:00:00+09:00", "B", &[]),
            record("a", "2020-02-20T11:00:00+09:00", "A", &[]),
        ],
        speakers: vec![],
    };
    let h = harness(Some(response), false);
    let mut contents = h.usecase.session_contents();
    h.usecase.refresh().await.unwrap();

    let snapshot = next_matching(&mut contents, |c| !c.sessions.is_empty()).await;
    let rooms: Vec<&str> = snapshot.rooms.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(rooms, vec!["A", "B"]);
}

#[tokio::test]
async fn test_toggle_favorite_flips_exactly_one_session() {
    let h = harness(Some(conference()), false);
    let mut contents = h.usecase.session_contents();
    h.usecase.refresh().await.unwrap();

    let before = next_matching(&mut contents, fully_joined).await;
    let target = before.sessions[1].clone();
    h.usecase.toggle_favorite(&target).await.unwrap();

    let after = next_matching(&mut contents, |c| c.sessions[1].is_favorited()).await;
    for (old, new) in before.sessions.iter().zip(after.sessions.iter()) {
        if old.id() == target.id() {
            assert!(!old.is_favorited());
            assert!(new.is_favorited());
        } else {
            assert_eq!(old, new);
        }
    }
}

#[tokio::test]
async fn test_subscribers_share_one_merge_task() {
    let store = Arc::new(JsonConferenceStore::in_memory());
    let favorites = Arc::new(JsonFavoriteStore::in_memory());
    let merger = SessionMerger::new(store.clone(), favorites.clone());

    let first = merger.sessions();
    let mut second = merger.sessions();
    assert_eq!(merger.subscriber_count(), 2);

    drop(first);
    assert_eq!(merger.subscriber_count(), 1);

    store.save(conference()).await.unwrap();
    let merged = tokio::time::timeout(Duration::from_secs(5), second.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(merged.len(), 3);

    drop(second);
    assert_eq!(merger.subscriber_count(), 0);

    // A fresh subscriber restarts the merge and sees the latest data immediately.
    let mut third = merger.sessions();
    let merged = tokio::time::timeout(Duration::from_secs(5), third.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(merged.len(), 3);
}

#[tokio::test]
async fn test_source_failure_terminates_stream() {
    let merger = SessionMerger::new(
        Arc::new(BrokenStore),
        Arc::new(JsonFavoriteStore::in_memory()),
    );
    let mut sessions = merger.sessions();

    let err = tokio::time::timeout(Duration::from_secs(5), sessions.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap_err();
    assert!(err.is_source_unavailable());
    assert!(err.to_string().contains("database locked"));
    assert!(sessions.next().await.is_none());
}

#[tokio::test]
async fn test_late_subscriber_sees_last_list_before_failure() {
    let store = Arc::new(JsonConferenceStore::in_memory());
    store.save(conference()).await.unwrap();
    let merger = SessionMerger::new(store, Arc::new(FailingFavorites));

    // Subscribe, but only read after the favorites source has failed.
    let mut sessions = merger.sessions();
    tokio::time::sleep(Duration::from_millis(200)).await;

    let merged = tokio::time::timeout(Duration::from_secs(5), sessions.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(merged.len(), 3);

    let err = sessions.next().await.unwrap().unwrap_err();
    assert!(err.is_source_unavailable());
    assert!(err.to_string().contains("favorite_ids"));
    assert!(sessions.next().await.is_none());
}

// ============================================================================
// Refresh
// ============================================================================

#[tokio::test]
async fn test_refresh_failure_propagates_and_keeps_store() {
    let h = harness(None, false);

    let err = h.usecase.refresh().await.unwrap_err();
    assert!(err.is_transport());

    let sessions = h.store.sessions().next().await.unwrap().unwrap();
    assert!(sessions.is_empty());
}

// ============================================================================
// Feedback
// ============================================================================

#[tokio::test]
async fn test_unknown_feedback_returns_default() {
    let h = harness(None, false);
    let feedback = h.usecase.session_feedback("nope").await.unwrap();
    assert_eq!(feedback, SessionFeedback::empty("nope"));
}

#[tokio::test]
async fn test_save_feedback_last_write_wins() {
    let h = harness(None, false);

    let mut feedback = SessionFeedback::empty("s1");
    feedback.relevancy = 3;
    h.usecase.save_session_feedback(&feedback).await.unwrap();
    feedback.relevancy = 5;
    h.usecase.save_session_feedback(&feedback).await.unwrap();

    let loaded = h.usecase.session_feedback("s1").await.unwrap();
    assert_eq!(loaded.relevancy, 5);
}

async fn first_speech(h: &Harness) -> confsched_core::session::SpeechSession {
    let mut contents = h.usecase.session_contents();
    h.usecase.refresh().await.unwrap();
    let snapshot = next_matching(&mut contents, fully_joined).await;
    snapshot.sessions[0].as_speech().unwrap().clone()
}

#[tokio::test]
async fn test_submit_feedback_marks_submitted() {
    let h = harness(Some(conference()), false);
    let session = first_speech(&h).await;

    let mut feedback = SessionFeedback::empty(&session.id);
    feedback.total_evaluation = 4;
    feedback.comment = "nice".to_string();
    h.usecase
        .submit_session_feedback(&session, &feedback)
        .await
        .unwrap();

    let sent = h.feedback_api.submitted.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].session_title, "first-r1 ja");
    assert_eq!(sent[0].total_evaluation, 4);

    let stored = h.usecase.session_feedback(&session.id).await.unwrap();
    assert!(stored.submitted);
    assert_eq!(stored.comment, "nice");
}

#[tokio::test]
async fn test_rejected_submission_leaves_feedback_untouched() {
    let h = harness(Some(conference()), true);
    let session = first_speech(&h).await;

    let mut draft = SessionFeedback::empty(&session.id);
    draft.comment = "draft".to_string();
    h.usecase.save_session_feedback(&draft).await.unwrap();

    let err = h
        .usecase
        .submit_session_feedback(&session, &draft)
        .await
        .unwrap_err();
    assert!(err.is_transport());

    let stored = h.usecase.session_feedback(&session.id).await.unwrap();
    assert_eq!(stored, draft);
}
