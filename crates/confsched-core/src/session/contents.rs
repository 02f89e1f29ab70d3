//! The aggregate snapshot consumed by the UI.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

use super::lang::{AudienceCategory, Lang, LangSupport};
use super::model::{Category, Room, Session, Speaker};

/// Sorted sessions plus the facets derived from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionContents {
    pub sessions: Vec<Session>,
    pub speakers: Vec<Speaker>,
    pub langs: Vec<Lang>,
    pub lang_supports: Vec<LangSupport>,
    pub rooms: Vec<Room>,
    pub category: Vec<Category>,
    pub audience_categories: Vec<AudienceCategory>,
}

impl SessionContents {
    /// Derives every facet from an already sorted session list.
    ///
    /// Speakers and categories come from speech sessions only and keep the
    /// order of first appearance. Rooms are ordered by display name.
    pub fn aggregate(sessions: &[Session]) -> Self {
        let speech_sessions = || sessions.iter().filter_map(Session::as_speech);

        let speakers = distinct(speech_sessions().flat_map(|s| s.speakers.iter().cloned()));
        let category = distinct(speech_sessions().filter_map(|s| s.category.clone()));

        let mut rooms: Vec<Room> = sessions.iter().map(|s| s.room().clone()).collect();
        rooms.sort_by(|a, b| a.name.ja.cmp(&b.name.ja));
        let rooms = distinct(rooms);

        Self {
            sessions: sessions.to_vec(),
            speakers,
            langs: Lang::ALL.to_vec(),
            lang_supports: LangSupport::ALL.to_vec(),
            rooms,
            category,
            audience_categories: AudienceCategory::ALL.to_vec(),
        }
    }

    /// Sessions scheduled on the given zero-based conference day.
    pub fn sessions_on_day(&self, day_number: i64) -> impl Iterator<Item = &Session> {
        self.sessions
            .iter()
            .filter(move |s| s.day_number() == day_number)
    }
}

/// Removes duplicates, keeping the first occurrence of each value.
fn distinct<T, I>(items: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
