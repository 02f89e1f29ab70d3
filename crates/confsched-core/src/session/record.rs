//! Raw records as held by the local store.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::lang::{AudienceCategory, Lang, SessionType};
use super::model::{Category, LocaleText, Room};

/// A persisted session row.
///
/// Room and category are already joined by the store; speakers are kept as
/// ids and resolved during assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    #[serde(default)]
    pub is_service_session: bool,
    pub title: LocaleText,
    #[serde(default)]
    pub description: String,
    pub starts_at: DateTime<FixedOffset>,
    pub ends_at: DateTime<FixedOffset>,
    pub room: Room,
    #[serde(default)]
    pub speaker_ids: Vec<String>,
    #[serde(default)]
    pub session_type: Option<SessionType>,
    #[serde(default)]
    pub lang: Lang,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub audience_category: AudienceCategory,
    #[serde(default)]
    pub intended_audience: Option<String>,
    #[serde(default)]
    pub is_interpretation_target: bool,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub slide_url: Option<String>,
    #[serde(default)]
    pub message: Option<LocaleText>,
}

/// A persisted speaker row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpeakerRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tag_line: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// The authoritative dataset returned by the remote session API, already
/// decoded into store records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionsResponse {
    #[serde(default)]
    pub sessions: Vec<SessionRecord>,
    #[serde(default)]
    pub speakers: Vec<SpeakerRecord>,
}
