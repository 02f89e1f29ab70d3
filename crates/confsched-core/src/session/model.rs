//! Session domain model.
//!
//! These are the UI-facing values produced by the merge pipeline. A new
//! `Session` is built on every merge cycle; nothing here is mutated in place.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::lang::{AudienceCategory, Lang, SessionType};

/// Text available in Japanese and English.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocaleText {
    pub ja: String,
    pub en: String,
}

impl LocaleText {
    pub fn new(ja: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            ja: ja.into(),
            en: en.into(),
        }
    }

    /// Returns the text for the given language, falling back to Japanese
    /// when the English text is missing.
    pub fn get(&self, lang: Lang) -> &str {
        match lang {
            Lang::En if !self.en.is_empty() => &self.en,
            _ => &self.ja,
        }
    }
}

/// A venue room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: LocaleText,
}

impl Room {
    pub fn new(id: impl Into<String>, name: LocaleText) -> Self {
        Self {
            id: id.into(),
            name,
        }
    }
}

/// A talk category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: LocaleText,
}

/// A resolved speaker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Speaker {
    pub id: String,
    pub name: String,
    pub tag_line: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
}

/// An actual talk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechSession {
    pub id: String,
    /// Zero-based offset from the first conference day.
    pub day_number: i64,
    pub starts_at: DateTime<FixedOffset>,
    pub ends_at: DateTime<FixedOffset>,
    pub title: LocaleText,
    pub description: String,
    pub room: Room,
    pub lang: Lang,
    pub category: Option<Category>,
    pub audience_category: AudienceCategory,
    pub intended_audience: Option<String>,
    pub is_interpretation_target: bool,
    pub video_url: Option<String>,
    pub slide_url: Option<String>,
    pub message: Option<LocaleText>,
    pub is_favorited: bool,
    pub speakers: Vec<Speaker>,
}

/// A schedule item that is not a talk (welcome, lunch, party...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSession {
    pub id: String,
    /// Zero-based offset from the first conference day.
    pub day_number: i64,
    pub starts_at: DateTime<FixedOffset>,
    pub ends_at: DateTime<FixedOffset>,
    pub title: LocaleText,
    pub description: String,
    pub room: Room,
    pub session_type: SessionType,
    pub is_favorited: bool,
}

/// A normalized schedule item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Session {
    Speech(SpeechSession),
    Service(ServiceSession),
}

impl Session {
    pub fn id(&self) -> &str {
        match self {
            Session::Speech(s) => &s.id,
            Session::Service(s) => &s.id,
        }
    }

    pub fn day_number(&self) -> i64 {
        match self {
            Session::Speech(s) => s.day_number,
            Session::Service(s) => s.day_number,
        }
    }

    pub fn starts_at(&self) -> &DateTime<FixedOffset> {
        match self {
            Session::Speech(s) => &s.starts_at,
            Session::Service(s) => &s.starts_at,
        }
    }

    pub fn ends_at(&self) -> &DateTime<FixedOffset> {
        match self {
            Session::Speech(s) => &s.ends_at,
            Session::Service(s) => &s.ends_at,
        }
    }

    pub fn title(&self) -> &LocaleText {
        match self {
            Session::Speech(s) => &s.title,
            Session::Service(s) => &s.title,
        }
    }

    pub fn room(&self) -> &Room {
        match self {
            Session::Speech(s) => &s.room,
            Session::Service(s) => &s.room,
        }
    }

    pub fn is_favorited(&self) -> bool {
        match self {
            Session::Speech(s) => s.is_favorited,
            Session::Service(s) => s.is_favorited,
        }
    }

    pub fn as_speech(&self) -> Option<&SpeechSession> {
        match self {
            Session::Speech(s) => Some(s),
            Session::Service(_) => None,
        }
    }
}
