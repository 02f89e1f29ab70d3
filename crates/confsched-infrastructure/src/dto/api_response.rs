//! Wire format of the remote session API.
//!
//! The API returns sessions, speakers, rooms and categories as separate
//! arrays keyed by id. Conversion into [`SessionsResponse`] joins rooms and
//! categories into each record; speakers stay referenced by id.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use confsched_core::session::{
    AudienceCategory, Category, Lang, LocaleText, Room, SessionRecord, SessionType,
    SessionsResponse, SpeakerRecord,
};

/// Ids arrive either as JSON numbers or strings depending on the entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdDto {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for IdDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdDto::Number(n) => write!(f, "{}", n),
            IdDto::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocaleTextDto {
    #[serde(default)]
    pub ja: Option<String>,
    #[serde(default)]
    pub en: Option<String>,
}

impl From<LocaleTextDto> for LocaleText {
    fn from(dto: LocaleTextDto) -> Self {
        LocaleText::new(dto.ja.unwrap_or_default(), dto.en.unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponseDto {
    #[serde(default)]
    pub sessions: Vec<SessionDto>,
    #[serde(default)]
    pub speakers: Vec<SpeakerDto>,
    #[serde(default)]
    pub rooms: Vec<RoomDto>,
    #[serde(default)]
    pub categories: Vec<CategoryDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub id: String,
    #[serde(default)]
    pub is_service_session: bool,
    #[serde(default)]
    pub title: LocaleTextDto,
    #[serde(default)]
    pub description: Option<String>,
    pub starts_at: DateTime<FixedOffset>,
    pub ends_at: DateTime<FixedOffset>,
    pub room_id: IdDto,
    #[serde(default)]
    pub speakers: Vec<String>,
    #[serde(default)]
    pub session_type: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub session_category_item_id: Option<IdDto>,
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default)]
    pub levels: Vec<String>,
    #[serde(default)]
    pub interpretation_target: bool,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub slide_url: Option<String>,
    #[serde(default)]
    pub message: Option<LocaleTextDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerDto {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub tag_line: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

impl From<SpeakerDto> for SpeakerRecord {
    fn from(dto: SpeakerDto) -> Self {
        SpeakerRecord {
            id: dto.id,
            name: dto.full_name,
            tag_line: dto.tag_line,
            bio: dto.bio,
            image_url: dto.profile_picture,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDto {
    pub id: IdDto,
    #[serde(default)]
    pub name: LocaleTextDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: IdDto,
    #[serde(default)]
    pub items: Vec<CategoryItemDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryItemDto {
    pub id: IdDto,
    #[serde(default)]
    pub name: LocaleTextDto,
}

fn lang_from_wire(language: Option<&str>) -> Lang {
    match language.map(str::to_ascii_uppercase).as_deref() {
        Some("ENGLISH") | Some("EN") => Lang::En,
        Some("MIXED") => Lang::Mixed,
        _ => Lang::Ja,
    }
}

fn session_type_from_wire(session_type: Option<&str>) -> Option<SessionType> {
    let session_type = session_type?.to_ascii_uppercase();
    Some(match session_type.as_str() {
        "WELCOME_TALK" | "WELCOME" => SessionType::Welcome,
        "RESERVED" => SessionType::Reserved,
        "LUNCH" => SessionType::Lunch,
        "BREAK" => SessionType::Break,
        "AFTER_PARTY" => SessionType::AfterParty,
        _ => SessionType::Other,
    })
}

fn audience_from_wire(levels: &[String]) -> AudienceCategory {
    if levels.iter().any(|l| l.eq_ignore_ascii_case("BEGINNER")) {
        AudienceCategory::Beginners
    } else {
        AudienceCategory::Unspecified
    }
}

impl From<ApiResponseDto> for SessionsResponse {
    fn from(dto: ApiResponseDto) -> Self {
        let rooms: HashMap<String, Room> = dto
            .rooms
            .into_iter()
            .map(|r| {
                let id = r.id.to_string();
                (id.clone(), Room::new(id, r.name.into()))
            })
            .collect();

        let categories: HashMap<String, Category> = dto
            .categories
            .into_iter()
            .flat_map(|c| c.items)
            .map(|item| {
                let id = item.id.to_string();
                (
                    id.clone(),
                    Category {
                        id,
                        name: item.name.into(),
                    },
                )
            })
            .collect();

        let sessions = dto
            .sessions
            .into_iter()
            .map(|s| {
                let room_id = s.room_id.to_string();
                let room = rooms.get(&room_id).cloned().unwrap_or_else(|| {
                    tracing::warn!("Session {} references unknown room {}", s.id, room_id);
                    Room::new(room_id.clone(), LocaleText::default())
                });
                let category = s
                    .session_category_item_id
                    .as_ref()
                    .and_then(|id| categories.get(&id.to_string()).cloned());

                SessionRecord {
                    lang: lang_from_wire(s.language.as_deref()),
                    session_type: session_type_from_wire(s.session_type.as_deref()),
                    audience_category: audience_from_wire(&s.levels),
                    id: s.id,
                    is_service_session: s.is_service_session,
                    title: s.title.into(),
                    description: s.description.unwrap_or_default(),
                    starts_at: s.starts_at,
                    ends_at: s.ends_at,
                    room,
                    speaker_ids: s.speakers,
                    category,
                    intended_audience: s.target_audience,
                    is_interpretation_target: s.interpretation_target,
                    video_url: s.video_url,
                    slide_url: s.slide_url,
                    message: s.message.map(Into::into),
                }
            })
            .collect();

        SessionsResponse {
            sessions,
            speakers: dto.speakers.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "sessions": [
            {
                "id": "101",
                "isServiceSession": false,
                "title": {"ja": "はじめての Compose", "en": "Hello Compose"},
                "description": "Intro",
                "startsAt": "2020-02-20T10:30:00+09:00",
                "endsAt": "2020-02-20T11:00:00+09:00",
                "roomId": 2,
                "speakers": ["sp1"],
                "language": "ENGLISH",
                "sessionCategoryItemId": 11,
                "levels": ["BEGINNER"],
                "interpretationTarget": true
            },
            {
                "id": "200",
                "isServiceSession": true,
                "title": {"ja": "ランチ"},
                "startsAt": "2020-02-20T12:00:00+09:00",
                "endsAt": "2020-02-20T13:00:00+09:00",
                "roomId": 9,
                "sessionType": "LUNCH"
            }
        ],
        "speakers": [
            {"id": "sp1", "fullName": "Alice", "tagLine": "Android dev"}
        ],
        "rooms": [
            {"id": 2, "name": {"ja": "ホール B", "en": "Hall B"}}
        ],
        "categories": [
            {"id": 1, "items": [{"id": 11, "name": {"ja": "UI", "en": "UI"}}]}
        ]
    }"#;

    #[test]
    fn test_payload_converts_into_records() {
        let dto: ApiResponseDto = serde_json::from_str(PAYLOAD).unwrap();
        let response: SessionsResponse = dto.into();

        assert_eq!(response.sessions.len(), 2);
        assert_eq!(response.speakers.len(), 1);
        assert_eq!(response.speakers[0].name, "Alice");

        let talk = &response.sessions[0];
        assert_eq!(talk.room.id, "2");
        assert_eq!(talk.room.name.en, "Hall B");
        assert_eq!(talk.lang, Lang::En);
        assert_eq!(talk.audience_category, AudienceCategory::Beginners);
        assert_eq!(talk.category.as_ref().unwrap().id, "11");
        assert_eq!(talk.speaker_ids, vec!["sp1".to_string()]);
        assert!(talk.is_interpretation_target);
    }

    #[test]
    fn test_unknown_room_keeps_id_with_empty_name() {
        let dto: ApiResponseDto = serde_json::from_str(PAYLOAD).unwrap();
        let response: SessionsResponse = dto.into();

        let lunch = &response.sessions[1];
        assert!(lunch.is_service_session);
        assert_eq!(lunch.session_type, Some(SessionType::Lunch));
        assert_eq!(lunch.room.id, "9");
        assert_eq!(lunch.room.name, LocaleText::default());
        assert_eq!(lunch.title.en, "");
    }
}
