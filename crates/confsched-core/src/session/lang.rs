//! Fixed enumerations shared by every session.
//!
//! These are process-wide constant tables; the facet lists in
//! [`SessionContents`](super::SessionContents) copy them verbatim.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Spoken language of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Lang {
    Ja,
    En,
    Mixed,
}

impl Lang {
    pub const ALL: [Lang; 3] = [Lang::Ja, Lang::En, Lang::Mixed];
}

impl Default for Lang {
    fn default() -> Self {
        Lang::Ja
    }
}

/// Language support offered in a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum LangSupport {
    Interpretation,
    Subtitle,
}

impl LangSupport {
    pub const ALL: [LangSupport; 2] = [LangSupport::Interpretation, LangSupport::Subtitle];
}

/// Intended audience level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum AudienceCategory {
    Beginners,
    Unspecified,
}

impl AudienceCategory {
    pub const ALL: [AudienceCategory; 2] =
        [AudienceCategory::Beginners, AudienceCategory::Unspecified];
}

impl Default for AudienceCategory {
    fn default() -> Self {
        AudienceCategory::Unspecified
    }
}

/// Kind of a non-talk schedule item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum SessionType {
    Welcome,
    Reserved,
    Lunch,
    Break,
    AfterParty,
    Other,
}

impl Default for SessionType {
    fn default() -> Self {
        SessionType::Other
    }
}
