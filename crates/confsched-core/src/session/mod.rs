//! Session domain module.
//!
//! # Module Structure
//!
//! - `record`: raw store rows (`SessionRecord`, `SpeakerRecord`)
//! - `model`: normalized sessions (`Session`, `SpeechSession`, `ServiceSession`)
//! - `lang`: fixed enumerations
//! - `assembler`: record → session join
//! - `contents`: the `SessionContents` aggregate and its facets
//! - `repository`: source traits for the merge pipeline

mod assembler;
mod contents;
mod lang;
mod model;
mod record;
mod repository;

pub use assembler::{ReferenceDay, SessionAssembler, reference_day, schedule_order};
pub use contents::SessionContents;
pub use lang::{AudienceCategory, Lang, LangSupport, SessionType};
pub use model::{Category, LocaleText, Room, ServiceSession, Session, Speaker, SpeechSession};
pub use record::{SessionRecord, SessionsResponse, SpeakerRecord};
pub use repository::{ConferenceStore, FavoriteStore, SessionApi};
