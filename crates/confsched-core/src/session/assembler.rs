//! Joins raw records into normalized [`Session`] values.

use chrono::{DateTime, FixedOffset, NaiveDate};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use super::model::{ServiceSession, Session, Speaker, SpeechSession};
use super::record::{SessionRecord, SpeakerRecord};

/// Per-batch context for turning [`SessionRecord`]s into [`Session`]s.
///
/// Built once per merge cycle from the latest speaker batch, favorite-id set
/// and reference day, then applied to every record of the session batch.
pub struct SessionAssembler<'a> {
    speakers: HashMap<&'a str, &'a SpeakerRecord>,
    favorite_ids: &'a HashSet<String>,
    reference_day: ReferenceDay,
}

/// The first conference day, as seen from the earliest session's UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceDay {
    date: NaiveDate,
    offset: FixedOffset,
}

impl ReferenceDay {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Whole days between the reference day and `at`, both in the reference
    /// offset. Never negative for instants at or after the earliest start.
    pub fn day_number(&self, at: &DateTime<FixedOffset>) -> i64 {
        (at.with_timezone(&self.offset).date_naive() - self.date).num_days()
    }
}

impl<'a> SessionAssembler<'a> {
    pub fn new(
        speakers: &'a [SpeakerRecord],
        favorite_ids: &'a HashSet<String>,
        reference_day: ReferenceDay,
    ) -> Self {
        let speakers = speakers.iter().map(|s| (s.id.as_str(), s)).collect();
        Self {
            speakers,
            favorite_ids,
            reference_day,
        }
    }

    /// Builds the session for one record.
    ///
    /// Speaker ids without a matching speaker are dropped.
    pub fn assemble(&self, record: &SessionRecord) -> Session {
        let day_number = self.reference_day.day_number(&record.starts_at);
        let is_favorited = self.favorite_ids.contains(&record.id);

        if record.is_service_session {
            return Session::Service(ServiceSession {
                id: record.id.clone(),
                day_number,
                starts_at: record.starts_at,
                ends_at: record.ends_at,
                title: record.title.clone(),
                description: record.description.clone(),
                room: record.room.clone(),
                session_type: record.session_type.unwrap_or_default(),
                is_favorited,
            });
        }

        let speakers = record
            .speaker_ids
            .iter()
            .filter_map(|id| self.speakers.get(id.as_str()))
            .map(|s| Speaker {
                id: s.id.clone(),
                name: s.name.clone(),
                tag_line: s.tag_line.clone(),
                bio: s.bio.clone(),
                image_url: s.image_url.clone(),
            })
            .collect();

        Session::Speech(SpeechSession {
            id: record.id.clone(),
            day_number,
            starts_at: record.starts_at,
            ends_at: record.ends_at,
            title: record.title.clone(),
            description: record.description.clone(),
            room: record.room.clone(),
            lang: record.lang,
            category: record.category.clone(),
            audience_category: record.audience_category,
            intended_audience: record.intended_audience.clone(),
            is_interpretation_target: record.is_interpretation_target,
            video_url: record.video_url.clone(),
            slide_url: record.slide_url.clone(),
            message: record.message.clone(),
            is_favorited,
            speakers,
        })
    }
}

/// The day of the earliest start time in the batch, or `None` for an empty
/// batch.
pub fn reference_day(records: &[SessionRecord]) -> Option<ReferenceDay> {
    records
        .iter()
        .map(|r| r.starts_at)
        .min()
        .map(|earliest| ReferenceDay {
            date: earliest.date_naive(),
            offset: *earliest.offset(),
        })
}

/// Schedule order: start time, then room id.
pub fn schedule_order(a: &Session, b: &Session) -> Ordering {
    a.starts_at()
        .cmp(b.starts_at())
        .then_with(|| a.room().id.cmp(&b.room().id))
}
