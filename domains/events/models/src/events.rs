use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use utoipa::ToSchema;

use crate::{Category, EventDuration, TimePeriod};

/// A persisted event row.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    TypedBuilder,
    ToSchema,
)]
pub struct Event {
    #[builder(default)]
    pub id: i64,
    #[builder(setter(into))]
    pub name: String,
    pub start_datetime: NaiveDateTime,
    #[builder(default)]
    pub end_datetime: Option<NaiveDateTime>,
    #[builder(default)]
    pub image: Option<String>,
    #[builder(default)]
    pub video_link: Option<String>,
    #[builder(default)]
    pub web_link: Option<String>,
    #[builder(default)]
    pub category: Category,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Event {
    pub fn duration(&self) -> EventDuration {
        EventDuration::between(self.start_datetime, self.end_datetime)
    }

    pub fn duration_text(&self) -> String { self.duration().text() }

    pub fn duration_hours(&self) -> i64 { self.duration().hours() }

    pub fn time_period(&self) -> TimePeriod {
        TimePeriod::of(self.start_datetime)
    }

    pub fn has_duration(&self) -> bool { self.end_datetime.is_some() }

    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        self.start_datetime >= now
    }
}

/// Column values written on create and on a full-replace update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
pub struct EventDraft {
    #[builder(setter(into))]
    pub name: String,
    pub start_datetime: NaiveDateTime,
    #[builder(default)]
    pub end_datetime: Option<NaiveDateTime>,
    #[builder(default)]
    pub image: Option<String>,
    #[builder(default)]
    pub video_link: Option<String>,
    #[builder(default)]
    pub web_link: Option<String>,
    #[builder(default)]
    pub category: Category,
}

impl EventDraft {
    pub fn into_event(
        self, id: i64, created_at: NaiveDateTime, updated_at: NaiveDateTime,
    ) -> Event {
        Event {
            id,
            name: self.name,
            start_datetime: self.start_datetime,
            end_datetime: self.end_datetime,
            image: self.image,
            video_link: self.video_link,
            web_link: self.web_link,
            category: self.category,
            created_at,
            updated_at,
        }
    }
}

impl From<Event> for EventDraft {
    fn from(event: Event) -> Self {
        Self {
            name: event.name,
            start_datetime: event.start_datetime,
            end_datetime: event.end_datetime,
            image: event.image,
            video_link: event.video_link,
            web_link: event.web_link,
            category: event.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_derived_fields_follow_timestamps() {
        let event = Event::builder()
            .id(1)
            .name("Festival Budaya")
            .start_datetime(at(15, 0))
            .end_datetime(Some(at(18, 30)))
            .category(Category::Budaya)
            .created_at(at(0, 0))
            .updated_at(at(0, 0))
            .build();

        assert_eq!(event.duration_text(), "3 jam 30 menit");
        assert_eq!(event.duration_hours(), 3);
        assert_eq!(event.time_period(), TimePeriod::Sore);
        assert!(event.has_duration());
    }

    #[test]
    fn test_upcoming_includes_the_current_instant() {
        let event = Event::builder()
            .name("Lomba Lari")
            .start_datetime(at(7, 0))
            .created_at(at(0, 0))
            .updated_at(at(0, 0))
            .build();

        assert!(event.is_upcoming(at(7, 0)));
        assert!(event.is_upcoming(at(7, 0) - Duration::minutes(1)));
        assert!(!event.is_upcoming(at(7, 1)));
    }

    #[test]
    fn test_draft_round_trips_columns() {
        let draft = EventDraft::builder()
            .name("Karnaval")
            .start_datetime(at(9, 0))
            .image(Some("events/a.png".to_string()))
            .category(Category::Pariwisata)
            .build();

        let event = draft.clone().into_event(7, at(1, 0), at(2, 0));
        assert_eq!(event.id, 7);
        assert_eq!(event.created_at, at(1, 0));
        assert_eq!(EventDraft::from(event), draft);
    }
}
