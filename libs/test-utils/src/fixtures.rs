use chrono::{Duration, NaiveDateTime};
use events_models::{Category, Event, EventDraft};
use typed_builder::TypedBuilder;

/// Parses `YYYY-MM-DD HH:MM`. Panics on malformed input, test data only.
pub fn at(datetime: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(datetime, "%Y-%m-%d %H:%M")
        .unwrap_or_else(|e| panic!("bad fixture datetime {datetime:?}: {e}"))
}

/// Event test data with sensible defaults; only the start is required.
#[derive(Debug, Clone, TypedBuilder)]
pub struct EventFixture {
    #[builder(default = "Acara Uji".to_string(), setter(into))]
    pub name: String,
    pub start: NaiveDateTime,
    #[builder(default, setter(strip_option))]
    pub length: Option<Duration>,
    #[builder(default)]
    pub category: Category,
    #[builder(default, setter(strip_option, into))]
    pub image: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub video_link: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub web_link: Option<String>,
}

impl EventFixture {
    pub fn draft(&self) -> EventDraft {
        EventDraft {
            name: self.name.clone(),
            start_datetime: self.start,
            end_datetime: self.length.map(|length| self.start + length),
            image: self.image.clone(),
            video_link: self.video_link.clone(),
            web_link: self.web_link.clone(),
            category: self.category,
        }
    }

    pub fn event(&self, id: i64) -> Event {
        self.draft().into_event(id, self.start, self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_defaults() {
        let fixture = EventFixture::builder().start(at("2024-10-01 19:30")).build();
        let draft = fixture.draft();

        assert_eq!(draft.name, "Acara Uji");
        assert_eq!(draft.end_datetime, None);
        assert_eq!(draft.category, Category::Umum);
    }

    #[test]
    fn test_fixture_length_sets_end() {
        let event = EventFixture::builder()
            .start(at("2024-10-01 08:00"))
            .length(Duration::hours(2))
            .category(Category::Olahraga)
            .build()
            .event(3);

        assert_eq!(event.id, 3);
        assert_eq!(event.end_datetime, Some(at("2024-10-01 10:00")));
    }
}
