use chrono::NaiveDateTime;
use dao_utils::Paginated;
use events_models::{Category, Event, TimePeriod};
use file_storage::PublicDisk;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An event with its derived fields filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventResponse {
    pub id: i64,
    pub name: String,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: Option<NaiveDateTime>,
    pub image: Option<String>,
    pub image_url: Option<String>,
    pub video_link: Option<String>,
    pub web_link: Option<String>,
    pub category: Category,
    #[schema(example = "3 jam 30 menit")]
    pub duration_text: String,
    pub duration_hours: i64,
    pub time_period: TimePeriod,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl EventResponse {
    /// `disk` resolves the stored image path to its public URL.
    pub fn from_event(event: Event, disk: &PublicDisk) -> Self {
        let image_url = event.image.as_deref().map(|path| disk.url(path));

        Self {
            duration_text: event.duration_text(),
            duration_hours: event.duration_hours(),
            time_period: event.time_period(),
            id: event.id,
            name: event.name,
            start_datetime: event.start_datetime,
            end_datetime: event.end_datetime,
            image: event.image,
            image_url,
            video_link: event.video_link,
            web_link: event.web_link,
            category: event.category,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventPage {
    pub data: Vec<EventResponse>,
    pub current_page: u64,
    pub per_page: u64,
    pub total: u64,
    pub last_page: u64,
    pub from: Option<u64>,
    pub to: Option<u64>,
}

impl From<Paginated<EventResponse>> for EventPage {
    fn from(page: Paginated<EventResponse>) -> Self {
        Self {
            data: page.data,
            current_page: page.current_page,
            per_page: page.per_page,
            total: page.total,
            last_page: page.last_page,
            from: page.from,
            to: page.to,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActiveFilters {
    pub date: Option<String>,
    pub category: Option<String>,
}

/// Props of the listing pages.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventListResponse {
    pub events: EventPage,
    pub filters: ActiveFilters,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventDetailResponse {
    pub event: EventResponse,
}

/// Props of the create and edit forms.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventFormResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<EventResponse>,
    pub categories: Vec<Category>,
}

impl EventFormResponse {
    pub fn create() -> Self {
        Self {
            event: None,
            categories: Category::ALL.to_vec(),
        }
    }

    pub fn edit(event: EventResponse) -> Self {
        Self {
            event: Some(event),
            categories: Category::ALL.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::*;

    fn event(end: Option<Duration>, image: Option<&str>) -> Event {
        let start = NaiveDate::from_ymd_opt(2025, 5, 2)
            .unwrap()
            .and_hms_opt(20, 15, 0)
            .unwrap();
        Event::builder()
            .id(11)
            .name("Malam Seni")
            .start_datetime(start)
            .end_datetime(end.map(|d| start + d))
            .image(image.map(str::to_string))
            .category(Category::Budaya)
            .created_at(start)
            .updated_at(start)
            .build()
    }

    #[test]
    fn test_derived_fields_are_included() {
        let response = EventResponse::from_event(
            event(Some(Duration::minutes(150)), None),
            &PublicDisk::new("storage", "/storage"),
        );

        assert_eq!(response.duration_text, "2 jam 30 menit");
        assert_eq!(response.duration_hours, 2);
        assert_eq!(response.time_period, TimePeriod::Malam);
        assert_eq!(response.image_url, None);
    }

    #[test]
    fn test_open_ended_event_uses_sentinel() {
        let response = EventResponse::from_event(
            event(None, None),
            &PublicDisk::new("storage", "/storage"),
        );

        assert_eq!(response.duration_text, "Durasi tidak ditentukan");
        assert_eq!(response.duration_hours, 0);
    }

    #[test]
    fn test_image_url_joins_public_prefix() {
        let response = EventResponse::from_event(
            event(None, Some("events/a.png")),
            &PublicDisk::new("storage", "https://cdn.example.com/storage/"),
        );

        assert_eq!(
            response.image_url.as_deref(),
            Some("https://cdn.example.com/storage/events/a.png")
        );
    }

    #[test]
    fn test_form_props() {
        let json = serde_json::to_value(EventFormResponse::create()).unwrap();

        assert!(json.get("event").is_none());
        assert_eq!(
            json["categories"],
            serde_json::json!(["Umum", "Pemuda", "Budaya", "Olahraga", "Pariwisata"])
        );
    }
}
