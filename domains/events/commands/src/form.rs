use chrono::{NaiveDate, NaiveDateTime};
use events_errors::ValidationErrors;
use events_models::{Category, EventDraft};
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

use crate::image::{ImageUpload, ValidatedImage};

pub const MAX_NAME_CHARS: usize = 255;
pub const MAX_LINK_CHARS: usize = 500;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Raw admin form input. Every field arrives as text; blank values are
/// treated as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventForm {
    #[schema(example = "Festival Budaya Nusantara")]
    pub name: Option<String>,
    #[schema(example = "2025-08-17T08:00")]
    pub start_datetime: Option<String>,
    #[schema(example = "2025-08-17T11:30")]
    pub end_datetime: Option<String>,
    pub video_link: Option<String>,
    pub web_link: Option<String>,
    #[schema(example = "Budaya")]
    pub category: Option<String>,
}

/// Form input that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEvent {
    pub name: String,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: Option<NaiveDateTime>,
    pub video_link: Option<String>,
    pub web_link: Option<String>,
    pub category: Category,
    pub image: Option<ValidatedImage>,
}

impl ValidatedEvent {
    /// Column values with the given stored image path.
    pub fn draft(&self, image: Option<String>) -> EventDraft {
        EventDraft {
            name: self.name.clone(),
            start_datetime: self.start_datetime,
            end_datetime: self.end_datetime,
            image,
            video_link: self.video_link.clone(),
            web_link: self.web_link.clone(),
            category: self.category,
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Accepts HTML `datetime-local` values, a space separated variant and a
/// bare date (midnight).
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn is_web_url(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https") && url.host().is_some()
    })
}

impl EventForm {
    /// Runs every rule and reports all failures at once.
    pub fn validate(
        &self, image: Option<ImageUpload>,
    ) -> Result<ValidatedEvent, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = match present(&self.name) {
            None => {
                errors.add("name", "Nama event wajib diisi.");
                None
            }
            Some(name) if name.chars().count() > MAX_NAME_CHARS => {
                errors.add("name", "Nama event maksimal 255 karakter.");
                None
            }
            Some(name) => Some(name.to_string()),
        };

        let start = match present(&self.start_datetime) {
            None => {
                errors.add(
                    "start_datetime",
                    "Tanggal dan jam mulai event wajib diisi.",
                );
                None
            }
            Some(raw) => {
                let parsed = parse_datetime(raw);
                if parsed.is_none() {
                    errors.add(
                        "start_datetime",
                        "Format tanggal dan jam mulai tidak valid.",
                    );
                }
                parsed
            }
        };

        let end = match present(&self.end_datetime) {
            None => None,
            Some(raw) => {
                match parse_datetime(raw) {
                    None => {
                        errors.add(
                            "end_datetime",
                            "Format tanggal dan jam berakhir tidak valid.",
                        );
                        None
                    }
                    Some(end) => {
                        // An unparseable start also fails "after start".
                        if start.is_none_or(|start| end <= start) {
                            errors.add(
                                "end_datetime",
                                "Tanggal dan jam berakhir harus setelah \
                                 tanggal mulai.",
                            );
                        }
                        Some(end)
                    }
                }
            }
        };

        let video_link = Self::validate_link(
            &mut errors,
            "video_link",
            present(&self.video_link),
            "Link video harus berupa URL yang valid.",
            "Link video maksimal 500 karakter.",
        );
        let web_link = Self::validate_link(
            &mut errors,
            "web_link",
            present(&self.web_link),
            "Link web harus berupa URL yang valid.",
            "Link web maksimal 500 karakter.",
        );

        let category = match present(&self.category) {
            None => {
                errors.add("category", "Kategori event wajib dipilih.");
                None
            }
            Some(raw) => {
                let parsed = raw.parse::<Category>().ok();
                if parsed.is_none() {
                    errors.add("category", "Kategori yang dipilih tidak valid.");
                }
                parsed
            }
        };

        let image = image.and_then(|upload| upload.validate(&mut errors));

        match (name, start, category) {
            (Some(name), Some(start_datetime), Some(category))
                if errors.is_empty() =>
            {
                Ok(ValidatedEvent {
                    name,
                    start_datetime,
                    end_datetime: end,
                    video_link,
                    web_link,
                    category,
                    image,
                })
            }
            _ => Err(errors),
        }
    }

    fn validate_link(
        errors: &mut ValidationErrors, field: &str, value: Option<&str>,
        invalid: &str, too_long: &str,
    ) -> Option<String> {
        let value = value?;
        let mut ok = true;
        if !is_web_url(value) {
            errors.add(field, invalid);
            ok = false;
        }
        if value.chars().count() > MAX_LINK_CHARS {
            errors.add(field, too_long);
            ok = false;
        }
        ok.then(|| value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> EventForm {
        EventForm {
            name: Some("Pekan Olahraga Pelajar".to_string()),
            start_datetime: Some("2025-03-01T08:00".to_string()),
            end_datetime: Some("2025-03-01 11:30".to_string()),
            video_link: Some("https://youtube.com/watch?v=abc".to_string()),
            web_link: None,
            category: Some("Olahraga".to_string()),
        }
    }

    #[test]
    fn test_valid_form() {
        let event = form().validate(None).unwrap();

        assert_eq!(event.name, "Pekan Olahraga Pelajar");
        assert_eq!(event.category, Category::Olahraga);
        assert_eq!(
            event.end_datetime.unwrap() - event.start_datetime,
            chrono::Duration::minutes(210)
        );
        assert_eq!(event.web_link, None);
    }

    #[test]
    fn test_blank_fields_are_missing() {
        let errors = EventForm {
            name: Some("   ".to_string()),
            start_datetime: Some(String::new()),
            category: None,
            ..Default::default()
        }
        .validate(None)
        .unwrap_err();

        assert_eq!(errors.get("name"), ["Nama event wajib diisi."]);
        assert_eq!(errors.get("start_datetime"), [
            "Tanggal dan jam mulai event wajib diisi."
        ]);
        assert_eq!(errors.get("category"), ["Kategori event wajib dipilih."]);
        assert!(!errors.has("end_datetime"));
    }

    #[test]
    fn test_all_failures_are_reported() {
        let errors = EventForm {
            name: Some("x".repeat(256)),
            start_datetime: Some("besok pagi".to_string()),
            end_datetime: Some("2025-13-40".to_string()),
            video_link: Some("not a url".to_string()),
            web_link: Some(format!("https://example.com/{}", "a".repeat(500))),
            category: Some("Musik".to_string()),
        }
        .validate(None)
        .unwrap_err();

        assert_eq!(errors.get("name"), ["Nama event maksimal 255 karakter."]);
        assert_eq!(errors.get("start_datetime"), [
            "Format tanggal dan jam mulai tidak valid."
        ]);
        assert_eq!(errors.get("end_datetime"), [
            "Format tanggal dan jam berakhir tidak valid."
        ]);
        assert_eq!(errors.get("video_link"), [
            "Link video harus berupa URL yang valid."
        ]);
        assert_eq!(errors.get("web_link"), ["Link web maksimal 500 karakter."]);
        assert_eq!(errors.get("category"), [
            "Kategori yang dipilih tidak valid."
        ]);
    }

    #[test]
    fn test_end_must_follow_start() {
        for end in ["2025-03-01T08:00", "2025-03-01T07:59"] {
            let errors = EventForm {
                end_datetime: Some(end.to_string()),
                ..form()
            }
            .validate(None)
            .unwrap_err();

            assert_eq!(errors.get("end_datetime"), [
                "Tanggal dan jam berakhir harus setelah tanggal mulai."
            ]);
        }
    }

    #[test]
    fn test_name_limit_counts_characters() {
        let event = EventForm {
            name: Some("é".repeat(255)),
            ..form()
        }
        .validate(None);
        assert!(event.is_ok());
    }

    #[test]
    fn test_links_must_be_web_urls() {
        let errors = EventForm {
            video_link: Some("ftp://files.example.com/a.mp4".to_string()),
            web_link: Some("mailto:panitia@example.com".to_string()),
            ..form()
        }
        .validate(None)
        .unwrap_err();

        assert!(errors.has("video_link"));
        assert!(errors.has("web_link"));
    }

    #[test]
    fn test_parse_datetime_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();

        assert_eq!(parse_datetime("2025-03-01T08:00"), Some(expected));
        assert_eq!(parse_datetime("2025-03-01 08:00:00"), Some(expected));
        assert_eq!(
            parse_datetime("2025-03-01"),
            Some(expected - chrono::Duration::hours(8))
        );
        assert_eq!(parse_datetime("01/03/2025"), None);
    }

    #[test]
    fn test_draft_takes_stored_image_path() {
        let event = form().validate(None).unwrap();
        let draft = event.draft(Some("events/x.png".to_string()));

        assert_eq!(draft.image.as_deref(), Some("events/x.png"));
        assert_eq!(draft.name, event.name);
    }
}
