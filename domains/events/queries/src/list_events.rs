use chrono::{NaiveDate, NaiveDateTime};
use dao_utils::PageRequest;
use events_errors::EventError;
use events_models::{Category, EventFilter, SortOrder};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

/// Who is browsing. Admins see everything newest first; the public sees
/// upcoming events soonest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Admin,
    Public,
}

impl Audience {
    pub fn sort_order(&self) -> SortOrder {
        match self {
            Audience::Admin => SortOrder::StartDesc,
            Audience::Public => SortOrder::StartAsc,
        }
    }
}

/// Query string of the listing pages. Blank values mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListEventsQuery {
    /// Start date, `YYYY-MM-DD`
    #[param(example = "2025-08-17")]
    pub date: Option<String>,
    /// One of Umum, Pemuda, Budaya, Olahraga, Pariwisata
    #[param(example = "Olahraga")]
    pub category: Option<String>,
    /// 1-based page number
    pub page: Option<u64>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ListEventsQuery {
    pub fn parsed_date(&self) -> Result<Option<NaiveDate>, EventError> {
        present(&self.date)
            .map(|raw| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| EventError::InvalidDate(raw.to_string()))
            })
            .transpose()
    }

    pub fn parsed_category(&self) -> Result<Option<Category>, EventError> {
        Ok(present(&self.category).map(str::parse::<Category>).transpose()?)
    }

    pub fn filter(
        &self, audience: Audience, now: NaiveDateTime,
    ) -> Result<EventFilter, EventError> {
        let filter = EventFilter::new()
            .with_date(self.parsed_date()?)
            .with_category(self.parsed_category()?);

        Ok(match audience {
            Audience::Admin => filter,
            Audience::Public => filter.upcoming_from(now),
        })
    }

    pub fn page_request(&self, per_page: u64) -> PageRequest {
        PageRequest::new(self.page, per_page)
    }

    /// Active filters echoed back so the form can keep its state.
    pub fn echo(&self) -> ListEventsQuery {
        ListEventsQuery {
            date: present(&self.date).map(str::to_string),
            category: present(&self.category).map(str::to_string),
            page: None,
        }
    }
}
