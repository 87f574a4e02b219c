use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{Category, Event};

/// Optional narrowing of an event listing. Every `None` is a no-op and the
/// populated fields combine as a conjunction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub date: Option<NaiveDate>,
    pub category: Option<Category>,
    pub upcoming_from: Option<NaiveDateTime>,
}

impl EventFilter {
    pub fn new() -> Self { Self::default() }

    pub fn with_date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }

    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    /// Keeps events starting at or after `now`.
    pub fn upcoming_from(mut self, now: NaiveDateTime) -> Self {
        self.upcoming_from = Some(now);
        self
    }

    pub fn matches(&self, event: &Event) -> bool {
        let date_ok = self
            .date
            .is_none_or(|date| event.start_datetime.date() == date);
        let category_ok =
            self.category.is_none_or(|category| event.category == category);
        let upcoming_ok =
            self.upcoming_from.is_none_or(|now| event.is_upcoming(now));

        date_ok && category_ok && upcoming_ok
    }

    pub fn apply<'a, I>(&self, events: I) -> Vec<&'a Event>
    where
        I: IntoIterator<Item = &'a Event>,
    {
        events.into_iter().filter(|event| self.matches(event)).collect()
    }
}

/// Listing order by start time; ties fall back to the id in the same
/// direction so pages stay stable.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    StartAsc,
    #[default]
    StartDesc,
}

impl SortOrder {
    pub fn compare(&self, a: &Event, b: &Event) -> Ordering {
        let ascending = a
            .start_datetime
            .cmp(&b.start_datetime)
            .then_with(|| a.id.cmp(&b.id));
        match self {
            SortOrder::StartAsc => ascending,
            SortOrder::StartDesc => ascending.reverse(),
        }
    }

    pub fn sort(&self, events: &mut [Event]) {
        events.sort_by(|a, b| self.compare(a, b));
    }

    pub fn sql(&self) -> &'static str {
        match self {
            SortOrder::StartAsc => "ORDER BY start_datetime ASC, id ASC",
            SortOrder::StartDesc => "ORDER BY start_datetime DESC, id DESC",
        }
    }
}
