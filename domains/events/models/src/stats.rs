use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{Category, Event, SortOrder, TimePeriod};

/// Number of most recent events listed with their durations.
pub const RECENT_DURATIONS_LIMIT: usize = 20;

const START_DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryCount {
    pub category: Category,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryHours {
    pub category: Category,
    pub total_hours: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PeriodCount {
    pub period: TimePeriod,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventDurationRow {
    pub name: String,
    pub duration_text: String,
    pub duration_hours: i64,
    pub category: Category,
    pub start_date: String,
}

impl From<&Event> for EventDurationRow {
    fn from(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            duration_text: event.duration_text(),
            duration_hours: event.duration_hours(),
            category: event.category,
            start_date: event
                .start_datetime
                .format(START_DATE_FORMAT)
                .to_string(),
        }
    }
}

#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema,
)]
pub struct Summary {
    pub total: u64,
    pub upcoming: u64,
    pub past: u64,
    pub with_duration: u64,
}

/// Aggregate read model for the statistics page.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub events_by_category: Vec<CategoryCount>,
    pub duration_by_category: Vec<CategoryHours>,
    pub events_by_time_period: Vec<PeriodCount>,
    pub event_durations: Vec<EventDurationRow>,
    pub summary: Summary,
}

impl Statistics {
    /// Aggregates the full event collection against a single `now` so the
    /// upcoming/past split always adds up to the total.
    pub fn compute(events: &[Event], now: NaiveDateTime) -> Self {
        let mut by_category: BTreeMap<Category, u64> = BTreeMap::new();
        let mut hours_by_category: BTreeMap<Category, i64> = BTreeMap::new();
        let mut by_period: BTreeMap<TimePeriod, u64> = BTreeMap::new();
        let mut summary = Summary::default();

        for event in events {
            *by_category.entry(event.category).or_default() += 1;
            *by_period.entry(event.time_period()).or_default() += 1;

            if event.has_duration() {
                *hours_by_category.entry(event.category).or_default() +=
                    event.duration_hours();
                summary.with_duration += 1;
            }

            summary.total += 1;
            if event.is_upcoming(now) {
                summary.upcoming += 1;
            }
            else {
                summary.past += 1;
            }
        }

        let mut with_duration: Vec<&Event> =
            events.iter().filter(|e| e.has_duration()).collect();
        with_duration.sort_by(|a, b| SortOrder::StartDesc.compare(a, b));

        Self {
            events_by_category: by_category
                .into_iter()
                .map(|(category, count)| CategoryCount { category, count })
                .collect(),
            duration_by_category: hours_by_category
                .into_iter()
                .map(|(category, total_hours)| {
                    CategoryHours {
                        category,
                        total_hours,
                    }
                })
                .collect(),
            events_by_time_period: by_period
                .into_iter()
                .map(|(period, count)| PeriodCount { period, count })
                .collect(),
            event_durations: with_duration
                .into_iter()
                .take(RECENT_DURATIONS_LIMIT)
                .map(EventDurationRow::from)
                .collect(),
            summary,
        }
    }

    /// Puts grouped rows into declaration order of their enum keys. Used
    /// when groups come back from a store in arbitrary order.
    pub fn normalized(mut self) -> Self {
        self.events_by_category.sort_by_key(|row| row.category);
        self.duration_by_category.sort_by_key(|row| row.category);
        self.events_by_time_period.sort_by_key(|row| row.period);
        self
    }
}
