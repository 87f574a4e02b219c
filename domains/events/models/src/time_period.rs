use std::fmt;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Coarse part of the day an event starts in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ToSchema,
)]
pub enum TimePeriod {
    Pagi,
    Siang,
    Sore,
    Malam,
}

impl TimePeriod {
    pub const ALL: [TimePeriod; 4] = [
        TimePeriod::Pagi,
        TimePeriod::Siang,
        TimePeriod::Sore,
        TimePeriod::Malam,
    ];

    /// Buckets an hour of the day: 05-11 Pagi, 12-14 Siang, 15-17 Sore,
    /// everything else Malam.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimePeriod::Pagi,
            12..=14 => TimePeriod::Siang,
            15..=17 => TimePeriod::Sore,
            _ => TimePeriod::Malam,
        }
    }

    pub fn of(start: NaiveDateTime) -> Self { Self::from_hour(start.hour()) }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimePeriod::Pagi => "Pagi",
            TimePeriod::Siang => "Siang",
            TimePeriod::Sore => "Sore",
            TimePeriod::Malam => "Malam",
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
