use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Source of "now" as a wall-clock time in the application zone.
///
/// Event timestamps are stored without a zone, so every comparison against
/// the current instant (upcoming/past split, `created_at`) must go through
/// the same zone the administrators entered the times in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppClock {
    Zone(Tz),
    Fixed(NaiveDateTime),
}

impl AppClock {
    pub fn new(zone: Tz) -> Self { AppClock::Zone(zone) }

    pub fn fixed(now: NaiveDateTime) -> Self { AppClock::Fixed(now) }

    pub fn now(&self) -> NaiveDateTime {
        match self {
            AppClock::Zone(zone) => Utc::now().with_timezone(zone).naive_local(),
            AppClock::Fixed(now) => *now,
        }
    }
}

impl Default for AppClock {
    fn default() -> Self { AppClock::Zone(chrono_tz::Asia::Jakarta) }
}
