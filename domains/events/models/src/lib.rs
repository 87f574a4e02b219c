pub mod category;
pub mod clock;
pub mod duration;
pub mod events;
pub mod filter;
pub mod stats;
pub mod time_period;

pub use category::{Category, InvalidCategory};
pub use clock::AppClock;
pub use duration::{
    DurationParts, EventDuration, UNDETERMINED_DURATION, ZERO_DURATION,
};
pub use events::{Event, EventDraft};
pub use filter::{EventFilter, SortOrder};
pub use stats::{
    CategoryCount, CategoryHours, EventDurationRow, PeriodCount,
    RECENT_DURATIONS_LIMIT, Statistics, Summary,
};
pub use time_period::TimePeriod;
