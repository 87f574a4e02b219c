pub mod get_event;
pub mod list_events;
pub mod statistics;

pub use get_event::GetEventQuery;
pub use list_events::{Audience, ListEventsQuery};
pub use statistics::StatisticsQuery;
