use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use dao_utils::{PageRequest, Paginated};
use events_errors::EventError;
use events_models::{Event, EventDraft, EventFilter, SortOrder, Statistics};
use sql_connection::Migration;

pub mod memory;
pub mod postgres;

pub use memory::MemoryEventDao;
pub use postgres::PgEventDao;

pub const MIGRATIONS: &[Migration] = &[Migration::new(
    "001_create_events",
    include_str!("../../migrations/sql/001_create_events.sql"),
)];

/// Persistence seam for events. Both stores return rows exactly as stored;
/// derived fields are computed by the caller.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Event, EventError>;

    async fn create(&self, draft: EventDraft) -> Result<Event, EventError>;

    /// Replaces every column of an existing row.
    async fn update(
        &self, id: i64, draft: EventDraft,
    ) -> Result<Event, EventError>;

    /// Removes the row and hands back what was deleted.
    async fn delete(&self, id: i64) -> Result<Event, EventError>;

    async fn find_page(
        &self, filter: &EventFilter, order: SortOrder, page: PageRequest,
    ) -> Result<Paginated<Event>, EventError>;

    async fn all(&self) -> Result<Vec<Event>, EventError>;

    async fn count(&self) -> Result<u64, EventError>;

    async fn statistics(
        &self, now: NaiveDateTime,
    ) -> Result<Statistics, EventError> {
        let events = self.all().await?;
        Ok(Statistics::compute(&events, now))
    }
}

pub type SharedEventStore = Arc<dyn EventStore>;
