use std::collections::BTreeMap;

use async_trait::async_trait;
use dao_utils::{PageRequest, Paginated};
use events_errors::EventError;
use events_models::{AppClock, Event, EventDraft, EventFilter, SortOrder};
use tokio::sync::RwLock;
use tracing::instrument;

use crate::EventStore;

#[derive(Debug, Default)]
struct State {
    last_id: i64,
    rows: BTreeMap<i64, Event>,
}

/// Process-local store used by tests and `STORE_BACKEND=memory`.
#[derive(Debug)]
pub struct MemoryEventDao {
    state: RwLock<State>,
    clock: AppClock,
}

impl MemoryEventDao {
    pub fn new(clock: AppClock) -> Self {
        Self {
            state: RwLock::new(State::default()),
            clock,
        }
    }
}

impl Default for MemoryEventDao {
    fn default() -> Self { Self::new(AppClock::default()) }
}

#[async_trait]
impl EventStore for MemoryEventDao {
    async fn find_by_id(&self, id: i64) -> Result<Event, EventError> {
        let state = self.state.read().await;
        state
            .rows
            .get(&id)
            .cloned()
            .ok_or(EventError::NotFound { event_id: id })
    }

    #[instrument(skip(self, draft))]
    async fn create(&self, draft: EventDraft) -> Result<Event, EventError> {
        let now = self.clock.now();
        let mut state = self.state.write().await;

        state.last_id += 1;
        let event = draft.into_event(state.last_id, now, now);
        state.rows.insert(event.id, event.clone());
        Ok(event)
    }

    #[instrument(skip(self, draft))]
    async fn update(
        &self, id: i64, draft: EventDraft,
    ) -> Result<Event, EventError> {
        let now = self.clock.now();
        let mut state = self.state.write().await;

        let row = state
            .rows
            .get_mut(&id)
            .ok_or(EventError::NotFound { event_id: id })?;
        *row = draft.into_event(id, row.created_at, now);
        Ok(row.clone())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<Event, EventError> {
        let mut state = self.state.write().await;
        state
            .rows
            .remove(&id)
            .ok_or(EventError::NotFound { event_id: id })
    }

    async fn find_page(
        &self, filter: &EventFilter, order: SortOrder, page: PageRequest,
    ) -> Result<Paginated<Event>, EventError> {
        let state = self.state.read().await;

        let mut matched: Vec<Event> =
            filter.apply(state.rows.values()).into_iter().cloned().collect();
        order.sort(&mut matched);

        let total = matched.len() as u64;
        let data = matched
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok(Paginated::new(data, page, total))
    }

    async fn all(&self) -> Result<Vec<Event>, EventError> {
        let state = self.state.read().await;
        let mut events: Vec<Event> = state.rows.values().cloned().collect();
        SortOrder::StartDesc.sort(&mut events);
        Ok(events)
    }

    async fn count(&self) -> Result<u64, EventError> {
        Ok(self.state.read().await.rows.len() as u64)
    }
}
