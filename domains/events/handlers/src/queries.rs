use events_dao::SharedEventStore;
use events_errors::EventError;
use events_models::{AppClock, Category, Statistics};
use events_queries::{Audience, GetEventQuery, ListEventsQuery, StatisticsQuery};
use events_responses::{ActiveFilters, EventListResponse, EventResponse};
use file_storage::PublicDisk;
use tracing::{debug, instrument};

/// Serves both the admin table and the public listing; the audience decides
/// ordering and whether past events are hidden.
#[derive(Clone)]
pub struct ListEventsHandler {
    store: SharedEventStore,
    clock: AppClock,
    disk: PublicDisk,
    per_page: u64,
}

impl ListEventsHandler {
    pub fn new(
        store: SharedEventStore, clock: AppClock, disk: PublicDisk, per_page: u64,
    ) -> Self {
        Self {
            store,
            clock,
            disk,
            per_page,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: ListEventsQuery, audience: Audience,
    ) -> Result<EventListResponse, EventError> {
        let filter = query.filter(audience, self.clock.now())?;
        let page = query.page_request(self.per_page);

        let events = self
            .store
            .find_page(&filter, audience.sort_order(), page)
            .await?;
        debug!(total = events.total, page = events.current_page, "Listed events");

        let echo = query.echo();
        Ok(EventListResponse {
            events: events
                .map(|event| EventResponse::from_event(event, &self.disk))
                .into(),
            filters: ActiveFilters {
                date: echo.date,
                category: echo.category,
            },
            categories: Category::ALL.to_vec(),
        })
    }
}

#[derive(Clone)]
pub struct GetEventHandler {
    store: SharedEventStore,
    disk: PublicDisk,
}

impl GetEventHandler {
    pub fn new(store: SharedEventStore, disk: PublicDisk) -> Self {
        Self { store, disk }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: GetEventQuery,
    ) -> Result<EventResponse, EventError> {
        let event = self.store.find_by_id(query.event_id).await?;
        Ok(EventResponse::from_event(event, &self.disk))
    }
}

#[derive(Clone)]
pub struct StatisticsHandler {
    store: SharedEventStore,
    clock: AppClock,
}

impl StatisticsHandler {
    pub fn new(store: SharedEventStore, clock: AppClock) -> Self {
        Self { store, clock }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, _query: StatisticsQuery,
    ) -> Result<Statistics, EventError> {
        self.store.statistics(self.clock.now()).await
    }
}
