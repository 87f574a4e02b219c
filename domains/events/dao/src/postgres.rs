use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use dao_utils::{PageRequest, Paginated, WhereBuilder, first_row_or_not_found};
use events_errors::EventError;
use events_models::{
    AppClock, Category, CategoryCount, CategoryHours, Event, EventDraft,
    EventDurationRow, EventFilter, PeriodCount, RECENT_DURATIONS_LIMIT,
    SortOrder, Statistics, Summary, TimePeriod,
};
use sql_connection::SqlConnect;
use tokio_postgres::{IsolationLevel, Row};
use tracing::instrument;

use crate::EventStore;

const EVENT_COLUMNS: &str = "id, name, start_datetime, end_datetime, image, \
                             video_link, web_link, category, created_at, \
                             updated_at";

#[derive(Clone)]
pub struct PgEventDao {
    db: SqlConnect,
    clock: AppClock,
}

impl PgEventDao {
    pub fn new(db: SqlConnect, clock: AppClock) -> Self { Self { db, clock } }

    fn map_row(row: &Row) -> Event {
        Event {
            id: row.get("id"),
            name: row.get("name"),
            start_datetime: row.get("start_datetime"),
            end_datetime: row.get("end_datetime"),
            image: row.get("image"),
            video_link: row.get("video_link"),
            web_link: row.get("web_link"),
            category: row.get("category"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }

    fn filter_clause(filter: &EventFilter) -> WhereBuilder {
        let mut builder = WhereBuilder::new();
        if let Some(date) = filter.date {
            builder.push("start_datetime::date", "=", date);
        }
        if let Some(category) = filter.category {
            builder.push("category", "=", category);
        }
        if let Some(now) = filter.upcoming_from {
            builder.push("start_datetime", ">=", now);
        }
        builder
    }
}

#[async_trait]
impl EventStore for PgEventDao {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Event, EventError> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(&format!(
                "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
            ))
            .await?;
        let rows = client.query(&stmt, &[&id]).await?;

        first_row_or_not_found(&rows, Self::map_row, EventError::NotFound {
            event_id: id,
        })
    }

    #[instrument(skip(self, draft))]
    async fn create(&self, draft: EventDraft) -> Result<Event, EventError> {
        let client = self.db.get_client().await?;
        let now = self.clock.now();

        let stmt = client
            .prepare(&format!(
                "INSERT INTO events (name, start_datetime, end_datetime, \
                 image, video_link, web_link, category, created_at, \
                 updated_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
                 RETURNING {EVENT_COLUMNS}"
            ))
            .await?;
        let row = client
            .query_one(&stmt, &[
                &draft.name,
                &draft.start_datetime,
                &draft.end_datetime,
                &draft.image,
                &draft.video_link,
                &draft.web_link,
                &draft.category,
                &now,
            ])
            .await?;

        Ok(Self::map_row(&row))
    }

    #[instrument(skip(self, draft))]
    async fn update(
        &self, id: i64, draft: EventDraft,
    ) -> Result<Event, EventError> {
        let client = self.db.get_client().await?;
        let now = self.clock.now();

        let stmt = client
            .prepare(&format!(
                "UPDATE events
                 SET name = $2, start_datetime = $3, end_datetime = $4, \
                 image = $5, video_link = $6, web_link = $7, category = $8, \
                 updated_at = $9
                 WHERE id = $1
                 RETURNING {EVENT_COLUMNS}"
            ))
            .await?;
        let rows = client
            .query(&stmt, &[
                &id,
                &draft.name,
                &draft.start_datetime,
                &draft.end_datetime,
                &draft.image,
                &draft.video_link,
                &draft.web_link,
                &draft.category,
                &now,
            ])
            .await?;

        first_row_or_not_found(&rows, Self::map_row, EventError::NotFound {
            event_id: id,
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<Event, EventError> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare(&format!(
                "DELETE FROM events WHERE id = $1 RETURNING {EVENT_COLUMNS}"
            ))
            .await?;
        let rows = client.query(&stmt, &[&id]).await?;

        first_row_or_not_found(&rows, Self::map_row, EventError::NotFound {
            event_id: id,
        })
    }

    #[instrument(skip(self))]
    async fn find_page(
        &self, filter: &EventFilter, order: SortOrder, page: PageRequest,
    ) -> Result<Paginated<Event>, EventError> {
        let client = self.db.get_read_client().await?;
        let mut builder = Self::filter_clause(filter);
        let where_sql = builder.sql();

        let count_query = format!("SELECT COUNT(*) FROM events{where_sql}");
        let count_row = client
            .query_one(count_query.as_str(), &builder.params())
            .await?;
        let total: i64 = count_row.get(0);

        let limit = builder.bind(page.limit());
        let offset = builder.bind(page.offset());
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM events{where_sql} {} LIMIT ${limit} \
             OFFSET ${offset}",
            order.sql()
        );
        let rows = client.query(query.as_str(), &builder.params()).await?;

        let events = rows.iter().map(Self::map_row).collect();
        Ok(Paginated::new(events, page, total.max(0) as u64))
    }

    #[instrument(skip(self))]
    async fn all(&self) -> Result<Vec<Event>, EventError> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(&format!(
                "SELECT {EVENT_COLUMNS} FROM events {}",
                SortOrder::StartDesc.sql()
            ))
            .await?;
        let rows = client.query(&stmt, &[]).await?;

        Ok(rows.iter().map(Self::map_row).collect())
    }

    async fn count(&self) -> Result<u64, EventError> {
        let client = self.db.get_read_client().await?;
        let row = client.query_one("SELECT COUNT(*) FROM events", &[]).await?;
        let count: i64 = row.get(0);
        Ok(count.max(0) as u64)
    }

    /// Aggregates in SQL so the whole table never crosses the wire.
    #[instrument(skip(self))]
    async fn statistics(
        &self, now: NaiveDateTime,
    ) -> Result<Statistics, EventError> {
        let mut client = self.db.get_read_client().await?;
        // One snapshot for every aggregate, so the groupings add up to the
        // summary even while other requests write.
        let tx = client
            .build_transaction()
            .isolation_level(IsolationLevel::RepeatableRead)
            .read_only(true)
            .start()
            .await?;

        let events_by_category = tx
            .query(
                "SELECT category, COUNT(*) AS total FROM events GROUP BY \
                 category",
                &[],
            )
            .await?
            .iter()
            .map(|row| {
                CategoryCount {
                    category: row.get::<_, Category>("category"),
                    count: row.get::<_, i64>("total").max(0) as u64,
                }
            })
            .collect();

        let duration_by_category = tx
            .query(
                "SELECT category,
                        SUM(FLOOR(GREATEST(EXTRACT(EPOCH FROM (end_datetime \
                 - start_datetime)), 0) / 3600))::BIGINT AS hours
                 FROM events
                 WHERE end_datetime IS NOT NULL
                 GROUP BY category",
                &[],
            )
            .await?
            .iter()
            .map(|row| {
                CategoryHours {
                    category: row.get("category"),
                    total_hours: row.get("hours"),
                }
            })
            .collect();

        let mut by_period: BTreeMap<TimePeriod, u64> = BTreeMap::new();
        for row in tx
            .query(
                "SELECT EXTRACT(HOUR FROM start_datetime)::INT AS hour, \
                 COUNT(*) AS total FROM events GROUP BY 1",
                &[],
            )
            .await?
        {
            let hour: i32 = row.get("hour");
            let total: i64 = row.get("total");
            *by_period
                .entry(TimePeriod::from_hour(hour.max(0) as u32))
                .or_default() += total.max(0) as u64;
        }
        let events_by_time_period = by_period
            .into_iter()
            .map(|(period, count)| PeriodCount { period, count })
            .collect();

        let recent_query = format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE end_datetime IS NOT \
             NULL {} LIMIT {RECENT_DURATIONS_LIMIT}",
            SortOrder::StartDesc.sql()
        );
        let event_durations = tx
            .query(recent_query.as_str(), &[])
            .await?
            .iter()
            .map(|row| EventDurationRow::from(&Self::map_row(row)))
            .collect();

        let summary_row = tx
            .query_one(
                "SELECT COUNT(*) AS total,
                        COUNT(*) FILTER (WHERE start_datetime >= $1) AS \
                 upcoming,
                        COUNT(*) FILTER (WHERE end_datetime IS NOT NULL) AS \
                 with_duration
                 FROM events",
                &[&now],
            )
            .await?;
        tx.commit().await?;

        let total = summary_row.get::<_, i64>("total").max(0) as u64;
        let upcoming = summary_row.get::<_, i64>("upcoming").max(0) as u64;
        let summary = Summary {
            total,
            upcoming,
            past: total - upcoming,
            with_duration: summary_row.get::<_, i64>("with_duration").max(0)
                as u64,
        };

        Ok(Statistics {
            events_by_category,
            duration_by_category,
            events_by_time_period,
            event_durations,
            summary,
        }
        .normalized())
    }
}
