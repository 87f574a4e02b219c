//! Needs a Docker daemon: `cargo test -p events-dao -- --ignored`.

use chrono::{Duration, NaiveDate};
use dao_utils::PageRequest;
use events_dao::{EventStore, MIGRATIONS, MemoryEventDao, PgEventDao};
use events_errors::EventError;
use events_models::{
    AppClock, Category, EventFilter, RECENT_DURATIONS_LIMIT, SortOrder,
    TimePeriod,
};
use test_utils::{EventFixture, TestPostgresContainer, at};

async fn setup() -> anyhow::Result<(TestPostgresContainer, PgEventDao)> {
    let container = TestPostgresContainer::new(MIGRATIONS).await?;
    let dao = PgEventDao::new(
        container.sql_connect(),
        AppClock::fixed(at("2024-09-01 00:00")),
    );
    Ok((container, dao))
}

fn sample() -> Vec<EventFixture> {
    vec![
        EventFixture::builder()
            .name("Lari Pagi")
            .start(at("2024-09-10 06:00"))
            .length(Duration::hours(2))
            .category(Category::Olahraga)
            .build(),
        EventFixture::builder()
            .name("Tari Kecak")
            .start(at("2024-09-10 19:00"))
            .category(Category::Budaya)
            .build(),
        EventFixture::builder()
            .name("Turnamen Futsal")
            .start(at("2024-09-12 13:00"))
            .length(Duration::hours(26))
            .category(Category::Olahraga)
            .build(),
        EventFixture::builder()
            .name("Tur Kota Lama")
            .start(at("2024-08-20 16:00"))
            .length(Duration::minutes(90))
            .category(Category::Pariwisata)
            .build(),
    ]
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_crud_round_trip() {
    let (_container, dao) = setup().await.unwrap();
    let fixture = &sample()[0];

    let created = dao.create(fixture.draft()).await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.created_at, at("2024-09-01 00:00"));
    assert_eq!(dao.find_by_id(created.id).await.unwrap(), created);

    let mut draft = fixture.draft();
    draft.name = "Lari Sore".to_string();
    draft.start_datetime = at("2024-09-10 16:00");
    let updated = dao.update(created.id, draft).await.unwrap();
    assert_eq!(updated.name, "Lari Sore");
    assert_eq!(updated.time_period(), TimePeriod::Sore);

    let deleted = dao.delete(created.id).await.unwrap();
    assert_eq!(deleted.id, created.id);
    assert!(matches!(
        dao.find_by_id(created.id).await,
        Err(EventError::NotFound { .. })
    ));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_end_before_start_is_rejected_by_the_table() {
    let (_container, dao) = setup().await.unwrap();

    let mut draft = sample()[0].draft();
    draft.end_datetime = Some(draft.start_datetime - Duration::hours(1));

    assert!(matches!(
        dao.create(draft).await,
        Err(EventError::Database(_))
    ));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_find_page_matches_in_memory_filtering() {
    let (_container, dao) = setup().await.unwrap();
    let memory = MemoryEventDao::new(AppClock::fixed(at("2024-09-01 00:00")));
    for fixture in sample() {
        dao.create(fixture.draft()).await.unwrap();
        memory.create(fixture.draft()).await.unwrap();
    }

    let filters = [
        EventFilter::new(),
        EventFilter::new().with_category(Some(Category::Olahraga)),
        EventFilter::new().with_date(NaiveDate::from_ymd_opt(2024, 9, 10)),
        EventFilter::new()
            .with_date(NaiveDate::from_ymd_opt(2024, 9, 10))
            .with_category(Some(Category::Budaya)),
        EventFilter::new().upcoming_from(at("2024-09-10 19:00")),
    ];

    for filter in filters {
        for order in [SortOrder::StartAsc, SortOrder::StartDesc] {
            let page = PageRequest::new(Some(1), 12);
            let pg = dao.find_page(&filter, order, page).await.unwrap();
            let mem = memory.find_page(&filter, order, page).await.unwrap();

            let pg_names: Vec<&str> =
                pg.data.iter().map(|e| e.name.as_str()).collect();
            let mem_names: Vec<&str> =
                mem.data.iter().map(|e| e.name.as_str()).collect();
            assert_eq!(pg_names, mem_names, "filter {filter:?} {order:?}");
            assert_eq!(pg.total, mem.total);
        }
    }
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_sql_statistics_match_in_memory_aggregation() {
    let (_container, dao) = setup().await.unwrap();
    for fixture in sample() {
        dao.create(fixture.draft()).await.unwrap();
    }

    let now = at("2024-09-10 12:00");
    let from_sql = dao.statistics(now).await.unwrap();
    let in_memory = events_models::Statistics::compute(
        &dao.all().await.unwrap(),
        now,
    );

    assert_eq!(from_sql, in_memory);
    assert_eq!(from_sql.summary.upcoming, 2);
    assert_eq!(from_sql.summary.past, 2);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_page_past_the_end_is_empty() {
    let (_container, dao) = setup().await.unwrap();
    for fixture in sample() {
        dao.create(fixture.draft()).await.unwrap();
    }

    let page = PageRequest::new(Some(1_000_000_000_000_000_000), 12);
    let result = dao
        .find_page(&EventFilter::new(), SortOrder::StartDesc, page)
        .await
        .unwrap();

    assert!(result.data.is_empty());
    assert_eq!(result.total, 4);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_statistics_stay_consistent_under_concurrent_writes() {
    let (_container, dao) = setup().await.unwrap();

    let writer = {
        let dao = dao.clone();
        tokio::spawn(async move {
            for round in 0..40 {
                for fixture in sample() {
                    let mut draft = fixture.draft();
                    draft.name = format!("{} #{round}", draft.name);
                    dao.create(draft).await.unwrap();
                }
            }
        })
    };

    let now = at("2024-09-10 12:00");
    while !writer.is_finished() {
        let stats = dao.statistics(now).await.unwrap();

        let by_category: u64 =
            stats.events_by_category.iter().map(|c| c.count).sum();
        let by_period: u64 =
            stats.events_by_time_period.iter().map(|p| p.count).sum();
        assert_eq!(by_category, stats.summary.total);
        assert_eq!(by_period, stats.summary.total);
        assert_eq!(
            stats.summary.upcoming + stats.summary.past,
            stats.summary.total
        );
        assert_eq!(
            stats.event_durations.len() as u64,
            stats.summary.with_duration.min(RECENT_DURATIONS_LIMIT as u64)
        );
    }
    writer.await.unwrap();
}
