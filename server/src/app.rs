use std::sync::Arc;

use anyhow::Context;
use axum::{Json, Router, extract::State, routing::get};
use chrono::{DateTime, Utc};
use events_dao::{MIGRATIONS, MemoryEventDao, PgEventDao, SharedEventStore};
use events_http::{EventHandlers, EventServices};
use file_storage::PublicDisk;
use serde::Serialize;
use sql_connection::{SqlConnect, SqlMigrator, connect_postgres_db};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;
use utoipa::{OpenApi, ToSchema};
use utoipa_rapidoc::RapiDoc;

use crate::config::{AppConfig, StoreBackend};

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        events_http::list_admin_events,
        events_http::create_form,
        events_http::create_event,
        events_http::show_admin_event,
        events_http::edit_form,
        events_http::update_event,
        events_http::delete_event,
        events_http::list_public_events,
        events_http::show_public_event,
        events_http::get_statistics,
    ),
    components(
        schemas(
            HealthResponse,
            PoolHealth,
            events_commands::EventForm,
            events_responses::EventResponse,
            events_responses::EventPage,
            events_responses::EventListResponse,
            events_responses::EventDetailResponse,
            events_responses::EventFormResponse,
            events_responses::ActiveFilters,
            events_models::Category,
            events_models::TimePeriod,
            events_models::Statistics,
            common_errors::ApiErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "admin", description = "Event administration"),
        (name = "public", description = "Public event listing"),
        (name = "statistics", description = "Event statistics")
    ),
    info(
        title = "Acara API",
        description = "Event management with derived durations and statistics",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

#[derive(Debug, Serialize, ToSchema)]
pub struct PoolHealth {
    pub available: usize,
    pub size: usize,
    pub max_size: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    /// Absent when running on the in-memory store
    pub database: Option<PoolHealth>,
}

#[derive(Clone)]
struct HealthState {
    db: Option<SqlConnect>,
}

#[utoipa::path(
    get,
    path = "/health-check",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "health"
)]
async fn health_check(State(state): State<HealthState>) -> Json<HealthResponse> {
    let database = state.db.as_ref().map(|db| {
        let status = db.get_pool_status();
        PoolHealth {
            available: status.available,
            size: status.size,
            max_size: status.max_size,
        }
    });

    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        database,
    })
}

/// Opens the configured store. The PostgreSQL backend also hands back its
/// pool so the health check can report on it.
pub async fn connect_store(
    config: &AppConfig,
) -> anyhow::Result<(SharedEventStore, Option<SqlConnect>)> {
    match config.store_backend {
        StoreBackend::Memory => {
            info!("Using in-memory event store");
            Ok((Arc::new(MemoryEventDao::new(config.clock())), None))
        }
        StoreBackend::Postgres => {
            let db = connect_postgres_db(&config.db_config()).await?;

            if config.run_migrations {
                let applied = SqlMigrator::new(db.pool().clone(), MIGRATIONS)
                    .run_all_migrations()
                    .await
                    .context("Failed to apply migrations")?;
                info!(count = applied.len(), "Migrations applied");
            }

            let store = PgEventDao::new(db.clone(), config.clock());
            Ok((Arc::new(store), Some(db)))
        }
    }
}

/// Assembles the HTTP surface around an already opened store.
pub fn router(
    config: &AppConfig, store: SharedEventStore, db: Option<SqlConnect>,
) -> Router {
    let disk = PublicDisk::new(&config.storage_root, &config.public_storage_url);
    let services = EventServices::new(
        store,
        disk.clone(),
        config.clock(),
        config.events_per_page,
    );

    let mut app = Router::new()
        .merge(EventHandlers::routes().with_state(services))
        .merge(
            Router::new()
                .route("/health-check", get(health_check))
                .with_state(HealthState { db }),
        )
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/docs"))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        );

    // Only a path prefix can be served locally; a full URL points at a CDN.
    if disk.public_url().starts_with('/') {
        app = app.nest_service(disk.public_url(), ServeDir::new(disk.root()));
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn build(config: &AppConfig) -> anyhow::Result<Router> {
    tokio::fs::create_dir_all(&config.storage_root)
        .await
        .with_context(|| {
            format!("Failed to create {}", config.storage_root.display())
        })?;

    let (store, db) = connect_store(config).await?;
    Ok(router(config, store, db))
}
