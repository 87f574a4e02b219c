use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use common_errors::{ApiErrorResponse, AppError};
use events_commands::{
    CreateEventCommand, DeleteEventCommand, EventForm, UpdateEventCommand,
};
use events_dao::SharedEventStore;
use events_handlers::{
    CreateEventHandler, DeleteEventHandler, GetEventHandler, ListEventsHandler,
    StatisticsHandler, UpdateEventHandler,
};
use events_models::AppClock;
use events_queries::{Audience, GetEventQuery, ListEventsQuery};
use events_responses::{
    EventDetailResponse, EventFormResponse, EventListResponse, EventResponse,
};
use file_storage::PublicDisk;
use tracing::instrument;

use crate::{
    extract::{ApiPath, ApiQuery},
    payload::{EventPayload, MAX_EVENT_BODY_BYTES},
    stats,
};

#[derive(Clone)]
pub struct EventServices {
    pub create_event: CreateEventHandler,
    pub update_event: UpdateEventHandler,
    pub delete_event: DeleteEventHandler,

    pub get_event: GetEventHandler,
    pub list_events: ListEventsHandler,
    pub statistics: StatisticsHandler,
}

impl EventServices {
    pub fn new(
        store: SharedEventStore, disk: PublicDisk, clock: AppClock, per_page: u64,
    ) -> Self {
        Self {
            create_event: CreateEventHandler::new(store.clone(), disk.clone()),
            update_event: UpdateEventHandler::new(store.clone(), disk.clone()),
            delete_event: DeleteEventHandler::new(store.clone(), disk.clone()),
            get_event: GetEventHandler::new(store.clone(), disk.clone()),
            list_events: ListEventsHandler::new(
                store.clone(),
                clock,
                disk,
                per_page,
            ),
            statistics: StatisticsHandler::new(store, clock),
        }
    }
}

pub struct EventHandlers;

impl EventHandlers {
    /// Back-office CRUD, mounted under `/admin/events`.
    pub fn admin_routes() -> Router<EventServices> {
        Router::new()
            .route("/", get(list_admin_events).post(create_event))
            .route("/create", get(create_form))
            .route(
                "/{id}",
                get(show_admin_event)
                    .put(update_event)
                    .post(update_event)
                    .delete(delete_event),
            )
            .route("/{id}/edit", get(edit_form))
            .layer(DefaultBodyLimit::max(MAX_EVENT_BODY_BYTES))
    }

    /// Read-only listing of upcoming events, mounted under `/events`.
    pub fn public_routes() -> Router<EventServices> {
        Router::new()
            .route("/", get(list_public_events))
            .route("/{id}", get(show_public_event))
    }

    pub fn routes() -> Router<EventServices> {
        Router::new()
            .nest("/admin/events", Self::admin_routes())
            .nest("/events", Self::public_routes())
            .route("/statistics", get(stats::get_statistics))
    }
}

#[utoipa::path(
    get,
    path = "/admin/events",
    params(ListEventsQuery),
    responses(
        (status = 200, description = "Events, newest start first", body = EventListResponse),
        (status = 400, description = "Invalid date or category filter", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    tag = "admin"
)]
#[instrument(skip_all)]
pub async fn list_admin_events(
    State(services): State<EventServices>, ApiQuery(query): ApiQuery<ListEventsQuery>,
) -> Result<Json<EventListResponse>, AppError> {
    let events = services.list_events.execute(query, Audience::Admin).await?;
    Ok(Json(events))
}

#[utoipa::path(
    get,
    path = "/admin/events/create",
    responses(
        (status = 200, description = "Props of the create form", body = EventFormResponse)
    ),
    tag = "admin"
)]
pub async fn create_form() -> Json<EventFormResponse> {
    Json(EventFormResponse::create())
}

#[utoipa::path(
    post,
    path = "/admin/events",
    request_body(
        content = EventForm,
        description = "Multipart form (optional `image` file), JSON or urlencoded",
        content_type = "multipart/form-data"
    ),
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 400, description = "Malformed body", body = ApiErrorResponse),
        (status = 422, description = "Validation failed", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    tag = "admin"
)]
#[instrument(skip_all)]
pub async fn create_event(
    State(services): State<EventServices>, payload: EventPayload,
) -> Result<(StatusCode, Json<EventResponse>), AppError> {
    let command = CreateEventCommand::new(payload.form, payload.image);
    let event = services.create_event.execute(command).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

#[utoipa::path(
    get,
    path = "/admin/events/{id}",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = EventDetailResponse),
        (status = 404, description = "Event not found", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    tag = "admin"
)]
#[instrument(skip_all)]
pub async fn show_admin_event(
    State(services): State<EventServices>, ApiPath(id): ApiPath<i64>,
) -> Result<Json<EventDetailResponse>, AppError> {
    let event = services.get_event.execute(GetEventQuery::new(id)).await?;
    Ok(Json(EventDetailResponse { event }))
}

#[utoipa::path(
    get,
    path = "/admin/events/{id}/edit",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Props of the edit form", body = EventFormResponse),
        (status = 404, description = "Event not found", body = ApiErrorResponse)
    ),
    tag = "admin"
)]
#[instrument(skip_all)]
pub async fn edit_form(
    State(services): State<EventServices>, ApiPath(id): ApiPath<i64>,
) -> Result<Json<EventFormResponse>, AppError> {
    let event = services.get_event.execute(GetEventQuery::new(id)).await?;
    Ok(Json(EventFormResponse::edit(event)))
}

#[utoipa::path(
    put,
    path = "/admin/events/{id}",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    request_body(
        content = EventForm,
        description = "Full replacement; omit `image` to keep the stored one",
        content_type = "multipart/form-data"
    ),
    responses(
        (status = 200, description = "Event updated", body = EventResponse),
        (status = 404, description = "Event not found", body = ApiErrorResponse),
        (status = 422, description = "Validation failed", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    tag = "admin"
)]
#[instrument(skip_all)]
pub async fn update_event(
    State(services): State<EventServices>, ApiPath(id): ApiPath<i64>,
    payload: EventPayload,
) -> Result<Json<EventResponse>, AppError> {
    let command = UpdateEventCommand::new(id, payload.form, payload.image);
    let event = services.update_event.execute(command).await?;
    Ok(Json(event))
}

#[utoipa::path(
    delete,
    path = "/admin/events/{id}",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 204, description = "Event and its image deleted"),
        (status = 404, description = "Event not found", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    tag = "admin"
)]
#[instrument(skip_all)]
pub async fn delete_event(
    State(services): State<EventServices>, ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    services
        .delete_event
        .execute(DeleteEventCommand { event_id: id })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/events",
    params(ListEventsQuery),
    responses(
        (status = 200, description = "Upcoming events, soonest first", body = EventListResponse),
        (status = 400, description = "Invalid date or category filter", body = ApiErrorResponse)
    ),
    tag = "public"
)]
#[instrument(skip_all)]
pub async fn list_public_events(
    State(services): State<EventServices>, ApiQuery(query): ApiQuery<ListEventsQuery>,
) -> Result<Json<EventListResponse>, AppError> {
    let events = services.list_events.execute(query, Audience::Public).await?;
    Ok(Json(events))
}

#[utoipa::path(
    get,
    path = "/events/{id}",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = EventDetailResponse),
        (status = 404, description = "Event not found", body = ApiErrorResponse)
    ),
    tag = "public"
)]
#[instrument(skip_all)]
pub async fn show_public_event(
    State(services): State<EventServices>, ApiPath(id): ApiPath<i64>,
) -> Result<Json<EventDetailResponse>, AppError> {
    let event = services.get_event.execute(GetEventQuery::new(id)).await?;
    Ok(Json(EventDetailResponse { event }))
}
