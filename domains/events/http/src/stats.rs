use axum::{extract::State, response::Json};
use common_errors::{ApiErrorResponse, AppError};
use events_models::Statistics;
use events_queries::StatisticsQuery;
use tracing::instrument;

use crate::handlers::EventServices;

#[utoipa::path(
    get,
    path = "/statistics",
    responses(
        (status = 200, description = "Aggregates over every stored event", body = Statistics),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    tag = "statistics"
)]
#[instrument(skip_all)]
pub async fn get_statistics(
    State(services): State<EventServices>,
) -> Result<Json<Statistics>, AppError> {
    let stats = services.statistics.execute(StatisticsQuery).await?;
    Ok(Json(stats))
}
