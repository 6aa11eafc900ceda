use axum::{extract::State, Json};
use shelterwalk_core::models::schedule::{CalendarEntry, OverviewFilter, ScheduleOverviewRow};
use std::sync::Arc;

use crate::{
    handlers::reservations::scoped_requester,
    middleware::{auth::CurrentActor, error_handling::AppError, extract::Query},
    ApiState,
};

#[axum::debug_handler]
pub async fn overview(
    State(state): State<Arc<ApiState>>,
    CurrentActor(actor): CurrentActor,
    Query(filter): Query<OverviewFilter>,
) -> Result<Json<Vec<ScheduleOverviewRow>>, AppError> {
    let filter = OverviewFilter {
        requester_id: scoped_requester(&actor, filter.requester_id)?,
        scope: filter.scope,
    };
    let rows = state.scheduler.schedule.overview(&filter).await?;
    Ok(Json(rows))
}

#[axum::debug_handler]
pub async fn calendar(
    State(state): State<Arc<ApiState>>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<Vec<CalendarEntry>>, AppError> {
    let entries = state.scheduler.schedule.calendar_feed(&actor).await?;
    Ok(Json(entries))
}
