use crate::domain::models::{SwitchId, TimeBand};
use crate::domain::plan::{PlanGroup, PlanItem, PlanSummary};
use crate::state::SharedState;
use crate::web::error::{ApiError, AppJson, AppPath};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct AddPlanPayload {
    switch_id: SwitchId,
    time_band: Option<TimeBand>,
}

#[derive(Serialize)]
struct PlanListResponse {
    groups: Vec<PlanGroup>,
    summary: PlanSummary,
}

#[derive(Serialize)]
struct ClearedResponse {
    removed: usize,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(list_plans).post(add_plan))
        .route("/recommended", post(add_recommended))
        .route("/clear-completed", post(clear_completed))
        .route("/:id/toggle", post(toggle_plan))
        .route("/:id", delete(remove_plan))
        .with_state(state)
}

async fn list_plans(State(state): State<SharedState>) -> Json<PlanListResponse> {
    let engine = state.engine.read().await;
    Json(PlanListResponse {
        groups: engine.plans().grouped(),
        summary: engine.plans().summary(),
    })
}

async fn add_plan(
    State(state): State<SharedState>,
    AppJson(payload): AppJson<AddPlanPayload>,
) -> Result<(StatusCode, Json<PlanItem>), ApiError> {
    let mut engine = state.engine.write().await;
    let band = payload.time_band.unwrap_or(engine.signals().time_band);
    let item = engine.add_from_catalog(payload.switch_id, band)?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn add_recommended(
    State(state): State<SharedState>,
) -> Result<(StatusCode, Json<PlanItem>), ApiError> {
    let mut engine = state.engine.write().await;
    let item = engine.add_recommended()?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn toggle_plan(
    State(state): State<SharedState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<PlanItem>, ApiError> {
    let mut engine = state.engine.write().await;
    Ok(Json(engine.toggle_complete(id)?))
}

async fn remove_plan(
    State(state): State<SharedState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    let mut engine = state.engine.write().await;
    engine.remove_plan(id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn clear_completed(
    State(state): State<SharedState>,
) -> Result<Json<ClearedResponse>, ApiError> {
    let mut engine = state.engine.write().await;
    let removed = engine.clear_completed()?;
    Ok(Json(ClearedResponse { removed }))
}
