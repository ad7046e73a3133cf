use crate::domain::models::{Mode, SwitchId, SwitchStatus};
use crate::domain::switches::{CheckInOutcome, SwitchEntry, SwitchState};
use crate::state::SharedState;
use crate::web::error::{ApiError, AppJson, AppPath};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct StatusPayload {
    status: SwitchStatus,
}

#[derive(Debug, Deserialize)]
struct ModePayload {
    mode: Mode,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(list_switches))
        .route("/active", get(active_switches))
        .route("/priority", get(priority_switches))
        .route("/:id/start", post(start_training))
        .route("/:id/checkin", post(check_in))
        .route("/:id/status", post(set_status))
        .route("/:id/mode", post(set_mode))
        .with_state(state)
}

fn parse_id(raw: &str) -> Result<SwitchId, ApiError> {
    Ok(SwitchId::try_from(raw)?)
}

async fn list_switches(State(state): State<SharedState>) -> Json<Vec<SwitchEntry>> {
    Json(state.engine.read().await.switches())
}

async fn active_switches(State(state): State<SharedState>) -> Json<Vec<SwitchEntry>> {
    Json(state.engine.read().await.active_switches())
}

async fn priority_switches(State(state): State<SharedState>) -> Json<Vec<SwitchEntry>> {
    Json(state.engine.read().await.priority_switches())
}

async fn start_training(
    State(state): State<SharedState>,
    AppPath(id): AppPath<String>,
) -> Result<Json<SwitchState>, ApiError> {
    let id = parse_id(&id)?;
    let mut engine = state.engine.write().await;
    Ok(Json(engine.start_training(id)?))
}

async fn check_in(
    State(state): State<SharedState>,
    AppPath(id): AppPath<String>,
) -> Result<Json<CheckInOutcome>, ApiError> {
    let id = parse_id(&id)?;
    let mut engine = state.engine.write().await;
    Ok(Json(engine.record_check_in(id)?))
}

async fn set_status(
    State(state): State<SharedState>,
    AppPath(id): AppPath<String>,
    AppJson(payload): AppJson<StatusPayload>,
) -> Result<Json<SwitchState>, ApiError> {
    let id = parse_id(&id)?;
    let mut engine = state.engine.write().await;
    engine.set_status(id, payload.status)?;
    Ok(Json(engine.switch(id).clone()))
}

async fn set_mode(
    State(state): State<SharedState>,
    AppPath(id): AppPath<String>,
    AppJson(payload): AppJson<ModePayload>,
) -> Result<Json<SwitchState>, ApiError> {
    let id = parse_id(&id)?;
    let mut engine = state.engine.write().await;
    engine.set_mode(id, payload.mode)?;
    Ok(Json(engine.switch(id).clone()))
}
