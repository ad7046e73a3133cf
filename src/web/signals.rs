use crate::domain::models::FlagKey;
use crate::domain::signals::{SignalUpdate, Signals};
use crate::state::SharedState;
use crate::web::error::{ApiError, AppJson, AppPath};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct FlagPayload {
    value: bool,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(get_signals).post(update_signals))
        .route("/flags/:key", post(set_flag))
        .route("/flags/:key/increment", post(increment_flag_count))
        .with_state(state)
}

async fn get_signals(State(state): State<SharedState>) -> Json<Signals> {
    let engine = state.engine.read().await;
    Json(engine.signals().clone())
}

async fn update_signals(
    State(state): State<SharedState>,
    AppJson(update): AppJson<SignalUpdate>,
) -> Result<Json<Signals>, ApiError> {
    let mut engine = state.engine.write().await;
    let signals = engine.update_signals(update)?.clone();
    Ok(Json(signals))
}

async fn set_flag(
    State(state): State<SharedState>,
    AppPath(key): AppPath<String>,
    AppJson(payload): AppJson<FlagPayload>,
) -> Result<Json<Signals>, ApiError> {
    let key = FlagKey::try_from(key.as_str())?;
    let mut engine = state.engine.write().await;
    let signals = engine.set_flag(key, payload.value)?.clone();
    Ok(Json(signals))
}

async fn increment_flag_count(
    State(state): State<SharedState>,
    AppPath(key): AppPath<String>,
) -> Result<Json<Signals>, ApiError> {
    let key = FlagKey::try_from(key.as_str())?;
    let mut engine = state.engine.write().await;
    let signals = engine.increment_flag_count(key)?.clone();
    Ok(Json(signals))
}
