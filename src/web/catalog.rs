use crate::domain::models::{SwitchId, TimeBand};
use crate::error::EngineError;
use crate::services::catalog::PlanTemplate;
use crate::state::SharedState;
use crate::web::error::{ApiError, AppPath};
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct MinutesHint {
    min: u16,
    max: Option<u16>,
}

#[derive(Serialize)]
struct TemplateResponse {
    switch_id: SwitchId,
    time_band: TimeBand,
    minutes_hint: MinutesHint,
    #[serde(flatten)]
    template: PlanTemplate,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/:switch_id/:time_band", get(template_view))
        .with_state(state)
}

/// Preview of what adding this pair to the plan would snapshot.
async fn template_view(
    State(state): State<SharedState>,
    AppPath((switch_id, time_band)): AppPath<(String, String)>,
) -> Result<Json<TemplateResponse>, ApiError> {
    let switch_id = SwitchId::try_from(switch_id.as_str())?;
    let time_band = TimeBand::try_from(time_band.as_str())?;
    let engine = state.engine.read().await;
    let template = engine
        .catalog()
        .lookup(switch_id, time_band)
        .map_err(EngineError::from)?;
    let (min, max) = time_band.minutes_hint();
    Ok(Json(TemplateResponse {
        switch_id,
        time_band,
        minutes_hint: MinutesHint { min, max },
        template: template.clone(),
    }))
}
