use crate::domain::models::Mode;
use crate::domain::recommendation::Recommendation;
use crate::engine::Dashboard;
use crate::state::SharedState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct RecommendationResponse {
    #[serde(flatten)]
    recommendation: Recommendation,
    mode: Mode,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard_view))
        .route("/recommendation", get(recommendation_view))
        .with_state(state)
}

async fn dashboard_view(State(state): State<SharedState>) -> Json<Dashboard> {
    Json(state.engine.read().await.dashboard())
}

async fn recommendation_view(State(state): State<SharedState>) -> Json<RecommendationResponse> {
    let engine = state.engine.read().await;
    Json(RecommendationResponse {
        recommendation: engine.recommendation(),
        mode: engine.mode(),
    })
}
