pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod plans;
pub mod signals;
pub mod switches;

use crate::state::SharedState;
use axum::{routing::get, Router};

async fn health() -> &'static str {
    "OK"
}

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(dashboard::router(state.clone()))
        .nest("/catalog", catalog::router(state.clone()))
        .nest("/signals", signals::router(state.clone()))
        .nest("/switches", switches::router(state.clone()))
        .nest("/plans", plans::router(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::engine::Engine;
    use crate::services::catalog::PlanCatalog;
    use crate::state::AppState;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> (Router, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let catalog = Arc::new(PlanCatalog::builtin().unwrap());
        let engine = Engine::load(store.clone(), catalog);
        (routes(Arc::new(AppState::new(engine))), store)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app();
        let (status, _) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_signal_update_drives_recommendation() {
        let (app, _) = app();
        let (status, signals) = send(
            &app,
            Method::POST,
            "/signals",
            Some(json!({"field": "energy_level", "value": "low"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(signals["mode_bias"], "restoring");
        assert_eq!(signals["flags"]["low_energy"], true);

        let (_, rec) = send(&app, Method::GET, "/recommendation", None).await;
        assert_eq!(rec["recommended_switch_id"], "body");
        assert_eq!(rec["alternative_switch_id"], "mind");
        assert_eq!(rec["mode"], "restoring");
        assert!(!rec["reason"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_switch_rejected() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::POST, "/switches/career/checkin", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("career"));
    }

    #[tokio::test]
    async fn test_checkin_flow() {
        let (app, _) = app();
        let (status, state) = send(&app, Method::POST, "/switches/mind/start", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(state["status"], "flickering");

        for _ in 0..6 {
            send(&app, Method::POST, "/switches/mind/checkin", None).await;
        }
        let (_, outcome) = send(&app, Method::POST, "/switches/mind/checkin", None).await;
        assert_eq!(outcome["previous"], "flickering");
        assert_eq!(outcome["status"], "stable");
        assert_eq!(outcome["check_ins"], 7);

        let (_, active) = send(&app, Method::GET, "/switches/active", None).await;
        assert_eq!(active.as_array().unwrap().len(), 1);
        assert_eq!(active[0]["id"], "mind");

        let (status, state) = send(
            &app,
            Method::POST,
            "/switches/mind/mode",
            Some(json!({"mode": "maintaining"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(state["mode"], "maintaining");
        assert_eq!(state["check_ins"], 7);
    }

    #[tokio::test]
    async fn test_plan_add_toggle_remove() {
        let (app, _) = app();
        let (status, item) = send(
            &app,
            Method::POST,
            "/plans",
            Some(json!({"switch_id": "time", "time_band": "tiny"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(item["switch_id"], "time");
        assert_eq!(item["completed"], false);
        let id = item["id"].as_str().unwrap().to_string();

        let (_, toggled) = send(&app, Method::POST, &format!("/plans/{}/toggle", id), None).await;
        assert_eq!(toggled["completed"], true);

        let (_, listing) = send(&app, Method::GET, "/plans", None).await;
        assert_eq!(listing["summary"]["completed"], 1);
        assert_eq!(listing["groups"][0]["switch_id"], "time");

        let (status, _) = send(&app, Method::DELETE, &format!("/plans/{}", id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::DELETE, &format!("/plans/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_plan_defaults_to_signal_band() {
        let (app, _) = app();
        send(
            &app,
            Method::POST,
            "/signals",
            Some(json!({"field": "time_band", "value": "large"})),
        )
        .await;
        let body = json!({"switch_id": "money"});
        let (_, item) = send(&app, Method::POST, "/plans", Some(body)).await;
        assert_eq!(item["time_band"], "large");
    }

    #[tokio::test]
    async fn test_write_failure_reports_unsaved_state() {
        let (app, store) = app();
        store.set_fail_writes(true);
        let (status, body) = send(&app, Method::POST, "/switches/body/checkin", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["unsaved_changes"], true);

        let (_, switches) = send(&app, Method::GET, "/switches", None).await;
        assert_eq!(switches[0]["id"], "body");
        assert_eq!(switches[0]["check_ins"], 1);
    }

    #[tokio::test]
    async fn test_dashboard() {
        let (app, _) = app();
        let (status, dashboard) = send(&app, Method::GET, "/dashboard", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(dashboard["switches"].as_array().unwrap().len(), 8);
        assert_eq!(dashboard["priority_switches"].as_array().unwrap().len(), 2);
        assert_eq!(dashboard["mode"], "training");
    }

    #[tokio::test]
    async fn test_flag_routes_parse_path_keys() {
        let (app, _) = app();
        let (status, signals) = send(
            &app,
            Method::POST,
            "/signals/flags/env-mess",
            Some(json!({"value": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(signals["flags"]["env_mess"], true);

        let uri = "/signals/flags/money_stress/increment";
        send(&app, Method::POST, uri, None).await;
        let (_, signals) = send(&app, Method::POST, uri, None).await;
        assert_eq!(signals["flag_counts_14d"]["money_stress"], 2);

        let uri = "/signals/flags/boredom/increment";
        let (status, body) = send(&app, Method::POST, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("boredom"));
    }

    #[tokio::test]
    async fn test_add_recommended_plan() {
        let (app, _) = app();
        send(
            &app,
            Method::POST,
            "/signals",
            Some(json!({"field": "energy_level", "value": "low"})),
        )
        .await;
        let (status, item) = send(&app, Method::POST, "/plans/recommended", None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(item["switch_id"], "body");
        assert_eq!(item["time_band"], "small");
    }

    #[tokio::test]
    async fn test_catalog_preview() {
        let (app, _) = app();
        let (status, preview) = send(&app, Method::GET, "/catalog/Mind/tiny", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(preview["switch_id"], "mind");
        assert_eq!(preview["minutes_hint"]["min"], 2);
        assert!(!preview["steps"].as_array().unwrap().is_empty());

        let (status, body) = send(&app, Method::GET, "/catalog/mind/huge", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("huge"));
    }

    #[tokio::test]
    async fn test_rejected_requests_get_json_errors() {
        let (app, _) = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/signals",
            Some(json!({"field": "energy_level", "value": "extreme"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].is_string());
        assert_eq!(body["unsaved_changes"], false);

        let (status, body) = send(&app, Method::POST, "/plans/not-a-uuid/toggle", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (_, signals) = send(&app, Method::GET, "/signals", None).await;
        assert_eq!(signals["energy_level"], "medium");
    }
}
