use crate::error::{EngineError, ValidationError};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    unsaved_changes: bool,
}

pub enum ApiError {
    Engine(EngineError),
    /// The request never reached the engine: bad body or path segment.
    Rejected { status: StatusCode, message: String },
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Engine(EngineError::Validation(err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Engine(err) => {
                let status = match &err {
                    EngineError::Validation(ValidationError::UnknownPlanItem(_)) => {
                        StatusCode::NOT_FOUND
                    }
                    EngineError::Validation(_) => StatusCode::BAD_REQUEST,
                    EngineError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
                    EngineError::Persistence(_) => StatusCode::SERVICE_UNAVAILABLE,
                };
                if status.is_server_error() {
                    tracing::error!("Request failed: {}", err);
                }
                let body = ErrorResponse {
                    error: err.to_string(),
                    unsaved_changes: err.is_recoverable(),
                };
                (status, body)
            }
            ApiError::Rejected { status, message } => {
                tracing::debug!("Rejected request: {}", message);
                let body = ErrorResponse {
                    error: message,
                    unsaved_changes: false,
                };
                (status, body)
            }
        };
        (status, Json(body)).into_response()
    }
}

/// `Json` whose rejections answer with the JSON error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// `Path` whose rejections answer with the JSON error body.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);
