pub mod server;
pub mod strings;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::{AppError, InputError};
use crate::state::AppState;

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(InputError::WrongType(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict => StatusCode::CONFLICT,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Parse(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Store(e) => {
                tracing::error!("Store failure: {}", e);
                "Internal server error".to_string()
            }
            other => {
                tracing::warn!("Request rejected: {}", other);
                other.to_string()
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Build the HTTP router / 构建路由
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(server::health_check))
        .route(
            "/strings",
            get(strings::list_strings).post(strings::create_string),
        )
        .route(
            "/strings/filter-by-natural-language",
            get(strings::filter_by_natural_language),
        )
        .route(
            "/strings/:string_value",
            get(strings::get_string).delete(strings::delete_string),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
