use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::error::{AppError, InputError};
use crate::models::{
    ListStringsParams, ListStringsResponse, NaturalLanguageParams, NaturalLanguageResponse, Record,
};
use crate::service::{filters_from_params, value_from_body};
use crate::state::AppState;

/// POST /strings
pub async fn create_string(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body.map_err(|e| InputError::Malformed {
        field: "body",
        value: e.body_text(),
    })?;
    let value = value_from_body(&body)?;
    let record = state.strings.create(value).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /strings
pub async fn list_strings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListStringsParams>,
) -> Result<Json<ListStringsResponse>, AppError> {
    let spec = filters_from_params(&params)?;
    let data = state.strings.list(&spec).await?;
    Ok(Json(ListStringsResponse {
        count: data.len(),
        data,
        filters_applied: spec,
    }))
}

/// GET /strings/filter-by-natural-language?query=...
pub async fn filter_by_natural_language(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NaturalLanguageParams>,
) -> Result<Json<NaturalLanguageResponse>, AppError> {
    let query = params.query.unwrap_or_default();
    let (data, interpreted_query) = state.strings.query_natural(&query).await?;
    Ok(Json(NaturalLanguageResponse {
        count: data.len(),
        data,
        interpreted_query,
    }))
}

/// GET /strings/{string_value}
pub async fn get_string(
    State(state): State<Arc<AppState>>,
    Path(value): Path<String>,
) -> Result<Json<Record>, AppError> {
    Ok(Json(state.strings.fetch(&value).await?))
}

/// DELETE /strings/{string_value}
pub async fn delete_string(
    State(state): State<Arc<AppState>>,
    Path(value): Path<String>,
) -> Result<StatusCode, AppError> {
    state.strings.delete(&value).await?;
    Ok(StatusCode::NO_CONTENT)
}
