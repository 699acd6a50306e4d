//! Random string handlers.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::state::AppState;
use crate::domain::{
    ApiResponse, CreateStringRequest, ImportRequest, NameQuery, StringRecord, validate_name,
};
use crate::error::{AppError, Result};

/// Generate a random string.
pub async fn create_string(
    State(state): State<AppState>,
    Json(req): Json<CreateStringRequest>,
) -> Result<Json<ApiResponse<StringRecord>>> {
    req.validate(state.config.generator.max_length)
        .map_err(AppError::BadRequest)?;

    let record = state.string_service.create(&req.name, req.params).await?;

    Ok(Json(ApiResponse::success(record)))
}

/// Import an existing string.
pub async fn import_string(
    State(state): State<AppState>,
    Json(req): Json<ImportRequest>,
) -> Result<Json<ApiResponse<StringRecord>>> {
    req.validate().map_err(AppError::BadRequest)?;

    let record = state.string_service.import(&req.name, req.value).await?;

    Ok(Json(ApiResponse::success(record)))
}

/// Get a stored string.
pub async fn get_string(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<ApiResponse<StringRecord>>> {
    validate_name(&query.name).map_err(AppError::BadRequest)?;

    let record = state.string_service.get(&query.name).await?;

    Ok(Json(ApiResponse::success(record)))
}

/// Delete a stored string.
pub async fn delete_string(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<ApiResponse<()>>> {
    validate_name(&query.name).map_err(AppError::BadRequest)?;

    state.string_service.delete(&query.name).await?;

    Ok(Json(ApiResponse::ok()))
}
