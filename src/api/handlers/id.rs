//! Random id handlers.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::state::AppState;
use crate::domain::{ApiResponse, CreateIdRequest, IdRecord, ImportRequest, NameQuery, validate_name};
use crate::error::{AppError, Result};

/// Generate a random id.
pub async fn create_id(
    State(state): State<AppState>,
    Json(req): Json<CreateIdRequest>,
) -> Result<Json<ApiResponse<IdRecord>>> {
    req.validate(state.config.generator.max_byte_length)
        .map_err(AppError::BadRequest)?;

    let record = state
        .id_service
        .create(&req.name, req.byte_length, req.prefix)
        .await?;

    Ok(Json(ApiResponse::success(record)))
}

/// Import an existing id from `<prefix>,<b64url>`.
pub async fn import_id(
    State(state): State<AppState>,
    Json(req): Json<ImportRequest>,
) -> Result<Json<ApiResponse<IdRecord>>> {
    req.validate().map_err(AppError::BadRequest)?;

    let record = state.id_service.import(&req.name, &req.value).await?;

    Ok(Json(ApiResponse::success(record)))
}

/// Get a stored id.
pub async fn get_id(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<ApiResponse<IdRecord>>> {
    validate_name(&query.name).map_err(AppError::BadRequest)?;

    let record = state.id_service.get(&query.name).await?;

    Ok(Json(ApiResponse::success(record)))
}

/// Delete a stored id.
pub async fn delete_id(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<ApiResponse<()>>> {
    validate_name(&query.name).map_err(AppError::BadRequest)?;

    state.id_service.delete(&query.name).await?;

    Ok(Json(ApiResponse::ok()))
}
