//! Random password handlers.
//!
//! Same contract as the string handlers. Records carry a bcrypt hash and the
//! id is always `"none"`.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::state::AppState;
use crate::domain::{
    ApiResponse, CreateStringRequest, ImportRequest, NameQuery, StringRecord, validate_name,
};
use crate::error::{AppError, Result};

/// Generate a random password.
pub async fn create_password(
    State(state): State<AppState>,
    Json(req): Json<CreateStringRequest>,
) -> Result<Json<ApiResponse<StringRecord>>> {
    req.validate(state.config.generator.max_length)
        .map_err(AppError::BadRequest)?;

    let record = state
        .password_service
        .create(&req.name, req.params)
        .await?;

    Ok(Json(ApiResponse::success(record)))
}

/// Import an existing password.
pub async fn import_password(
    State(state): State<AppState>,
    Json(req): Json<ImportRequest>,
) -> Result<Json<ApiResponse<StringRecord>>> {
    req.validate().map_err(AppError::BadRequest)?;

    let record = state.password_service.import(&req.name, req.value).await?;

    Ok(Json(ApiResponse::success(record)))
}

/// Get a stored password.
pub async fn get_password(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<ApiResponse<StringRecord>>> {
    validate_name(&query.name).map_err(AppError::BadRequest)?;

    let record = state.password_service.get(&query.name).await?;

    Ok(Json(ApiResponse::success(record)))
}

/// Delete a stored password.
pub async fn delete_password(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<ApiResponse<()>>> {
    validate_name(&query.name).map_err(AppError::BadRequest)?;

    state.password_service.delete(&query.name).await?;

    Ok(Json(ApiResponse::ok()))
}
