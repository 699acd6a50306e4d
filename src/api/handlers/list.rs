//! Resource listing handler.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::state::AppState;
use crate::domain::{ApiResponse, ListQuery, ResourceKind, ResourceSummary};
use crate::error::Result;

/// List stored resources, optionally filtered by kind.
///
/// Entries are sorted by name; equal names keep kind order.
pub async fn list_resources(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<ResourceSummary>>>> {
    let kinds = query
        .kind
        .map_or_else(|| ResourceKind::ALL.to_vec(), |kind| vec![kind]);

    let mut items = Vec::new();
    for kind in kinds {
        let names = match kind {
            ResourceKind::String => state.string_service.list().await?,
            ResourceKind::Password => state.password_service.list().await?,
            ResourceKind::Id => state.id_service.list().await?,
        };
        items.extend(names.into_iter().map(|name| ResourceSummary { kind, name }));
    }

    items.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Json(ApiResponse::success(items)))
}
