//! Axum route handlers for the Layout API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::layout::{LayoutEngine, PlacementRecord};
use crate::models::Item;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LayoutRequest {
    pub items: Vec<Item>,
    #[serde(default)]
    pub items_per_group: usize,
}

#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    pub placements: Vec<PlacementRecord>,
    pub page_count: usize,
    /// Occupied cells per page, in page order.
    pub cells_used: Vec<usize>,
}

/// POST /api/v1/layout
///
/// Places caller-supplied items on the configured grid. An item that cannot fit
/// even a fresh page fails the whole request with 422.
pub async fn handle_layout(
    State(state): State<AppState>,
    Json(request): Json<LayoutRequest>,
) -> Result<Json<LayoutResponse>, AppError> {
    let config = state.layout_config;
    let (placements, cells_used) = tokio::task::spawn_blocking(move || {
        let mut engine = LayoutEngine::new(&config)?;
        let placements = engine.layout(request.items, request.items_per_group)?;
        let grid = engine.grid();
        let cells_used = (0..grid.page_count())
            .map(|page| grid.occupied_cells(page))
            .collect::<Vec<_>>();
        Ok::<_, AppError>((placements, cells_used))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in layout: {e}")))??;

    Ok(Json(LayoutResponse {
        placements,
        page_count: cells_used.len(),
        cells_used,
    }))
}
