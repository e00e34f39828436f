//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::generation::registry::GeneratorKey;
use crate::generation::sheet::{build_sheet, SheetPlan, SheetRequest};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GeneratorsResponse {
    pub generators: Vec<GeneratorKey>,
}

/// GET /api/v1/generators
///
/// Lists every registered (category, subcategory) pair.
pub async fn handle_list_generators(State(state): State<AppState>) -> Json<GeneratorsResponse> {
    Json(GeneratorsResponse {
        generators: state.registry.keys(),
    })
}

/// POST /api/v1/sheets
///
/// Full pipeline: select → pad → layout → pack answers.
pub async fn handle_build_sheet(
    State(state): State<AppState>,
    Json(request): Json<SheetRequest>,
) -> Result<Json<SheetPlan>, AppError> {
    let registry = state.registry.clone();
    let config = state.layout_config;
    let plan = tokio::task::spawn_blocking(move || build_sheet(&registry, &config, &request))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed building sheet: {e}")))??;

    Ok(Json(plan))
}
