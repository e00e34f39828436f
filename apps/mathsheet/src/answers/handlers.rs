//! Axum route handlers for the Answers API.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::answers::{classify, estimate_width, pack_answers, AnswerSlot, CardType, PackedAnswers};
use crate::errors::AppError;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub markup: String,
}

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub width: f32,
    pub card_type: CardType,
}

#[derive(Debug, Deserialize)]
pub struct PackRequest {
    pub answers: Vec<AnswerSlot>,
    #[serde(default)]
    pub items_per_group: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/answers/estimate
///
/// Scores a single answer's markup and reports the card type it would get.
pub async fn handle_estimate(Json(request): Json<EstimateRequest>) -> Json<EstimateResponse> {
    let width = estimate_width(&request.markup);
    Json(EstimateResponse {
        width,
        card_type: classify(width),
    })
}

/// POST /api/v1/answers/pack
///
/// Packs answer cards into rows, partitioned by round.
pub async fn handle_pack(Json(request): Json<PackRequest>) -> Result<Json<PackedAnswers>, AppError> {
    let packed = tokio::task::spawn_blocking(move || {
        pack_answers(&request.answers, request.items_per_group)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in answer packing: {e}")))?;

    Ok(Json(packed))
}
