//! Sheet pipeline: selection → layout → answer packing.
//!
//! Produces everything the renderer needs for one test: where each question
//! sits, how many pages there are, and the packed answer cards. Synchronous and
//! CPU-bound; the handler runs it inside `spawn_blocking`.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::answers::{pack_answers, AnswerSlot, PackedAnswers};
use crate::errors::AppError;
use crate::generation::registry::GeneratorRegistry;
use crate::generation::selection::{assemble_items, sheet_target, Selection, MAX_SHEET_ITEMS};
use crate::layout::{LayoutConfig, LayoutEngine, PlacementRecord};

#[derive(Debug, Clone, Deserialize)]
pub struct SheetRequest {
    pub selections: Vec<Selection>,
    #[serde(default)]
    pub rounds: usize,
    #[serde(default)]
    pub items_per_group: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SheetPlan {
    pub placements: Vec<PlacementRecord>,
    pub page_count: usize,
    pub answers: PackedAnswers,
}

pub fn build_sheet(
    registry: &GeneratorRegistry,
    config: &LayoutConfig,
    request: &SheetRequest,
) -> Result<SheetPlan, AppError> {
    if request.selections.is_empty() {
        return Err(AppError::Validation(
            "at least one selection is required".to_string(),
        ));
    }
    if request.rounds > 0 && request.items_per_group == 0 {
        return Err(AppError::Validation(
            "rounds requires a positive items_per_group".to_string(),
        ));
    }
    if sheet_target(request.rounds, request.items_per_group).is_none() {
        return Err(AppError::Validation(format!(
            "rounds x items_per_group must not exceed {MAX_SHEET_ITEMS} questions"
        )));
    }
    let requested = request
        .selections
        .iter()
        .try_fold(0usize, |total, selection| total.checked_add(selection.count));
    if requested.map_or(true, |total| total > MAX_SHEET_ITEMS) {
        return Err(AppError::Validation(format!(
            "selection counts must total at most {MAX_SHEET_ITEMS} questions"
        )));
    }

    let items = assemble_items(
        registry,
        &request.selections,
        request.rounds,
        request.items_per_group,
    )?;

    let mut engine = LayoutEngine::new(config)?;
    let placements = engine.layout(items, request.items_per_group)?;
    let page_count = engine.page_count();

    // Answers follow printed numbering, which is only final after layout.
    let slots: Vec<AnswerSlot> = placements
        .iter()
        .map(|record| AnswerSlot {
            index: record.question_num_in_round,
            answer: record.item.answer_text().to_string(),
        })
        .collect();
    let answers = pack_answers(&slots, request.items_per_group);

    info!(
        questions = placements.len(),
        pages = page_count,
        rounds = answers.rounds.len(),
        "Sheet planned"
    );

    Ok(SheetPlan {
        placements,
        page_count,
        answers,
    })
}
