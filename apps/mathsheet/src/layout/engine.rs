//! Layout Engine: paginates items onto the grid and numbers them in reading order.
//!
//! # Algorithm
//! 1. Walk items in input order. With `items_per_group > 0`, every round after
//!    the first starts on a fresh page even if the current one has room.
//! 2. Ask the placement strategy for a spot on the current page. On a miss,
//!    open a new page and ask once more; a second miss is fatal.
//! 3. Sort the records by (page, row, col) and recompute round / question
//!    numbers from that order, so printed numbering follows the visual
//!    top-left-to-bottom-right order rather than generation order.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::layout::grid::{Grid, LayoutConfig};
use crate::layout::strategy::{PlacementStrategy, TopLeftStrategy};
use crate::layout::{group_position, LayoutError};
use crate::models::Item;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// An item together with where it landed.
///
/// `page` is 1-based; `row` / `col` are the 0-based top-left cell. The item's
/// own fields (including passthrough extras) serialize alongside these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    #[serde(flatten)]
    pub item: Item,
    pub page: usize,
    pub row: usize,
    pub col: usize,
    pub width_cells: usize,
    pub height_cells: usize,
    pub round_num: usize,
    pub question_num_in_round: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

/// Owns one grid exclusively; `layout` takes `&mut self`, so a single engine
/// never runs two passes at once.
pub struct LayoutEngine {
    grid: Grid,
    strategy: Box<dyn PlacementStrategy>,
}

impl LayoutEngine {
    pub fn new(config: &LayoutConfig) -> Result<Self, LayoutError> {
        Self::with_strategy(config, Box::new(TopLeftStrategy))
    }

    pub fn with_strategy(
        config: &LayoutConfig,
        strategy: Box<dyn PlacementStrategy>,
    ) -> Result<Self, LayoutError> {
        Ok(Self {
            grid: Grid::new(config)?,
            strategy,
        })
    }

    /// Grid state left behind by the most recent `layout` call.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn page_count(&self) -> usize {
        self.grid.page_count()
    }

    /// Discards all page state.
    pub fn reset(&mut self) {
        self.grid.reset();
    }

    /// Places every item and returns the records in reading order.
    ///
    /// Starts from an empty grid. On placement exhaustion the whole call fails
    /// and no records are returned.
    pub fn layout(
        &mut self,
        items: Vec<Item>,
        items_per_group: usize,
    ) -> Result<Vec<PlacementRecord>, LayoutError> {
        self.reset();
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut records = Vec::with_capacity(items.len());
        let mut page = self.grid.add_page();

        for (index, item) in items.into_iter().enumerate() {
            let missing = item.missing_fields();
            if !missing.is_empty() {
                warn!(
                    item = index + 1,
                    missing = ?missing,
                    "Layout: item is missing recommended fields"
                );
            }

            let (round_num, question_num_in_round) = group_position(index, items_per_group);
            if items_per_group > 0 && index > 0 && question_num_in_round == 1 {
                page = self.grid.add_page();
                debug!(page = page + 1, round = round_num, "Layout: round starts a new page");
            }

            let footprint = item.size.footprint();
            let (row, col) = match self.strategy.find_position(&self.grid, page, footprint) {
                Some(pos) => pos,
                None => {
                    page = self.grid.add_page();
                    debug!(page = page + 1, item = index + 1, "Layout: page full, opened next page");
                    self.strategy
                        .find_position(&self.grid, page, footprint)
                        .ok_or(LayoutError::PlacementExhausted {
                            item_index: index + 1,
                            footprint,
                            grid_width: self.grid.width(),
                            grid_height: self.grid.height(),
                            pages: self.grid.page_count(),
                        })?
                }
            };

            self.grid.place(page, row, col, footprint)?;
            records.push(PlacementRecord {
                item,
                page: page + 1,
                row,
                col,
                width_cells: footprint.width_cells,
                height_cells: footprint.height_cells,
                round_num,
                question_num_in_round,
            });
        }

        renumber(&mut records, items_per_group);
        debug!(
            items = records.len(),
            pages = self.grid.page_count(),
            "Layout complete"
        );
        Ok(records)
    }
}

/// Sorts by (page, row, col) and reassigns round / question numbers by position.
pub(crate) fn renumber(records: &mut [PlacementRecord], items_per_group: usize) {
    records.sort_by_key(|r| (r.page, r.row, r.col));
    for (index, record) in records.iter_mut().enumerate() {
        let (round_num, question_num_in_round) = group_position(index, items_per_group);
        record.round_num = round_num;
        record.question_num_in_round = question_num_in_round;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
