// Question layout: size classes, the paged occupancy grid, placement strategies,
// and the pagination engine that turns an item list into placement records.
// Pure and synchronous; HTTP handlers run it inside spawn_blocking.

pub mod engine;
pub mod grid;
pub mod handlers;
pub mod size_class;
pub mod strategy;

use thiserror::Error;

// Re-export the public API consumed by other modules (sheet pipeline, handlers).
pub use engine::{LayoutEngine, PlacementRecord};
pub use grid::{default_layout_config, Grid, LayoutConfig};
pub use size_class::{Footprint, SizeClass};

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid grid dimensions {width}x{height}: both must be at least 1")]
    InvalidGrid { width: usize, height: usize },

    #[error(
        "item {item_index} with footprint {footprint} does not fit a fresh \
         {grid_width}x{grid_height} page ({pages} pages allocated)"
    )]
    PlacementExhausted {
        item_index: usize,
        footprint: Footprint,
        grid_width: usize,
        grid_height: usize,
        pages: usize,
    },

    #[error("placement of {footprint} at page {page}, row {row}, col {col} overlaps or leaves the grid")]
    InvalidPlacement {
        page: usize,
        row: usize,
        col: usize,
        footprint: Footprint,
    },
}

/// Maps a 0-based sequence index to `(round_num, position_in_round)`, both 1-based.
///
/// `items_per_group == 0` means a single ungrouped round.
pub fn group_position(index: usize, items_per_group: usize) -> (usize, usize) {
    if items_per_group == 0 {
        (1, index + 1)
    } else {
        (index / items_per_group + 1, index % items_per_group + 1)
    }
}
