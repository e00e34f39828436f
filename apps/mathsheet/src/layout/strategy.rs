//! Placement strategies: pluggable search for a free spot on a page.
//!
//! The engine holds a `Box<dyn PlacementStrategy>`; `TopLeftStrategy` is the
//! default and the only one shipped. Scan order decides visual order, which in
//! turn decides question numbering, so any replacement changes printed output.

use crate::layout::grid::Grid;
use crate::layout::size_class::Footprint;

/// Finds a top-left `(row, col)` on `page` where `footprint` can be committed.
pub trait PlacementStrategy: Send + Sync {
    fn find_position(&self, grid: &Grid, page: usize, footprint: Footprint)
        -> Option<(usize, usize)>;
}

/// Row-major first fit: rows top-to-bottom, then columns left-to-right.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopLeftStrategy;

impl PlacementStrategy for TopLeftStrategy {
    fn find_position(
        &self,
        grid: &Grid,
        page: usize,
        footprint: Footprint,
    ) -> Option<(usize, usize)> {
        (0..grid.height())
            .flat_map(|row| (0..grid.width()).map(move |col| (row, col)))
            .find(|&(row, col)| grid.can_place(page, row, col, footprint))
    }
}
