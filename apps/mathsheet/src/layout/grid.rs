//! Per-page occupancy grid with row-height locking.
//!
//! Each page is a `width × height` matrix of cells plus a locked height per row.
//! The first item to touch a row pins that row to the item's height in cells;
//! afterwards only items of the same height may touch it, even where cells are
//! still free. Rows never unlock for the lifetime of the page.
//!
//! Pages are appended on demand and never removed. Page indices here are
//! 0-based; placement records expose them 1-based.

use serde::{Deserialize, Serialize};

use crate::layout::size_class::Footprint;
use crate::layout::LayoutError;

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

/// Grid dimensions shared by every page of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Columns per page.
    pub grid_width: usize,
    /// Rows per page.
    pub grid_height: usize,
}

/// 4 columns × 10 rows: two-column A4 sheets with half-width question cells.
pub fn default_layout_config() -> LayoutConfig {
    LayoutConfig {
        grid_width: 4,
        grid_height: 10,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Grid
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct PageGrid {
    /// Row-major occupancy, `height * width` cells.
    cells: Vec<bool>,
    /// Locked item height per row; `None` until the first placement touches it.
    row_heights: Vec<Option<usize>>,
}

impl PageGrid {
    fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![false; width * height],
            row_heights: vec![None; height],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    pages: Vec<PageGrid>,
}

impl Grid {
    pub fn new(config: &LayoutConfig) -> Result<Self, LayoutError> {
        if config.grid_width == 0 || config.grid_height == 0 {
            return Err(LayoutError::InvalidGrid {
                width: config.grid_width,
                height: config.grid_height,
            });
        }
        Ok(Self {
            width: config.grid_width,
            height: config.grid_height,
            pages: Vec::new(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Appends an empty page and returns its 0-based index.
    pub fn add_page(&mut self) -> usize {
        self.pages.push(PageGrid::new(self.width, self.height));
        self.pages.len() - 1
    }

    /// Drops every page.
    pub fn reset(&mut self) {
        self.pages.clear();
    }

    /// Out-of-range coordinates read as occupied.
    pub fn is_occupied(&self, page: usize, row: usize, col: usize) -> bool {
        if row >= self.height || col >= self.width {
            return true;
        }
        self.pages
            .get(page)
            .map_or(true, |p| p.cells[row * self.width + col])
    }

    /// Locked height of `row`, or `None` if no item touches it yet.
    pub fn row_height(&self, page: usize, row: usize) -> Option<usize> {
        self.pages
            .get(page)
            .and_then(|p| p.row_heights.get(row).copied().flatten())
    }

    /// True when `footprint` fits at (`row`, `col`): inside the page, over free
    /// cells only, and every spanned row is unlocked or locked to the same height.
    pub fn can_place(&self, page: usize, row: usize, col: usize, footprint: Footprint) -> bool {
        let Footprint {
            width_cells,
            height_cells,
        } = footprint;
        if page >= self.pages.len() || width_cells == 0 || height_cells == 0 {
            return false;
        }
        if row + height_cells > self.height || col + width_cells > self.width {
            return false;
        }

        (row..row + height_cells).all(|r| {
            self.row_height(page, r)
                .map_or(true, |locked| locked == height_cells)
                && (col..col + width_cells).all(|c| !self.is_occupied(page, r, c))
        })
    }

    /// Marks the rectangle occupied and locks the rows it spans.
    pub fn place(
        &mut self,
        page: usize,
        row: usize,
        col: usize,
        footprint: Footprint,
    ) -> Result<(), LayoutError> {
        if !self.can_place(page, row, col, footprint) {
            return Err(LayoutError::InvalidPlacement {
                page: page + 1,
                row,
                col,
                footprint,
            });
        }

        let width = self.width;
        let grid = &mut self.pages[page];
        for r in row..row + footprint.height_cells {
            grid.row_heights[r] = Some(footprint.height_cells);
            for c in col..col + footprint.width_cells {
                grid.cells[r * width + c] = true;
            }
        }
        Ok(())
    }

    /// Number of occupied cells on `page` (0 for unknown pages).
    pub fn occupied_cells(&self, page: usize) -> usize {
        self.pages
            .get(page)
            .map_or(0, |p| p.cells.iter().filter(|&&c| c).count())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_grid() -> Grid {
        let mut grid = Grid::new(&default_layout_config()).unwrap();
        grid.add_page();
        grid
    }

    #[test]
    fn test_zero_sized_grid_is_rejected() {
        let err = Grid::new(&LayoutConfig {
            grid_width: 0,
            grid_height: 10,
        })
        .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidGrid { width: 0, .. }));
    }

    #[test]
    fn test_new_grid_has_no_pages() {
        let grid = Grid::new(&default_layout_config()).unwrap();
        assert_eq!(grid.page_count(), 0);
        assert!(!grid.can_place(0, 0, 0, Footprint::new(1, 1)));
    }

    #[test]
    fn test_place_marks_cells_and_locks_rows() {
        let mut grid = make_grid();
        grid.place(0, 2, 1, Footprint::new(2, 2)).unwrap();

        assert!(grid.is_occupied(0, 2, 1));
        assert!(grid.is_occupied(0, 3, 2));
        assert!(!grid.is_occupied(0, 2, 0));
        assert_eq!(grid.row_height(0, 2), Some(2));
        assert_eq!(grid.row_height(0, 3), Some(2));
        assert_eq!(grid.row_height(0, 4), None);
        assert_eq!(grid.occupied_cells(0), 4);
    }

    #[test]
    fn test_locked_row_rejects_other_heights() {
        let mut grid = make_grid();
        grid.place(0, 0, 0, Footprint::new(1, 1)).unwrap();

        // Cells (0,1..) are free but row 0 is locked to height 1.
        assert!(!grid.can_place(0, 0, 1, Footprint::new(1, 2)));
        assert!(grid.can_place(0, 0, 1, Footprint::new(2, 1)));
    }

    #[test]
    fn test_tall_item_cannot_straddle_locked_row() {
        let mut grid = make_grid();
        grid.place(0, 1, 0, Footprint::new(1, 1)).unwrap();
        // Rows 0..2 would include row 1, which is locked to height 1.
        assert!(!grid.can_place(0, 0, 3, Footprint::new(1, 2)));
        assert!(grid.can_place(0, 2, 3, Footprint::new(1, 2)));
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let grid = make_grid();
        assert!(!grid.can_place(0, 0, 1, Footprint::new(4, 2)));
        assert!(!grid.can_place(0, 9, 0, Footprint::new(1, 2)));
        assert!(grid.can_place(0, 8, 0, Footprint::new(4, 2)));
    }

    #[test]
    fn test_place_on_occupied_cell_errors() {
        let mut grid = make_grid();
        grid.place(0, 0, 0, Footprint::new(2, 1)).unwrap();
        let err = grid.place(0, 0, 1, Footprint::new(1, 1)).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidPlacement { page: 1, .. }));
    }

    #[test]
    fn test_pages_are_independent() {
        let mut grid = make_grid();
        grid.place(0, 0, 0, Footprint::new(1, 1)).unwrap();
        let second = grid.add_page();
        assert_eq!(second, 1);
        assert!(grid.can_place(1, 0, 0, Footprint::new(1, 2)));
    }

    #[test]
    fn test_reset_drops_pages() {
        let mut grid = make_grid();
        grid.add_page();
        grid.reset();
        assert_eq!(grid.page_count(), 0);
        assert_eq!(grid.occupied_cells(0), 0);
    }
}
