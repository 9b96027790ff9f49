//! Grid module - the caller-owned snapshot of fixed bubbles
//!
//! Uses a flat row-major buffer (`y * cols + x`) sized once at construction.
//! Coordinates: (x, y) where x ranges 0..cols (left to right) and y ranges
//! 0..rows (ceiling to floor).

use thiserror::Error;

use crate::{Bubble, Cell, CellPos, DEFAULT_COLS, DEFAULT_ROWS};

/// Errors raised while building a grid from external data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid must have at least one row and one column")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("grid dimensions {cols}x{rows} are out of range")]
    TooLarge { cols: usize, rows: usize },
}

/// The playfield - `cols` x `rows` cells using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: i32,
    rows: i32,
    /// Flat array of cells, row-major order (y * cols + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid. Non-positive dimensions yield an empty 0x0 grid.
    pub fn new(cols: i32, rows: i32) -> Self {
        let cols = cols.max(0);
        let rows = rows.max(0);
        Self {
            cols,
            rows,
            cells: vec![None; (cols as usize) * (rows as usize)],
        }
    }

    /// Build a grid from `rows[y][x]` color values (`None` is empty)
    pub fn from_rows(rows: Vec<Vec<Option<i32>>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(GridError::Empty);
        }
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(GridError::TooLarge {
                cols: width,
                rows: height,
            });
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(GridError::Ragged {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend(row.into_iter().map(|color| color.map(Bubble::new)));
        }

        Ok(Self {
            cols: width as i32,
            rows: height as i32,
            cells,
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.cols || y < 0 || y >= self.rows {
            return None;
        }
        Some((y as usize) * (self.cols as usize) + (x as usize))
    }

    /// Number of columns
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Number of rows
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Check whether a cell lies inside the grid
    pub fn contains(&self, cell: CellPos) -> bool {
        self.index(cell.x, cell.y).is_some()
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Color of the bubble at (x, y), if any
    pub fn color_at(&self, x: i32, y: i32) -> Option<i32> {
        self.get(x, y).flatten().map(|bubble| bubble.color)
    }

    /// Iterate over every occupied cell in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (CellPos, Bubble)> + '_ {
        let cols = self.cols.max(1) as usize;
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.map(|bubble| {
                let pos = CellPos::new((idx % cols) as i32, (idx / cols) as i32);
                (pos, bubble)
            })
        })
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert to `rows[y][x]` color values
    pub fn to_rows(&self) -> Vec<Vec<Option<i32>>> {
        let cols = self.cols as usize;
        if cols == 0 {
            return Vec::new();
        }
        self.cells
            .chunks(cols)
            .map(|row| row.iter().map(|cell| cell.map(|b| b.color)).collect())
            .collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_COLS, DEFAULT_ROWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(8, 13);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(7, 0), Some(7));
        assert_eq!(grid.index(0, 1), Some(8));
        assert_eq!(grid.index(7, 12), Some(103));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(8, 0), None);
        assert_eq!(grid.index(0, 13), None);
    }

    #[test]
    fn test_grid_set_and_get() {
        let mut grid = Grid::default();

        assert!(grid.set(5, 10, Some(Bubble::new(4))));
        assert_eq!(grid.get(5, 10), Some(Some(Bubble::new(4))));
        assert!(grid.is_occupied(5, 10));
        assert_eq!(grid.cells[10 * 8 + 5], Some(Bubble::new(4)));

        assert!(grid.set(5, 10, None));
        assert_eq!(grid.get(5, 10), Some(None));
        assert!(!grid.is_occupied(5, 10));
    }

    #[test]
    fn test_grid_out_of_bounds() {
        let mut grid = Grid::default();
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(0, -1), None);
        assert_eq!(grid.get(8, 0), None);
        assert!(!grid.set(0, 13, Some(Bubble::new(1))));
        assert!(!grid.is_occupied(99, 99));
        assert_eq!(grid.color_at(-3, 2), None);
    }

    #[test]
    fn test_grid_from_rows_roundtrip() {
        let rows = vec![
            vec![Some(1), None, Some(2)],
            vec![None, Some(3), None],
        ];
        let grid = Grid::from_rows(rows.clone()).unwrap();
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.color_at(1, 1), Some(3));
        assert_eq!(grid.to_rows(), rows);
    }

    #[test]
    fn test_grid_from_rows_rejects_bad_shapes() {
        assert_eq!(Grid::from_rows(vec![]), Err(GridError::Empty));
        assert_eq!(Grid::from_rows(vec![vec![]]), Err(GridError::Empty));
        assert_eq!(
            Grid::from_rows(vec![vec![None, None], vec![None]]),
            Err(GridError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_grid_occupied_iteration() {
        let mut grid = Grid::new(4, 3);
        grid.set(3, 0, Some(Bubble::new(1)));
        grid.set(1, 2, Some(Bubble::new(7)));

        let occupied: Vec<_> = grid.occupied().collect();
        assert_eq!(
            occupied,
            vec![
                (CellPos::new(3, 0), Bubble::new(1)),
                (CellPos::new(1, 2), Bubble::new(7)),
            ]
        );
        assert_eq!(grid.occupied().count(), 2);
    }

    #[test]
    fn test_grid_negative_dimensions_are_empty() {
        let grid = Grid::new(-2, 5);
        assert_eq!(grid.cols(), 0);
        assert!(grid.cells().is_empty());
        assert_eq!(grid.occupied().count(), 0);
    }
}
