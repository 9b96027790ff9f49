//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no I/O, making them usable in any context
//! (resolution logic, probe protocol, tests and benches).
//!
//! # Playfield Geometry
//!
//! The playfield is a hexagonally packed grid ("brick" packing): odd rows are
//! shifted left by half a cell relative to even rows.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_COLS` | 8 | Columns in the classic playfield |
//! | `DEFAULT_ROWS` | 13 | Rows in the classic playfield (row 0 is the ceiling) |
//! | `CELL_SHIFT` | 5 | Cell width is `1 << 5` = 32 units |
//! | `HALF_CELL_SHIFT` | 4 | Odd-row offset is `1 << 4` = 16 units |
//! | `ROW_HEIGHT` | 28 | Vertical distance between row centers |
//! | `DEFAULT_MIN_DISTANCE` | 784 | Squared collision radius (`28 * 28`) |
//! | `POP_THRESHOLD` | 3 | Minimum cluster size that pops |
//!
//! # Examples
//!
//! ```
//! use bubble_shooter_types::{Bubble, CellState, Grid, DEFAULT_COLS, DEFAULT_ROWS};
//!
//! let mut grid = Grid::default();
//! assert_eq!(grid.cols(), DEFAULT_COLS);
//! assert_eq!(grid.rows(), DEFAULT_ROWS);
//!
//! assert!(grid.set(3, 0, Some(Bubble::new(2))));
//! assert_eq!(grid.color_at(3, 0), Some(2));
//! assert!(!grid.set(-1, 0, Some(Bubble::new(2))));
//!
//! assert_eq!(CellState::from_str("detached"), Some(CellState::Detached));
//! ```

mod grid;
mod state;

pub use grid::{Grid, GridError};
pub use state::{CellState, StateGrid};

/// Default number of grid columns (8)
pub const DEFAULT_COLS: i32 = 8;

/// Default number of grid rows (13)
pub const DEFAULT_ROWS: i32 = 13;

/// Log2 of the horizontal cell width (32 units)
pub const CELL_SHIFT: i32 = 5;

/// Log2 of the odd-row horizontal offset (16 units)
pub const HALF_CELL_SHIFT: i32 = 4;

/// Vertical distance between two row centers
pub const ROW_HEIGHT: i32 = 28;

/// Default squared distance under which two bubble centers collide
pub const DEFAULT_MIN_DISTANCE: i32 = ROW_HEIGHT * ROW_HEIGHT;

/// A same-colored cluster pops only when it has at least this many bubbles
pub const POP_THRESHOLD: usize = 3;

/// A continuous position in playfield units (the moving bubble)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Integer grid coordinates
///
/// May lie outside the grid: candidate cells near the walls do, and every
/// lookup through [`Grid`] is bounds-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
}

impl CellPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether this cell sits on an odd (left-shifted) row
    #[inline]
    pub fn is_odd_row(&self) -> bool {
        self.y % 2 != 0
    }
}

impl From<(i32, i32)> for CellPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// A fixed bubble. Colors are caller-defined categories compared by equality only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bubble {
    pub color: i32,
}

impl Bubble {
    pub const fn new(color: i32) -> Self {
        Self { color }
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(Bubble)`: Cell holding a bubble
pub type Cell = Option<Bubble>;
