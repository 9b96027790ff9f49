//! Geometry module - continuous playfield coordinates vs. the hex grid
//!
//! Cell centers sit on a brick pattern: each row is `ROW_HEIGHT` units below
//! the previous one, cells are `1 << CELL_SHIFT` units wide, and odd rows are
//! pulled left by half a cell. All arithmetic is plain `i32` (truncating `/`
//! and `%`, arithmetic `>>`), so positions just outside the grid map to
//! out-of-grid cells that lookups then skip.

use arrayvec::ArrayVec;

use crate::types::{CellPos, Grid, Point, CELL_SHIFT, HALF_CELL_SHIFT, ROW_HEIGHT};

/// Pixel center of a cell
///
/// # Examples
///
/// ```
/// use bubble_shooter_core::geometry::cell_center;
/// use bubble_shooter_core::types::{CellPos, Point};
///
/// assert_eq!(cell_center(CellPos::new(2, 0)), Point::new(64, 0));
/// assert_eq!(cell_center(CellPos::new(2, 1)), Point::new(48, 28));
/// ```
#[inline]
pub fn cell_center(cell: CellPos) -> Point {
    Point::new(
        (cell.x << CELL_SHIFT) - ((cell.y % 2) << HALF_CELL_SHIFT),
        cell.y * ROW_HEIGHT,
    )
}

/// Squared distance from `position` to the center of `cell`
///
/// Returns None when `cell` is outside `grid`; callers must treat that as
/// "never closer", not as zero. Saturates at `i32::MAX` for far-away positions.
#[inline]
pub fn squared_distance(position: Point, cell: CellPos, grid: &Grid) -> Option<i32> {
    if !grid.contains(cell) {
        return None;
    }
    let center = cell_center(cell);
    let dx = center.x.saturating_sub(position.x);
    let dy = center.y.saturating_sub(position.y);
    Some(dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy)))
}

/// The four cells a bubble moving up through `position` can be touching
///
/// Order is fixed and significant (it breaks distance ties):
/// the cell under the position, its right neighbor, then the two cells of the
/// next row down, the second one picked on the side of the half-cell the
/// position falls in.
pub fn candidate_cells(position: Point) -> [CellPos; 4] {
    let Point { x, y } = position;
    let top_y = y / ROW_HEIGHT;
    let parity = top_y % 2;
    let top_x = x.saturating_add(parity << HALF_CELL_SHIFT) >> CELL_SHIFT;

    let half = 1 << HALF_CELL_SHIFT;
    let second_below = if ((x & half) ^ ((top_y & 1) << HALF_CELL_SHIFT)) == 0 {
        top_x - parity
    } else {
        top_x + 2 - parity
    };

    [
        CellPos::new(top_x, top_y),
        CellPos::new(top_x + 1, top_y),
        CellPos::new(top_x + 1 - parity, top_y + 1),
        CellPos::new(second_below, top_y + 1),
    ]
}

/// In-grid hex neighbors of `cell`
///
/// Order: left, right, up, up-diagonal, down, down-diagonal. Even rows take
/// their diagonals on the right (`x + 1`), odd rows on the left (`x - 1`).
/// Downward neighbors reach the last row; there is no `rows - 2` cutoff.
pub fn hex_neighbors(cell: CellPos, grid: &Grid) -> ArrayVec<CellPos, 6> {
    let CellPos { x, y } = cell;
    let diagonal_x = if cell.is_odd_row() { x - 1 } else { x + 1 };

    let mut out = ArrayVec::new();
    for pos in [
        CellPos::new(x - 1, y),
        CellPos::new(x + 1, y),
        CellPos::new(x, y - 1),
        CellPos::new(diagonal_x, y - 1),
        CellPos::new(x, y + 1),
        CellPos::new(diagonal_x, y + 1),
    ] {
        if grid.contains(pos) {
            out.push(pos);
        }
    }
    out
}
