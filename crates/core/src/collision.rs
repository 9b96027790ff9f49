//! Collision module - does the moving bubble hit the grid, and where does it snap?
//!
//! Only the four [`candidate_cells`] under the moving bubble are sampled: it
//! always approaches from below, so those are the only cells it can overlap.

use tracing::trace;

use crate::geometry::{candidate_cells, squared_distance};
use crate::types::{CellPos, Grid, Point, DEFAULT_MIN_DISTANCE};

/// Whether the moving bubble at `position` touches a fixed bubble
///
/// True when any candidate is occupied and its center is strictly closer
/// than `min_distance` (squared). Candidates are tried in order and the scan
/// stops at the first hit.
pub fn collides(position: Point, grid: &Grid, min_distance: i32) -> bool {
    candidate_cells(position).into_iter().any(|cell| {
        grid.is_occupied(cell.x, cell.y)
            && squared_distance(position, cell, grid).is_some_and(|d| d < min_distance)
    })
}

/// The in-grid candidate nearest to `position`, occupied or not
///
/// The running best starts at `min_distance` and only a strictly smaller
/// distance replaces it, so the earliest candidate wins ties and nothing at
/// or beyond `min_distance` is ever returned.
pub fn nearest_candidate(position: Point, grid: &Grid, min_distance: i32) -> Option<CellPos> {
    let mut best = min_distance;
    let mut nearest = None;
    for cell in candidate_cells(position) {
        if let Some(d) = squared_distance(position, cell, grid) {
            if d < best {
                best = d;
                nearest = Some(cell);
            }
        }
    }
    nearest
}

/// Collision check for one frame
///
/// Returns the attach cell on collision, None otherwise.
///
/// # Examples
///
/// ```
/// use bubble_shooter_core::collide;
/// use bubble_shooter_core::types::{Bubble, CellPos, Grid, Point, DEFAULT_MIN_DISTANCE};
///
/// let mut grid = Grid::default();
/// assert_eq!(collide(Point::new(40, 20), &grid, DEFAULT_MIN_DISTANCE), None);
///
/// grid.set(1, 0, Some(Bubble::new(3)));
/// assert_eq!(
///     collide(Point::new(40, 20), &grid, DEFAULT_MIN_DISTANCE),
///     Some(CellPos::new(2, 1))
/// );
/// ```
pub fn collide(position: Point, grid: &Grid, min_distance: i32) -> Option<CellPos> {
    if !collides(position, grid, min_distance) {
        return None;
    }
    let attach = nearest_candidate(position, grid, min_distance);
    trace!(x = position.x, y = position.y, ?attach, "moving bubble collided");
    attach
}

/// Collision checker bound to a squared collision radius
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collider {
    pub min_distance: i32,
}

impl Collider {
    pub fn new(min_distance: i32) -> Self {
        Self { min_distance }
    }

    /// See [`collide`]
    pub fn collide(&self, position: Point, grid: &Grid) -> Option<CellPos> {
        collide(position, grid, self.min_distance)
    }
}

impl Default for Collider {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_DISTANCE)
    }
}
