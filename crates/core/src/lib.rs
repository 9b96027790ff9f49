//! Core resolution logic - pure, deterministic, and testable
//!
//! This crate answers the two questions a bubble shooter asks of its grid:
//!
//! - **Where does the moving bubble stop?** [`collide`] samples the cells
//!   under the moving bubble and returns the cell it snaps into.
//! - **What happens after it stops?** [`check_state`] classifies every cell:
//!   the new bubble's cluster (popped or merely previewed), the bubbles still
//!   hanging from the ceiling, and the ones that fall.
//!
//! It has no dependencies on rendering, input, or I/O. Every function borrows
//! the caller's [`Grid`](types::Grid) and never mutates it.
//!
//! # Module Structure
//!
//! - [`geometry`]: cell centers, squared distances, candidate cells, hex adjacency
//! - [`collision`]: per-frame collision check and attach-cell selection
//! - [`connectivity`]: cluster and ceiling-support flood fills, final classification
//!
//! # Example
//!
//! ```
//! use bubble_shooter_core::{check_state, collide};
//! use bubble_shooter_core::types::{Bubble, CellState, Grid, Point, DEFAULT_MIN_DISTANCE};
//!
//! let mut grid = Grid::default();
//! grid.set(1, 0, Some(Bubble::new(5)));
//! grid.set(2, 0, Some(Bubble::new(5)));
//!
//! // A bubble of the same color travelling up between them.
//! let attach = collide(Point::new(40, 20), &grid, DEFAULT_MIN_DISTANCE).unwrap();
//! grid.set(attach.x, attach.y, Some(Bubble::new(5)));
//!
//! let states = check_state(attach, 5, &grid);
//! assert!(states.is_poppable());
//! assert_eq!(states.count(CellState::Remove), 3);
//! ```

pub mod collision;
pub mod connectivity;
pub mod geometry;

pub use bubble_shooter_types as types;

// Re-export commonly used functions for convenience
pub use collision::{collide, collides, nearest_candidate, Collider};
pub use connectivity::{check_state, cluster_mask, support_mask};
pub use geometry::{candidate_cells, cell_center, hex_neighbors, squared_distance};
