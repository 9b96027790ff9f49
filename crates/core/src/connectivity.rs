//! Connectivity module - what pops and what falls once a bubble attaches
//!
//! Resolution runs two flood fills over the hex adjacency of
//! [`hex_neighbors`]:
//!
//! 1. **Cluster**: from the new bubble through occupied cells of its color.
//! 2. **Support**: from every occupied ceiling cell outside the cluster,
//!    through occupied cells of any color, never entering the cluster.
//!
//! The cluster pops when it reaches [`POP_THRESHOLD`] bubbles; everything the
//! support fill did not reach then falls. Below the threshold the same sets are
//! reported as `Potential*` so the caller can preview the move.

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::geometry::hex_neighbors;
use crate::types::{CellPos, CellState, Grid, StateGrid, POP_THRESHOLD};

/// Traversal mark, private to the flood fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    /// Queued, not expanded yet
    Pending,
    Settled,
}

/// Worklist flood fill over one grid
struct Flood<'a> {
    grid: &'a Grid,
    marks: Vec<Visit>,
    queue: VecDeque<CellPos>,
}

impl<'a> Flood<'a> {
    fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            marks: vec![Visit::Unvisited; grid.cells().len()],
            queue: VecDeque::new(),
        }
    }

    #[inline]
    fn index(&self, cell: CellPos) -> usize {
        (cell.y as usize) * (self.grid.cols() as usize) + (cell.x as usize)
    }

    /// Queue an in-grid cell unless it was already reached
    fn seed(&mut self, cell: CellPos) {
        let idx = self.index(cell);
        if self.marks[idx] == Visit::Unvisited {
            self.marks[idx] = Visit::Pending;
            self.queue.push_back(cell);
        }
    }

    /// Expand from the seeds through neighbors accepted by `admit`
    fn run(&mut self, mut admit: impl FnMut(CellPos) -> bool) {
        while let Some(cell) = self.queue.pop_front() {
            let idx = self.index(cell);
            self.marks[idx] = Visit::Settled;
            for next in hex_neighbors(cell, self.grid) {
                if self.marks[self.index(next)] == Visit::Unvisited && admit(next) {
                    self.seed(next);
                }
            }
        }
    }

    fn reached(&self, idx: usize) -> bool {
        self.marks[idx] == Visit::Settled
    }
}

/// Cells of `color` connected to `seed`, as a row-major membership mask
///
/// The seed itself always belongs to the cluster.
pub fn cluster_mask(seed: CellPos, color: i32, grid: &Grid) -> Vec<bool> {
    if !grid.contains(seed) {
        return vec![false; grid.cells().len()];
    }
    let mut flood = Flood::new(grid);
    flood.seed(seed);
    flood.run(|cell| grid.color_at(cell.x, cell.y) == Some(color));
    (0..grid.cells().len()).map(|idx| flood.reached(idx)).collect()
}

/// Occupied cells hanging from the ceiling without passing through `excluded`
pub fn support_mask(grid: &Grid, excluded: &[bool]) -> Vec<bool> {
    let blocked = |cell: CellPos| {
        let idx = (cell.y as usize) * (grid.cols() as usize) + (cell.x as usize);
        excluded.get(idx).copied().unwrap_or(false)
    };

    let mut flood = Flood::new(grid);
    for x in 0..grid.cols() {
        let cell = CellPos::new(x, 0);
        if grid.is_occupied(x, 0) && !blocked(cell) {
            flood.seed(cell);
        }
    }
    flood.run(|cell| grid.is_occupied(cell.x, cell.y) && !blocked(cell));
    (0..grid.cells().len()).map(|idx| flood.reached(idx)).collect()
}

/// Classify every cell after a bubble of `color` attached at `new_cell`
///
/// `new_cell` is expected to hold a bubble of `color`. A seed outside the
/// grid has no effect: every cell comes back `Undefined`. Both floods cover
/// the whole grid down to the last row.
///
/// # Examples
///
/// ```
/// use bubble_shooter_core::check_state;
/// use bubble_shooter_core::types::{Bubble, CellPos, CellState, Grid};
///
/// let mut grid = Grid::new(8, 10);
/// for x in 2..=4 {
///     grid.set(x, 0, Some(Bubble::new(1)));
/// }
///
/// let states = check_state(CellPos::new(3, 0), 1, &grid);
/// assert_eq!(states.cluster_size(), 3);
/// assert_eq!(states.count(CellState::Remove), 3);
/// assert_eq!(states.count(CellState::Detached), 0);
/// ```
pub fn check_state(new_cell: CellPos, color: i32, grid: &Grid) -> StateGrid {
    if !grid.contains(new_cell) {
        warn!(
            x = new_cell.x,
            y = new_cell.y,
            cols = grid.cols(),
            rows = grid.rows(),
            "check_state seed outside the grid"
        );
        return StateGrid::new(grid.cols(), grid.rows());
    }

    let cluster = cluster_mask(new_cell, color, grid);
    let cluster_size = cluster.iter().filter(|&&member| member).count();
    let support = support_mask(grid, &cluster);
    let poppable = cluster_size >= POP_THRESHOLD;

    let states = grid
        .cells()
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            if cluster[idx] {
                if poppable {
                    CellState::Remove
                } else {
                    CellState::PotentialRemove
                }
            } else if support[idx] {
                CellState::Attached
            } else if cell.is_some() {
                if poppable {
                    CellState::Detached
                } else {
                    CellState::PotentialDetached
                }
            } else {
                CellState::Undefined
            }
        })
        .collect::<Vec<_>>();

    let out = match StateGrid::from_parts(grid.cols(), grid.rows(), states, cluster_size) {
        Some(out) => out,
        None => StateGrid::new(grid.cols(), grid.rows()),
    };

    debug!(
        x = new_cell.x,
        y = new_cell.y,
        color,
        cluster_size,
        detached = out.count(CellState::Detached),
        "resolved attach"
    );
    out
}
