//! Classification results handed back by the connectivity resolver.

use crate::{CellPos, POP_THRESHOLD};

/// Per-cell outcome of resolving a freshly attached bubble
///
/// - **Undefined**: Empty cell, or occupied but untouched by the resolution
/// - **PotentialRemove**: In the new bubble's cluster, but the cluster is too small to pop
/// - **Remove**: In a cluster that pops
/// - **Attached**: Still hangs from the ceiling
/// - **PotentialDetached**: Would fall if the (too small) cluster were popped
/// - **Detached**: Loses its support and falls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Undefined,
    PotentialRemove,
    Remove,
    Attached,
    PotentialDetached,
    Detached,
}

impl CellState {
    pub const ALL: [CellState; 6] = [
        CellState::Undefined,
        CellState::PotentialRemove,
        CellState::Remove,
        CellState::Attached,
        CellState::PotentialDetached,
        CellState::Detached,
    ];

    /// Parse from the camelCase wire name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use bubble_shooter_types::CellState;
    ///
    /// assert_eq!(CellState::from_str("potentialRemove"), Some(CellState::PotentialRemove));
    /// assert_eq!(CellState::from_str("ATTACHED"), Some(CellState::Attached));
    /// assert_eq!(CellState::from_str("falling"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s))
    }

    /// camelCase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            CellState::Undefined => "undefined",
            CellState::PotentialRemove => "potentialRemove",
            CellState::Remove => "remove",
            CellState::Attached => "attached",
            CellState::PotentialDetached => "potentialDetached",
            CellState::Detached => "detached",
        }
    }

    /// Whether the caller has to take this bubble off the grid
    pub fn leaves_grid(&self) -> bool {
        matches!(self, CellState::Remove | CellState::Detached)
    }
}

/// Output of one resolution: a state per cell, same shape as the input grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateGrid {
    cols: i32,
    rows: i32,
    states: Vec<CellState>,
    cluster_size: usize,
}

impl StateGrid {
    /// All-`Undefined` grid with an empty cluster
    pub fn new(cols: i32, rows: i32) -> Self {
        let cols = cols.max(0);
        let rows = rows.max(0);
        Self {
            cols,
            rows,
            states: vec![CellState::Undefined; (cols as usize) * (rows as usize)],
            cluster_size: 0,
        }
    }

    /// Assemble from a row-major state buffer
    ///
    /// Returns None if the buffer length does not match the dimensions.
    pub fn from_parts(
        cols: i32,
        rows: i32,
        states: Vec<CellState>,
        cluster_size: usize,
    ) -> Option<Self> {
        if cols < 0 || rows < 0 || states.len() != (cols as usize) * (rows as usize) {
            return None;
        }
        Some(Self {
            cols,
            rows,
            states,
            cluster_size,
        })
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Size of the new bubble's same-colored cluster
    pub fn cluster_size(&self) -> usize {
        self.cluster_size
    }

    /// Whether the cluster is large enough to pop
    pub fn is_poppable(&self) -> bool {
        self.cluster_size >= POP_THRESHOLD
    }

    /// State at (x, y); None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<CellState> {
        if x < 0 || x >= self.cols || y < 0 || y >= self.rows {
            return None;
        }
        Some(self.states[(y as usize) * (self.cols as usize) + (x as usize)])
    }

    /// Cells holding `state`, in row-major order
    pub fn cells_in(&self, state: CellState) -> impl Iterator<Item = CellPos> + '_ {
        let cols = self.cols.max(1) as usize;
        self.states
            .iter()
            .enumerate()
            .filter(move |(_, s)| **s == state)
            .map(move |(idx, _)| CellPos::new((idx % cols) as i32, (idx / cols) as i32))
    }

    /// Number of cells holding `state`
    pub fn count(&self, state: CellState) -> usize {
        self.states.iter().filter(|s| **s == state).count()
    }

    /// Row-major view of the states
    pub fn states(&self) -> &[CellState] {
        &self.states
    }

    /// Convert to `rows[y][x]`
    pub fn to_rows(&self) -> Vec<Vec<CellState>> {
        let cols = self.cols as usize;
        if cols == 0 {
            return Vec::new();
        }
        self.states.chunks(cols).map(<[CellState]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_names_roundtrip() {
        for state in CellState::ALL {
            assert_eq!(CellState::from_str(state.as_str()), Some(state));
        }
    }

    #[test]
    fn only_committed_states_leave_the_grid() {
        assert!(CellState::Remove.leaves_grid());
        assert!(CellState::Detached.leaves_grid());
        assert!(!CellState::PotentialRemove.leaves_grid());
        assert!(!CellState::PotentialDetached.leaves_grid());
        assert!(!CellState::Attached.leaves_grid());
    }

    #[test]
    fn state_grid_lookup_and_listing() {
        let mut states = vec![CellState::Undefined; 6];
        states[1] = CellState::Remove;
        states[5] = CellState::Remove;
        let grid = StateGrid::from_parts(3, 2, states, 2).unwrap();

        assert_eq!(grid.get(1, 0), Some(CellState::Remove));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(
            grid.cells_in(CellState::Remove).collect::<Vec<_>>(),
            vec![CellPos::new(1, 0), CellPos::new(2, 1)]
        );
        assert_eq!(grid.count(CellState::Remove), 2);
        assert!(!grid.is_poppable());
        assert_eq!(grid.to_rows()[1][2], CellState::Remove);
    }

    #[test]
    fn state_grid_rejects_mismatched_buffer() {
        assert!(StateGrid::from_parts(3, 2, vec![CellState::Undefined; 5], 0).is_none());
    }
}
