//! Grid and geometry tests

use bubble_shooter::core::{candidate_cells, cell_center, hex_neighbors, squared_distance};
use bubble_shooter::types::{Bubble, CellPos, Grid, GridError, Point, DEFAULT_COLS, DEFAULT_ROWS};

#[test]
fn test_grid_new_empty() {
    let grid = Grid::default();
    assert_eq!(grid.cols(), DEFAULT_COLS);
    assert_eq!(grid.rows(), DEFAULT_ROWS);

    for y in 0..DEFAULT_ROWS {
        for x in 0..DEFAULT_COLS {
            assert_eq!(grid.get(x, y), Some(None), "Cell ({}, {}) should be empty", x, y);
        }
    }
    assert_eq!(grid.occupied().count(), 0);
}

#[test]
fn test_grid_from_rows_reports_shape_errors() {
    let err = Grid::from_rows(vec![vec![Some(1), None], vec![None, None, None]]).unwrap_err();
    assert_eq!(
        err,
        GridError::Ragged {
            row: 1,
            expected: 2,
            found: 3
        }
    );
    assert_eq!(err.to_string(), "row 1 has 3 cells, expected 2");
}

#[test]
fn test_every_candidate_sits_on_the_position_rows() {
    for y in (0..DEFAULT_ROWS * 28).step_by(3) {
        for x in (0..DEFAULT_COLS * 32).step_by(3) {
            let top_y = y / 28;
            for (i, cell) in candidate_cells(Point::new(x, y)).iter().enumerate() {
                let expected_row = if i < 2 { top_y } else { top_y + 1 };
                assert_eq!(cell.y, expected_row, "candidate {} for ({}, {})", i, x, y);
            }
        }
    }
}

#[test]
fn test_candidates_cover_the_nearest_cell_below() {
    // Whatever the position, one of the two lower candidates is the nearest
    // cell center of the next row.
    let grid = Grid::new(64, 64);
    for y in (0..10 * 28).step_by(5) {
        for x in (32..30 * 32).step_by(3) {
            let position = Point::new(x, y);
            let below = y / 28 + 1;
            let nearest_below = (0..64)
                .map(|cx| CellPos::new(cx, below))
                .min_by_key(|c| squared_distance(position, *c, &grid).unwrap())
                .unwrap();
            let nearest_d = squared_distance(position, nearest_below, &grid).unwrap();

            let candidates = candidate_cells(position);
            let best_lower = candidates[2..]
                .iter()
                .map(|c| squared_distance(position, *c, &grid).unwrap())
                .min()
                .unwrap();
            assert_eq!(best_lower, nearest_d, "position ({}, {})", x, y);
        }
    }
}

#[test]
fn test_neighbors_are_exactly_the_touching_centers() {
    // Touching centers are one cell width apart on a row, or (16, 28) apart across rows.
    let grid = Grid::new(8, 13);
    for y in 0..grid.rows() {
        for x in 0..grid.cols() {
            let cell = CellPos::new(x, y);
            let c = cell_center(cell);
            let mut expected: Vec<CellPos> = Vec::new();
            for oy in 0..grid.rows() {
                for ox in 0..grid.cols() {
                    let other = CellPos::new(ox, oy);
                    let o = cell_center(other);
                    let d = (o.x - c.x).pow(2) + (o.y - c.y).pow(2);
                    if d == 32 * 32 || d == 16 * 16 + 28 * 28 {
                        expected.push(other);
                    }
                }
            }
            let mut actual: Vec<CellPos> = hex_neighbors(cell, &grid).into_iter().collect();
            actual.sort();
            expected.sort();
            assert_eq!(actual, expected, "neighbors of {:?}", cell);
        }
    }
}

#[test]
fn test_grid_snapshot_is_not_mutated_by_queries() {
    let mut grid = Grid::default();
    grid.set(3, 0, Some(Bubble::new(1)));
    grid.set(3, 1, Some(Bubble::new(1)));
    let before = grid.clone();

    let _ = bubble_shooter::core::collide(Point::new(100, 30), &grid, 784);
    let _ = bubble_shooter::core::check_state(CellPos::new(3, 1), 1, &grid);
    assert_eq!(grid, before);
}
