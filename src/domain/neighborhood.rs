//! Moore-neighborhood counting with clipped (non-wrapping) edges.

use super::Grid;

/// Row and column offsets of the 8 Moore neighbors.
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// In-bound neighbor coordinates of `(row, col)`; cells past an edge are skipped.
fn neighbors(grid: &Grid, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
    let (rows, columns) = grid.dimensions();
    OFFSETS.iter().filter_map(move |&(dr, dc)| {
        let r = row.checked_add_signed(dr).filter(|&r| r < rows)?;
        let c = col.checked_add_signed(dc).filter(|&c| c < columns)?;
        Some((r, c))
    })
}

/// Count alive Moore neighbors of `(row, col)`, excluding anything outside the grid.
pub fn count_alive_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    neighbors(grid, row, col)
        .filter(|&(r, c)| grid[(r, c)].is_alive())
        .count() as u8
}

/// Number of neighbors `(row, col)` has inside the grid: 3 at corners, 5 on edges, 8 inside.
pub fn neighbor_capacity(grid: &Grid, row: usize, col: usize) -> u8 {
    neighbors(grid, row, col).count() as u8
}
