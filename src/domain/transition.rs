//! The transition engine: generation `t` in, generation `t + 1` out.
//!
//! Every output cell depends only on the input grid, so output rows can be
//! computed in any order. The parallel strategy hands each rayon worker a
//! distinct `&mut [Cell]` row of the output while all workers share the
//! input by `&Grid`; the borrow checker rules out both aliasing between the
//! two buffers and overlapping writes. Rayon joins before returning.

use rayon::prelude::*;

use super::{Algorithm, Cell, Grid, GridError, neighborhood::count_alive_neighbors};

/// Compute the next generation of `input` into `output`.
///
/// Fails only if the two grids differ in shape.
pub fn transition(
    input: &Grid,
    output: &mut Grid,
    algorithm: Algorithm,
) -> Result<(), GridError> {
    input.check_same_shape(output)?;
    step(input, output, algorithm);
    Ok(())
}

/// Shapes must already match.
pub(crate) fn step(input: &Grid, output: &mut Grid, algorithm: Algorithm) {
    let columns = input.columns();
    match algorithm {
        Algorithm::Serial => output
            .cells_mut()
            .chunks_mut(columns)
            .enumerate()
            .for_each(|(row, out)| evolve_row(input, row, out)),
        Algorithm::Parallel => output
            .cells_mut()
            .par_chunks_mut(columns)
            .enumerate()
            .for_each(|(row, out)| evolve_row(input, row, out)),
    }
}

fn evolve_row(input: &Grid, row: usize, out: &mut [Cell]) {
    for (col, next) in out.iter_mut().enumerate() {
        let current = input[(row, col)];
        // Alive and dying cells ignore their neighbors; skip the count.
        *next = match current {
            Cell::Off => current.evolve(count_alive_neighbors(input, row, col)),
            _ => current.evolve(0),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (1usize..12, 1usize..12).prop_flat_map(|(rows, columns)| {
            prop::collection::vec(prop::sample::select(Cell::ALL.to_vec()), rows * columns)
                .prop_map(move |cells| {
                    let mut grid = Grid::new(rows, columns).unwrap();
                    for (i, cell) in cells.into_iter().enumerate() {
                        grid.set(i / columns, i % columns, cell);
                    }
                    grid
                })
        })
    }

    #[test]
    fn test_adjacent_pair_ignites_flanks() {
        // Two adjacent alive cells ignite the cells that see both of them.
        let grid = Grid::from_rows(&[
            "....",
            ".##.",
            "....",
        ])
        .unwrap();
        let next = grid.evolve(Algorithm::Serial);
        assert_eq!(
            next,
            Grid::from_rows(&[
                ".##.",
                ".oo.",
                ".##.",
            ])
            .unwrap()
        );
    }

    #[test]
    fn test_all_off_is_fixed_point() {
        let grid = Grid::new(7, 9).unwrap();
        assert_eq!(grid.evolve(Algorithm::Parallel), grid);
    }

    #[test]
    fn test_all_alive_decays_then_stays_off() {
        let mut grid = Grid::new(5, 6).unwrap();
        grid.fill(Cell::Alive);
        let dying = grid.evolve(Algorithm::Parallel);
        assert_eq!(dying.count(Cell::Dying), 30);
        let off = dying.evolve(Algorithm::Parallel);
        assert_eq!(off.count(Cell::Off), 30);
        assert_eq!(off.evolve(Algorithm::Parallel), off);
    }

    #[test]
    fn test_rejects_mismatched_output() {
        let input = Grid::new(3, 3).unwrap();
        let mut output = Grid::new(3, 4).unwrap();
        assert!(matches!(
            transition(&input, &mut output, Algorithm::Serial),
            Err(GridError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_output_is_fully_overwritten() {
        let input = Grid::new(3, 3).unwrap();
        let mut output = Grid::new(3, 3).unwrap();
        output.fill(Cell::Dying);
        transition(&input, &mut output, Algorithm::Parallel).unwrap();
        assert_eq!(output.count(Cell::Off), 9);
    }

    proptest! {
        #[test]
        fn serial_and_parallel_agree(grid in arb_grid()) {
            prop_assert_eq!(grid.evolve(Algorithm::Serial), grid.evolve(Algorithm::Parallel));
        }

        #[test]
        fn rule_holds_for_every_cell(grid in arb_grid()) {
            let next = grid.evolve(Algorithm::Parallel);
            prop_assert_eq!(next.dimensions(), grid.dimensions());
            for (row, col, cell) in grid.iter_cells() {
                let expected = match cell {
                    Cell::Alive => Cell::Dying,
                    Cell::Dying => Cell::Off,
                    Cell::Off if count_alive_neighbors(&grid, row, col) == 2 => Cell::Alive,
                    Cell::Off => Cell::Off,
                };
                prop_assert_eq!(next[(row, col)], expected);
            }
        }
    }
}
