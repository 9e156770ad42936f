//! Generation zero: random noise in a centered square.

use std::ops::Range;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{Cell, Grid};

/// Side of the seeded square as a fraction of the shorter grid side.
pub const SEED_FRACTION: f64 = 0.4;

/// Where the seeder's randomness comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SeedSource {
    /// Derive a seed from the wall clock
    #[default]
    Time,
    /// Reproducible runs
    Fixed(u64),
}

impl SeedSource {
    /// Resolve to a concrete seed value
    pub fn resolve(self) -> u64 {
        match self {
            SeedSource::Fixed(seed) => seed,
            SeedSource::Time => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |d| d.as_nanos() as u64),
        }
    }

    /// Resolve and build the generator the seeder draws from
    pub fn rng(self) -> (u64, StdRng) {
        let seed = self.resolve();
        (seed, StdRng::seed_from_u64(seed))
    }
}

/// Half-open `(rows, columns)` ranges of the centered seed square.
pub fn seed_region(rows: usize, columns: usize) -> (Range<usize>, Range<usize>) {
    let side = (rows.min(columns) as f64 * SEED_FRACTION).floor() as usize;
    (
        (rows - side) / 2..(rows + side) / 2,
        (columns - side) / 2..(columns + side) / 2,
    )
}

/// Reset `grid` to off and fill the centered square with 50/50 alive/off noise.
pub fn seed<R: Rng>(grid: &mut Grid, rng: &mut R) {
    grid.fill(Cell::Off);
    let (rows, columns) = seed_region(grid.rows(), grid.columns());
    for row in rows {
        for col in columns.clone() {
            if rng.random_bool(0.5) {
                grid[(row, col)] = Cell::Alive;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(rows: usize, columns: usize, seed_value: u64) -> Grid {
        let mut grid = Grid::new(rows, columns).unwrap();
        let (_, mut rng) = SeedSource::Fixed(seed_value).rng();
        seed(&mut grid, &mut rng);
        grid
    }

    #[test]
    fn test_region_is_centered() {
        assert_eq!(seed_region(10, 10), (3..7, 3..7));
        assert_eq!(seed_region(720, 1280), (216..504, 496..784));
        // 0.4 * 2 floors to zero: nothing is seeded.
        assert!(seed_region(2, 2).0.is_empty());
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let a = seeded(40, 60, 7);
        let b = seeded(40, 60, 7);
        assert_eq!(a.cells(), b.cells());
    }

    #[test]
    fn test_different_seeds_differ() {
        assert_ne!(seeded(50, 50, 1), seeded(50, 50, 2));
    }

    #[test]
    fn test_only_square_is_seeded() {
        let grid = seeded(30, 50, 42);
        let (rows, columns) = seed_region(30, 50);
        for (row, col, cell) in grid.iter_cells() {
            assert_ne!(cell, Cell::Dying);
            if !(rows.contains(&row) && columns.contains(&col)) {
                assert_eq!(cell, Cell::Off, "({row}, {col}) outside the seed square");
            }
        }
        let alive = grid.count(Cell::Alive);
        let area = rows.len() * columns.len();
        assert!(alive > area / 4 && alive < area * 3 / 4, "alive={alive} area={area}");
    }

    #[test]
    fn test_seed_clears_previous_contents() {
        let mut grid = Grid::new(10, 10).unwrap();
        grid.fill(Cell::Dying);
        let (_, mut rng) = SeedSource::Fixed(3).rng();
        seed(&mut grid, &mut rng);
        assert_eq!(grid.count(Cell::Dying), 0);
        assert_eq!(grid[(0, 0)], Cell::Off);
    }

    #[test]
    fn test_fixed_source_resolves_to_itself() {
        assert_eq!(SeedSource::Fixed(99).resolve(), 99);
    }
}
