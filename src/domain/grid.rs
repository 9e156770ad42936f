use std::fmt;
use std::ops::{Index, IndexMut};

use super::{Algorithm, Cell, GridError, transition};

/// Largest supported row or column count.
pub const MAX_DIMENSION: usize = u16::MAX as usize - 1;

/// Grid manages the 2D cellular automaton grid.
/// Cells are stored row-major; dimensions never change after construction.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid with every cell off
    pub fn new(rows: usize, columns: usize) -> Result<Self, GridError> {
        if rows == 0 || columns == 0 || rows > MAX_DIMENSION || columns > MAX_DIMENSION {
            return Err(GridError::InvalidDimensions {
                rows,
                columns,
                max: MAX_DIMENSION,
            });
        }
        Ok(Self {
            rows,
            columns,
            cells: vec![Cell::Off; rows * columns],
        })
    }

    /// Build a grid from text rows: `#` alive, `o` dying, `.` off.
    pub fn from_rows(lines: &[&str]) -> Result<Self, GridError> {
        let columns = lines.first().map_or(0, |line| line.chars().count());
        let mut grid = Self::new(lines.len(), columns)?;
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != columns {
                return Err(GridError::DimensionMismatch {
                    expected: (lines.len(), columns),
                    found: (lines.len(), found),
                });
            }
            for (col, ch) in line.chars().enumerate() {
                grid[(row, col)] = match ch {
                    '#' => Cell::Alive,
                    'o' => Cell::Dying,
                    '.' => Cell::Off,
                    _ => return Err(GridError::InvalidCell { row, col, ch }),
                };
            }
        }
        Ok(grid)
    }

    /// Grid dimensions as `(rows, columns)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Convert 2D coordinates to 1D index
    const fn get_index(&self, row: usize, col: usize) -> usize {
        row * self.columns + col
    }

    const fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.columns
    }

    /// Get cell at position (with bounds checking)
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.in_bounds(row, col)
            .then(|| self.cells[self.get_index(row, col)])
    }

    /// Set cell at position. Panics when out of range.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self[(row, col)] = cell;
    }

    /// Overwrite every cell with the contents of `other`
    pub fn copy_from(&mut self, other: &Grid) -> Result<(), GridError> {
        self.check_same_shape(other)?;
        self.cells.copy_from_slice(&other.cells);
        Ok(())
    }

    pub(crate) fn check_same_shape(&self, other: &Grid) -> Result<(), GridError> {
        if self.dimensions() == other.dimensions() {
            Ok(())
        } else {
            Err(GridError::DimensionMismatch {
                expected: self.dimensions(),
                found: other.dimensions(),
            })
        }
    }

    /// Set every cell to `cell`
    pub fn fill(&mut self, cell: Cell) {
        self.cells.iter_mut().for_each(|c| *c = cell);
    }

    /// Row-major view of all cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Number of cells holding `cell`
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Evolve into a freshly allocated grid
    pub fn evolve(&self, algorithm: Algorithm) -> Self {
        let mut next = Self {
            rows: self.rows,
            columns: self.columns,
            cells: vec![Cell::Off; self.cells.len()],
        };
        transition::step(self, &mut next, algorithm);
        next
    }

    /// Iterate over all cells with their positions
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &cell)| (i / self.columns, i % self.columns, cell))
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = Cell;

    fn index(&self, (row, col): (usize, usize)) -> &Cell {
        assert!(
            self.in_bounds(row, col),
            "cell ({row}, {col}) out of range for {}x{} grid",
            self.rows,
            self.columns
        );
        &self.cells[self.get_index(row, col)]
    }
}

impl IndexMut<(usize, usize)> for Grid {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Cell {
        assert!(
            self.in_bounds(row, col),
            "cell ({row}, {col}) out of range for {}x{} grid",
            self.rows,
            self.columns
        );
        let idx = self.get_index(row, col);
        &mut self.cells[idx]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.columns) {
            for cell in row {
                let ch = match cell {
                    Cell::Alive => '#',
                    Cell::Dying => 'o',
                    Cell::Off => '.',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid {}x{}\n{self}", self.rows, self.columns)
    }
}
