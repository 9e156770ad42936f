//! Error types for grid construction and buffer operations.

use std::fmt;

/// Errors arising from grid allocation or from pairing two grids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Rows or columns are zero or exceed the supported maximum.
    InvalidDimensions {
        rows: usize,
        columns: usize,
        max: usize,
    },
    /// Text grid contained a character other than `#`, `o` or `.`.
    InvalidCell { row: usize, col: usize, ch: char },
    /// Two grids that must share a shape do not.
    DimensionMismatch {
        /// `(rows, columns)` of the grid that was expected.
        expected: (usize, usize),
        /// `(rows, columns)` of the grid that was supplied.
        found: (usize, usize),
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, columns, max } => {
                write!(
                    f,
                    "invalid grid dimensions {rows}x{columns}: each side must be in 1..={max}"
                )
            }
            Self::InvalidCell { row, col, ch } => {
                write!(f, "invalid cell {ch:?} at ({row}, {col}): expected '#', 'o' or '.'")
            }
            Self::DimensionMismatch { expected, found } => write!(
                f,
                "grid dimension mismatch: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
        }
    }
}

impl std::error::Error for GridError {}
