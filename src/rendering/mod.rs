//! Grid to RGB24 frame conversion.

use rayon::prelude::*;

use crate::domain::Grid;

/// Bytes per pixel in a rendered frame.
pub const CHANNELS: usize = 3;

/// A packed, row-major, 8-bit RGB image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Frame {
    /// Black frame of the given size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * CHANNELS],
        }
    }

    /// Frame sized to and rendered from `grid`
    pub fn from_grid(grid: &Grid) -> Self {
        let mut frame = Self::new(grid.columns(), grid.rows());
        frame.render(grid);
        frame
    }

    /// `(width, height)` in pixels
    pub const fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// RGB value at pixel `(x, y)`
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        (x < self.width && y < self.height).then(|| {
            let i = (y * self.width + x) * CHANNELS;
            [self.data[i], self.data[i + 1], self.data[i + 2]]
        })
    }

    /// Repaint this frame from `grid`, one pixel per cell.
    ///
    /// The frame must already have the grid's size.
    pub fn render(&mut self, grid: &Grid) {
        debug_assert_eq!(self.size(), (grid.columns(), grid.rows()));
        self.data
            .par_chunks_mut(CHANNELS)
            .zip(grid.cells().par_iter())
            .for_each(|(px, cell)| px.copy_from_slice(&cell.color()));
    }
}
