mod algorithm;
mod cell;
mod error;
mod grid;
pub mod neighborhood;
pub mod seeder;
mod transition;

pub use algorithm::Algorithm;
pub use cell::Cell;
pub use error::GridError;
pub use grid::{Grid, MAX_DIMENSION};
pub use neighborhood::count_alive_neighbors;
pub use seeder::{SeedSource, seed};
pub use transition::transition;
