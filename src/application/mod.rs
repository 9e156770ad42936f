mod config;
pub mod progress;
mod simulation;

pub use config::{
    Config, ConfigError, DEFAULT_COLUMNS, DEFAULT_FRAME_COUNT, DEFAULT_ROWS, FRAME_RATE,
};
pub use progress::Progress;
pub use simulation::{GenerationStats, RunSummary, Simulation, SimulationError};
