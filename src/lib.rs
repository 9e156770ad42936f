// Domain layer - Core automaton logic
pub mod domain;

// Application layer - Configuration and the generation loop
pub mod application;

// Infrastructure layer - Rendering, frame output, logging
pub mod logging;
pub mod rendering;
pub mod sink;

// Re-exports for convenience
pub use application::{Config, ConfigError, Simulation, SimulationError};
pub use domain::{Algorithm, Cell, Grid, GridError, SeedSource};
pub use rendering::Frame;
pub use sink::{FrameSink, SinkError};
