use std::fmt;
use std::mem;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info};

use super::Config;
use crate::domain::{Cell, Grid, GridError, seed, transition};
use crate::rendering::Frame;
use crate::sink::{FrameSink, SinkError};

/// Errors that end a run early.
#[derive(Debug)]
pub enum SimulationError {
    Grid(GridError),
    Sink(SinkError),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "{e}"),
            Self::Sink(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Sink(e) => Some(e),
        }
    }
}

impl From<GridError> for SimulationError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<SinkError> for SimulationError {
    fn from(e: SinkError) -> Self {
        Self::Sink(e)
    }
}

/// Population of one emitted generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationStats {
    pub generation: u64,
    pub alive: usize,
    pub dying: usize,
}

impl GenerationStats {
    fn of(generation: u64, grid: &Grid) -> Self {
        Self {
            generation,
            alive: grid.count(Cell::Alive),
            dying: grid.count(Cell::Dying),
        }
    }
}

/// What a completed run produced.
#[derive(Debug)]
pub struct RunSummary<O> {
    pub frames: u64,
    /// Seed the generator was built from; `None` when the caller supplied the generator
    pub seed: Option<u64>,
    pub elapsed: Duration,
    /// Whatever the sink returned when closed
    pub output: O,
}

/// Simulation drives the generation loop.
///
/// Each iteration emits the current generation, swaps the two buffers so
/// the emitted grid becomes the read-only input, and computes the next
/// generation into the other buffer. The transition after the last
/// emission is never computed.
pub struct Simulation {
    config: Config,
}

impl Simulation {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Seed from the configured [`SeedSource`](crate::domain::SeedSource) and run.
    pub fn run<S, F>(&self, sink: S, observer: F) -> Result<RunSummary<S::Output>, SimulationError>
    where
        S: FrameSink,
        F: FnMut(&GenerationStats),
    {
        let (seed_value, mut rng) = self.config.seed().rng();
        info!(seed = seed_value, "seeding generation 0");
        let mut summary = self.run_with_rng(&mut rng, sink, observer)?;
        summary.seed = Some(seed_value);
        Ok(summary)
    }

    /// Seed generation 0 from `rng` and run.
    pub fn run_with_rng<R, S, F>(
        &self,
        rng: &mut R,
        sink: S,
        observer: F,
    ) -> Result<RunSummary<S::Output>, SimulationError>
    where
        R: Rng,
        S: FrameSink,
        F: FnMut(&GenerationStats),
    {
        let mut initial = Grid::new(self.config.rows(), self.config.columns())?;
        seed(&mut initial, rng);
        self.run_from(initial, sink, observer)
    }

    /// Run starting from an already populated generation 0.
    pub fn run_from<S, F>(
        &self,
        initial: Grid,
        mut sink: S,
        mut observer: F,
    ) -> Result<RunSummary<S::Output>, SimulationError>
    where
        S: FrameSink,
        F: FnMut(&GenerationStats),
    {
        let (rows, columns) = (self.config.rows(), self.config.columns());
        if initial.dimensions() != (rows, columns) {
            return Err(GridError::DimensionMismatch {
                expected: (rows, columns),
                found: initial.dimensions(),
            }
            .into());
        }
        if sink.frame_size() != self.config.frame_size() {
            return Err(SinkError::FrameSize {
                expected: self.config.frame_size(),
                found: sink.frame_size(),
            }
            .into());
        }

        let frames = self.config.frames();
        let algorithm = self.config.algorithm();
        info!(rows, columns, frames, algorithm = algorithm.name(), "starting run");
        let start = Instant::now();

        let mut current = initial;
        let mut previous = Grid::new(rows, columns)?;
        let mut frame = Frame::new(columns, rows);

        for generation in 0..frames {
            frame.render(&current);
            sink.write(&frame)?;

            let stats = GenerationStats::of(generation, &current);
            debug!(generation, alive = stats.alive, dying = stats.dying, "emitted");
            observer(&stats);

            if generation + 1 == frames {
                break;
            }
            mem::swap(&mut previous, &mut current);
            transition(&previous, &mut current, algorithm)?;
        }

        let output = sink.close()?;
        let elapsed = start.elapsed();
        info!(frames, elapsed_ms = elapsed.as_millis() as u64, "run finished");
        Ok(RunSummary {
            frames,
            seed: None,
            elapsed,
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Algorithm, SeedSource};
    use crate::sink::MemorySink;

    fn config(frames: u64, rows: usize, columns: usize) -> Config {
        Config::new(frames, columns, rows)
            .unwrap()
            .with_seed(SeedSource::Fixed(5))
    }

    #[test]
    fn test_zero_frames_emits_nothing() {
        let sim = Simulation::new(config(0, 8, 8));
        let summary = sim.run(MemorySink::new((8, 8)), |_| {}).unwrap();
        assert_eq!(summary.frames, 0);
        assert!(summary.output.is_empty());
    }

    #[test]
    fn test_emits_exactly_frame_count() {
        let sim = Simulation::new(config(7, 6, 9));
        let mut seen = Vec::new();
        let summary = sim
            .run(MemorySink::new((9, 6)), |stats| seen.push(stats.generation))
            .unwrap();
        assert_eq!(summary.output.len(), 7);
        assert_eq!(seen, (0..7).collect::<Vec<_>>());
        assert_eq!(summary.seed, Some(5));
    }

    #[test]
    fn test_frames_follow_transitions() {
        let sim = Simulation::new(config(3, 5, 5));
        let mut initial = Grid::new(5, 5).unwrap();
        initial.set(2, 1, Cell::Alive);
        initial.set(2, 2, Cell::Alive);
        let gen1 = initial.evolve(Algorithm::Serial);
        let gen2 = gen1.evolve(Algorithm::Serial);

        let frames = sim
            .run_from(initial.clone(), MemorySink::new((5, 5)), |_| {})
            .unwrap()
            .output;
        assert_eq!(frames[0], Frame::from_grid(&initial));
        assert_eq!(frames[1], Frame::from_grid(&gen1));
        assert_eq!(frames[2], Frame::from_grid(&gen2));
    }

    #[test]
    fn test_same_seed_same_frames() {
        let sim = Simulation::new(config(4, 12, 16));
        let a = sim.run(MemorySink::new((16, 12)), |_| {}).unwrap().output;
        let b = sim.run(MemorySink::new((16, 12)), |_| {}).unwrap().output;
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_mismatched_sink() {
        let sim = Simulation::new(config(1, 4, 4));
        let result = sim.run(MemorySink::new((4, 5)), |_| {});
        assert!(matches!(result, Err(SimulationError::Sink(SinkError::FrameSize { .. }))));
    }

    #[test]
    fn test_rejects_mismatched_initial_grid() {
        let sim = Simulation::new(config(1, 4, 4));
        let result = sim.run_from(Grid::new(3, 4).unwrap(), MemorySink::new((4, 4)), |_| {});
        assert!(matches!(result, Err(SimulationError::Grid(GridError::DimensionMismatch { .. }))));
    }

    #[test]
    fn test_stats_count_states() {
        let sim = Simulation::new(config(2, 3, 3));
        let initial = Grid::from_rows(&["#o.", "...", "..#"]).unwrap();
        let mut stats = Vec::new();
        sim.run_from(initial, MemorySink::new((3, 3)), |s| stats.push(*s))
            .unwrap();
        assert_eq!(stats[0], GenerationStats { generation: 0, alive: 2, dying: 1 });
        assert_eq!(stats[1].dying, 2);
    }
}
