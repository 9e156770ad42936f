use std::fmt;

use crate::domain::{Algorithm, MAX_DIMENSION, SeedSource};

/// 60 seconds of video at [`FRAME_RATE`].
pub const DEFAULT_FRAME_COUNT: u64 = 1800;
/// 720p.
pub const DEFAULT_COLUMNS: usize = 1280;
pub const DEFAULT_ROWS: usize = 720;
/// Frames per second of the produced video.
pub const FRAME_RATE: f64 = 30.0;

/// Rejected run parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    TooManyColumns(usize),
    TooManyRows(usize),
    ZeroDimension,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyColumns(n) => write!(f, "too many columns: {n} (max {MAX_DIMENSION})"),
            Self::TooManyRows(n) => write!(f, "too many rows: {n} (max {MAX_DIMENSION})"),
            Self::ZeroDimension => write!(f, "rows and columns must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validated, immutable parameters for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    frames: u64,
    columns: usize,
    rows: usize,
    seed: SeedSource,
    algorithm: Algorithm,
}

impl Config {
    pub fn new(frames: u64, columns: usize, rows: usize) -> Result<Self, ConfigError> {
        if columns > MAX_DIMENSION {
            return Err(ConfigError::TooManyColumns(columns));
        }
        if rows > MAX_DIMENSION {
            return Err(ConfigError::TooManyRows(rows));
        }
        if columns == 0 || rows == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        Ok(Self {
            frames,
            columns,
            rows,
            seed: SeedSource::default(),
            algorithm: Algorithm::default(),
        })
    }

    /// Builder: choose where the seeder's randomness comes from
    pub fn with_seed(mut self, seed: SeedSource) -> Self {
        self.seed = seed;
        self
    }

    /// Builder: choose the transition strategy
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub const fn frames(&self) -> u64 {
        self.frames
    }

    pub const fn columns(&self) -> usize {
        self.columns
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Frame size as `(width, height)`
    pub const fn frame_size(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    pub const fn seed(&self) -> SeedSource {
        self.seed
    }

    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frames: DEFAULT_FRAME_COUNT,
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            seed: SeedSource::default(),
            algorithm: Algorithm::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.frames(), 1800);
        assert_eq!(config.frame_size(), (1280, 720));
        assert_eq!(config.seed(), SeedSource::Time);
        assert_eq!(config.algorithm(), Algorithm::Parallel);
    }

    #[test]
    fn test_dimension_limit() {
        assert_eq!(Config::new(1, 65535, 10), Err(ConfigError::TooManyColumns(65535)));
        assert_eq!(Config::new(1, 10, 65535), Err(ConfigError::TooManyRows(65535)));
        assert!(Config::new(1, 65534, 10).is_ok());
        assert!(Config::new(1, 10, 65534).is_ok());
    }

    #[test]
    fn test_error_messages() {
        assert!(ConfigError::TooManyColumns(70000).to_string().starts_with("too many columns"));
        assert!(ConfigError::TooManyRows(70000).to_string().starts_with("too many rows"));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(Config::new(1, 0, 10), Err(ConfigError::ZeroDimension));
        assert_eq!(Config::new(1, 10, 0), Err(ConfigError::ZeroDimension));
    }

    #[test]
    fn test_zero_frames_allowed() {
        assert_eq!(Config::new(0, 10, 10).unwrap().frames(), 0);
    }

    #[test]
    fn test_builders() {
        let config = Config::new(5, 8, 6)
            .unwrap()
            .with_seed(SeedSource::Fixed(11))
            .with_algorithm(Algorithm::Serial);
        assert_eq!(config.seed(), SeedSource::Fixed(11));
        assert_eq!(config.algorithm(), Algorithm::Serial);
        assert_eq!(config.frame_size(), (8, 6));
    }
}
