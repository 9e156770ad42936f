use std::path::PathBuf;

use anyhow::{Context, Result};
use brians_brain::{
    Algorithm, Config, SeedSource, Simulation,
    application::{
        DEFAULT_COLUMNS, DEFAULT_FRAME_COUNT, DEFAULT_ROWS, FRAME_RATE, GenerationStats, Progress,
    },
    logging,
    sink::{DEFAULT_CODEC, FfmpegSink, PngSequenceSink, RawSink},
};
use clap::{Parser, ValueEnum};
use tracing::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SinkKind {
    /// Lossless video via an ffmpeg child process
    Ffmpeg,
    /// Numbered PNG files in a directory
    Png,
    /// Headerless RGB24 stream
    Raw,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AlgorithmArg {
    Serial,
    Parallel,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Serial => Algorithm::Serial,
            AlgorithmArg::Parallel => Algorithm::Parallel,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "brians-brain",
    version,
    about = "Brian's Brain cellular automaton video generator"
)]
struct Cli {
    /// Number of frames to generate
    #[arg(short, long, default_value_t = DEFAULT_FRAME_COUNT)]
    frames: u64,
    /// Number of columns in each frame
    #[arg(short, long, default_value_t = DEFAULT_COLUMNS)]
    columns: usize,
    /// Number of rows in each frame
    #[arg(short, long, default_value_t = DEFAULT_ROWS)]
    rows: usize,
    /// Output file, or directory for `--sink png`
    #[arg(short, long, default_value = "brians-brain.mkv")]
    output: PathBuf,
    #[arg(long, value_enum, default_value_t = SinkKind::Ffmpeg)]
    sink: SinkKind,
    /// Fixed seed for a reproducible run (default: derived from the clock)
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Parallel)]
    algorithm: AlgorithmArg,
    /// Disable the progress bar
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let seed = cli.seed.map_or(SeedSource::Time, SeedSource::Fixed);
    let config = Config::new(cli.frames, cli.columns, cli.rows)
        .context("invalid arguments")?
        .with_seed(seed)
        .with_algorithm(cli.algorithm.into());
    let size = config.frame_size();
    let simulation = Simulation::new(config);

    let mut progress = Progress::new(cli.frames, !cli.quiet);
    let on_generation = |stats: &GenerationStats| progress.update(stats.generation + 1);

    let output = &cli.output;
    let summary = match cli.sink {
        SinkKind::Ffmpeg => {
            let sink = FfmpegSink::open(output, DEFAULT_CODEC, FRAME_RATE, size)
                .context("opening video sink")?;
            simulation.run(sink, on_generation).map(|s| (s.frames, s.seed, s.elapsed))
        }
        SinkKind::Png => {
            let sink = PngSequenceSink::open(output, size).context("opening png sink")?;
            simulation.run(sink, on_generation).map(|s| (s.frames, s.seed, s.elapsed))
        }
        SinkKind::Raw => {
            let sink = RawSink::open(output, size).context("opening raw sink")?;
            simulation.run(sink, on_generation).map(|s| (s.frames, s.seed, s.elapsed))
        }
    };
    drop(progress);

    let (frames, seed, elapsed) = summary.context("simulation failed")?;
    info!(
        frames,
        seed,
        output = %output.display(),
        elapsed_secs = elapsed.as_secs_f64(),
        "wrote frames"
    );
    Ok(())
}
