//! Performance benchmark comparing serial and parallel transitions

use std::time::Instant;

use brians_brain::domain::{Algorithm, Grid, SeedSource, seed, transition};

fn seeded_grid(rows: usize, columns: usize) -> Grid {
    let mut grid = Grid::new(rows, columns).expect("benchmark sizes are valid");
    let (_, mut rng) = SeedSource::Fixed(0xB12A1).rng();
    seed(&mut grid, &mut rng);
    grid
}

/// Mean milliseconds per generation, ping-ponging two buffers
fn benchmark(algorithm: Algorithm, rows: usize, columns: usize, iterations: u32) -> f64 {
    let mut previous = seeded_grid(rows, columns);
    let mut current = Grid::new(rows, columns).expect("benchmark sizes are valid");

    let start = Instant::now();
    for _ in 0..iterations {
        transition(&previous, &mut current, algorithm).expect("buffers share a shape");
        std::mem::swap(&mut previous, &mut current);
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn main() {
    println!("=== Brian's Brain Transition Benchmark ===\n");

    let sizes = [(100, 100), (480, 640), (720, 1280), (1080, 1920), (2160, 3840)];
    let iterations = 20;

    println!(
        "{:>12} {:>12} {:>12} {:>10} {:>16}",
        "Size", "Serial", "Parallel", "Speedup", "Par cells/sec"
    );
    println!("{:-<66}", "");

    for (rows, columns) in sizes {
        let serial_ms = benchmark(Algorithm::Serial, rows, columns, iterations);
        let parallel_ms = benchmark(Algorithm::Parallel, rows, columns, iterations);
        let cells = (rows * columns) as f64;

        println!(
            "{:>12} {:>12.2} {:>12.2} {:>9.1}x {:>15.1}M",
            format!("{}x{}", columns, rows),
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms,
            cells / (parallel_ms / 1000.0) / 1_000_000.0
        );
    }
}
