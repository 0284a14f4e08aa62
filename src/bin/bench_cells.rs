//! Benchmark planar Voronoi construction at various scales.
//!
//! Run with: cargo run --release --bin bench_cells
//!
//! Usage:
//!   bench_cells              Run default size (100k)
//!   bench_cells 10k 100k 1m  Run multiple sizes
//!   bench_cells -n 10        Run 10 iterations per size (for profiling)

use std::time::Instant;

use clap::Parser;
use glam::DVec2;
use r2_voronoi::{compute, Rect};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Parse a cell count with an optional magnitude suffix ("250k", "1.5m").
fn parse_count(s: &str) -> Result<usize, String> {
    let lower = s.trim().to_ascii_lowercase();
    let (digits, scale) = if let Some(head) = lower.strip_suffix('m') {
        (head, 1_000_000.0)
    } else if let Some(head) = lower.strip_suffix('k') {
        (head, 1_000.0)
    } else {
        (lower.as_str(), 1.0)
    };
    match digits.parse::<f64>() {
        Ok(n) if n >= 0.0 => Ok((n * scale) as usize),
        _ => Err(format!("unrecognized cell count '{}'", s)),
    }
}

/// Compact magnitude rendering shared by the count and rate columns.
fn human(value: f64) -> String {
    if value >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if value >= 1e4 {
        format!("{:.0}k", value / 1e3)
    } else {
        format!("{:.0}", value)
    }
}

#[derive(Parser)]
#[command(name = "bench_cells")]
#[command(about = "Benchmark planar Voronoi construction at various scales")]
struct Args {
    /// Cell counts to benchmark (e.g., 100k, 1m)
    #[arg(value_parser = parse_count)]
    sizes: Vec<usize>,

    /// Random seed
    #[arg(short, long, default_value_t = 12345)]
    seed: u64,

    /// Number of iterations to run per size (useful for profiling)
    #[arg(short = 'n', long, default_value_t = 1)]
    repeat: usize,
}

fn generate_points(n: usize, seed: u64, rect: Rect) -> Vec<DVec2> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            DVec2::new(
                rng.gen_range(rect.min.x..rect.max.x),
                rng.gen_range(rect.min.y..rect.max.y),
            )
        })
        .collect()
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let sizes = if args.sizes.is_empty() {
        vec![100_000]
    } else {
        args.sizes.clone()
    };
    let rect = Rect::from_extents(0.0, 1.0, 0.0, 1.0).unwrap();

    println!(
        "{:>8} {:>10} {:>10} {:>12} {:>12}",
        "cells", "gen(ms)", "build(ms)", "rate", "vertices"
    );

    for &n in &sizes {
        let gen_start = Instant::now();
        let points = generate_points(n, args.seed, rect);
        let gen_ms = gen_start.elapsed().as_secs_f64() * 1000.0;

        let mut best_secs = f64::INFINITY;
        let mut num_vertices = 0;
        for _ in 0..args.repeat.max(1) {
            let start = Instant::now();
            let output = compute(&points, rect).expect("benchmark input should be valid");
            best_secs = best_secs.min(start.elapsed().as_secs_f64());
            num_vertices = output.diagram.num_vertices();

            if !output.diagnostics.is_clean() {
                eprintln!(
                    "warning: {} destroyed / {} degenerate cells at n={}",
                    output.diagnostics.destroyed_cells.len(),
                    output.diagnostics.degenerate_cells.len(),
                    n
                );
            }
        }

        let rate = if best_secs > 0.0 {
            format!("{}/s", human(n as f64 / best_secs))
        } else {
            "-".to_string()
        };
        println!(
            "{:>8} {:>10.1} {:>10.1} {:>12} {:>12}",
            human(n as f64),
            gen_ms,
            best_secs * 1000.0,
            rate,
            human(num_vertices as f64)
        );
    }
}
