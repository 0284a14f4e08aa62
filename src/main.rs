//! Voroplane - headless planar Voronoi generator.
//!
//! Scatters seeded random generators in a rectangle, computes the Voronoi
//! diagram, and writes any of: gnuplot cell outlines, a POV-Ray fragment,
//! per-cell custom-format records, or a JSON export.

mod export;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use glam::DVec2;
use r2_voronoi::{compute_with, visit_cells, CellParams, Rect};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Voroplane - planar Voronoi diagram generator
#[derive(Parser, Debug)]
#[command(name = "voroplane", version, about)]
struct Cli {
    /// Number of generator points
    #[arg(short = 'n', long, default_value_t = 1000)]
    cells: usize,

    /// Random seed for generator placement
    #[arg(long)]
    seed: Option<u64>,

    /// Bounding rectangle as xmin,xmax,ymin,ymax
    #[arg(long, default_value = "0,1,0,1", value_parser = parse_rect)]
    bounds: Rect,

    /// Write cell outlines in gnuplot format
    #[arg(long, value_name = "FILE")]
    gnuplot: Option<PathBuf>,

    /// Write cell edges as a POV-Ray fragment
    #[arg(long, value_name = "FILE")]
    pov: Option<PathBuf>,

    /// Emit one custom-format record per cell to stdout
    /// (tokens: %i %x %y %q %r %w %m %p %a %c %C)
    #[arg(long, value_name = "FMT")]
    custom: Option<String>,

    /// Export the diagram as JSON (use a .gz suffix to gzip)
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,
}

fn parse_rect(s: &str) -> Result<Rect, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 4 {
        return Err("expected xmin,xmax,ymin,ymax".to_string());
    }
    let mut vals = [0.0f64; 4];
    for (v, p) in vals.iter_mut().zip(&parts) {
        *v = p
            .trim()
            .parse()
            .map_err(|e| format!("bad extent '{}': {}", p, e))?;
    }
    Rect::from_extents(vals[0], vals[1], vals[2], vals[3]).map_err(|e| e.to_string())
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
    let cli = Cli::parse();

    let seed = cli.seed.unwrap_or_else(rand::random);
    let rect = cli.bounds;
    println!("seed={}, cells={}", seed, cli.cells);

    let points = generate_points(cli.cells, seed, rect);
    log::debug!(
        "scattered {} generators in [{}, {}] x [{}, {}]",
        points.len(),
        rect.min.x,
        rect.max.x,
        rect.min.y,
        rect.max.y
    );

    print!("Computing diagram... ");
    let start = Instant::now();
    let output = match compute_with(&points, rect, CellParams::default()) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    println!("{:.1}ms", start.elapsed().as_secs_f64() * 1000.0);

    let total_area = output.diagram.total_area();
    println!(
        "Diagram complete: {} cells, {} polygon vertices, area {:.6} of {:.6}",
        output.diagram.num_cells(),
        output.diagram.num_vertices(),
        total_area,
        rect.area()
    );
    if !output.diagnostics.is_clean() {
        println!(
            "Warning: {} destroyed, {} degenerate cells",
            output.diagnostics.destroyed_cells.len(),
            output.diagnostics.degenerate_cells.len()
        );
    }

    if let Some(path) = &cli.gnuplot {
        let file = File::create(path).expect("Failed to create gnuplot file");
        let mut w = BufWriter::new(file);
        let mut result = Ok(());
        visit_cells(&points, rect, CellParams::default(), |i, cell| {
            if result.is_ok() {
                result = cell.draw_gnuplot(points[i].x, points[i].y, &mut w);
            }
        })
        .expect("diagram inputs were already validated");
        result.and_then(|_| w.flush()).expect("Failed to write gnuplot output");
        println!("Wrote cell outlines to {}", path.display());
    }

    if let Some(path) = &cli.pov {
        let file = File::create(path).expect("Failed to create POV-Ray file");
        let mut w = BufWriter::new(file);
        let mut result = Ok(());
        visit_cells(&points, rect, CellParams::default(), |i, cell| {
            if result.is_ok() {
                result = cell.draw_pov(points[i].x, points[i].y, 0.0, &mut w);
            }
        })
        .expect("diagram inputs were already validated");
        result.and_then(|_| w.flush()).expect("Failed to write POV-Ray output");
        println!("Wrote POV-Ray fragment to {}", path.display());
    }

    if let Some(fmt) = &cli.custom {
        let stdout = io::stdout();
        let mut w = BufWriter::new(stdout.lock());
        let mut result = Ok(());
        visit_cells(&points, rect, CellParams::default(), |i, cell| {
            if result.is_ok() {
                result = cell.output_custom(fmt, i as i32, points[i].x, points[i].y, 0.0, &mut w);
            }
        })
        .expect("diagram inputs were already validated");
        result.and_then(|_| w.flush()).expect("Failed to write custom records");
    }

    if let Some(path) = &cli.export {
        export::export_diagram(&output.diagram, rect, seed, path);
    }
}
