//! Diagram export for external analysis.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use flate2::write::GzEncoder;
use flate2::Compression;
use r2_voronoi::{PlanarVoronoi, Rect};
use serde::Serialize;

/// Export a diagram to a JSON file (optionally gzipped).
pub fn export_diagram(voronoi: &PlanarVoronoi, rect: Rect, seed: u64, path: &Path) {
    print!("Exporting to {}... ", path.display());
    let start = Instant::now();

    let data = DiagramExport::from_diagram(voronoi, rect, seed);

    let file = File::create(path).expect("Failed to create export file");

    // Check if we should gzip based on extension
    let is_gzip = path.extension().map(|ext| ext == "gz").unwrap_or(false);

    if is_gzip {
        let encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        serde_json::to_writer(encoder, &data).expect("Failed to write JSON");
    } else {
        let writer = BufWriter::new(file);
        serde_json::to_writer(writer, &data).expect("Failed to write JSON");
    }

    println!("{:.1}ms", start.elapsed().as_secs_f64() * 1000.0);
}

#[derive(Serialize)]
struct DiagramExport {
    metadata: Metadata,
    cells: CellData,
}

#[derive(Serialize)]
struct Metadata {
    seed: u64,
    num_cells: usize,
    bounds: [f64; 4],
    total_area: f64,
    mean_cell_area: f64,
}

#[derive(Serialize)]
struct CellData {
    generator: Vec<[f64; 2]>,
    area: Vec<f64>,
    perimeter: Vec<f64>,
    num_vertices: Vec<usize>,
    polygon: Vec<Vec<[f64; 2]>>,
}

impl DiagramExport {
    fn from_diagram(voronoi: &PlanarVoronoi, rect: Rect, seed: u64) -> Self {
        let num_cells = voronoi.num_cells();
        let mut cells = CellData {
            generator: Vec::with_capacity(num_cells),
            area: Vec::with_capacity(num_cells),
            perimeter: Vec::with_capacity(num_cells),
            num_vertices: Vec::with_capacity(num_cells),
            polygon: Vec::with_capacity(num_cells),
        };

        let mut total_area = 0.0;
        for cell in voronoi.iter_cells() {
            let g = voronoi.generators[cell.generator_index];
            let area = cell.area();
            total_area += area;
            cells.generator.push([g.x, g.y]);
            cells.area.push(area);
            cells.perimeter.push(cell.perimeter());
            cells.num_vertices.push(cell.len());
            cells
                .polygon
                .push(cell.vertices.iter().map(|v| [v.x, v.y]).collect());
        }

        DiagramExport {
            metadata: Metadata {
                seed,
                num_cells,
                bounds: [rect.min.x, rect.max.x, rect.min.y, rect.max.y],
                total_area,
                mean_cell_area: if num_cells > 0 {
                    total_area / num_cells as f64
                } else {
                    0.0
                },
            },
            cells,
        }
    }
}
