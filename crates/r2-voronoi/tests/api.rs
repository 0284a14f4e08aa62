//! Public API integration tests for r2-voronoi.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use r2_voronoi::{compute, visit_cells, CellParams, Rect, VoronoiError};

/// Generate random points uniformly distributed inside the rectangle.
fn random_points(n: usize, seed: u64, rect: Rect) -> Vec<DVec2> {
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

fn unit_rect() -> Rect {
    Rect::from_extents(0.0, 1.0, 0.0, 1.0).unwrap()
}

/// Point-in-convex-polygon test for a counter-clockwise polygon.
fn inside_convex_ccw(polygon: &[DVec2], p: DVec2, eps: f64) -> bool {
    let n = polygon.len();
    (0..n).all(|i| {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        (b - a).perp_dot(p - a) >= -eps
    })
}

#[test]
fn test_compute_basic() {
    let rect = unit_rect();
    let points = random_points(200, 12345, rect);
    let output = compute(&points, rect).expect("compute should succeed");

    assert_eq!(output.diagram.num_cells(), 200);
    assert!(output.diagram.num_vertices() > 0);
    assert!(output.diagnostics.is_clean());
}

#[test]
fn test_cells_partition_the_rectangle() {
    let rect = Rect::from_extents(-2.0, 3.0, 0.5, 2.5).unwrap();
    let points = random_points(500, 999, rect);
    let output = compute(&points, rect).expect("compute should succeed");

    let total = output.diagram.total_area();
    let expected = rect.area();
    assert!(
        (total - expected).abs() / expected < 1e-6,
        "cells should tile the box: got {}, expected {}",
        total,
        expected
    );
}

#[test]
fn test_generator_lies_inside_its_cell() {
    let rect = unit_rect();
    let points = random_points(300, 54321, rect);
    let output = compute(&points, rect).expect("compute should succeed");

    for cell in output.diagram.iter_cells() {
        let g = output.diagram.generators[cell.generator_index];
        assert!(cell.len() >= 3, "cell {} is degenerate", cell.generator_index);
        assert!(
            inside_convex_ccw(cell.vertices, g, 1e-9),
            "generator {} escapes its cell",
            cell.generator_index
        );
    }
}

#[test]
fn test_four_point_grid_is_symmetric() {
    let rect = unit_rect();
    let points = vec![
        DVec2::new(0.25, 0.25),
        DVec2::new(0.75, 0.25),
        DVec2::new(0.25, 0.75),
        DVec2::new(0.75, 0.75),
    ];
    let output = compute(&points, rect).expect("compute should succeed");

    // Four congruent quarter-squares.
    for cell in output.diagram.iter_cells() {
        assert_eq!(cell.len(), 4);
        assert!((cell.area() - 0.25).abs() < 1e-12);
        assert!((cell.perimeter() - 2.0).abs() < 1e-12);
    }
}

#[test]
fn test_reproducible_across_runs() {
    let rect = unit_rect();
    let points = random_points(150, 42, rect);
    let a = compute(&points, rect).unwrap();
    let b = compute(&points, rect).unwrap();

    assert_eq!(a.diagram.num_cells(), b.diagram.num_cells());
    assert_eq!(a.diagram.num_vertices(), b.diagram.num_vertices());
    for (ca, cb) in a.diagram.iter_cells().zip(b.diagram.iter_cells()) {
        assert_eq!(ca.vertices, cb.vertices);
    }
}

#[test]
fn test_insufficient_points() {
    let rect = unit_rect();
    let empty: Vec<DVec2> = Vec::new();
    assert!(matches!(
        compute(&empty, rect),
        Err(VoronoiError::InsufficientPoints(0))
    ));
}

#[test]
fn test_point_on_boundary_is_rejected() {
    let rect = unit_rect();
    let points = vec![DVec2::new(0.5, 0.5), DVec2::new(0.0, 0.25)];
    assert!(matches!(
        compute(&points, rect),
        Err(VoronoiError::PointOutOfBounds(1))
    ));
}

#[test]
fn test_input_types() {
    let rect = unit_rect();
    let base = random_points(50, 88888, rect);

    let arrays: Vec<[f64; 2]> = base.iter().map(|p| [p.x, p.y]).collect();
    let output = compute(&arrays, rect).expect("array input should work");
    assert_eq!(output.diagram.num_cells(), 50);

    let tuples: Vec<(f64, f64)> = base.iter().map(|p| (p.x, p.y)).collect();
    let output = compute(&tuples, rect).expect("tuple input should work");
    assert_eq!(output.diagram.num_cells(), 50);
}

#[test]
fn test_visit_cells_topology_and_records() {
    let rect = unit_rect();
    let points = random_points(120, 31415, rect);

    let mut visited = 0;
    visit_cells(&points, rect, CellParams::default(), |i, cell| {
        visited += 1;
        assert!(cell.check_relations(), "cell {} has broken links", i);
        assert!(cell.check_duplicates(), "cell {} has pinched edges", i);

        // One record per cell through the custom emitter.
        let mut buf = Vec::new();
        cell.output_custom("%i %w %a", i as i32, points[i].x, points[i].y, 0.0, &mut buf)
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with(&format!("{} {}", i, cell.vertex_count())));
        assert!(text.ends_with('\n'));
    })
    .unwrap();
    assert_eq!(visited, 120);
}

#[test]
fn test_cell_measurements_match_polygon_views() {
    let rect = unit_rect();
    let points = random_points(80, 2718, rect);

    // Areas measured on the live cell must agree with areas of the
    // assembled polygon views.
    let mut cell_areas = Vec::new();
    visit_cells(&points, rect, CellParams::default(), |_, cell| {
        cell_areas.push(cell.area());
    })
    .unwrap();

    let output = compute(&points, rect).unwrap();
    for (view, &area) in output.diagram.iter_cells().zip(cell_areas.iter()) {
        assert!((view.area() - area).abs() < 1e-9);
    }
}

#[test]
fn test_various_sizes() {
    let rect = unit_rect();
    for n in [1, 2, 10, 100, 1000] {
        let points = random_points(n, 1000 + n as u64, rect);
        let output = compute(&points, rect).unwrap_or_else(|e| panic!("n={}: {}", n, e));
        assert_eq!(output.diagram.num_cells(), n, "failed for n={}", n);
        let total = output.diagram.total_area();
        assert!(
            (total - rect.area()).abs() < 1e-6,
            "n={}: total area {}",
            n,
            total
        );
    }
}
