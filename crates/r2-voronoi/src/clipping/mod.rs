//! Per-generator cell construction by nearest-first bisector clipping.
//!
//! Each generator's cell starts as the whole bounding rectangle (in
//! generator-local coordinates) and is cut by the perpendicular bisector of
//! every generator near enough to matter. Candidates come from the block
//! grid in rings of increasing distance; clipping nearest-first shrinks the
//! cell fast, so the security-radius cutoff prunes most of the field: a
//! neighbor at squared distance `d*d >= max_radius_squared()` cannot touch
//! the cell, and once a whole ring clears that bound the cell is final.

mod grid;

use glam::DVec2;

use crate::cell::{CellParams, ConvexCell};
use crate::error::VoronoiError;
use crate::types::{Rect, Vec2Like};
use grid::BlockGrid;

/// Squared distance below which two generators are treated as coincident and
/// contribute no cutting plane. Their bisector is numerically meaningless
/// and a well-formed input never needs it.
const COINCIDENT_DISTANCE_SQ: f64 = 1e-24;

/// Convert caller-supplied generator positions into the working type.
pub(crate) fn convert_points<P: Vec2Like>(points: &[P]) -> Vec<DVec2> {
    points.iter().map(|p| p.to_dvec2()).collect()
}

/// Input validation shared by every public entry point.
fn validate(points: &[DVec2], rect: Rect) -> Result<(), VoronoiError> {
    if points.is_empty() {
        return Err(VoronoiError::InsufficientPoints(0));
    }
    for (i, &p) in points.iter().enumerate() {
        if !rect.contains_interior(p) {
            return Err(VoronoiError::PointOutOfBounds(i));
        }
    }
    Ok(())
}

/// Build generator `i`'s cell into `cell`, reusing `scratch` for the
/// per-ring candidate list.
fn build_cell(
    i: usize,
    points: &[DVec2],
    rect: Rect,
    grid: &BlockGrid,
    cell: &mut ConvexCell,
    scratch: &mut Vec<(f64, u32)>,
) {
    let g = points[i];
    cell.init(
        rect.min.x - g.x,
        rect.max.x - g.x,
        rect.min.y - g.y,
        rect.max.y - g.y,
    )
    .expect("validated generators lie strictly inside the rectangle");

    let (bx, by) = grid.block_of(g);
    let min_dim = grid.min_block_dim();
    for r in 0..=grid.max_ring(bx, by) {
        // A block in ring r is at least (r-1) full blocks away from g.
        if r > 1 {
            let dmin = (r - 1) as f64 * min_dim;
            if dmin * dmin >= cell.max_radius_squared() {
                break;
            }
        }

        scratch.clear();
        grid.visit_ring(bx, by, r, |idxs| {
            for &j in idxs {
                if j as usize == i {
                    continue;
                }
                let dist_sq = (points[j as usize] - g).length_squared();
                if dist_sq < COINCIDENT_DISTANCE_SQ {
                    log::debug!("skipping coincident generator pair ({}, {})", i, j);
                    continue;
                }
                scratch.push((dist_sq, j));
            }
        });
        scratch.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));

        for &(dist_sq, j) in scratch.iter() {
            // Sorted ascending, so the first candidate past the security
            // radius ends the ring.
            if dist_sq >= cell.max_radius_squared() {
                break;
            }
            let d = points[j as usize] - g;
            if !cell.plane(d.x, d.y, 0.5 * dist_sq).survives() {
                log::warn!("cell {} was clipped away entirely", i);
                return;
            }
        }
    }
}

/// Stream every generator's finished cell (in generator-local coordinates)
/// to `f`, reusing one cell allocation for the whole pass.
pub(crate) fn visit_cells_inner<F>(
    points: &[DVec2],
    rect: Rect,
    params: CellParams,
    mut f: F,
) -> Result<(), VoronoiError>
where
    F: FnMut(usize, &ConvexCell),
{
    validate(points, rect)?;
    let grid = BlockGrid::new(points, rect);
    let mut cell = ConvexCell::with_params(params);
    let mut scratch = Vec::new();
    for i in 0..points.len() {
        build_cell(i, points, rect, &grid, &mut cell, &mut scratch);
        f(i, &cell);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn unit_rect() -> Rect {
        Rect::from_extents(0.0, 1.0, 0.0, 1.0).unwrap()
    }

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

    #[test]
    fn lone_generator_owns_the_whole_box() {
        let rect = unit_rect();
        let points = vec![DVec2::new(0.3, 0.6)];
        let mut areas = Vec::new();
        visit_cells_inner(&points, rect, CellParams::default(), |_, cell| {
            areas.push(cell.area());
        })
        .unwrap();
        assert_eq!(areas.len(), 1);
        assert!((areas[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn grid_pruning_matches_brute_force() {
        let rect = unit_rect();
        let points = random_points(300, 31, rect);

        let mut pruned = Vec::new();
        visit_cells_inner(&points, rect, CellParams::default(), |_, cell| {
            pruned.push((cell.vertex_count(), cell.area(), cell.perimeter()));
        })
        .unwrap();

        // Brute force: cut every cell by every other generator.
        let mut cell = ConvexCell::new();
        for (i, &g) in points.iter().enumerate() {
            cell.init(
                rect.min.x - g.x,
                rect.max.x - g.x,
                rect.min.y - g.y,
                rect.max.y - g.y,
            )
            .unwrap();
            for (j, &h) in points.iter().enumerate() {
                if i == j {
                    continue;
                }
                let d = h - g;
                assert!(cell.bisector(d.x, d.y).survives());
            }
            let (p, a, per) = pruned[i];
            assert_eq!(p, cell.vertex_count(), "vertex count of cell {}", i);
            assert!((a - cell.area()).abs() < 1e-9, "area of cell {}", i);
            assert!(
                (per - cell.perimeter()).abs() < 1e-9,
                "perimeter of cell {}",
                i
            );
        }
    }

    #[test]
    fn coincident_generators_do_not_cut() {
        let rect = unit_rect();
        let points = vec![DVec2::new(0.5, 0.5), DVec2::new(0.5, 0.5)];
        let mut areas = Vec::new();
        visit_cells_inner(&points, rect, CellParams::default(), |_, cell| {
            areas.push(cell.area());
        })
        .unwrap();
        // Both cells cover the box; the degenerate bisector is skipped.
        assert!((areas[0] - 1.0).abs() < 1e-12);
        assert!((areas[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn validation_rejects_bad_inputs() {
        let rect = unit_rect();
        let empty: Vec<DVec2> = Vec::new();
        assert_eq!(
            visit_cells_inner(&empty, rect, CellParams::default(), |_, _| {}),
            Err(VoronoiError::InsufficientPoints(0))
        );

        let boundary = vec![DVec2::new(0.5, 0.5), DVec2::new(1.0, 0.5)];
        assert_eq!(
            visit_cells_inner(&boundary, rect, CellParams::default(), |_, _| {}),
            Err(VoronoiError::PointOutOfBounds(1))
        );
    }
}
