//! Planar Voronoi diagrams in a bounding rectangle (R²).
//!
//! This crate computes Voronoi diagrams for points in an axis-aligned
//! rectangle using per-generator half-plane clipping: each cell starts as
//! the whole rectangle and is cut by the perpendicular bisector of every
//! generator near enough to matter.
//!
//! # Example
//!
//! ```
//! use glam::DVec2;
//! use r2_voronoi::{compute, Rect};
//!
//! let rect = Rect::from_extents(0.0, 1.0, 0.0, 1.0).unwrap();
//! let points = vec![
//!     DVec2::new(0.25, 0.25),
//!     DVec2::new(0.75, 0.25),
//!     DVec2::new(0.25, 0.75),
//!     DVec2::new(0.75, 0.75),
//! ];
//!
//! let output = compute(&points, rect).expect("computation should succeed");
//! assert_eq!(output.diagram.num_cells(), 4);
//! assert!(output.diagnostics.is_clean());
//! ```
//!
//! The mutable clipped polygon itself, [`ConvexCell`], is public as well:
//! it is useful on its own whenever a convex region needs to be refined by
//! half-plane cuts and measured.

mod cell;
mod clipping;
mod diagram;
mod error;
mod types;

pub use cell::{
    CellParams, ConvexCell, PlaneCut, INIT_DELETE_SIZE, INIT_VERTICES, MAX_DELETE_SIZE,
    MAX_VERTICES, TOLERANCE,
};
pub use diagram::{polygon_area, CellView, PlanarVoronoi, VoronoiCell};
pub use error::VoronoiError;
pub use types::{Rect, Vec2Like};

/// Output from diagram computation: the diagram plus diagnostics.
#[derive(Debug, Clone)]
pub struct VoronoiOutput {
    /// The computed Voronoi diagram.
    pub diagram: PlanarVoronoi,
    /// Diagnostic information about the computation.
    pub diagnostics: VoronoiDiagnostics,
}

/// Diagnostic information from diagram computation.
///
/// Generators strictly inside the rectangle always keep a piece of their
/// own cell, so both lists stay empty for well-formed input; they exist to
/// surface numerical trouble instead of hiding it.
#[derive(Debug, Clone, Default)]
pub struct VoronoiDiagnostics {
    /// Cell indices that were clipped away entirely.
    pub destroyed_cells: Vec<usize>,
    /// Cell indices with fewer than 3 vertices.
    pub degenerate_cells: Vec<usize>,
}

impl VoronoiDiagnostics {
    /// Returns true if no issues were detected.
    pub fn is_clean(&self) -> bool {
        self.destroyed_cells.is_empty() && self.degenerate_cells.is_empty()
    }
}

/// Compute a planar Voronoi diagram with default cell parameters.
///
/// Every generator must lie strictly inside `rect`.
pub fn compute<P: Vec2Like>(points: &[P], rect: Rect) -> Result<VoronoiOutput, VoronoiError> {
    compute_with(points, rect, CellParams::default())
}

/// Compute a planar Voronoi diagram with explicit cell parameters.
pub fn compute_with<P: Vec2Like>(
    points: &[P],
    rect: Rect,
    params: CellParams,
) -> Result<VoronoiOutput, VoronoiError> {
    let pts = clipping::convert_points(points);
    let mut cells = Vec::with_capacity(pts.len());
    // ~6 vertices per interior cell on average.
    let mut cell_vertices = Vec::with_capacity(pts.len() * 6);
    let mut diagnostics = VoronoiDiagnostics::default();

    clipping::visit_cells_inner(&pts, rect, params, |i, cell| {
        let start = cell_vertices.len();
        let g = pts[i];
        cell_vertices.extend(cell.vertices().map(|v| g + v));
        let count = cell_vertices.len() - start;
        if count == 0 {
            diagnostics.destroyed_cells.push(i);
        } else if count < 3 {
            diagnostics.degenerate_cells.push(i);
        }
        cells.push(VoronoiCell::new(start, count));
    })?;

    Ok(VoronoiOutput {
        diagram: PlanarVoronoi::from_raw_parts(pts, cells, cell_vertices),
        diagnostics,
    })
}

/// Stream each generator's finished [`ConvexCell`] to a callback instead of
/// assembling a diagram.
///
/// The cell is in generator-local coordinates and is reused between calls,
/// so the callback must copy anything it wants to keep. This is the
/// interface for per-cell record output: emit with
/// [`ConvexCell::output_custom`] or the draw methods, passing the
/// generator's position as the displacement.
pub fn visit_cells<P, F>(
    points: &[P],
    rect: Rect,
    params: CellParams,
    f: F,
) -> Result<(), VoronoiError>
where
    P: Vec2Like,
    F: FnMut(usize, &ConvexCell),
{
    let pts = clipping::convert_points(points);
    clipping::visit_cells_inner(&pts, rect, params, f)
}
