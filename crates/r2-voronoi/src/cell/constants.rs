//! Shared tolerances and storage limits for cell construction.

/// Half-width of the "on the cutting line" band.
///
/// A vertex whose signed distance to a cutting line falls inside
/// `(-TOLERANCE, +TOLERANCE)` is treated as lying on the line and is reused
/// instead of spawning a near-duplicate vertex. Too small and numerical noise
/// produces coincident vertex pairs; too large and thin slivers of the cell
/// are silently discarded.
pub const TOLERANCE: f64 = 1e-11;

/// Initial number of vertex slots allocated per cell.
///
/// Voronoi cells of well-spaced generators rarely exceed a dozen vertices, so
/// this covers almost every cell without reallocation.
pub const INIT_VERTICES: usize = 64;

/// Hard ceiling on vertex slots. Exceeding it aborts rather than truncating,
/// since the arrays are mid-mutation when growth happens.
pub const MAX_VERTICES: usize = 1 << 24;

/// Initial size of the scratch stack holding vertices doomed by a cut.
pub const INIT_DELETE_SIZE: usize = 64;

/// Hard ceiling on the delete scratch stack.
pub const MAX_DELETE_SIZE: usize = 1 << 24;

/// Runtime knobs for a cell: the on-line tolerance band and the storage
/// growth limits. The defaults come from the constants above.
#[derive(Debug, Clone, Copy)]
pub struct CellParams {
    /// Signed distances within `±tolerance` count as "on the cutting line".
    pub tolerance: f64,
    /// Starting vertex capacity; must be at least 4 to hold the initial box.
    pub init_vertices: usize,
    /// Hard ceiling for vertex capacity.
    pub max_vertices: usize,
    /// Starting delete-stack capacity.
    pub init_delete_size: usize,
    /// Hard ceiling for the delete stack.
    pub max_delete_size: usize,
}

impl Default for CellParams {
    fn default() -> Self {
        Self {
            tolerance: TOLERANCE,
            init_vertices: INIT_VERTICES,
            max_vertices: MAX_VERTICES,
            init_delete_size: INIT_DELETE_SIZE,
            max_delete_size: MAX_DELETE_SIZE,
        }
    }
}
