//! Assembled planar Voronoi diagrams.
//!
//! Cell polygons live in one flat vertex buffer with per-cell start/count
//! bookkeeping, so the diagram is a couple of dense allocations regardless
//! of cell count. Views borrow slices out of the buffer.

use glam::DVec2;

/// One cell's bookkeeping in the flat buffers.
#[derive(Debug, Clone, Copy)]
pub struct VoronoiCell {
    /// Start index into the flat vertex buffer.
    vertex_start: usize,
    /// Number of vertices for this cell.
    vertex_count: usize,
}

impl VoronoiCell {
    #[inline]
    pub fn new(vertex_start: usize, vertex_count: usize) -> Self {
        Self {
            vertex_start,
            vertex_count,
        }
    }
}

/// Borrowed view of a single cell.
#[derive(Debug, Clone, Copy)]
pub struct CellView<'a> {
    /// Index of the generator this cell belongs to.
    pub generator_index: usize,
    /// Cell polygon in world coordinates, counter-clockwise.
    pub vertices: &'a [DVec2],
}

impl<'a> CellView<'a> {
    /// Number of vertices in this cell.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the cell has no vertices (it was clipped away entirely).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Enclosed area of the cell polygon.
    pub fn area(&self) -> f64 {
        polygon_area(self.vertices).abs()
    }

    /// Perimeter of the cell polygon.
    pub fn perimeter(&self) -> f64 {
        let n = self.vertices.len();
        if n < 2 {
            return 0.0;
        }
        (0..n)
            .map(|i| (self.vertices[(i + 1) % n] - self.vertices[i]).length())
            .sum()
    }
}

/// A planar Voronoi diagram clipped to its bounding rectangle.
#[derive(Debug, Clone)]
pub struct PlanarVoronoi {
    /// The generator points, in input order.
    pub generators: Vec<DVec2>,
    /// Per-cell bookkeeping, one entry per generator.
    cells: Vec<VoronoiCell>,
    /// Flat buffer of all cell polygon vertices, world coordinates.
    cell_vertices: Vec<DVec2>,
}

impl PlanarVoronoi {
    /// Assemble a diagram from pre-built buffers.
    #[inline]
    pub fn from_raw_parts(
        generators: Vec<DVec2>,
        cells: Vec<VoronoiCell>,
        cell_vertices: Vec<DVec2>,
    ) -> Self {
        Self {
            generators,
            cells,
            cell_vertices,
        }
    }

    /// Number of cells (one per generator).
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Total number of stored polygon vertices across all cells.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.cell_vertices.len()
    }

    /// View of the cell at `idx`.
    #[inline]
    pub fn cell(&self, idx: usize) -> CellView<'_> {
        let cell = &self.cells[idx];
        CellView {
            generator_index: idx,
            vertices: &self.cell_vertices
                [cell.vertex_start..cell.vertex_start + cell.vertex_count],
        }
    }

    /// Iterate over all cells as views.
    #[inline]
    pub fn iter_cells(&self) -> impl Iterator<Item = CellView<'_>> {
        (0..self.cells.len()).map(move |idx| self.cell(idx))
    }

    /// Sum of all cell areas. For a valid diagram this equals the bounding
    /// rectangle's area: the cells partition it.
    pub fn total_area(&self) -> f64 {
        self.iter_cells().map(|c| c.area()).sum()
    }
}

/// Signed shoelace area of a simple polygon; positive for counter-clockwise
/// winding.
pub fn polygon_area(vertices: &[DVec2]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        sum += vertices[i].perp_dot(vertices[(i + 1) % n]);
    }
    0.5 * sum
}
