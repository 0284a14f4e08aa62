//! A single Voronoi cell as a mutable convex polygon.
//!
//! The cell starts as an axis-aligned rectangle and is refined by cutting
//! away half-planes one at a time. Vertices live in index-addressed parallel
//! arrays (position, clockwise neighbor, counter-clockwise neighbor) linked
//! into one doubly linked cycle, so a cut touches only the vertices it
//! removes plus the one or two repair points it introduces. Deleted slots are
//! compacted in place after every cut, keeping `0..vertex_count()` dense.
//!
//! Positions are stored at twice their geometric value. Midpoints of the
//! initial box are then exact, and the crossing-point interpolation needs a
//! single division. Everything user-facing (measurements, emitted output)
//! is scaled back; only [`ConvexCell::max_radius_squared`] reports the
//! stored scale, so callers multiply by 0.25.

mod constants;
mod output;

pub use constants::{
    CellParams, INIT_DELETE_SIZE, INIT_VERTICES, MAX_DELETE_SIZE, MAX_VERTICES, TOLERANCE,
};

use glam::DVec2;

use crate::error::VoronoiError;

/// Marker written into a doomed vertex's `next` slot during compaction.
const DEAD: usize = usize::MAX;

/// Outcome of cutting a cell with a half-plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum PlaneCut {
    /// The cell is non-empty after the cut (possibly unchanged).
    Survives,
    /// The whole cell lay strictly outside the kept half-plane; the cell is
    /// now empty and all measurements return zero.
    Destroyed,
}

impl PlaneCut {
    /// Whether the cell is still alive after the cut.
    #[inline]
    pub fn survives(self) -> bool {
        self == PlaneCut::Survives
    }
}

/// A convex polygon under incremental half-plane intersection.
///
/// Reusable across generators: `init` fully resets the cell, so one
/// allocation serves a whole diagram pass.
#[derive(Debug, Clone)]
pub struct ConvexCell {
    /// Live vertex count; valid indices are `0..p`.
    p: usize,
    /// Vertex positions at twice their geometric value. Slots `>= p` are
    /// free and may hold stale data.
    pts: Vec<DVec2>,
    /// Clockwise neighbor of each vertex.
    next: Vec<usize>,
    /// Counter-clockwise neighbor of each vertex.
    prev: Vec<usize>,
    /// Scratch stack of vertex indices doomed by the cut in progress.
    ds: Vec<usize>,
    /// Logical capacity of `ds`; grown by doubling up to the configured cap.
    ds_cap: usize,
    params: CellParams,
}

impl Default for ConvexCell {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvexCell {
    /// Create an empty cell with default tolerances and capacities.
    pub fn new() -> Self {
        Self::with_params(CellParams::default())
    }

    /// Create an empty cell with explicit tolerances and capacities.
    pub fn with_params(params: CellParams) -> Self {
        assert!(
            params.init_vertices >= 4,
            "initial vertex capacity must hold the four box corners"
        );
        assert!(params.max_vertices >= params.init_vertices);
        assert!(params.init_delete_size >= 1);
        assert!(params.max_delete_size >= params.init_delete_size);
        Self {
            p: 0,
            pts: vec![DVec2::ZERO; params.init_vertices],
            next: vec![0; params.init_vertices],
            prev: vec![0; params.init_vertices],
            ds: Vec::with_capacity(params.init_delete_size),
            ds_cap: params.init_delete_size,
            params,
        }
    }

    /// Reset the cell to the axis-aligned rectangle
    /// `[xmin, xmax] x [ymin, ymax]`, replacing any previous state.
    ///
    /// The four corners are laid out counter-clockwise starting at
    /// `(xmin, ymin)`. Fails with [`VoronoiError::InvalidBox`] if either
    /// extent is non-positive, leaving the cell untouched.
    pub fn init(&mut self, xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<(), VoronoiError> {
        if !(xmin < xmax && ymin < ymax) {
            return Err(VoronoiError::InvalidBox {
                xmin,
                xmax,
                ymin,
                ymax,
            });
        }
        self.p = 4;
        let (xmin, xmax) = (2.0 * xmin, 2.0 * xmax);
        let (ymin, ymax) = (2.0 * ymin, 2.0 * ymax);
        self.pts[0] = DVec2::new(xmin, ymin);
        self.pts[1] = DVec2::new(xmax, ymin);
        self.pts[2] = DVec2::new(xmax, ymax);
        self.pts[3] = DVec2::new(xmin, ymax);
        self.next[..4].copy_from_slice(&[1, 2, 3, 0]);
        self.prev[..4].copy_from_slice(&[3, 0, 1, 2]);
        Ok(())
    }

    /// Signed distance of vertex `i` from the line `n . x = rsq`, in
    /// geometric units (the 0.5 undoes the stored doubling).
    #[inline]
    fn pos(&self, n: DVec2, rsq: f64, i: usize) -> f64 {
        0.5 * n.dot(self.pts[i]) - rsq
    }

    /// Cut the cell with the half-plane `x*X + y*Y <= rsq`, removing
    /// everything on the far side.
    ///
    /// Vertices within the tolerance band of the line are kept as-is and
    /// never duplicated; at most two new vertices are introduced where the
    /// line crosses surviving edges. Returns [`PlaneCut::Destroyed`] (and
    /// empties the cell) when no part of the cell satisfies the half-plane.
    pub fn plane(&mut self, x: f64, y: f64, rsq: f64) -> PlaneCut {
        if self.p == 0 {
            return PlaneCut::Destroyed;
        }
        let n = DVec2::new(x, y);
        let tol = self.params.tolerance;

        // Find a vertex on the cut-away side to seed the sweeps. Probe
        // vertex 0, then walk outward along whichever neighbor starts
        // farther out (ties go clockwise). Signed distance is monotone
        // along each direction of a convex boundary, so if the two cursors
        // meet nothing lies outside and the cut is a no-op.
        let mut up = 0;
        let mut u = self.pos(n, rsq, up);
        if u < tol {
            let mut up2 = self.next[up];
            let mut u2 = self.pos(n, rsq, up2);
            let mut up3 = self.prev[up];
            let mut u3 = self.pos(n, rsq, up3);
            if u2 >= u3 {
                while u2 < tol {
                    up2 = self.next[up2];
                    u2 = self.pos(n, rsq, up2);
                    if up2 == up3 {
                        return PlaneCut::Survives;
                    }
                }
                up = up2;
                u = u2;
            } else {
                while u3 < tol {
                    up3 = self.prev[up3];
                    u3 = self.pos(n, rsq, up3);
                    if up2 == up3 {
                        return PlaneCut::Survives;
                    }
                }
                up = up3;
                u = u3;
            }
        }

        // Sweep clockwise from the witness, marking doomed vertices, until
        // the boundary re-enters the kept half-plane. Coming all the way
        // back around means every vertex is outside.
        self.ds.clear();
        self.push_delete(up);
        let mut l = u;
        let mut up2 = self.next[up];
        let mut u2 = self.pos(n, rsq, up2);
        while u2 > tol {
            self.push_delete(up2);
            up2 = self.next[up2];
            l = u2;
            u2 = self.pos(n, rsq, up2);
            if up2 == up {
                self.p = 0;
                return PlaneCut::Destroyed;
            }
        }

        // Clockwise repair point: a terminal vertex on the line is reused,
        // otherwise the crossing on the edge into `up2` becomes a new vertex.
        let cp;
        if u2 > -tol {
            cp = up2;
        } else {
            if self.p == self.pts.len() {
                self.grow_vertices();
            }
            let lp = self.prev[up2];
            let fac = 1.0 / (u2 - l);
            self.pts[self.p] = (self.pts[lp] * u2 - self.pts[up2] * l) * fac;
            self.next[self.p] = up2;
            self.prev[up2] = self.p;
            cp = self.p;
            self.p += 1;
        }

        // Mirror sweep counter-clockwise. Meeting the clockwise terminal
        // vertex means the doomed stretch is exhausted.
        let mut l = u;
        let mut up3 = self.prev[up];
        let mut u3 = self.pos(n, rsq, up3);
        while u3 > tol {
            self.push_delete(up3);
            up3 = self.prev[up3];
            l = u3;
            u3 = self.pos(n, rsq, up3);
            if up3 == up2 {
                break;
            }
        }

        // Counter-clockwise repair: an on-line terminal vertex is linked to
        // the clockwise repair point directly, so a grazing cut keeps the
        // grazed vertex instead of planting a duplicate next to it.
        if u3 > -tol {
            self.prev[cp] = up3;
            self.next[up3] = cp;
        } else {
            if self.p == self.pts.len() {
                self.grow_vertices();
            }
            let lp = self.next[up3];
            let fac = 1.0 / (u3 - l);
            self.pts[self.p] = (self.pts[lp] * u3 - self.pts[up3] * l) * fac;
            self.next[self.p] = cp;
            self.prev[cp] = self.p;
            self.prev[self.p] = up3;
            self.next[up3] = self.p;
            self.p += 1;
        }

        // Compact: mark doomed slots, then refill each from the topmost live
        // vertex so `0..p` stays dense.
        for &d in &self.ds {
            self.next[d] = DEAD;
        }
        let mut sp = self.ds.len();
        while sp > 0 {
            loop {
                self.p -= 1;
                if self.next[self.p] != DEAD {
                    break;
                }
            }
            sp -= 1;
            let hole = self.ds[sp];
            if hole < self.p {
                let cw = self.next[self.p];
                let ccw = self.prev[self.p];
                self.prev[cw] = hole;
                self.next[ccw] = hole;
                self.pts[hole] = self.pts[self.p];
                self.next[hole] = cw;
                self.prev[hole] = ccw;
            } else {
                // The popped slot sits above the live range already.
                self.p += 1;
            }
        }
        PlaneCut::Survives
    }

    /// Cut by the perpendicular bisector between the cell's generator (the
    /// local origin) and a neighboring generator displaced by `(dx, dy)`.
    pub fn bisector(&mut self, dx: f64, dy: f64) -> PlaneCut {
        self.plane(dx, dy, 0.5 * (dx * dx + dy * dy))
    }

    /// Number of live vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.p
    }

    /// Whether the cell has been destroyed (or never initialized).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.p == 0
    }

    /// Geometric vertex positions in boundary (counter-clockwise) order,
    /// starting from vertex 0.
    pub fn vertices(&self) -> impl Iterator<Item = DVec2> + '_ {
        let mut k = 0;
        (0..self.p).map(move |_| {
            let v = 0.5 * self.pts[k];
            k = self.next[k];
            v
        })
    }

    /// Perimeter of the cell boundary; 0 for an empty cell.
    pub fn perimeter(&self) -> f64 {
        if self.p == 0 {
            return 0.0;
        }
        let mut perim = 0.0;
        let mut k = 0;
        loop {
            let l = self.next[k];
            perim += (self.pts[k] - self.pts[l]).length();
            k = l;
            if k == 0 {
                break;
            }
        }
        0.5 * perim
    }

    /// Enclosed area via the shoelace sum anchored at vertex 0; 0 for an
    /// empty cell. The 0.125 combines the shoelace half with the squared
    /// coordinate scale.
    pub fn area(&self) -> f64 {
        if self.p == 0 {
            return 0.0;
        }
        let anchor = self.pts[0];
        let mut k = self.next[0];
        let mut d1 = self.pts[k] - anchor;
        k = self.next[k];
        let mut area = 0.0;
        while k != 0 {
            let d2 = self.pts[k] - anchor;
            area += d1.perp_dot(d2);
            d1 = d2;
            k = self.next[k];
        }
        0.125 * area.abs()
    }

    /// Centroid of the cell in its local (generator-relative) frame.
    ///
    /// Returns the origin for an empty cell and the vertex mean for
    /// degenerate cells with fewer than three vertices.
    pub fn centroid(&self) -> DVec2 {
        if self.p == 0 {
            return DVec2::ZERO;
        }
        if self.p < 3 {
            let sum: DVec2 = self.pts[..self.p].iter().sum();
            return 0.5 * sum / self.p as f64;
        }
        let anchor = self.pts[0];
        let mut k = self.next[0];
        let mut d1 = self.pts[k] - anchor;
        k = self.next[k];
        let mut tarea = 0.0;
        let mut c = DVec2::ZERO;
        while k != 0 {
            let d2 = self.pts[k] - anchor;
            let a = d1.perp_dot(d2);
            tarea += a;
            c += a * (d1 + d2);
            d1 = d2;
            k = self.next[k];
        }
        0.5 * (anchor + c / (3.0 * tarea))
    }

    /// Largest squared vertex distance from the local origin, in the stored
    /// (doubled) scale: multiply by 0.25 for the geometric value.
    ///
    /// In that scale the value doubles as a cutoff for diagram construction:
    /// a neighbor at squared distance `d*d` at or beyond it cannot cut the
    /// cell any further.
    pub fn max_radius_squared(&self) -> f64 {
        self.pts[..self.p]
            .iter()
            .map(|v| v.length_squared())
            .fold(0.0, f64::max)
    }

    /// Verify that the neighbor links form one consistent doubly linked
    /// cycle over the live vertices. Violations are logged at warn level.
    pub fn check_relations(&self) -> bool {
        let mut ok = true;
        for i in 0..self.p {
            if self.next[i] >= self.p || self.prev[i] >= self.p {
                log::warn!("vertex {} links outside the live range", i);
                ok = false;
                continue;
            }
            if self.next[self.prev[i]] != i || self.prev[self.next[i]] != i {
                log::warn!("vertex {} has inconsistent neighbor links", i);
                ok = false;
            }
        }
        if ok && self.p > 0 {
            let mut k = 0;
            let mut steps = 0;
            loop {
                k = self.next[k];
                steps += 1;
                if k == 0 || steps > self.p {
                    break;
                }
            }
            if steps != self.p {
                log::warn!("boundary closed after {} of {} vertices", steps, self.p);
                ok = false;
            }
        }
        ok
    }

    /// Verify that no two vertices share a clockwise neighbor and no vertex
    /// neighbors itself (a multi-vertex cell with either has a pinched
    /// boundary). Violations are logged at warn level.
    pub fn check_duplicates(&self) -> bool {
        let mut ok = true;
        for i in 0..self.p {
            if self.p > 1 && self.next[i] == i {
                log::warn!("vertex {} is its own neighbor", i);
                ok = false;
            }
            for j in (i + 1)..self.p {
                if self.next[i] == self.next[j] {
                    log::warn!("vertices {} and {} share clockwise neighbor {}", i, j, self.next[i]);
                    ok = false;
                }
            }
        }
        ok
    }

    /// Double the vertex arrays, aborting at the configured hard ceiling.
    fn grow_vertices(&mut self) {
        let grown = self.pts.len() * 2;
        if grown > self.params.max_vertices {
            panic!(
                "vertex allocation exceeded the hard maximum of {} slots",
                self.params.max_vertices
            );
        }
        log::debug!("vertex storage doubled to {} slots", grown);
        self.pts.resize(grown, DVec2::ZERO);
        self.next.resize(grown, 0);
        self.prev.resize(grown, 0);
    }

    /// Push a doomed vertex, doubling the delete stack on demand and
    /// aborting at the configured hard ceiling.
    fn push_delete(&mut self, v: usize) {
        if self.ds.len() == self.ds_cap {
            let grown = self.ds_cap * 2;
            if grown > self.params.max_delete_size {
                panic!(
                    "delete stack exceeded the hard maximum of {} entries",
                    self.params.max_delete_size
                );
            }
            log::debug!("delete stack doubled to {} entries", grown);
            self.ds.reserve(grown - self.ds.len());
            self.ds_cap = grown;
        }
        self.ds.push(v);
    }
}
