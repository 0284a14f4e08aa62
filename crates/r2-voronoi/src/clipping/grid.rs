//! Dense block grid over the bounding rectangle.
//!
//! Generators are bucketed into a regular grid stored in CSR form (per-block
//! offsets into one flat index array), built with a counting sort. Queries
//! walk blocks in Chebyshev rings around a center block; the conservative
//! minimum distance to a ring lets the caller stop expanding once no farther
//! generator can matter.

use glam::DVec2;

use crate::types::Rect;

/// Target number of generators per grid block.
/// Fewer blocks mean longer per-block scans; more blocks mean more ring
/// iterations per query.
const GRID_TARGET_DENSITY: f64 = 8.0;

pub(crate) struct BlockGrid {
    nx: usize,
    ny: usize,
    block_w: f64,
    block_h: f64,
    origin: DVec2,
    /// Start index into `point_indices` for each block, plus final length.
    cell_offsets: Vec<u32>,
    /// Generator indices grouped by block.
    point_indices: Vec<u32>,
}

impl BlockGrid {
    pub(crate) fn new(points: &[DVec2], rect: Rect) -> Self {
        // Shape the block count to the rectangle so blocks stay near-square.
        let blocks = (points.len() as f64 / GRID_TARGET_DENSITY).max(1.0);
        let aspect = rect.width() / rect.height();
        let nx = ((blocks * aspect).sqrt().ceil() as usize).max(1);
        let ny = ((blocks / aspect).sqrt().ceil() as usize).max(1);
        let block_w = rect.width() / nx as f64;
        let block_h = rect.height() / ny as f64;
        let origin = rect.min;

        let block_of = |p: DVec2| -> usize {
            let ix = (((p.x - origin.x) / block_w) as usize).min(nx - 1);
            let iy = (((p.y - origin.y) / block_h) as usize).min(ny - 1);
            iy * nx + ix
        };

        // Counting sort into CSR.
        let mut cell_offsets = vec![0u32; nx * ny + 1];
        for &p in points {
            cell_offsets[block_of(p) + 1] += 1;
        }
        for i in 0..nx * ny {
            cell_offsets[i + 1] += cell_offsets[i];
        }
        let mut cursor: Vec<u32> = cell_offsets[..nx * ny].to_vec();
        let mut point_indices = vec![0u32; points.len()];
        for (i, &p) in points.iter().enumerate() {
            let b = block_of(p);
            point_indices[cursor[b] as usize] = i as u32;
            cursor[b] += 1;
        }

        Self {
            nx,
            ny,
            block_w,
            block_h,
            origin,
            cell_offsets,
            point_indices,
        }
    }

    /// Block coordinates of a position (clamped into the grid).
    pub(crate) fn block_of(&self, p: DVec2) -> (usize, usize) {
        let ix = (((p.x - self.origin.x) / self.block_w) as usize).min(self.nx - 1);
        let iy = (((p.y - self.origin.y) / self.block_h) as usize).min(self.ny - 1);
        (ix, iy)
    }

    /// Shorter block side, used for conservative ring distance bounds.
    #[inline]
    pub(crate) fn min_block_dim(&self) -> f64 {
        self.block_w.min(self.block_h)
    }

    /// Largest Chebyshev ring around `(bx, by)` that still intersects the
    /// grid.
    pub(crate) fn max_ring(&self, bx: usize, by: usize) -> usize {
        bx.max(self.nx - 1 - bx).max(by).max(self.ny - 1 - by)
    }

    /// Visit the generator indices of every block at exactly Chebyshev
    /// distance `r` from `(bx, by)`, clamped to the grid.
    pub(crate) fn visit_ring<F: FnMut(&[u32])>(&self, bx: usize, by: usize, r: usize, mut f: F) {
        let (bx, by, r) = (bx as isize, by as isize, r as isize);
        let mut visit = |ix: isize, iy: isize| {
            if ix < 0 || iy < 0 || ix >= self.nx as isize || iy >= self.ny as isize {
                return;
            }
            let b = iy as usize * self.nx + ix as usize;
            let lo = self.cell_offsets[b] as usize;
            let hi = self.cell_offsets[b + 1] as usize;
            f(&self.point_indices[lo..hi]);
        };
        if r == 0 {
            visit(bx, by);
            return;
        }
        for ix in (bx - r)..=(bx + r) {
            visit(ix, by - r);
            visit(ix, by + r);
        }
        for iy in (by - r + 1)..=(by + r - 1) {
            visit(bx - r, iy);
            visit(bx + r, iy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

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
    fn every_point_is_bucketed_once() {
        let rect = Rect::from_extents(0.0, 2.0, 0.0, 1.0).unwrap();
        let points = random_points(500, 9, rect);
        let grid = BlockGrid::new(&points, rect);

        let mut seen = vec![0usize; points.len()];
        let (bx, by) = grid.block_of(DVec2::new(1.0, 0.5));
        for r in 0..=grid.max_ring(bx, by) {
            grid.visit_ring(bx, by, r, |idxs| {
                for &i in idxs {
                    seen[i as usize] += 1;
                }
            });
        }
        assert!(seen.iter().all(|&c| c == 1));
    }

    #[test]
    fn ring_zero_contains_the_query_point() {
        let rect = Rect::from_extents(0.0, 1.0, 0.0, 1.0).unwrap();
        let points = random_points(64, 10, rect);
        let grid = BlockGrid::new(&points, rect);

        for (i, &p) in points.iter().enumerate() {
            let (bx, by) = grid.block_of(p);
            let mut found = false;
            grid.visit_ring(bx, by, 0, |idxs| {
                found |= idxs.contains(&(i as u32));
            });
            assert!(found, "point {} missing from its own block", i);
        }
    }

    #[test]
    fn single_point_grid_degenerates_cleanly() {
        let rect = Rect::from_extents(-1.0, 1.0, -1.0, 1.0).unwrap();
        let points = vec![DVec2::new(0.1, -0.2)];
        let grid = BlockGrid::new(&points, rect);
        let (bx, by) = grid.block_of(points[0]);
        assert_eq!(grid.max_ring(bx, by), 0);
    }
}
