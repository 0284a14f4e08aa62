//! Input-side types: the bounding rectangle and the generator-point trait.

use glam::DVec2;

use crate::error::VoronoiError;

/// Anything usable as a generator position.
///
/// Lets callers pass `glam::DVec2`, plain arrays, or tuples without
/// converting up front.
pub trait Vec2Like: Copy {
    fn x(&self) -> f64;
    fn y(&self) -> f64;

    #[inline]
    fn to_dvec2(&self) -> DVec2 {
        DVec2::new(self.x(), self.y())
    }
}

impl Vec2Like for DVec2 {
    #[inline]
    fn x(&self) -> f64 {
        self.x
    }
    #[inline]
    fn y(&self) -> f64 {
        self.y
    }
}

impl Vec2Like for [f64; 2] {
    #[inline]
    fn x(&self) -> f64 {
        self[0]
    }
    #[inline]
    fn y(&self) -> f64 {
        self[1]
    }
}

impl Vec2Like for (f64, f64) {
    #[inline]
    fn x(&self) -> f64 {
        self.0
    }
    #[inline]
    fn y(&self) -> f64 {
        self.1
    }
}

/// Axis-aligned bounding rectangle for a diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: DVec2,
    pub max: DVec2,
}

impl Rect {
    /// Build from corner points; both extents must be positive.
    pub fn new(min: DVec2, max: DVec2) -> Result<Self, VoronoiError> {
        if !(min.x < max.x && min.y < max.y) {
            return Err(VoronoiError::InvalidBox {
                xmin: min.x,
                xmax: max.x,
                ymin: min.y,
                ymax: max.y,
            });
        }
        Ok(Self { min, max })
    }

    /// Build from the four extents.
    pub fn from_extents(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Self, VoronoiError> {
        Self::new(DVec2::new(xmin, ymin), DVec2::new(xmax, ymax))
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Strict-interior containment. Generators on the boundary would give
    /// their cell a zero-width initial box, so the boundary is excluded.
    #[inline]
    pub fn contains_interior(&self, p: DVec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_rejects_degenerate_extents() {
        assert!(Rect::from_extents(0.0, 0.0, 0.0, 1.0).is_err());
        assert!(Rect::from_extents(0.0, 1.0, 1.0, 0.0).is_err());
        assert!(Rect::from_extents(0.0, 1.0, 0.0, 1.0).is_ok());
    }

    #[test]
    fn interior_excludes_the_boundary() {
        let rect = Rect::from_extents(0.0, 1.0, 0.0, 1.0).unwrap();
        assert!(rect.contains_interior(DVec2::new(0.5, 0.5)));
        assert!(!rect.contains_interior(DVec2::new(0.0, 0.5)));
        assert!(!rect.contains_interior(DVec2::new(0.5, 1.0)));
    }

    #[test]
    fn mixed_input_types_agree() {
        let a = DVec2::new(0.25, 0.75).to_dvec2();
        let b = [0.25, 0.75].to_dvec2();
        let c = (0.25, 0.75).to_dvec2();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }
}
