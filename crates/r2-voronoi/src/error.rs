//! Error type for diagram and cell construction.

use std::error::Error;
use std::fmt;

/// Errors reported by cell initialization and diagram computation.
///
/// Storage-ceiling overruns are deliberately not represented here: they
/// abort the process, because the cell arrays are mid-mutation when growth
/// fails and no caller-side recovery is possible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VoronoiError {
    /// A bounding rectangle with non-positive extent on some axis.
    InvalidBox {
        xmin: f64,
        xmax: f64,
        ymin: f64,
        ymax: f64,
    },
    /// Too few generators to compute anything (the count is attached).
    InsufficientPoints(usize),
    /// Generator at this index lies on or outside the bounding rectangle.
    PointOutOfBounds(usize),
}

impl fmt::Display for VoronoiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            VoronoiError::InvalidBox {
                xmin,
                xmax,
                ymin,
                ymax,
            } => write!(
                f,
                "invalid bounding box [{}, {}] x [{}, {}]",
                xmin, xmax, ymin, ymax
            ),
            VoronoiError::InsufficientPoints(n) => {
                write!(f, "need at least 1 generator, got {}", n)
            }
            VoronoiError::PointOutOfBounds(i) => {
                write!(f, "generator {} is not strictly inside the bounding box", i)
            }
        }
    }
}

impl Error for VoronoiError {}
