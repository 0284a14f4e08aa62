//! Plot and record emitters for a single cell.
//!
//! All emitters take the cell's generator displacement explicitly, since the
//! cell itself lives in generator-local coordinates. Every writer is plain
//! `io::Write`; callers own buffering and file lifetimes.

use std::io::{self, Write};

use super::ConvexCell;

impl ConvexCell {
    /// Emit the cell boundary as a gnuplot polyline displaced by `(dx, dy)`:
    /// one `x y` line per vertex, vertex 0 repeated to close the loop, then
    /// a blank separator line. No output for an empty cell.
    pub fn draw_gnuplot<W: Write>(&self, dx: f64, dy: f64, w: &mut W) -> io::Result<()> {
        if self.p == 0 {
            return Ok(());
        }
        let mut k = 0;
        loop {
            let v = 0.5 * self.pts[k];
            writeln!(w, "{} {}", dx + v.x, dy + v.y)?;
            k = self.next[k];
            if k == 0 {
                break;
            }
        }
        let v = 0.5 * self.pts[0];
        writeln!(w, "{} {}", dx + v.x, dy + v.y)?;
        writeln!(w)
    }

    /// Emit the cell boundary as a POV-Ray fragment at elevation `dz`: a
    /// sphere on each vertex and a cylinder along each edge, using the scene
    /// symbol `r` for the stroke radius. No output for an empty cell.
    pub fn draw_pov<W: Write>(&self, dx: f64, dy: f64, dz: f64, w: &mut W) -> io::Result<()> {
        if self.p == 0 {
            return Ok(());
        }
        let mut k = 0;
        loop {
            let a = 0.5 * self.pts[k];
            k = self.next[k];
            let b = 0.5 * self.pts[k];
            writeln!(w, "sphere{{<{},{},{}>,r}}", dx + a.x, dy + a.y, dz)?;
            writeln!(
                w,
                "cylinder{{<{},{},{}>,<{},{},{}>,r}}",
                dx + a.x,
                dy + a.y,
                dz,
                dx + b.x,
                dy + b.y,
                dz
            )?;
            if k == 0 {
                break;
            }
        }
        Ok(())
    }

    /// Emit one newline-terminated record, substituting cell and generator
    /// statistics for `%`-tokens in `format`:
    ///
    /// | token | value |
    /// |-------|-------|
    /// | `%i`  | generator id |
    /// | `%x`, `%y`, `%q` | generator position (`%q` emits both) |
    /// | `%r`  | generator radius |
    /// | `%w`  | vertex count |
    /// | `%m`  | squared distance to the farthest vertex |
    /// | `%p`  | perimeter |
    /// | `%a`  | area |
    /// | `%c`  | centroid, generator-relative |
    /// | `%C`  | centroid, absolute |
    ///
    /// Any other `%X` is emitted verbatim, as is a trailing lone `%`.
    pub fn output_custom<W: Write>(
        &self,
        format: &str,
        id: i32,
        x: f64,
        y: f64,
        r: f64,
        w: &mut W,
    ) -> io::Result<()> {
        let mut chars = format.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                write!(w, "{}", c)?;
                continue;
            }
            match chars.next() {
                Some('i') => write!(w, "{}", id)?,
                Some('x') => write!(w, "{}", x)?,
                Some('y') => write!(w, "{}", y)?,
                Some('q') => write!(w, "{} {}", x, y)?,
                Some('r') => write!(w, "{}", r)?,
                Some('w') => write!(w, "{}", self.p)?,
                Some('m') => write!(w, "{}", 0.25 * self.max_radius_squared())?,
                Some('p') => write!(w, "{}", self.perimeter())?,
                Some('a') => write!(w, "{}", self.area())?,
                Some('c') => {
                    let c = self.centroid();
                    write!(w, "{} {}", c.x, c.y)?;
                }
                Some('C') => {
                    let c = self.centroid();
                    write!(w, "{} {}", x + c.x, y + c.y)?;
                }
                Some(other) => write!(w, "%{}", other)?,
                None => write!(w, "%")?,
            }
        }
        writeln!(w)
    }
}
