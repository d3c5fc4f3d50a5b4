use num::{traits::NumOps, Num, One};
use thiserror::Error;

use crate::complex::{c, C};

trait Two {
    fn two() -> Self;
}

impl<T> Two for T
where
    T: One + NumOps,
{
    fn two() -> Self {
        T::one() + T::one()
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Axis<T> {
    pub min: T,
    pub max: T,
}

impl<T> Axis<T>
where
    T: Num + Copy,
{
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn length(&self) -> T {
        self.max - self.min
    }

    pub fn center(&self) -> T {
        (self.max + self.min) / T::two()
    }

    /// Axis of the given half length centered on `center`.
    pub fn around(center: T, half: T) -> Self {
        Self::new(center - half, center + half)
    }

    /// Position `n` of `steps` along the axis.
    pub fn lerp(&self, n: T, steps: T) -> T {
        self.min + (n / steps) * self.length()
    }
}

impl Axis<f64> {
    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.length() > 0.0
    }

    /// Values from `min` while `<= max`, accumulating `length / steps` each time.
    /// At most `steps + 1` values are produced, which only matters once the
    /// step falls below the resolution of `min`.
    pub fn walk(&self, steps: u32) -> impl Iterator<Item = f64> {
        let delta = self.length() / steps as f64;
        let max = self.max;
        std::iter::successors(Some(self.min), move |v| Some(*v + delta))
            .take_while(move |v| *v <= max)
            .take(steps as usize + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ViewportError {
    #[error("viewport bounds must be finite with positive extent: x [{xmin}, {xmax}], y [{ymin}, {ymax}]")]
    InvalidExtent {
        xmin: f64,
        xmax: f64,
        ymin: f64,
        ymax: f64,
    },
}

/// Visible rectangle of the complex plane. Real part runs along `x`,
/// imaginary part along `y`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    x: Axis<f64>,
    y: Axis<f64>,
}

impl Viewport {
    pub fn new(x: Axis<f64>, y: Axis<f64>) -> Result<Self, ViewportError> {
        if !x.is_valid() || !y.is_valid() {
            return Err(ViewportError::InvalidExtent {
                xmin: x.min,
                xmax: x.max,
                ymin: y.min,
                ymax: y.max,
            });
        }
        Ok(Self { x, y })
    }

    pub fn from_bounds(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Self, ViewportError> {
        Self::new(Axis::new(xmin, xmax), Axis::new(ymin, ymax))
    }

    pub fn from_box(center: C<f64>, width: f64, height: f64) -> Result<Self, ViewportError> {
        Self::new(
            Axis::around(center.re, width / 2.0),
            Axis::around(center.im, height / 2.0),
        )
    }

    pub fn x(&self) -> Axis<f64> {
        self.x
    }

    pub fn y(&self) -> Axis<f64> {
        self.y
    }

    pub fn center(&self) -> C<f64> {
        c(self.x.center(), self.y.center())
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.x.length() / self.y.length()
    }

    pub fn to_plane(&self, px: u32, py: u32, width: u32, height: u32) -> C<f64> {
        c(
            self.x.lerp(px as f64, width as f64),
            self.y.lerp(py as f64, height as f64),
        )
    }

    /// Inverse of [`Viewport::to_plane`], truncated and clamped into the raster.
    pub fn to_pixel(&self, re: f64, im: f64, width: u32, height: u32) -> (u32, u32) {
        (
            axis_to_pixel(&self.x, re, width),
            axis_to_pixel(&self.y, im, height),
        )
    }

    /// Upper bound on the number of samples in the grid for a `width` x
    /// `height` raster, or `None` when that grid could not fit in memory.
    pub fn grid_len(width: u32, height: u32) -> Option<usize> {
        let w = (width as usize).checked_add(1)?;
        let h = (height as usize).checked_add(1)?;
        let n = w.checked_mul(h)?;
        let bytes = n.checked_mul(std::mem::size_of::<C<f64>>())?;
        (bytes <= isize::MAX as usize).then(|| n)
    }

    /// The sample grid for a `width` x `height` raster, column by column:
    /// for each real step every imaginary step, both ends inclusive.
    pub fn samples(&self, width: u32, height: u32) -> Vec<C<f64>> {
        let mut grid = Vec::with_capacity(Self::grid_len(width, height).unwrap_or(0));
        for re in self.x.walk(width) {
            for im in self.y.walk(height) {
                grid.push(c(re, im));
            }
        }
        grid
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: Axis::new(-2.0, 2.0),
            y: Axis::new(-2.0, 2.0),
        }
    }
}

fn axis_to_pixel(axis: &Axis<f64>, v: f64, n: u32) -> u32 {
    let p = ((v - axis.min) / axis.length()) * n as f64;
    // float-to-int casts saturate, NaN becomes 0
    (p as u32).min(n.saturating_sub(1))
}
