use std::time::Instant;

use log::debug;
use thiserror::Error;

use crate::complex::C;
use crate::coord::{Viewport, ViewportError};
use crate::frame::{Frame, Pixel};
use crate::painter::{Ember, Painter};
use crate::solver::{EscapeSolver, Solver};
use crate::threads::{ThreadError, WorkerPool};

pub const DEFAULT_WORKERS: usize = 10;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("raster dimensions must be positive and addressable: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error(transparent)]
    Viewport(#[from] ViewportError),
    #[error("render workers failed")]
    Workers(#[from] ThreadError),
}

/// Computes whole frames by fanning the sample grid out over a worker pool.
#[derive(Clone, Debug)]
pub struct FrameRenderer<S = EscapeSolver, P = Ember> {
    solver: S,
    painter: P,
    pool: WorkerPool,
}

impl<S, P> FrameRenderer<S, P>
where
    S: Solver + Sync,
    P: Painter + Sync,
{
    pub fn new(solver: S, painter: P, workers: usize) -> Self {
        Self {
            solver,
            painter,
            pool: WorkerPool::new("render", workers),
        }
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    pub fn workers(&self) -> usize {
        self.pool.workers()
    }

    pub fn render(&self, viewport: &Viewport, width: u32, height: u32) -> Result<Frame, RenderError> {
        if width == 0 || height == 0 || Viewport::grid_len(width, height).is_none() {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        let start = Instant::now();
        let samples = viewport.samples(width, height);
        let frame = self
            .pool
            .call_join(&samples, |part| {
                self.render_part(viewport, part, width, height)
            })?
            .with_samples(samples.len());
        debug!(
            "rendered {}x{} with {} workers: {} pixels from {}/{} samples in {:?}",
            width,
            height,
            self.workers(),
            frame.len(),
            frame.evaluated(),
            frame.samples(),
            start.elapsed()
        );
        Ok(frame)
    }

    fn render_part(&self, viewport: &Viewport, part: &[C<f64>], width: u32, height: u32) -> Frame {
        let pixels = part
            .iter()
            .filter_map(|c| {
                let count = self.solver.solve(*c)?;
                let (x, y) = viewport.to_pixel(c.re, c.im, width, height);
                Some(Pixel::new(x, y, self.painter.color(count)))
            })
            .collect();
        Frame::new(pixels, part.len(), part.len())
    }
}

impl Default for FrameRenderer {
    fn default() -> Self {
        Self::new(EscapeSolver::default(), Ember, DEFAULT_WORKERS)
    }
}

/// Renders `viewport` with the default solver and palette on `workers` threads.
pub fn render(viewport: &Viewport, width: u32, height: u32, workers: usize) -> Result<Frame, RenderError> {
    FrameRenderer::new(EscapeSolver::default(), Ember, workers).render(viewport, width, height)
}
