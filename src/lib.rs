use log::{info, warn};

pub mod bench;
pub mod complex;
pub mod coord;
pub mod frame;
pub mod painter;
pub mod render;
pub mod solver;
pub mod threads;
pub mod zoom;

pub use coord::{Viewport, ViewportError};
pub use frame::{Frame, Pixel};
pub use painter::{Painter, Palette};
pub use render::{render, FrameRenderer, RenderError};
pub use solver::EscapeSolver;
pub use threads::ThreadError;
pub use zoom::zoom;

pub mod defaults {
    pub use crate::render::DEFAULT_WORKERS as WORKERS;
    pub use crate::solver::{DEFAULT_ITERATIONS as ITERATIONS, DEFAULT_THRESHOLD as THRESHOLD};
    pub use crate::zoom::CLICK_RATIO;

    pub const WIDTH: u32 = 800;
    pub const HEIGHT: u32 = 800;
}

#[derive(Clone, Copy, Debug)]
pub struct ExplorerConfig {
    pub width: u32,
    pub height: u32,
    pub workers: usize,
    pub solver: EscapeSolver,
    pub ratio: f64,
    pub viewport: Viewport,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            width: defaults::WIDTH,
            height: defaults::HEIGHT,
            workers: defaults::WORKERS,
            solver: EscapeSolver::default(),
            ratio: defaults::CLICK_RATIO,
            viewport: Viewport::default(),
        }
    }
}

/// Current viewport and the last frame rendered for it.
///
/// Every change renders a new frame before anything is replaced, so a failed
/// zoom or resize leaves the previous viewport and frame in place.
pub struct Explorer<P = Palette> {
    renderer: FrameRenderer<EscapeSolver, P>,
    initial: Viewport,
    viewport: Viewport,
    width: u32,
    height: u32,
    ratio: f64,
    frame: Frame,
}

impl<P> Explorer<P>
where
    P: Painter + Sync,
{
    pub fn new(config: ExplorerConfig, painter: P) -> Result<Self, RenderError> {
        let renderer = FrameRenderer::new(config.solver, painter, config.workers);
        let frame = renderer.render(&config.viewport, config.width, config.height)?;
        Ok(Self {
            renderer,
            initial: config.viewport,
            viewport: config.viewport,
            width: config.width,
            height: config.height,
            ratio: config.ratio,
            frame,
        })
    }

    fn show(&mut self, viewport: Viewport, width: u32, height: u32) -> Result<&Frame, RenderError> {
        let frame = self
            .renderer
            .render(&viewport, width, height)
            .map_err(|e| {
                warn!("render rejected: {}", e);
                e
            })?;
        self.viewport = viewport;
        self.width = width;
        self.height = height;
        self.frame = frame;
        Ok(&self.frame)
    }

    /// Zooms toward a clicked pixel by the configured ratio.
    pub fn click(&mut self, x: u32, y: u32) -> Result<&Frame, RenderError> {
        self.zoom_at(x, y, self.ratio)
    }

    pub fn zoom_at(&mut self, x: u32, y: u32, ratio: f64) -> Result<&Frame, RenderError> {
        let next = zoom::zoom(&self.viewport, x, y, self.width, self.height, ratio).map_err(|e| {
            warn!("zoom at ({}, {}) by {} rejected: {}", x, y, ratio, e);
            e
        })?;
        info!(
            "zoom at ({}, {}) by {}: x [{}, {}] y [{}, {}]",
            x,
            y,
            ratio,
            next.x().min,
            next.x().max,
            next.y().min,
            next.y().max
        );
        self.show(next, self.width, self.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<&Frame, RenderError> {
        info!("resize to {}x{}", width, height);
        self.show(self.viewport, width, height)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<&Frame, RenderError> {
        self.show(viewport, self.width, self.height)
    }

    pub fn reset(&mut self) -> Result<&Frame, RenderError> {
        info!("reset viewport");
        self.show(self.initial, self.width, self.height)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn workers(&self) -> usize {
        self.renderer.workers()
    }
}

pub fn explorer(width: u32, height: u32) -> Result<Explorer, RenderError> {
    let config = ExplorerConfig {
        width,
        height,
        ..ExplorerConfig::default()
    };
    Explorer::new(config, Palette::default())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_frame() {
        let viewport = Viewport::default();
        let frame = render(&viewport, 800, 800, defaults::WORKERS).unwrap();
        assert!(!frame.is_empty());
        assert_eq!(frame.evaluated(), (frame.samples() / 10) * 10);

        // everything within 0.01 of the origin is inside the set
        let (cx, cy) = viewport.to_pixel(0.0, 0.0, 800, 800);
        for p in &frame {
            let near = p.x.abs_diff(cx) <= 2 && p.y.abs_diff(cy) <= 2;
            assert!(!near, "unexpected pixel near origin: {:?}", p);
        }
    }

    #[test]
    fn test_explorer_click() {
        let mut e = explorer(80, 60).unwrap();
        assert_eq!(e.workers(), defaults::WORKERS);
        assert!(!e.frame().is_empty());

        let before = *e.viewport();
        e.click(20, 45).unwrap();
        let after = *e.viewport();
        assert!((after.x().length() - before.x().length() * 0.8).abs() < 1e-12);
        assert!((after.center().re - (-1.0)).abs() < 1e-12);
        assert!((after.center().im - 1.0).abs() < 1e-12);

        e.reset().unwrap();
        assert_eq!(*e.viewport(), before);
    }

    #[test]
    fn test_explorer_keeps_state_on_failure() {
        let mut e = explorer(40, 40).unwrap();
        let viewport = *e.viewport();
        let pixels = e.frame().pixels().to_vec();

        assert!(matches!(
            e.zoom_at(20, 20, 0.0),
            Err(RenderError::Viewport(_))
        ));
        assert!(matches!(
            e.resize(0, 40),
            Err(RenderError::InvalidDimensions { .. })
        ));
        assert_eq!(*e.viewport(), viewport);
        assert_eq!((e.width(), e.height()), (40, 40));
        assert_eq!(e.frame().pixels(), pixels.as_slice());
    }

    #[test]
    fn test_explorer_resize_and_set_viewport() {
        let mut e = explorer(40, 40).unwrap();
        let frame = e.resize(64, 32).unwrap();
        assert!(frame.pixels().iter().all(|p| p.x < 64 && p.y < 32));
        assert_eq!((e.width(), e.height()), (64, 32));

        let v = Viewport::from_bounds(-0.8, -0.7, 0.05, 0.15).unwrap();
        e.set_viewport(v).unwrap();
        assert_eq!(*e.viewport(), v);
    }

    #[test]
    fn test_explorer_with_custom_palette() {
        let config = ExplorerConfig {
            width: 32,
            height: 32,
            workers: 3,
            ..ExplorerConfig::default()
        };
        let e = Explorer::new(config, painter::Greyscale::new(255)).unwrap();
        assert_eq!(e.workers(), 3);
        assert!(e
            .frame()
            .pixels()
            .iter()
            .all(|p| p.color[0] == p.color[1] && p.color[1] == p.color[2]));
    }
}
