use crate::coord::{Axis, Viewport, ViewportError};

/// Shrink ratio applied by a plain click.
pub const CLICK_RATIO: f64 = 0.8;

/// Viewport centered on pixel `(click_x, click_y)` of a `width` x `height`
/// raster, with both extents scaled by `ratio`. Below one zooms in, above one
/// zooms out.
pub fn zoom(
    viewport: &Viewport,
    click_x: u32,
    click_y: u32,
    width: u32,
    height: u32,
    ratio: f64,
) -> Result<Viewport, ViewportError> {
    let center = viewport.to_plane(click_x, click_y, width, height);
    let half_x = (viewport.x().length() / 2.0) * ratio;
    let half_y = (viewport.y().length() / 2.0) * ratio;
    Viewport::new(
        Axis::around(center.re, half_x),
        Axis::around(center.im, half_y),
    )
}
