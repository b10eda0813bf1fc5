//! Viewport bounds in virtual pixels.

/// Drawable area in virtual pixels.
///
/// Both dimensions are kept at 1.0 or above so wraparound is always defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a viewport, clamping degenerate dimensions to one pixel.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    /// Viewport covering a terminal area of `cols` x `rows` cells.
    pub fn from_cells(cols: u16, rows: u16, cell_width_px: u16, cell_height_px: u16) -> Self {
        Self::new(
            cols as f32 * cell_width_px as f32,
            rows as f32 * cell_height_px as f32,
        )
    }

    /// Whether the point lies in `[0, width) x [0, height)`.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (0.0..self.width).contains(&x) && (0.0..self.height).contains(&y)
    }

    /// Wrap a horizontal coordinate into `[0, width)`.
    pub fn wrap_x(&self, x: f32) -> f32 {
        wrap(x, self.width)
    }

    /// Wrap a vertical coordinate into `[0, height)`.
    pub fn wrap_y(&self, y: f32) -> f32 {
        wrap(y, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

fn sanitize(value: f32) -> f32 {
    if value.is_finite() { value.max(1.0) } else { 1.0 }
}

fn wrap(value: f32, extent: f32) -> f32 {
    if !value.is_finite() {
        return 0.0;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if wrapped >= extent { 0.0 } else { wrapped }
}
