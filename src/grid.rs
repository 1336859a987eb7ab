//! Preview grid layout math.
//!
//! The pager shows one thumbnail per virtual desktop, packed into a
//! near-square `cols × rows` grid.  Everything here is plain arithmetic on
//! the desktop count and the screen size; degenerate inputs (zero or
//! negative screens, fractional counts) are absorbed into defaults rather
//! than reported as errors.

use serde::{Deserialize, Serialize};

/// Aspect ratio (height / width) assumed when the screen size is unknown.
pub const FALLBACK_ASPECT: f64 = 9.0 / 16.0;

/// Grid dimensions for the preview layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridDimensions {
    pub cols: usize,
    pub rows: usize,
}

/// Ratio of preview size to screen size on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

/// Size of a single desktop thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PreviewSize {
    pub width: f64,
    pub height: f64,
}

/// Axis-aligned rectangle in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Half-open hit test: the left/top edges are inside, the right/bottom
    /// edges are not.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// Compute the grid for `count` desktops.
///
/// `n = max(1, floor(count))`, `cols = ceil(sqrt(n))`, `rows = ceil(n / cols)`.
/// This is column-first packing, not the minimum-area rectangle: five
/// desktops give `3 × 2`.
pub fn calculate_grid(count: f64) -> GridDimensions {
    let n = count.floor().max(1.0) as usize;
    let cols = ((n as f64).sqrt().ceil() as usize).max(1);
    let rows = n.div_ceil(cols).max(1);
    GridDimensions { cols, rows }
}

fn is_positive(v: f64) -> bool {
    v > 0.0
}

/// Height of a preview `width` wide, keeping the screen's aspect ratio.
///
/// Falls back to 16:9 when either screen dimension is non-positive or NaN.
pub fn preview_height(width: f64, screen_width: f64, screen_height: f64) -> f64 {
    if is_positive(screen_width) && is_positive(screen_height) {
        width * screen_height / screen_width
    } else {
        width * FALLBACK_ASPECT
    }
}

/// Full preview size for a thumbnail `width` wide.
pub fn preview_size(width: f64, screen_width: f64, screen_height: f64) -> PreviewSize {
    PreviewSize {
        width,
        height: preview_height(width, screen_width, screen_height),
    }
}

/// Scale factors for mapping window geometry into a preview.
///
/// Screen dimensions are floored at `1` so a zero-sized screen never
/// divides by zero.
pub fn calculate_scale(
    preview_width: f64,
    preview_height: f64,
    screen_width: f64,
    screen_height: f64,
) -> Scale {
    Scale {
        x: preview_width / screen_width.max(1.0),
        y: preview_height / screen_height.max(1.0),
    }
}

//  Tests
