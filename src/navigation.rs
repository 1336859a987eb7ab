//! Desktop navigation, validation guards and drag-and-drop helpers.
//!
//! All inputs are `f64` because they come straight from the widget, where
//! every number is a double.  `NaN` stands in for "not a number" and makes
//! every guard return `false`.

use crate::grid::Rect;
use crate::traits::DropTargetLookup;

/// Pointer travel (in pixels) before a press becomes a drag.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 10.0;

/// Index of the desktop after `current` in `direction`, wrapping around.
///
/// A positive `direction` moves forward; zero, negative or `NaN` moves
/// backward.  Returns `0` when `count` is not positive.
pub fn next_desktop(current: f64, count: f64, direction: f64) -> usize {
    if count.is_nan() || count <= 0.0 {
        return 0;
    }
    let n = count.floor().max(1.0) as usize;
    let c = current.floor().max(0.0) as usize % n;

    if direction > 0.0 {
        if c + 1 == n {
            0
        } else {
            c + 1
        }
    } else if c == 0 {
        n - 1
    } else {
        c - 1
    }
}

/// Whether desktops `a` and `b` can be swapped among `count` desktops.
pub fn can_swap(a: f64, b: f64, count: f64) -> bool {
    a >= 0.0 && b >= 0.0 && a < count && b < count && a != b
}

/// Whether `index` is an integral position in `0..count`.
pub fn is_valid_index(index: f64, count: f64) -> bool {
    index >= 0.0 && index < count && index.fract() == 0.0
}

/// Whether `name` is usable as a desktop name.
pub fn is_valid_name(name: Option<&str>) -> bool {
    name.is_some_and(|n| !n.trim().is_empty())
}

/// Bound `value` to `[min, max]`.
///
/// Unlike [`f64::clamp`] this does not panic when `min > max`; `min` wins.
/// A `NaN` value stays `NaN`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return value;
    }
    value.min(max).max(min)
}

/// Euclidean distance between two points.
pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (x2 - x1).hypot(y2 - y1)
}

/// Whether the pointer moved strictly further than `threshold` from the
/// press position.
///
/// `None`, `0` and `NaN` all mean [`DEFAULT_DRAG_THRESHOLD`].
pub fn is_drag_started(
    start_x: f64,
    start_y: f64,
    current_x: f64,
    current_y: f64,
    threshold: Option<f64>,
) -> bool {
    let t = threshold
        .filter(|t| *t != 0.0 && !t.is_nan())
        .unwrap_or(DEFAULT_DRAG_THRESHOLD);
    distance(start_x, start_y, current_x, current_y) > t
}

/// Find the item under `(x, y)`.
///
/// Returns `None` when no lookup is available (the preview items are not
/// built yet), when the point is not finite, or when no item contains it.
pub fn find_drop_target<L>(lookup: Option<&L>, x: f64, y: f64) -> Option<usize>
where
    L: DropTargetLookup + ?Sized,
{
    let lookup = lookup?;
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    lookup.item_at(x, y)
}

/// [`DropTargetLookup`] over a snapshot of item rectangles.
///
/// `None` entries are items that exist but have no geometry yet; they are
/// skipped.  The first rectangle containing the point wins.
#[derive(Debug, Clone, Default)]
pub struct ItemRects {
    items: Vec<Option<Rect>>,
}

impl ItemRects {
    pub fn new(items: Vec<Option<Rect>>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl DropTargetLookup for ItemRects {
    fn item_at(&self, x: f64, y: f64) -> Option<usize> {
        self.items
            .iter()
            .enumerate()
            .find_map(|(i, rect)| rect.filter(|r| r.contains(x, y)).map(|_| i))
    }
}
