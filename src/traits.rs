//! Seams between the pure pager logic and its surroundings.
//!
//! The widget shell owns the live preview items and the transport that
//! delivers requests.  Both are reached only through these traits, so the
//! navigation and command logic can be exercised without any UI toolkit.

use crate::command::Incoming;
use std::sync::mpsc;

/// Geometry lookup over the preview items currently on screen.
///
/// Given a point in grid coordinates, return the index of the item that
/// contains it.  A UI harness implements this over its live items;
/// [`ItemRects`](crate::navigation::ItemRects) implements it over plain
/// rectangles.
pub trait DropTargetLookup {
    fn item_at(&self, x: f64, y: f64) -> Option<usize>;
}

/// A source of [`Request`](crate::command::Request)s.
///
/// Implementations read some transport (stdin, a pipe, a test harness)
/// and forward every request into `sink`.  A line that cannot be parsed
/// is forwarded as `Err` so the consumer can answer it.
///
/// # Contract
///
/// * [`run`](RequestSource::run) **blocks** until the source is exhausted
///   or an unrecoverable error occurs.
/// * Lines that fail to parse are reported, not fatal.
/// * Implementations must be [`Send`] so they can run on their own thread.
pub trait RequestSource: Send {
    type Error: std::error::Error + Send + 'static;

    /// Forward every incoming request into `sink`.
    fn run(&mut self, sink: mpsc::Sender<Incoming>) -> Result<(), Self::Error>;
}
