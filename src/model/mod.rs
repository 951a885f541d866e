//! Data models for the highlighter.

mod handle;
mod rect;

pub use handle::Handle;
pub use rect::{CanvasSize, MinSize, PixelRect, Point, Rect};
