//! Highlighter - rectangle region editor core
//!
//! Draw, move, resize, sort and delete axis-aligned "cores" on top of an image.
//! Cores live in normalized `[0, 1]` coordinates; the host supplies pointer
//! events and a canvas size, and receives change notifications and draw
//! commands back.

pub mod callback;
pub mod config;
pub mod constants;
pub mod context_menu;
pub mod editor;
pub mod error;
pub mod event;
pub mod geometry;
pub mod interaction;
pub mod keybindings;
pub mod model;
pub mod render;
pub mod scale;
pub mod sort;
pub mod store;
pub mod throttle;

#[cfg(test)]
mod tests;

pub use config::{EditorConfig, LogLevel};
pub use editor::{Editor, Rectangles};
pub use error::ConfigError;
pub use event::{CanvasBounds, Key, PointerEvent};
pub use model::{CanvasSize, Handle, MinSize, PixelRect, Point, Rect};
pub use render::{Cursor, DrawCommand, EditorSnapshot};
pub use sort::{SortAxis, SortDirection, SortOptions, SortResult, stable_sort};
