//! Input events delivered by the host.

use serde::{Deserialize, Serialize};

use crate::model::Point;

/// Pointer input in client (page) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PointerEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    /// Pointer left the canvas.
    Leave,
    /// Canvas lost focus.
    Blur,
}

impl PointerEvent {
    /// Client position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match *self {
            PointerEvent::Down { x, y } | PointerEvent::Move { x, y } | PointerEvent::Up { x, y } => {
                Some(Point::new(x, y))
            }
            PointerEvent::Leave | PointerEvent::Blur => None,
        }
    }
}

/// On-page box of the canvas element, used to map client coordinates to
/// canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasBounds {
    pub left: f64,
    pub top: f64,
    /// Displayed size of the element.
    pub width: f64,
    pub height: f64,
    /// Backing store size of the canvas in pixels.
    pub pixel_width: f64,
    pub pixel_height: f64,
}

impl CanvasBounds {
    /// Bounds of a canvas displayed unscaled at the page origin.
    pub fn unscaled(width: f64, height: f64) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
            pixel_width: width,
            pixel_height: height,
        }
    }

    /// Client coordinates to canvas pixels. `None` while the element has no
    /// displayed size.
    pub fn to_canvas(&self, client: Point) -> Option<Point> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        Some(Point::new(
            (client.x - self.left) * self.pixel_width / self.width,
            (client.y - self.top) * self.pixel_height / self.height,
        ))
    }
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    Enter,
    Char(char),
}
