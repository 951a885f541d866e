//! Rectangle and coordinate types.
//!
//! Cores are stored in normalized space: every coordinate is a fraction of the
//! canvas width/height, origin top-left, axes aligned to the unrotated image.
//! Pixel space only exists transiently for hit testing and drawing.

use serde::{Deserialize, Serialize};

/// A 2D point. Depending on context this is either in canvas pixels or in
/// normalized `[0, 1]` space; functions document which one they expect.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Logical canvas size in pixels.
///
/// This is the only scale factor used for pixel/normalized conversion. Changing
/// it never rescales stored cores; they simply reproject.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are strictly positive and finite.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Convert a canvas pixel position into normalized space.
    pub fn normalize_point(&self, point: Point) -> Point {
        Point::new(point.x / self.width, point.y / self.height)
    }

    /// Convert a normalized position into canvas pixels.
    pub fn denormalize_point(&self, point: Point) -> Point {
        Point::new(point.x * self.width, point.y * self.height)
    }

    /// Minimum core size for this canvas, given a minimum in pixels.
    pub fn min_size(&self, min_px: f64) -> MinSize {
        MinSize {
            width: (min_px / self.width).min(1.0),
            height: (min_px / self.height).min(1.0),
        }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(
            crate::constants::DEFAULT_CANVAS_WIDTH,
            crate::constants::DEFAULT_CANVAS_HEIGHT,
        )
    }
}

/// Minimum width/height of a core in normalized units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinSize {
    pub width: f64,
    pub height: f64,
}

impl MinSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Same minimum on both axes.
    pub fn uniform(size: f64) -> Self {
        Self::new(size, size)
    }
}

/// A normalized, axis-aligned core rectangle `(x1, y1, x2, y2)`.
///
/// Serialized as a plain `[x1, y1, x2, y2]` array, which is the shape hosts
/// exchange cores in.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Rect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Rect {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Axis-aligned box spanned by two corner points, in either order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x1: a.x.min(b.x),
            y1: a.y.min(b.y),
            x2: a.x.max(b.x),
            y2: a.y.max(b.y),
        }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn area(&self) -> f64 {
        (self.width() * self.height()).abs()
    }

    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Same rectangle with `x1 <= x2` and `y1 <= y2`.
    pub fn ordered(&self) -> Self {
        Self::from_corners(Point::new(self.x1, self.y1), Point::new(self.x2, self.y2))
    }

    /// Whether a normalized point lies inside (edges included).
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.x1 && point.x <= self.x2 && point.y >= self.y1 && point.y <= self.y2
    }

    /// Whether any coordinate is NaN.
    pub fn is_malformed(&self) -> bool {
        self.x1.is_nan() || self.y1.is_nan() || self.x2.is_nan() || self.y2.is_nan()
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }
}

impl From<[f64; 4]> for Rect {
    fn from([x1, y1, x2, y2]: [f64; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl From<Rect> for [f64; 4] {
    fn from(rect: Rect) -> Self {
        rect.to_array()
    }
}

/// A rectangle in canvas pixels, top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether a pixel point lies inside (edges included).
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_orders_points() {
        let a = Rect::from_corners(Point::new(0.5, 0.6), Point::new(0.1, 0.2));
        let b = Rect::from_corners(Point::new(0.1, 0.2), Point::new(0.5, 0.6));
        assert_eq!(a, b);
        assert_eq!(a, Rect::new(0.1, 0.2, 0.5, 0.6));
    }

    #[test]
    fn test_ordered_swaps_inverted_edges() {
        let rect = Rect::new(0.8, 0.9, 0.2, 0.1).ordered();
        assert_eq!(rect, Rect::new(0.2, 0.1, 0.8, 0.9));
    }

    #[test]
    fn test_rect_serializes_as_array() {
        let rect = Rect::new(0.1, 0.2, 0.3, 0.4);
        let json = serde_json::to_string(&rect).expect("serialize rect");
        assert_eq!(json, "[0.1,0.2,0.3,0.4]");

        let parsed: Rect = serde_json::from_str("[0.5,0.5,0.75,1.0]").expect("parse rect");
        assert_eq!(parsed, Rect::new(0.5, 0.5, 0.75, 1.0));
    }

    #[test]
    fn test_min_size_scales_with_canvas() {
        let min = CanvasSize::new(800.0, 400.0).min_size(8.0);
        assert!((min.width - 0.01).abs() < 1e-12);
        assert!((min.height - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_pixel_rect_contains_edges() {
        let rect = PixelRect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(&Point::new(10.0, 30.0)));
        assert!(!rect.contains(&Point::new(31.0, 15.0)));
    }
}
