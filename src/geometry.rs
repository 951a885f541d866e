//! Coordinate conversion and hit testing.
//!
//! All functions here are pure. Normalized rectangles are converted to pixel
//! space only for hit testing, where handle radii are expressed in pixels.

use crate::constants::NORMALIZED_PRECISION;
use crate::model::{CanvasSize, Handle, MinSize, PixelRect, Point, Rect};

/// Project a normalized core onto the canvas.
pub fn to_pixels(rect: &Rect, size: CanvasSize) -> PixelRect {
    PixelRect {
        x: rect.x1 * size.width,
        y: rect.y1 * size.height,
        width: (rect.x2 - rect.x1) * size.width,
        height: (rect.y2 - rect.y1) * size.height,
    }
}

/// Inverse of [`to_pixels`], rounded to 6 decimal digits so that round trips
/// are stable and float noise never shows up as a change.
pub fn to_normalized(pixel: &PixelRect, size: CanvasSize) -> Rect {
    Rect {
        x1: round_normalized(pixel.x / size.width),
        y1: round_normalized(pixel.y / size.height),
        x2: round_normalized(pixel.right() / size.width),
        y2: round_normalized(pixel.bottom() / size.height),
    }
}

/// Round a normalized coordinate to the stored precision.
pub fn round_normalized(value: f64) -> f64 {
    let factor = 10f64.powi(NORMALIZED_PRECISION);
    (value * factor).round() / factor
}

/// Round every coordinate of a core to the stored precision.
pub fn round_rect(rect: &Rect) -> Rect {
    Rect {
        x1: round_normalized(rect.x1),
        y1: round_normalized(rect.y1),
        x2: round_normalized(rect.x2),
        y2: round_normalized(rect.y2),
    }
}

/// Pixel positions of the four edge-midpoint handles, in priority order.
pub fn handle_points(pixel: &PixelRect) -> [(Handle, Point); 4] {
    let center = pixel.center();
    [
        (Handle::Top, Point::new(center.x, pixel.y)),
        (Handle::Bottom, Point::new(center.x, pixel.bottom())),
        (Handle::Left, Point::new(pixel.x, center.y)),
        (Handle::Right, Point::new(pixel.right(), center.y)),
    ]
}

/// Find the handle under a pixel point.
///
/// Edge handles win over the body: a point within `radius` of an edge midpoint
/// returns that edge even when it is also inside the rectangle. Ties between
/// edges resolve in `Top, Bottom, Left, Right` order.
pub fn hit_test_handle(point: &Point, pixel: &PixelRect, radius: f64) -> Handle {
    for (handle, anchor) in handle_points(pixel) {
        if point.distance_to(&anchor) <= radius {
            return handle;
        }
    }

    if pixel.contains(point) {
        return Handle::Inside;
    }

    Handle::None
}

/// Clamp every coordinate into `[0, 1]` and restore `x1 <= x2`, `y1 <= y2`.
/// NaN coordinates become `0`.
pub fn clamp_rect(rect: &Rect) -> Rect {
    let ordered = Rect::new(
        nan_to_zero(rect.x1),
        nan_to_zero(rect.y1),
        nan_to_zero(rect.x2),
        nan_to_zero(rect.y2),
    )
    .ordered();
    Rect {
        x1: ordered.x1.clamp(0.0, 1.0),
        y1: ordered.y1.clamp(0.0, 1.0),
        x2: ordered.x2.clamp(0.0, 1.0),
        y2: ordered.y2.clamp(0.0, 1.0),
    }
}

/// Grow a core symmetrically around its center until both sides reach `min`.
///
/// When the grown extent would leave `[0, 1]` it is shifted back inside
/// instead of being cut, so the result keeps the full minimum size.
pub fn ensure_min_size(rect: &Rect, min: MinSize) -> Rect {
    let mut out = clamp_rect(rect);

    if out.width() < min.width {
        let (lo, hi) = expand_span(out.x1, out.x2, min.width);
        out.x1 = lo;
        out.x2 = hi;
    }
    if out.height() < min.height {
        let (lo, hi) = expand_span(out.y1, out.y2, min.height);
        out.y1 = lo;
        out.y2 = hi;
    }

    clamp_rect(&out)
}

fn nan_to_zero(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v }
}

fn expand_span(lo: f64, hi: f64, min: f64) -> (f64, f64) {
    let min = min.min(1.0);
    let center = (lo + hi) / 2.0;
    let start = (center - min / 2.0).clamp(0.0, 1.0 - min);
    (start, start + min)
}

/// Inverse-rotate a normalized point around the image center `(0.5, 0.5)`.
///
/// The image may be displayed rotated by `angle_degrees`; cores are always
/// stored unrotated, so pointer input is mapped back before any hit test.
pub fn rotate_around_center(point: Point, angle_degrees: f64) -> Point {
    if angle_degrees == 0.0 {
        return point;
    }

    let rad = (-angle_degrees).to_radians();
    let (sin, cos) = rad.sin_cos();
    let dx = point.x - 0.5;
    let dy = point.y - 0.5;

    Point {
        x: dx * cos - dy * sin + 0.5,
        y: dx * sin + dy * cos + 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_to_pixels() {
        let px = to_pixels(&Rect::new(0.25, 0.5, 0.75, 1.0), CanvasSize::new(800.0, 600.0));
        assert_eq!(px, PixelRect::new(200.0, 300.0, 400.0, 300.0));
    }

    #[test]
    fn test_round_trip_keeps_six_digits() {
        let sizes = [
            CanvasSize::new(800.0, 600.0),
            CanvasSize::new(1.0, 1.0),
            CanvasSize::new(4097.0, 33.0),
            CanvasSize::new(0.5, 12345.0),
        ];
        let rects = [
            Rect::new(0.125, 0.166667, 0.375, 0.416667),
            Rect::new(0.0, 0.0, 1.0, 1.0),
            Rect::new(0.333333, 0.1, 0.999999, 0.2),
        ];
        for size in sizes {
            for rect in rects {
                let back = to_normalized(&to_pixels(&rect, size), size);
                for (a, b) in back.to_array().iter().zip(rect.to_array()) {
                    assert!((a - b).abs() < 5e-7, "{rect:?} via {size:?} came back as {back:?}");
                }
            }
        }
    }

    #[test]
    fn test_to_normalized_rounds() {
        let rect = to_normalized(
            &PixelRect::new(100.0, 100.0, 200.0, 150.0),
            CanvasSize::new(800.0, 600.0),
        );
        assert_eq!(rect, Rect::new(0.125, 0.166667, 0.375, 0.416667));
    }

    #[test]
    fn test_handle_beats_body() {
        let pixel = PixelRect::new(100.0, 100.0, 200.0, 100.0);
        // Just inside the top edge, next to its midpoint
        let point = Point::new(200.0, 103.0);
        assert!(pixel.contains(&point));
        assert_eq!(hit_test_handle(&point, &pixel, 6.0), Handle::Top);
    }

    #[test]
    fn test_hit_test_each_edge() {
        let pixel = PixelRect::new(100.0, 100.0, 200.0, 100.0);
        assert_eq!(hit_test_handle(&Point::new(200.0, 200.0), &pixel, 6.0), Handle::Bottom);
        assert_eq!(hit_test_handle(&Point::new(100.0, 150.0), &pixel, 6.0), Handle::Left);
        assert_eq!(hit_test_handle(&Point::new(300.0, 150.0), &pixel, 6.0), Handle::Right);
        assert_eq!(hit_test_handle(&Point::new(150.0, 130.0), &pixel, 6.0), Handle::Inside);
        assert_eq!(hit_test_handle(&Point::new(50.0, 50.0), &pixel, 6.0), Handle::None);
    }

    #[test]
    fn test_hit_test_tie_prefers_declared_order() {
        // A flat rectangle puts the top and bottom midpoints on top of each other
        let pixel = PixelRect::new(100.0, 100.0, 200.0, 0.0);
        assert_eq!(hit_test_handle(&Point::new(200.0, 100.0), &pixel, 6.0), Handle::Top);
    }

    #[test]
    fn test_handle_outside_body_still_hits() {
        let pixel = PixelRect::new(100.0, 100.0, 200.0, 100.0);
        assert_eq!(hit_test_handle(&Point::new(200.0, 96.0), &pixel, 6.0), Handle::Top);
    }

    #[test]
    fn test_clamp_rect_orders_and_clamps() {
        let rect = clamp_rect(&Rect::new(1.2, 0.5, -0.3, -0.1));
        assert_eq!(rect, Rect::new(0.0, 0.0, 1.0, 0.5));
    }

    #[test]
    fn test_clamp_rect_replaces_nan() {
        let rect = clamp_rect(&Rect::new(0.5, f64::NAN, 0.7, f64::NAN));
        assert_eq!(rect, Rect::new(0.5, 0.0, 0.7, 0.0));

        let rect = clamp_rect(&Rect::new(f64::NAN, 0.2, 0.4, f64::INFINITY));
        assert_eq!(rect, Rect::new(0.0, 0.2, 0.4, 1.0));

        let rect = ensure_min_size(
            &Rect::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN),
            MinSize::uniform(0.1),
        );
        assert!(approx(rect.x1, 0.0) && approx(rect.x2, 0.1));
        assert!(approx(rect.y1, 0.0) && approx(rect.y2, 0.1));
    }

    #[test]
    fn test_ensure_min_size_expands_symmetrically() {
        let rect = ensure_min_size(&Rect::new(0.5, 0.5, 0.5, 0.5), MinSize::uniform(0.1));
        assert!(approx(rect.x1, 0.45));
        assert!(approx(rect.x2, 0.55));
        assert!(approx(rect.y1, 0.45));
        assert!(approx(rect.y2, 0.55));
    }

    #[test]
    fn test_ensure_min_size_at_border_keeps_size() {
        let rect = ensure_min_size(&Rect::new(0.0, 0.99, 0.0, 1.0), MinSize::uniform(0.1));
        assert!(approx(rect.width(), 0.1));
        assert!(approx(rect.height(), 0.1));
        assert!(rect.x1 >= 0.0 && rect.y2 <= 1.0);
    }

    #[test]
    fn test_ensure_min_size_leaves_large_rect() {
        let rect = Rect::new(0.1, 0.1, 0.6, 0.6);
        assert_eq!(ensure_min_size(&rect, MinSize::uniform(0.1)), rect);
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let p = Point::new(0.2, 0.7);
        assert_eq!(rotate_around_center(p, 0.0), p);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let p = rotate_around_center(Point::new(1.0, 0.5), 90.0);
        assert!(approx(p.x, 0.5));
        assert!(approx(p.y, 0.0));

        let back = rotate_around_center(p, -90.0);
        assert!(approx(back.x, 1.0));
        assert!(approx(back.y, 0.5));
    }

    #[test]
    fn test_center_is_fixed_point() {
        let p = rotate_around_center(Point::new(0.5, 0.5), 37.0);
        assert!(approx(p.x, 0.5) && approx(p.y, 0.5));
    }
}
