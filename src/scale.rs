//! Size-dependent presentation metrics.
//!
//! Stroke widths, label sizes and handle targets scale with the image so that
//! tiny and huge images both stay usable. Every metric is clamped to a range.

/// Metrics derived from a reference width (the image width when known).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleHelpers {
    reference_width: f64,
    zoom: f64,
}

impl ScaleHelpers {
    /// Widths below this are treated as this, so metrics never collapse.
    pub const MIN_REFERENCE_WIDTH: f64 = 100.0;

    pub fn new(reference_width: f64) -> Self {
        Self::with_zoom(reference_width, 1.0)
    }

    /// Metrics for a view magnified by `zoom`; larger zoom gives thinner
    /// strokes in image space so they look the same on screen.
    pub fn with_zoom(reference_width: f64, zoom: f64) -> Self {
        let reference_width = if reference_width.is_finite() {
            reference_width.max(Self::MIN_REFERENCE_WIDTH)
        } else {
            Self::MIN_REFERENCE_WIDTH
        };
        Self {
            reference_width,
            zoom: if zoom > 0.0 { zoom } else { 1.0 },
        }
    }

    fn scaled(&self, factor: f64, min: f64, max: f64) -> f64 {
        (self.reference_width * factor / self.zoom).clamp(min, max)
    }

    pub fn line_width(&self) -> f64 {
        self.scaled(0.002, 2.0, 10.0)
    }

    pub fn selected_line_width(&self) -> f64 {
        self.line_width() * 1.5
    }

    pub fn font_size(&self) -> f64 {
        self.scaled(0.02, 12.0, 64.0)
    }

    /// Diameter of a drawn edge handle.
    pub fn handle_size(&self) -> f64 {
        self.scaled(0.01, 12.0, 40.0)
    }

    /// Pointer distance from an edge midpoint that still grabs the handle.
    /// Matches the drawn handle, so what is visible is what is grabbable.
    pub fn handle_hit_radius(&self) -> f64 {
        self.handle_size() / 2.0
    }

    /// Diameter of the magnifier loupe.
    pub fn magnifier_size(&self) -> f64 {
        self.scaled(0.1, 100.0, 450.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_image_uses_floor() {
        let scale = ScaleHelpers::new(10.0);
        assert_eq!(scale.line_width(), 2.0);
        assert_eq!(scale.handle_size(), 12.0);
        assert_eq!(scale.font_size(), 12.0);
        assert_eq!(scale.magnifier_size(), 100.0);
    }

    #[test]
    fn test_large_image_uses_ceiling() {
        let scale = ScaleHelpers::new(100_000.0);
        assert_eq!(scale.line_width(), 10.0);
        assert_eq!(scale.selected_line_width(), 15.0);
        assert_eq!(scale.handle_size(), 40.0);
        assert_eq!(scale.font_size(), 64.0);
        assert_eq!(scale.magnifier_size(), 450.0);
    }

    #[test]
    fn test_mid_range_scales_linearly() {
        let scale = ScaleHelpers::new(2000.0);
        assert!((scale.handle_size() - 20.0).abs() < 1e-9);
        assert!((scale.handle_hit_radius() - 10.0).abs() < 1e-9);
        assert!((scale.magnifier_size() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_shrinks_metrics() {
        let plain = ScaleHelpers::new(3000.0);
        let zoomed = ScaleHelpers::with_zoom(3000.0, 2.0);
        assert!(zoomed.handle_size() < plain.handle_size());
    }

    #[test]
    fn test_invalid_inputs_fall_back() {
        let scale = ScaleHelpers::with_zoom(f64::NAN, 0.0);
        assert_eq!(scale.handle_size(), 12.0);
    }
}
