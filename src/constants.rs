//! Global constants for the highlighter

/// Canvas width used until an image reports its size
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;

/// Canvas height used until an image reports its size
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

/// Minimum core width/height in canvas pixels
pub const DEFAULT_MIN_RECT_SIZE_PX: f64 = 5.0;

/// Decimal digits kept when converting pixels back to normalized space
pub const NORMALIZED_PRECISION: i32 = 6;

/// First core created by "add" on an empty list
pub const FIRST_RECT: [f64; 4] = [0.1, 0.1, 0.2, 0.2];

/// Vertical gap between the last core and the one "add" appends below it
pub const NEXT_RECT_GAP: f64 = 0.01;

/// Height used by "add" when the last core has zero height
pub const NEXT_RECT_FALLBACK_HEIGHT: f64 = 0.13;

/// Magnifier zoom factor
pub const DEFAULT_MAGNIFIER_ZOOM: f64 = 2.0;

/// Gap between the magnifier rim and the dragged edge, in pixels
pub const MAGNIFIER_EDGE_GAP: f64 = 12.0;

/// Minimum interval between processed pointer moves (one 60 Hz frame)
pub const DEFAULT_MOVE_INTERVAL_MS: u64 = 16;
