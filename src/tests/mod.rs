//! Scenario tests driving the editor end to end.

mod gesture_tests;

use crate::model::Rect;

pub(crate) const EPS: f64 = 1e-6;

pub(crate) fn approx_rect(actual: &Rect, expected: [f64; 4]) -> bool {
    actual
        .to_array()
        .iter()
        .zip(expected)
        .all(|(a, e)| (a - e).abs() < EPS)
}
