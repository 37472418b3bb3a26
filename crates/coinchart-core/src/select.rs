// File: crates/coinchart-core/src/select.rs
// Summary: Touch hit-testing against precomputed point positions.

use crate::geometry::Point;

/// Index of the first point whose x lies within `slot_width / 2` of `touch_x`
/// (inclusive), or `None`.
pub fn point_index_from_touch_x(touch_x: f32, slot_width: f32, points: &[Point]) -> Option<usize> {
    let half = slot_width / 2.0;
    let (lo, hi) = (touch_x - half, touch_x + half);
    points.iter().position(|p| p.x >= lo && p.x <= hi)
}
