// File: crates/coinchart-core/src/geometry.rs
// Summary: Lightweight geometry helpers for screen-space math.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }
    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }
}

/// One cubic segment of a path; the start point is the previous segment's `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub c1: Point,
    pub c2: Point,
    pub end: Point,
}

impl CubicBezier {
    /// Horizontal-tangent smoothing between two consecutive points: both
    /// control points sit at the mid x, the first at `p0.y`, the second at `p1.y`.
    pub fn smooth_step(p0: Point, p1: Point) -> Self {
        let mid_x = (p0.x + p1.x) / 2.0;
        Self {
            c1: Point::new(mid_x, p0.y),
            c2: Point::new(mid_x, p1.y),
            end: p1,
        }
    }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smooth_step_places_controls_at_mid_x() {
        let seg = CubicBezier::smooth_step(Point::new(10.0, 50.0), Point::new(30.0, 20.0));
        assert_eq!(seg.c1, Point::new(20.0, 50.0));
        assert_eq!(seg.c2, Point::new(20.0, 20.0));
        assert_eq!(seg.end, Point::new(30.0, 20.0));
    }

    #[test]
    fn clamp_keeps_value_in_bounds() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
    }
}
