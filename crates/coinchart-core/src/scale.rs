// File: crates/coinchart-core/src/scale.rs
// Summary: Slot (X) and Value (Y) scale transforms from data space to screen space.

/// Value Y coordinate (e.g., price).
pub type Value = f64;

/// Horizontal scale: one fixed-width slot per visible point, point centered in its slot.
#[derive(Clone, Copy, Debug)]
pub struct SlotScale {
    pub left_px: f32,
    pub slot_width: f32,
}

impl SlotScale {
    pub fn new(left_px: f32, slot_width: f32) -> Self {
        Self { left_px, slot_width }
    }
    /// Left edge of slot `index`.
    #[inline]
    pub fn slot_left(&self, index: usize) -> f32 {
        self.left_px + index as f32 * self.slot_width
    }
    /// Center of slot `index`; where the point is drawn.
    #[inline]
    pub fn to_px(&self, index: usize) -> f32 {
        self.slot_left(index) + self.slot_width / 2.0
    }
}

/// Vertical value scale mapping `[vmin, vmax]` to `[bottom, top]` pixels.
/// A zero-span range maps every value to the bottom edge.
#[derive(Clone, Copy, Debug)]
pub struct ValueScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmin: Value,
    pub vmax: Value,
}

impl ValueScale {
    pub fn new_linear(top_px: f32, bottom_px: f32, vmin: Value, vmax: Value) -> Self {
        Self { top_px, bottom_px, vmin, vmax }
    }
    /// Position of `y` within the range, 0 at `vmin` and 1 at `vmax`.
    #[inline]
    pub fn ratio(&self, y: Value) -> f64 {
        let span = self.vmax - self.vmin;
        if span == 0.0 { 0.0 } else { (y - self.vmin) / span }
    }
    #[inline]
    pub fn to_px(&self, y: Value) -> f32 {
        self.bottom_px - self.ratio(y) as f32 * (self.bottom_px - self.top_px)
    }
}
