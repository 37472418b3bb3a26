// File: crates/coinchart-core/src/axis.rs
// Summary: Y-axis label planning: how many labels fit, their values and vertical slots.

/// Number of label steps that fit between the viewport edges. The label
/// viewport extends half a line above and below the plot so the first and
/// last labels center on its top and bottom edges.
pub fn label_steps(viewport_height: f32, line_height: f32, min_spacing: f32) -> usize {
    let per_label = line_height + min_spacing;
    if per_label <= 0.0 || !per_label.is_finite() {
        return 0;
    }
    let fit = (viewport_height + line_height) / per_label;
    if fit.is_finite() && fit > 0.0 { fit.floor() as usize } else { 0 }
}

/// `steps + 1` values evenly spaced from `max` down to `min`; a single `max`
/// when no step fits.
pub fn label_values(min: f64, max: f64, steps: usize) -> Vec<f64> {
    if steps == 0 {
        return vec![max];
    }
    let increment = (max - min) / steps as f64;
    (0..=steps).map(|i| max - increment * i as f64).collect()
}

/// Planned y-axis: label values top to bottom and the spacing between label boxes.
#[derive(Clone, Debug, PartialEq)]
pub struct YAxis {
    pub values: Vec<f64>,
    pub line_height: f32,
    pub gap: f32,
}

impl YAxis {
    pub fn plan(min: f64, max: f64, viewport_height: f32, line_height: f32, min_spacing: f32) -> Self {
        let steps = label_steps(viewport_height, line_height, min_spacing);
        let label_viewport = viewport_height + line_height;
        let used = line_height * (steps + 1) as f32;
        let gap = if steps == 0 { 0.0 } else { (label_viewport - used) / steps as f32 };
        Self { values: label_values(min, max, steps), line_height, gap }
    }

    /// Top edge of label `index`, given the plot's top edge.
    pub fn label_top(&self, index: usize, viewport_top: f32) -> f32 {
        viewport_top + index as f32 * (self.line_height + self.gap) - self.line_height / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_floor_the_available_space() {
        // (200 + 20) / (20 + 25) = 4.88
        assert_eq!(label_steps(200.0, 20.0, 25.0), 4);
        assert_eq!(label_steps(0.0, 0.0, 0.0), 0);
        assert_eq!(label_steps(-50.0, 10.0, 5.0), 0);
    }

    #[test]
    fn values_run_from_max_to_min() {
        assert_eq!(label_values(10.0, 20.0, 2), vec![20.0, 15.0, 10.0]);
        assert_eq!(label_values(10.0, 20.0, 0), vec![20.0]);
    }

    #[test]
    fn last_label_centers_on_viewport_bottom() {
        let axis = YAxis::plan(0.0, 100.0, 200.0, 20.0, 25.0);
        let top = 30.0;
        let last = axis.label_top(axis.values.len() - 1, top) + axis.line_height / 2.0;
        assert!((last - (top + 200.0)).abs() < 1e-3);
        let first = axis.label_top(0, top) + axis.line_height / 2.0;
        assert_eq!(first, top);
    }
}
