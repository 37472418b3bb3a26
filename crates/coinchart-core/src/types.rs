// File: crates/coinchart-core/src/types.rs
// Summary: Shared types and constants (data points, chart style, paddings).

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Default surface width in pixels.
pub const WIDTH: f32 = 700.0;
/// Default surface height in pixels.
pub const HEIGHT: f32 = 300.0;

/// Fixed gap between the x-label line reserve and the viewport top, and
/// between the viewport top and the selected value label.
pub const STATIC_PADDING: f32 = 10.0;

/// One labeled sample of the series, in data space.
#[derive(Clone, Debug, PartialEq)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

impl DataPoint {
    pub fn new(x: f64, y: f64, label: impl Into<String>) -> Self {
        Self { x, y, label: label.into() }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Geometry and label configuration for one chart canvas.
/// Contract: all dimensions are finite and non-negative.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub width: f32,
    pub height: f32,
    pub vertical_padding: f32,
    pub horizontal_padding: f32,
    pub min_y_label_spacing: f32,
    pub x_axis_label_spacing: f32,
    pub label_font_size: f32,
    pub helper_line_thickness: f32,
    /// Suffix appended to every y-axis value label.
    pub unit: String,
}

impl ChartStyle {
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        let dims = [
            ("width", self.width),
            ("height", self.height),
            ("vertical_padding", self.vertical_padding),
            ("horizontal_padding", self.horizontal_padding),
            ("min_y_label_spacing", self.min_y_label_spacing),
            ("x_axis_label_spacing", self.x_axis_label_spacing),
            ("label_font_size", self.label_font_size),
            ("helper_line_thickness", self.helper_line_thickness),
        ];
        for (name, v) in dims {
            if !v.is_finite() || v < 0.0 {
                return Err(ChartError::invalid(format!("{name} must be finite and >= 0, got {v}")));
            }
        }
        Ok(())
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            vertical_padding: 8.0,
            horizontal_padding: 8.0,
            min_y_label_spacing: 25.0,
            x_axis_label_spacing: 8.0,
            label_font_size: 14.0,
            helper_line_thickness: 1.0,
            unit: "$".to_string(),
        }
    }
}
