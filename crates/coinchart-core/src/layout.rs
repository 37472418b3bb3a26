// File: crates/coinchart-core/src/layout.rs
// Summary: Line-chart geometry engine: data points + style + font metrics -> screen-space layout.

use std::ops::Range;

use tracing::{debug, warn};

use crate::axis::YAxis;
use crate::error::{ChartError, ChartResult};
use crate::geometry::{clamp, CubicBezier, Point, Rect};
use crate::label::ValueLabel;
use crate::scale::{SlotScale, ValueScale};
use crate::select::point_index_from_touch_x;
use crate::text::{FontMetrics, TextMetrics, TextStyle};
use crate::types::{ChartStyle, DataPoint, STATIC_PADDING};

/// Y-axis value label; `position` is the text box's top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct YLabel {
    pub value: f64,
    pub text: String,
    pub position: Point,
    pub size: TextMetrics,
    /// Screen y of the horizontal helper line through this label.
    pub gridline_y: f32,
}

/// X-axis label under one visible point.
#[derive(Clone, Debug, PartialEq)]
pub struct XLabel {
    pub text: String,
    pub position: Point,
    pub size: TextMetrics,
    /// Screen x of the vertical helper line through this label.
    pub center_x: f32,
    pub selected: bool,
}

/// The smoothed series path: `start`, then one cubic per following point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurvePath {
    pub start: Option<Point>,
    pub segments: Vec<CubicBezier>,
}

/// Readout of the selected point's value, drawn above the plot.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedLabel {
    /// Index within the visible range.
    pub index: usize,
    pub text: String,
    pub position: Point,
    pub size: TextMetrics,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutResult {
    pub width: f32,
    pub height: f32,
    pub viewport: Rect,
    pub slot_width: f32,
    pub min_y: f64,
    pub max_y: f64,
    pub y_labels: Vec<YLabel>,
    pub x_labels: Vec<XLabel>,
    /// Screen position of each visible point, in visible order.
    pub points: Vec<Point>,
    pub curve: CurvePath,
    /// Selected index within the visible range, when the selection is visible.
    pub selected: Option<usize>,
    pub selected_label: Option<SelectedLabel>,
    /// Index of the first visible point in the full series.
    pub visible_start: usize,
}

impl LayoutResult {
    /// Map a touch x to the index of the touched point in the full series.
    pub fn point_index_at(&self, touch_x: f32) -> Option<usize> {
        point_index_from_touch_x(touch_x, self.slot_width, &self.points).map(|i| self.visible_start + i)
    }
}

fn validate(points: &[DataPoint], visible: &Range<usize>, style: &ChartStyle) -> ChartResult<()> {
    style.validate()?;
    if visible.start > visible.end || visible.end > points.len() {
        return Err(ChartError::invalid(format!(
            "visible range {}..{} out of bounds for {} points",
            visible.start,
            visible.end,
            points.len()
        )));
    }
    if let Some((i, p)) = points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
        return Err(ChartError::invalid(format!("point {i} is not finite: ({}, {})", p.x, p.y)));
    }
    let (lo, hi) = value_range(&points[visible.clone()]);
    if !(hi - lo).is_finite() {
        return Err(ChartError::invalid(format!("value span {lo}..{hi} is not representable")));
    }
    Ok(())
}

/// Min and max y of `points`; `(0, 0)` when empty.
fn value_range(points: &[DataPoint]) -> (f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0);
    }
    points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)))
}

/// Compute the full chart layout for `points[visible]`.
///
/// `selected` indexes the full series; it only produces markers and a readout
/// when it falls inside `visible`. Empty ranges give a degenerate layout with
/// no curve; non-finite values or dimensions are rejected.
pub fn compute_layout(
    points: &[DataPoint],
    visible: Range<usize>,
    style: &ChartStyle,
    metrics: &dyn FontMetrics,
    selected: Option<usize>,
) -> ChartResult<LayoutResult> {
    validate(points, &visible, style)?;
    let visible_points = &points[visible.clone()];

    let (min_y, max_y) = value_range(visible_points);

    let label_style = TextStyle::new(style.label_font_size);
    let x_style = label_style.centered();
    let value_style = label_style.numeric();

    // X labels reserve the space under the plot
    let x_metrics: Vec<TextMetrics> = visible_points.iter().map(|p| metrics.measure(&p.label, &x_style)).collect();
    let max_x_label_width = x_metrics.iter().map(|m| m.width).fold(0.0f32, f32::max);
    let max_x_label_height = x_metrics.iter().map(|m| m.height).fold(0.0f32, f32::max);
    let max_x_label_lines = x_metrics.iter().map(|m| m.line_count).max().unwrap_or(0);
    let line_height = if max_x_label_lines == 0 { 0.0 } else { max_x_label_height / max_x_label_lines as f32 };

    let chrome = max_x_label_height + 2.0 * style.vertical_padding + line_height + style.x_axis_label_spacing;
    let mut viewport_height = style.height - chrome;
    if viewport_height < 0.0 {
        warn!(height = style.height, chrome, "chart too short for its labels; plot area collapsed");
        viewport_height = 0.0;
    }

    let axis = YAxis::plan(min_y, max_y, viewport_height, line_height, style.min_y_label_spacing);
    let y_texts: Vec<(f64, String, TextMetrics)> = axis
        .values
        .iter()
        .map(|&v| {
            let text = ValueLabel::new(v, &style.unit).format();
            let m = metrics.measure(&text, &value_style);
            (v, text, m)
        })
        .collect();
    let max_y_label_width = y_texts.iter().map(|(_, _, m)| m.width).fold(0.0f32, f32::max);

    let top = style.vertical_padding + line_height + STATIC_PADDING;
    let bottom = top + viewport_height;
    let left = 2.0 * style.horizontal_padding + max_y_label_width;
    let viewport = Rect::from_ltrb(left, top, style.width, bottom);

    let slot_width = max_x_label_width + style.x_axis_label_spacing;
    let xs = SlotScale::new(left, slot_width);
    let ys = ValueScale::new_linear(top, bottom, min_y, max_y);

    let screen: Vec<Point> = visible_points
        .iter()
        .enumerate()
        .map(|(i, p)| Point::new(xs.to_px(i), ys.to_px(p.y)))
        .collect();

    let curve = CurvePath {
        start: screen.first().copied(),
        segments: screen.windows(2).map(|w| CubicBezier::smooth_step(w[0], w[1])).collect(),
    };

    let selected_rel = selected.filter(|i| visible.contains(i)).map(|i| i - visible.start);

    let x_labels: Vec<XLabel> = visible_points
        .iter()
        .zip(&x_metrics)
        .enumerate()
        .map(|(i, (p, m))| {
            let x = left + style.x_axis_label_spacing / 2.0 + slot_width * i as f32;
            XLabel {
                text: p.label.clone(),
                position: Point::new(x, bottom + style.x_axis_label_spacing),
                size: *m,
                center_x: x + m.width / 2.0,
                selected: selected_rel == Some(i),
            }
        })
        .collect();

    let y_labels: Vec<YLabel> = y_texts
        .into_iter()
        .enumerate()
        .map(|(i, (value, text, m))| {
            let y = axis.label_top(i, top);
            YLabel {
                value,
                position: Point::new(style.horizontal_padding + max_y_label_width - m.width, y),
                gridline_y: y + m.height / 2.0,
                text,
                size: m,
            }
        })
        .collect();

    let selected_label = selected_rel.map(|i| {
        let text = ValueLabel::new(visible_points[i].y, &style.unit).format();
        let m = metrics.measure(&text, &value_style.single_line());
        let anchor = screen[i].x;
        let x = if i + 1 == visible_points.len() { anchor - m.width } else { anchor - m.width / 2.0 };
        let x = clamp(x, 0.0, (style.width - m.width).max(0.0));
        let y = (top - m.height - STATIC_PADDING).max(0.0);
        SelectedLabel { index: i, text, position: Point::new(x, y), size: m }
    });

    debug!(
        visible = visible_points.len(),
        y_labels = y_labels.len(),
        segments = curve.segments.len(),
        viewport_height,
        slot_width,
        "computed line chart layout"
    );

    Ok(LayoutResult {
        width: style.width,
        height: style.height,
        viewport,
        slot_width,
        min_y,
        max_y,
        y_labels,
        x_labels,
        points: screen,
        curve,
        selected: selected_rel,
        selected_label,
        visible_start: visible.start,
    })
}
