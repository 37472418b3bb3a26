// File: crates/coinchart-core/src/render.rs
// Summary: LineChart model and headless PNG rendering of its layout using Skia CPU raster surfaces.

use std::ops::Range;

use anyhow::Result;
use skia_safe as skia;
use tracing::debug;

use crate::error::ChartResult;
use crate::layout::{compute_layout, LayoutResult};
use crate::text::{FixedMetrics, FontMetrics, TextShaper, TextStyle};
use crate::theme::Theme;
use crate::types::{ChartStyle, DataPoint};

const MARKER_RADIUS: f32 = 10.0;
const SELECTED_MARKER_RADIUS: f32 = 15.0;
const SELECTED_RING_WIDTH: f32 = 3.0;

pub struct RenderOptions {
    pub theme: Theme,
    pub show_helper_lines: bool,
    /// Paint text. When off, layout uses fixed metrics so output is font independent.
    pub draw_labels: bool,
    pub line_width: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: Theme::light(),
            show_helper_lines: true,
            draw_labels: true,
            line_width: 5.0,
        }
    }
}

/// A price series plus the view over it: visible window and selection.
#[derive(Clone, Debug)]
pub struct LineChart {
    pub points: Vec<DataPoint>,
    pub visible: Range<usize>,
    pub style: ChartStyle,
    /// Index into `points`.
    pub selected: Option<usize>,
}

impl LineChart {
    pub fn new(points: Vec<DataPoint>, style: ChartStyle) -> Self {
        let visible = 0..points.len();
        Self { points, visible, style, selected: None }
    }

    pub fn with_visible(mut self, visible: Range<usize>) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    /// Select the point under `touch_x` in a previously computed layout.
    /// Returns the new selection; a miss keeps the current one.
    pub fn select_at(&mut self, layout: &LayoutResult, touch_x: f32) -> Option<usize> {
        if let Some(i) = layout.point_index_at(touch_x) {
            self.selected = Some(i);
        }
        self.selected
    }

    pub fn layout(&self, metrics: &dyn FontMetrics) -> ChartResult<LayoutResult> {
        compute_layout(&self.points, self.visible.clone(), &self.style, metrics, self.selected)
    }

    /// Render to PNG bytes in memory.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut surface = self.render_to_surface(opts)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render the chart to a PNG at `output_png_path` using a CPU raster surface.
    pub fn render_to_png(&self, opts: &RenderOptions, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = self.render_to_png_bytes(opts)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }

    fn render_to_surface(&self, opts: &RenderOptions) -> Result<skia::Surface> {
        let shaper = opts.draw_labels.then(TextShaper::new);
        let fixed = FixedMetrics::default();
        let metrics: &dyn FontMetrics = match &shaper {
            Some(s) => s,
            None => &fixed,
        };
        let layout = self.layout(metrics)?;

        let w = (self.style.width.ceil() as i32).max(1);
        let h = (self.style.height.ceil() as i32).max(1);
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        let canvas = surface.canvas();
        canvas.clear(opts.theme.background);

        draw_x_axis(canvas, &layout, &self.style, opts, shaper.as_ref());
        draw_y_axis(canvas, &layout, &self.style, opts, shaper.as_ref());
        draw_curve(canvas, &layout, opts);
        draw_markers(canvas, &layout, opts);

        debug!(width = w, height = h, labels = opts.draw_labels, "rendered line chart");
        Ok(surface)
    }
}

// ---- helpers ----------------------------------------------------------------

fn stroke(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color);
    paint
}

fn fill(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color);
    paint
}

fn draw_x_axis(
    canvas: &skia::Canvas,
    layout: &LayoutResult,
    style: &ChartStyle,
    opts: &RenderOptions,
    shaper: Option<&TextShaper>,
) {
    let text_style = TextStyle::new(style.label_font_size).centered();
    for label in &layout.x_labels {
        let color = if label.selected { opts.theme.selected } else { opts.theme.unselected };
        if let Some(shaper) = shaper {
            shaper.draw(canvas, &label.text, label.position.x, label.position.y, &text_style, color);
        }
        if opts.show_helper_lines {
            let width = if label.selected { style.helper_line_thickness * 2.0 } else { style.helper_line_thickness };
            canvas.draw_line(
                (label.center_x, layout.viewport.top),
                (label.center_x, layout.viewport.bottom),
                &stroke(color, width),
            );
        }
    }

    if let (Some(shaper), Some(sel)) = (shaper, &layout.selected_label) {
        let value_style = TextStyle::new(style.label_font_size).numeric().single_line();
        shaper.draw(canvas, &sel.text, sel.position.x, sel.position.y, &value_style, opts.theme.selected);
    }
}

fn draw_y_axis(
    canvas: &skia::Canvas,
    layout: &LayoutResult,
    style: &ChartStyle,
    opts: &RenderOptions,
    shaper: Option<&TextShaper>,
) {
    let text_style = TextStyle::new(style.label_font_size).numeric();
    let grid = stroke(opts.theme.unselected, style.helper_line_thickness);
    for label in &layout.y_labels {
        if let Some(shaper) = shaper {
            shaper.draw(canvas, &label.text, label.position.x, label.position.y, &text_style, opts.theme.unselected);
        }
        if opts.show_helper_lines {
            canvas.draw_line(
                (layout.viewport.left, label.gridline_y),
                (layout.viewport.right, label.gridline_y),
                &grid,
            );
        }
    }
}

fn draw_curve(canvas: &skia::Canvas, layout: &LayoutResult, opts: &RenderOptions) {
    let Some(start) = layout.curve.start else { return };
    let mut path = skia::Path::new();
    path.move_to((start.x, start.y));
    for seg in &layout.curve.segments {
        path.cubic_to((seg.c1.x, seg.c1.y), (seg.c2.x, seg.c2.y), (seg.end.x, seg.end.y));
    }
    let mut paint = stroke(opts.theme.line_stroke, opts.line_width);
    paint.set_stroke_cap(skia::paint::Cap::Round);
    canvas.draw_path(&path, &paint);
}

/// Point markers are only shown while a visible point is selected.
fn draw_markers(canvas: &skia::Canvas, layout: &LayoutResult, opts: &RenderOptions) {
    let Some(selected) = layout.selected else { return };
    let dot = fill(opts.theme.line_stroke);
    for (i, p) in layout.points.iter().enumerate() {
        canvas.draw_circle((p.x, p.y), MARKER_RADIUS, &dot);
        if i == selected {
            canvas.draw_circle((p.x, p.y), SELECTED_MARKER_RADIUS, &fill(opts.theme.marker_fill));
            canvas.draw_circle((p.x, p.y), SELECTED_MARKER_RADIUS, &stroke(opts.theme.line_stroke, SELECTED_RING_WIDTH));
        }
    }
}
