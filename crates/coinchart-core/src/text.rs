// File: crates/coinchart-core/src/text.rs
// Summary: Font-metrics seam used by the layout engine, with a Skia textlayout shaper and a fixed-advance fallback.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign};

/// Text styling parameters relevant to measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub align: TextAlign,
    pub max_lines: Option<usize>,
    /// Prefer tabular-number families (used for value labels).
    pub mono_numeric: bool,
}

impl TextStyle {
    pub fn new(font_size: f32) -> Self {
        Self { font_size, align: TextAlign::Left, max_lines: None, mono_numeric: false }
    }
    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }
    pub fn single_line(mut self) -> Self {
        self.max_lines = Some(1);
        self
    }
    pub fn numeric(mut self) -> Self {
        self.mono_numeric = true;
        self
    }
}

/// Measured box of a laid-out string.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    pub height: f32,
    pub line_count: usize,
}

/// Synchronous text measurement collaborator.
pub trait FontMetrics {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Deterministic metrics: every char advances `char_advance * font_size`,
/// every line is `line_height * font_size` tall. Lines split on `\n`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedMetrics {
    pub char_advance: f32,
    pub line_height: f32,
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self { char_advance: 0.6, line_height: 1.2 }
    }
}

impl FontMetrics for FixedMetrics {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let mut lines: Vec<&str> = text.split('\n').collect();
        if let Some(max) = style.max_lines {
            lines.truncate(max.max(1));
        }
        let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        TextMetrics {
            width: widest as f32 * self.char_advance * style.font_size,
            height: lines.len() as f32 * self.line_height * style.font_size,
            line_count: lines.len(),
        }
    }
}

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color, mono_numeric: bool) -> skia::textlayout::TextStyle {
        let mut ts = skia::textlayout::TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        if mono_numeric {
            ts.set_font_families(&["Roboto Mono", "Consolas", "Menlo", "DejaVu Sans Mono", "monospace"]);
        } else {
            ts.set_font_families(&["Roboto", "Segoe UI", "Arial", "Helvetica", "DejaVu Sans", "sans-serif"]);
        }
        ts
    }

    pub fn layout(&self, text: &str, style: &TextStyle, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(style.align);
        if let Some(max) = style.max_lines {
            pstyle.set_max_lines(max);
        }
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(style.font_size, color, style.mono_numeric));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// Paint `text` with its top-left corner at `(x, y)`.
    pub fn draw(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, style: &TextStyle, color: skia::Color) {
        let mut p = self.layout(text, style, color);
        if style.align == TextAlign::Center {
            // layout width is 10k; re-layout tight so centering is relative to the text box
            let w = p.longest_line().ceil();
            p.layout(w.max(1.0));
        }
        p.paint(canvas, (x, y));
    }
}

impl FontMetrics for TextShaper {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let p = self.layout(text, style, skia::Color::from_argb(0, 0, 0, 0));
        TextMetrics {
            width: p.longest_line().ceil(),
            height: p.height().ceil(),
            line_count: p.line_number(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_metrics_measure_widest_line() {
        let m = FixedMetrics { char_advance: 0.5, line_height: 1.0 };
        let got = m.measure("3PM\n10/14", &TextStyle::new(10.0));
        assert_eq!(got.line_count, 2);
        assert_eq!(got.width, 25.0);
        assert_eq!(got.height, 20.0);
    }

    #[test]
    fn fixed_metrics_respect_max_lines() {
        let m = FixedMetrics { char_advance: 1.0, line_height: 1.0 };
        let got = m.measure("ab\ncdef", &TextStyle::new(1.0).single_line());
        assert_eq!(got.line_count, 1);
        assert_eq!(got.width, 2.0);
    }
}
