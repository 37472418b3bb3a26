// File: crates/coinchart-core/src/theme.rs
// Summary: Light/Dark theming for line chart rendering colors.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub line_stroke: skia::Color,
    /// Labels and helper lines that are not selected.
    pub unselected: skia::Color,
    /// The selected x label, its helper line and the value readout.
    pub selected: skia::Color,
    /// Fill of the selected point's marker ring.
    pub marker_fill: skia::Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::WHITE,
            line_stroke: skia::Color::BLACK,
            unselected: skia::Color::from_argb(255, 0x7c, 0x7c, 0x7c),
            selected: skia::Color::BLACK,
            marker_fill: skia::Color::WHITE,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            line_stroke: skia::Color::from_argb(255, 64, 160, 255),
            unselected: skia::Color::from_argb(255, 150, 150, 160),
            selected: skia::Color::from_argb(255, 235, 235, 245),
            marker_fill: skia::Color::WHITE,
        }
    }

    pub fn crypto_green() -> Self {
        Self {
            name: "crypto-green",
            background: skia::Color::from_argb(255, 0x10, 0x14, 0x12),
            line_stroke: skia::Color::from_argb(255, 0x2e, 0xcc, 0x71),
            unselected: skia::Color::from_argb(255, 0x6b, 0x7a, 0x70),
            selected: skia::Color::from_argb(255, 0xe8, 0xf5, 0xe9),
            marker_fill: skia::Color::from_argb(255, 0x10, 0x14, 0x12),
        }
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark(), Theme::crypto_green()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_is_case_insensitive_with_fallback() {
        assert_eq!(find("DARK").name, "dark");
        assert_eq!(find("nope").name, "light");
    }
}
