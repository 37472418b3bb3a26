// File: crates/coinchart-core/src/lib.rs
// Summary: Core library entry point; exports the line-chart layout engine and its collaborators.

pub mod error;
pub mod types;
pub mod geometry;
pub mod scale;
pub mod axis;
pub mod text;
pub mod label;
pub mod layout;
pub mod select;
pub mod theme;
pub mod render;

pub use error::{ChartError, ChartResult};
pub use types::{ChartStyle, DataPoint};
pub use geometry::{CubicBezier, Point, Rect};
pub use text::{FixedMetrics, FontMetrics, TextMetrics, TextShaper, TextStyle};
pub use label::ValueLabel;
pub use layout::{compute_layout, CurvePath, LayoutResult, SelectedLabel, XLabel, YLabel};
pub use select::point_index_from_touch_x;
pub use theme::Theme;
pub use render::{LineChart, RenderOptions};
