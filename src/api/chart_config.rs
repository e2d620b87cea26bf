use serde::{Deserialize, Serialize};

use crate::core::{Point, SurfaceSize, TickTrackLayout};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

use super::validation::validate_chart_config;

/// One static axis line, as ratios of the surface size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisLineLayout {
    pub start_x_ratio: f64,
    pub start_y_ratio: f64,
    pub end_x_ratio: f64,
    pub end_y_ratio: f64,
}

impl AxisLineLayout {
    #[must_use]
    pub const fn default_x() -> Self {
        Self {
            start_x_ratio: 0.038,
            start_y_ratio: 0.94,
            end_x_ratio: 1.0,
            end_y_ratio: 0.94,
        }
    }

    #[must_use]
    pub const fn default_y() -> Self {
        Self {
            start_x_ratio: 0.04,
            start_y_ratio: 0.0,
            end_x_ratio: 0.04,
            end_y_ratio: 0.944,
        }
    }

    #[must_use]
    pub fn endpoints(self, size: SurfaceSize) -> (Point, Point) {
        (
            size.at_ratio(self.start_x_ratio, self.start_y_ratio),
            size.at_ratio(self.end_x_ratio, self.end_y_ratio),
        )
    }
}

/// Geometry of the static axes and the two scrolling tick tracks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLayout {
    pub x_axis: AxisLineLayout,
    pub y_axis: AxisLineLayout,
    pub x_ticks: TickTrackLayout,
    pub y_ticks: TickTrackLayout,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            x_axis: AxisLineLayout::default_x(),
            y_axis: AxisLineLayout::default_y(),
            x_ticks: TickTrackLayout::default_x(),
            y_ticks: TickTrackLayout::default_y(),
        }
    }
}

/// Colors, stroke widths and fonts used when painting a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub axis_color: Color,
    pub axis_width_px: f64,
    pub tick_color: Color,
    pub tick_width_px: f64,
    pub label_color: Color,
    pub label_font_family: String,
    pub label_font_size_px: f64,
    pub curve_color: Color,
    pub curve_width_px: f64,
    /// Fill under the drawn part of the curve, down to the x axis.
    pub curve_fill: Option<Color>,
    /// Number of straight segments approximating the curve in the fill outline.
    pub curve_fill_segments: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            axis_color: Color::BLACK,
            axis_width_px: 5.0,
            tick_color: Color::BLACK,
            tick_width_px: 2.0,
            label_color: Color::BLACK,
            label_font_family: "Arial".to_owned(),
            label_font_size_px: 18.0,
            curve_color: Color::GREEN,
            curve_width_px: 5.0,
            curve_fill: None,
            curve_fill_segments: 32,
        }
    }
}

/// When and how fast the tick scales scroll during a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleScrollBehavior {
    /// Progress ratio from which scales scroll each frame.
    pub start_progress: f64,
    pub x_step_px: f64,
    pub y_step_px: f64,
}

impl Default for ScaleScrollBehavior {
    fn default() -> Self {
        Self {
            start_progress: 0.9,
            x_step_px: 2.0,
            y_step_px: 0.5,
        }
    }
}

/// Chart bootstrap configuration.
///
/// Serializable so hosts can persist and load chart setup; every field falls
/// back to its default when missing from the input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub layout: ChartLayout,
    pub style: ChartStyle,
    pub scroll: ScaleScrollBehavior,
}

impl ChartConfig {
    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: ChartLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_scroll(mut self, scroll: ScaleScrollBehavior) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_chart_config(self)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart config: {e}")))
    }
}
