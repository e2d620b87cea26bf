use crate::error::{ChartError, ChartResult};

use super::{AxisLineLayout, ChartConfig, ChartStyle, ScaleScrollBehavior};

pub(super) fn validate_chart_config(config: &ChartConfig) -> ChartResult<()> {
    validate_axis_line(config.layout.x_axis, "x")?;
    validate_axis_line(config.layout.y_axis, "y")?;
    config.layout.x_ticks.validate()?;
    config.layout.y_ticks.validate()?;
    validate_style(&config.style)?;
    validate_scroll(config.scroll)
}

fn validate_axis_line(line: AxisLineLayout, axis: &str) -> ChartResult<()> {
    for value in [
        line.start_x_ratio,
        line.start_y_ratio,
        line.end_x_ratio,
        line.end_y_ratio,
    ] {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ChartError::InvalidData(format!(
                "{axis}-axis line ratios must be finite and in [0, 1]"
            )));
        }
    }
    Ok(())
}

fn validate_style(style: &ChartStyle) -> ChartResult<()> {
    style.axis_color.validate()?;
    style.tick_color.validate()?;
    style.label_color.validate()?;
    style.curve_color.validate()?;
    if let Some(fill) = style.curve_fill {
        fill.validate()?;
    }

    for (name, value) in [
        ("axis_width_px", style.axis_width_px),
        ("tick_width_px", style.tick_width_px),
        ("curve_width_px", style.curve_width_px),
        ("label_font_size_px", style.label_font_size_px),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "style `{name}` must be finite and > 0"
            )));
        }
    }

    if style.label_font_family.trim().is_empty() {
        return Err(ChartError::InvalidData(
            "label font family must not be empty".to_owned(),
        ));
    }
    if style.curve_fill_segments == 0 {
        return Err(ChartError::InvalidData(
            "curve fill needs at least one segment".to_owned(),
        ));
    }
    Ok(())
}

fn validate_scroll(scroll: ScaleScrollBehavior) -> ChartResult<()> {
    if !scroll.start_progress.is_finite() || !(0.0..=1.0).contains(&scroll.start_progress) {
        return Err(ChartError::InvalidData(
            "scale scroll start progress must be in [0, 1]".to_owned(),
        ));
    }
    for (name, value) in [("x_step_px", scroll.x_step_px), ("y_step_px", scroll.y_step_px)] {
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "scale scroll `{name}` must be finite and >= 0"
            )));
        }
    }
    Ok(())
}
