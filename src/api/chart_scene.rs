use tracing::trace;

use crate::animation::{AnimationState, TickDecision};
use crate::core::{Axis, Point, QuadraticCurve, ScaleTrack, SurfaceSize};
use crate::error::{ChartError, ChartResult};
use crate::render::{CurvePrimitive, LinePrimitive, PolygonPrimitive, Surface, TextPrimitive};

use super::{ChartConfig, FrameReport};

/// Per-controller drawing state: both tick tracks and the active run.
#[derive(Debug, Clone)]
pub(super) struct ChartScene {
    pub(super) x_scale: ScaleTrack,
    pub(super) y_scale: ScaleTrack,
    pub(super) animation: Option<AnimationState>,
}

impl ChartScene {
    pub(super) fn new(config: &ChartConfig) -> Self {
        Self {
            x_scale: ScaleTrack::new(Axis::X, config.layout.x_ticks),
            y_scale: ScaleTrack::new(Axis::Y, config.layout.y_ticks),
            animation: None,
        }
    }

    pub(super) fn reset_scales(&mut self) {
        self.x_scale.reset();
        self.y_scale.reset();
    }

    /// Axes plus at-rest scales, no curve.
    pub(super) fn paint_static<S: Surface + ?Sized>(
        &mut self,
        config: &ChartConfig,
        surface: &mut S,
    ) -> ChartResult<()> {
        let size = size_snapshot(surface)?;
        surface.clear()?;
        paint_axes(config, surface, size)?;
        self.x_scale.seed(size);
        self.y_scale.seed(size);
        paint_scale(config, surface, &self.x_scale)?;
        paint_scale(config, surface, &self.y_scale)
    }

    /// Paints one animation frame for `elapsed_ms` into the run.
    pub(super) fn paint_tick<S: Surface + ?Sized>(
        &mut self,
        config: &ChartConfig,
        surface: &mut S,
        elapsed_ms: f64,
    ) -> ChartResult<FrameReport> {
        let Some(animation) = self.animation.as_mut() else {
            return Err(ChartError::InvalidData(
                "frame tick without an active animation".to_owned(),
            ));
        };
        let size = size_snapshot(surface)?;
        let progress = animation.advance_to(elapsed_ms);

        surface.clear()?;
        paint_axes(config, surface, size)?;

        self.x_scale.seed(size);
        self.y_scale.seed(size);
        let scales_scrolled = progress >= config.scroll.start_progress;
        if scales_scrolled {
            self.x_scale.advance(config.scroll.x_step_px);
            self.y_scale.advance(config.scroll.y_step_px);
        }
        paint_scale(config, surface, &self.x_scale)?;
        paint_scale(config, surface, &self.y_scale)?;

        if let Some(visible) = animation.visible_curve() {
            paint_curve(config, surface, visible, size)?;
        }

        trace!(elapsed_ms, progress, scales_scrolled, "painted frame");
        let decision = if animation.is_complete() {
            TickDecision::Complete
        } else {
            TickDecision::Continue
        };
        Ok(FrameReport {
            elapsed_ms,
            progress,
            scales_scrolled,
            decision,
        })
    }
}

pub(super) fn size_snapshot<S: Surface + ?Sized>(surface: &S) -> ChartResult<SurfaceSize> {
    let size = surface.size();
    if !size.is_valid() {
        return Err(ChartError::InvalidSurfaceSize {
            width: size.width,
            height: size.height,
        });
    }
    Ok(size)
}

pub(super) fn paint_axes<S: Surface + ?Sized>(
    config: &ChartConfig,
    surface: &mut S,
    size: SurfaceSize,
) -> ChartResult<()> {
    let style = &config.style;
    for line in [config.layout.x_axis, config.layout.y_axis] {
        let (from, to) = line.endpoints(size);
        surface.draw_line(LinePrimitive::new(
            from,
            to,
            style.axis_width_px,
            style.axis_color,
        ))?;
    }
    Ok(())
}

fn paint_scale<S: Surface + ?Sized>(
    config: &ChartConfig,
    surface: &mut S,
    track: &ScaleTrack,
) -> ChartResult<()> {
    let style = &config.style;
    let layout = track.layout();
    for mark in track.marks() {
        surface.draw_line(LinePrimitive::new(
            mark.start,
            mark.end,
            style.tick_width_px,
            style.tick_color,
        ))?;
        let anchor = Point::new(
            mark.start.x + layout.label_offset_x_px,
            mark.start.y + layout.label_offset_y_px,
        );
        surface.draw_text(&TextPrimitive::new(
            mark.label.to_string(),
            anchor,
            style.label_font_family.as_str(),
            style.label_font_size_px,
            style.label_color,
        ))?;
    }
    Ok(())
}

fn paint_curve<S: Surface + ?Sized>(
    config: &ChartConfig,
    surface: &mut S,
    visible: QuadraticCurve,
    size: SurfaceSize,
) -> ChartResult<()> {
    let style = &config.style;
    if let Some(fill) = style.curve_fill {
        let baseline = size.height_px() * config.layout.x_axis.start_y_ratio;
        let outline = visible
            .samples(style.curve_fill_segments)
            .chain([
                Point::new(visible.end.x, baseline),
                Point::new(visible.start.x, baseline),
            ]);
        surface.draw_filled_polygon(&PolygonPrimitive::new(outline, fill))?;
    }
    surface.draw_quadratic_curve(CurvePrimitive::new(
        visible,
        style.curve_width_px,
        style.curve_color,
    ))
}
