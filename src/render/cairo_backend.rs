use std::io::Write;

use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::core::{Point, SurfaceSize};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, CurvePrimitive, LinePrimitive, PolygonPrimitive, RenderFrame, Surface, TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub clears: usize,
    pub lines_drawn: usize,
    pub curves_drawn: usize,
    pub polygons_drawn: usize,
    pub texts_drawn: usize,
}

/// Surface adapter drawing onto a borrowed Cairo context, for example the
/// context handed to a GTK `DrawingArea` draw function.
///
/// Text goes through Pango and is anchored at its left baseline.
pub struct CairoSurface<'a> {
    context: &'a Context,
    size: SurfaceSize,
    clear_color: Color,
    stats: CairoRenderStats,
}

impl<'a> CairoSurface<'a> {
    #[must_use]
    pub fn new(context: &'a Context, size: SurfaceSize) -> Self {
        Self {
            context,
            size,
            clear_color: Color::WHITE,
            stats: CairoRenderStats::default(),
        }
    }

    pub fn with_clear_color(mut self, color: Color) -> ChartResult<Self> {
        color.validate()?;
        self.clear_color = color;
        Ok(self)
    }

    #[must_use]
    pub fn stats(&self) -> CairoRenderStats {
        self.stats
    }

    fn apply_color(&self, color: Color) {
        self.context
            .set_source_rgba(color.red, color.green, color.blue, color.alpha);
    }
}

impl Surface for CairoSurface<'_> {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self) -> ChartResult<()> {
        self.apply_color(self.clear_color);
        self.context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;
        self.stats.clears += 1;
        Ok(())
    }

    fn draw_line(&mut self, line: LinePrimitive) -> ChartResult<()> {
        line.validate()?;
        self.apply_color(line.color);
        self.context.set_line_width(line.stroke_width);
        self.context.move_to(line.from.x, line.from.y);
        self.context.line_to(line.to.x, line.to.y);
        self.context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err))?;
        self.stats.lines_drawn += 1;
        Ok(())
    }

    fn draw_quadratic_curve(&mut self, curve: CurvePrimitive) -> ChartResult<()> {
        curve.validate()?;
        // Cairo only knows cubic segments; elevate the quadratic's degree.
        let q = curve.curve;
        let c1 = q.start.lerp(q.control, 2.0 / 3.0);
        let c2 = q.end.lerp(q.control, 2.0 / 3.0);

        self.apply_color(curve.color);
        self.context.set_line_width(curve.stroke_width);
        self.context.move_to(q.start.x, q.start.y);
        self.context
            .curve_to(c1.x, c1.y, c2.x, c2.y, q.end.x, q.end.y);
        self.context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke curve", err))?;
        self.stats.curves_drawn += 1;
        Ok(())
    }

    fn draw_filled_polygon(&mut self, polygon: &PolygonPrimitive) -> ChartResult<()> {
        polygon.validate()?;
        let mut points = polygon.points.iter();
        if let Some(Point { x, y }) = points.next() {
            self.context.move_to(*x, *y);
        }
        for point in points {
            self.context.line_to(point.x, point.y);
        }
        self.context.close_path();
        self.apply_color(polygon.fill_color);
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill polygon", err))?;
        self.stats.polygons_drawn += 1;
        Ok(())
    }

    fn draw_text(&mut self, text: &TextPrimitive) -> ChartResult<()> {
        text.validate()?;
        let layout = pangocairo::functions::create_layout(self.context);
        let mut font_description = FontDescription::new();
        font_description.set_family(&text.font_family);
        font_description.set_absolute_size(text.font_size_px * f64::from(pango::SCALE));
        layout.set_font_description(Some(&font_description));
        layout.set_text(&text.text);

        let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);
        self.apply_color(text.color);
        self.context
            .move_to(text.position.x, text.position.y - baseline);
        pangocairo::functions::show_layout(self.context, &layout);
        self.stats.texts_drawn += 1;
        Ok(())
    }
}

/// Offscreen Cairo renderer replaying recorded frames onto an image surface.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidSurfaceSize {
                width: width.max(0) as u32,
                height: height.max(0) as u32,
            });
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::WHITE,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(
            self.surface.width().max(0) as u32,
            self.surface.height().max(0) as u32,
        )
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    pub fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        let mut surface =
            CairoSurface::new(&context, self.size()).with_clear_color(self.clear_color)?;
        frame.replay(&mut surface)?;
        self.last_stats = surface.stats();
        Ok(())
    }

    pub fn write_png<W: Write>(&self, stream: &mut W) -> ChartResult<()> {
        self.surface
            .write_to_png(stream)
            .map_err(|err| ChartError::Backend(format!("failed to encode png: {err}")))
    }
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
