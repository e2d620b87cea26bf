use crate::core::SurfaceSize;
use crate::error::ChartResult;
use crate::render::{
    CurvePrimitive, DrawCommand, LinePrimitive, PolygonPrimitive, RenderFrame, Surface,
    TextPrimitive,
};

/// Headless surface used by tests and by hosts that paint later.
///
/// Every draw call is validated and appended to an in-memory
/// [`RenderFrame`]. `clear` wipes what was drawn so far, like clearing a
/// canvas, so `frame()` always reflects what is currently visible.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSurface {
    frame: RenderFrame,
    clear_count: usize,
    draw_count: usize,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            frame: RenderFrame::new(size),
            clear_count: 0,
            draw_count: 0,
        }
    }

    #[must_use]
    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    /// Total `clear` calls since construction.
    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.clear_count
    }

    /// Total draw calls since construction, including cleared ones.
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.draw_count
    }

    /// Changes the reported size; existing content is kept until the next clear.
    pub fn resize(&mut self, size: SurfaceSize) {
        self.frame.size = size;
    }

    fn record(&mut self, command: DrawCommand) -> ChartResult<()> {
        command.validate()?;
        self.frame.commands.push(command);
        self.draw_count += 1;
        Ok(())
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.frame.size
    }

    fn clear(&mut self) -> ChartResult<()> {
        self.frame.commands.clear();
        self.clear_count += 1;
        Ok(())
    }

    fn draw_line(&mut self, line: LinePrimitive) -> ChartResult<()> {
        self.record(DrawCommand::Line(line))
    }

    fn draw_quadratic_curve(&mut self, curve: CurvePrimitive) -> ChartResult<()> {
        self.record(DrawCommand::Curve(curve))
    }

    fn draw_filled_polygon(&mut self, polygon: &PolygonPrimitive) -> ChartResult<()> {
        self.record(DrawCommand::Polygon(polygon.clone()))
    }

    fn draw_text(&mut self, text: &TextPrimitive) -> ChartResult<()> {
        self.record(DrawCommand::Text(text.clone()))
    }
}
