use crate::core::SurfaceSize;
use crate::error::{ChartError, ChartResult};
use crate::render::{CurvePrimitive, LinePrimitive, PolygonPrimitive, Surface, TextPrimitive};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line(LinePrimitive),
    Curve(CurvePrimitive),
    Polygon(PolygonPrimitive),
    Text(TextPrimitive),
}

impl DrawCommand {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Line(line) => line.validate(),
            Self::Curve(curve) => curve.validate(),
            Self::Polygon(polygon) => polygon.validate(),
            Self::Text(text) => text.validate(),
        }
    }
}

/// Backend-agnostic, ordered scene for one chart draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub size: SurfaceSize,
    pub commands: Vec<DrawCommand>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_command(mut self, command: DrawCommand) -> Self {
        self.commands.push(command);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.size.is_valid() {
            return Err(ChartError::InvalidSurfaceSize {
                width: self.size.width,
                height: self.size.height,
            });
        }
        for command in &self.commands {
            command.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn curves(&self) -> impl Iterator<Item = &CurvePrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Curve(curve) => Some(curve),
            _ => None,
        })
    }

    pub fn polygons(&self) -> impl Iterator<Item = &PolygonPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Polygon(polygon) => Some(polygon),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text(text) => Some(text),
            _ => None,
        })
    }

    /// Clears `surface` and issues every recorded command onto it in order.
    pub fn replay<S: Surface + ?Sized>(&self, surface: &mut S) -> ChartResult<()> {
        surface.clear()?;
        for command in &self.commands {
            match command {
                DrawCommand::Line(line) => surface.draw_line(*line)?,
                DrawCommand::Curve(curve) => surface.draw_quadratic_curve(*curve)?,
                DrawCommand::Polygon(polygon) => surface.draw_filled_polygon(polygon)?,
                DrawCommand::Text(text) => surface.draw_text(text)?,
            }
        }
        Ok(())
    }
}
