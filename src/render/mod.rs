mod frame;
mod primitives;
mod recording_surface;

pub use frame::{DrawCommand, RenderFrame};
pub use primitives::{
    Color, CurvePrimitive, LinePrimitive, PolygonPoints, PolygonPrimitive, TextPrimitive,
};
pub use recording_surface::RecordingSurface;

use crate::core::SurfaceSize;
use crate::error::ChartResult;

/// Drawing surface borrowed from the host.
///
/// Chart code only issues primitive draw calls through this seam, so the
/// same animation logic drives an offscreen recorder, a Cairo context or any
/// other backend. `size` is read once per frame and treated as immutable for
/// the rest of that frame.
pub trait Surface {
    fn size(&self) -> SurfaceSize;

    fn clear(&mut self) -> ChartResult<()>;

    fn draw_line(&mut self, line: LinePrimitive) -> ChartResult<()>;

    fn draw_quadratic_curve(&mut self, curve: CurvePrimitive) -> ChartResult<()>;

    fn draw_filled_polygon(&mut self, polygon: &PolygonPrimitive) -> ChartResult<()>;

    fn draw_text(&mut self, text: &TextPrimitive) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoRenderer, CairoSurface};
