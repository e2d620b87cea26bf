pub mod bezier;
pub mod scale_track;
pub mod types;

pub use bezier::{QuadraticCurve, clamp_ratio};
pub use scale_track::{
    Axis, MIN_TICK_SPACING_PX, ScaleTrack, ScaleTrackState, TICK_WINDOW_LEN, TickMark,
    TickTrackLayout,
};
pub use types::{Point, SurfaceSize, lerp};
