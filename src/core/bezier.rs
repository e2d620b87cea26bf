use serde::{Deserialize, Serialize};

use crate::core::types::Point;
use crate::error::{ChartError, ChartResult};

/// One quadratic bezier segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadraticCurve {
    pub start: Point,
    pub control: Point,
    pub end: Point,
}

impl QuadraticCurve {
    #[must_use]
    pub const fn new(start: Point, control: Point, end: Point) -> Self {
        Self {
            start,
            control,
            end,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.start.is_finite() || !self.control.is_finite() || !self.end.is_finite() {
            return Err(ChartError::InvalidData(
                "curve points must be finite".to_owned(),
            ));
        }
        Ok(())
    }

    /// Evaluates the curve at parameter `t` with the de Casteljau construction.
    #[must_use]
    pub fn point_at(self, t: f64) -> Point {
        let a = self.start.lerp(self.control, t);
        let b = self.control.lerp(self.end, t);
        a.lerp(b, t)
    }

    /// Returns the sub-curve tracing `self` between parameters `t0` and `t1`.
    ///
    /// `t0 == 0 && t1 == 1` yields the curve unchanged. `t0 == t1` yields
    /// `None`: there is no visible segment and callers skip drawing.
    ///
    /// Both ratios are expected in `[0, 1]`; callers clamp before calling.
    #[must_use]
    pub fn split(self, t0: f64, t1: f64) -> Option<Self> {
        debug_assert!((0.0..=1.0).contains(&t0), "t0 out of range: {t0}");
        debug_assert!((0.0..=1.0).contains(&t1), "t1 out of range: {t1}");

        if t0 == 0.0 && t1 == 1.0 {
            return Some(self);
        }
        if t0 == t1 {
            return None;
        }

        let control = self
            .start
            .lerp(self.control, t0)
            .lerp(self.control.lerp(self.end, t0), t1);

        Some(Self {
            start: self.point_at(t0),
            control,
            end: self.point_at(t1),
        })
    }

    /// Evenly spaced samples along the curve, both endpoints included.
    ///
    /// `segments == 0` is treated as one segment.
    pub fn samples(self, segments: u32) -> impl Iterator<Item = Point> {
        let segments = segments.max(1);
        (0..=segments).map(move |i| self.point_at(f64::from(i) / f64::from(segments)))
    }
}

/// Clamps a progress ratio into `[0, 1]`; NaN collapses to 0.
#[must_use]
pub fn clamp_ratio(ratio: f64) -> f64 {
    if ratio.is_nan() {
        return 0.0;
    }
    ratio.clamp(0.0, 1.0)
}
