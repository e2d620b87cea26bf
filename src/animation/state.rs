use serde::{Deserialize, Serialize};

use crate::core::{QuadraticCurve, clamp_ratio};
use crate::error::{ChartError, ChartResult};

/// Progress of one draw-curve run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationState {
    curve: QuadraticCurve,
    duration_ms: f64,
    progress: f64,
}

impl AnimationState {
    pub fn new(curve: QuadraticCurve, duration_ms: f64) -> ChartResult<Self> {
        curve.validate()?;
        if !duration_ms.is_finite() || duration_ms < 0.0 {
            return Err(ChartError::InvalidData(
                "animation duration must be finite and >= 0".to_owned(),
            ));
        }
        Ok(Self {
            curve,
            duration_ms,
            progress: 0.0,
        })
    }

    #[must_use]
    pub fn curve(&self) -> QuadraticCurve {
        self.curve
    }

    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Updates progress from elapsed time and returns it.
    ///
    /// Progress is clamped to `[0, 1]` and never moves backwards. A zero
    /// duration completes immediately.
    pub fn advance_to(&mut self, elapsed_ms: f64) -> f64 {
        let ratio = if self.duration_ms == 0.0 {
            1.0
        } else {
            clamp_ratio(elapsed_ms / self.duration_ms)
        };
        self.progress = self.progress.max(ratio);
        self.progress
    }

    /// The part of the curve drawn so far, or `None` before anything is visible.
    #[must_use]
    pub fn visible_curve(&self) -> Option<QuadraticCurve> {
        self.curve.split(0.0, clamp_ratio(self.progress))
    }
}

#[cfg(test)]
mod tests {
    use super::AnimationState;
    use crate::core::{Point, QuadraticCurve};

    fn curve() -> QuadraticCurve {
        QuadraticCurve::new(
            Point::new(39.0, 600.0),
            Point::new(600.0, 600.0),
            Point::new(800.0, 60.0),
        )
    }

    #[test]
    fn progress_follows_elapsed_time_and_clamps() {
        let mut state = AnimationState::new(curve(), 1_000.0).expect("state");
        assert_eq!(state.advance_to(0.0), 0.0);
        assert_eq!(state.advance_to(250.0), 0.25);
        assert_eq!(state.advance_to(1_016.0), 1.0);
        assert!(state.is_complete());
    }

    #[test]
    fn progress_is_monotonic() {
        let mut state = AnimationState::new(curve(), 1_000.0).expect("state");
        state.advance_to(600.0);
        assert_eq!(state.advance_to(300.0), 0.6);
    }

    #[test]
    fn zero_duration_completes_on_first_tick() {
        let mut state = AnimationState::new(curve(), 0.0).expect("state");
        assert_eq!(state.advance_to(0.0), 1.0);
        assert_eq!(state.visible_curve(), Some(curve()));
    }

    #[test]
    fn nothing_is_visible_at_zero_progress() {
        let state = AnimationState::new(curve(), 500.0).expect("state");
        assert_eq!(state.visible_curve(), None);
    }

    #[test]
    fn rejects_negative_or_non_finite_duration() {
        assert!(AnimationState::new(curve(), -1.0).is_err());
        assert!(AnimationState::new(curve(), f64::INFINITY).is_err());
    }
}
