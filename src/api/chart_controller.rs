use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::animation::{AnimationState, CancellationToken, FrameScheduler, TickDecision};
use crate::core::{QuadraticCurve, ScaleTrack};
use crate::error::ChartResult;
use crate::render::Surface;

use super::chart_scene::{ChartScene, paint_axes, size_snapshot};
use super::{ChartConfig, ChartSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartState {
    Idle,
    Running,
    Completed,
    Stopped,
    /// Idle with a blanked canvas showing only the axes.
    Cleared,
}

/// Outcome of one painted animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    pub elapsed_ms: f64,
    pub progress: f64,
    pub scales_scrolled: bool,
    pub decision: TickDecision,
}

/// Orchestrates one animated chart.
///
/// The controller owns its scale tracks, animation state and frame
/// scheduler. Surfaces are borrowed per call and never stored. The host
/// forwards each display refresh to [`on_frame`](Self::on_frame) and maps
/// its "Draw Line", "Clear Chart" and "Stop Animation" actions to
/// [`draw_line`](Self::draw_line), [`clear_chart`](Self::clear_chart) and
/// [`stop_animation`](Self::stop_animation).
#[derive(Debug)]
pub struct ChartController {
    config: ChartConfig,
    scheduler: FrameScheduler,
    scene: ChartScene,
    state: ChartState,
}

impl ChartController {
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let scene = ChartScene::new(&config);
        Ok(Self {
            config,
            scheduler: FrameScheduler::new(),
            scene,
            state: ChartState::Idle,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> ChartState {
        self.state
    }

    /// Progress of the active run; `None` when no run is active.
    #[must_use]
    pub fn progress(&self) -> Option<f64> {
        self.scene.animation.as_ref().map(AnimationState::progress)
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.scheduler.is_pending()
    }

    #[must_use]
    pub fn x_scale(&self) -> &ScaleTrack {
        &self.scene.x_scale
    }

    #[must_use]
    pub fn y_scale(&self) -> &ScaleTrack {
        &self.scene.y_scale
    }

    #[must_use]
    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Paints the initial chart: axes and the at-rest scales.
    pub fn mount<S: Surface + ?Sized>(&mut self, surface: &mut S) -> ChartResult<()> {
        self.scene.paint_static(&self.config, surface)
    }

    /// Starts animating `curve` over `duration_ms`.
    ///
    /// A run already in flight is replaced: its scheduler is cancelled and
    /// will not tick again. Scales restart from their seeded window.
    pub fn draw_line(
        &mut self,
        curve: QuadraticCurve,
        duration_ms: f64,
    ) -> ChartResult<CancellationToken> {
        let animation = AnimationState::new(curve, duration_ms)?;
        if self.state == ChartState::Running {
            debug!("draw line replaces running animation");
        }

        self.scene.reset_scales();
        self.scene.animation = Some(animation);
        let token = self.scheduler.start();
        self.state = ChartState::Running;
        debug!(duration_ms, "draw line started");
        Ok(token)
    }

    /// Handles one display refresh at host timestamp `timestamp_ms`.
    ///
    /// Returns `Ok(None)` when no run is pending. A failing surface stops the
    /// run; the error is returned after the state is settled.
    pub fn on_frame<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        timestamp_ms: f64,
    ) -> ChartResult<Option<FrameReport>> {
        let config = &self.config;
        let scene = &mut self.scene;
        let mut report = None;
        let dispatched = self.scheduler.dispatch(timestamp_ms, |elapsed_ms| {
            let frame = scene.paint_tick(config, surface, elapsed_ms)?;
            report = Some(frame);
            Ok(frame.decision)
        });

        match dispatched {
            Ok(Some(TickDecision::Complete)) => {
                self.scene.animation = None;
                self.state = ChartState::Completed;
                debug!("draw line completed");
            }
            Ok(Some(TickDecision::Continue)) => {
                if !self.scheduler.is_pending() {
                    self.finish_stopped();
                }
            }
            Ok(None) => {
                if self.state == ChartState::Running {
                    // Cancelled through a token clone held by the host.
                    self.finish_stopped();
                }
            }
            Err(err) => {
                if self.state == ChartState::Running && !self.scheduler.is_pending() {
                    warn!(error = %err, "frame failed; stopping animation");
                    self.finish_stopped();
                }
                return Err(err);
            }
        }
        Ok(report)
    }

    /// Cancels the running animation, leaving the surface as last drawn.
    pub fn stop_animation(&mut self) {
        if self.state != ChartState::Running {
            return;
        }
        self.scheduler.cancel();
        self.finish_stopped();
    }

    /// Cancels any run, drops the scales and repaints only the axes.
    pub fn clear_chart<S: Surface + ?Sized>(&mut self, surface: &mut S) -> ChartResult<()> {
        self.scheduler.cancel();
        self.scene.animation = None;
        self.scene.reset_scales();
        self.state = ChartState::Cleared;
        debug!("chart cleared");

        let size = size_snapshot(surface)?;
        surface.clear()?;
        paint_axes(&self.config, surface, size)
    }

    /// Drops both scales so they reseed from the next frame's size.
    ///
    /// Hosts call this after the drawing surface was resized.
    pub fn reseed_scales(&mut self) {
        debug!("reseeding scales");
        self.scene.reset_scales();
    }

    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot {
            state: self.state,
            scheduler_state: self.scheduler.state(),
            progress: self.progress(),
            x_labels: self.scene.x_scale.labels().collect(),
            y_labels: self.scene.y_scale.labels().collect(),
            ticks_fired: self.scheduler.ticks_fired(),
        }
    }

    fn finish_stopped(&mut self) {
        self.scene.animation = None;
        self.state = ChartState::Stopped;
        debug!(ticks_fired = self.scheduler.ticks_fired(), "animation stopped");
    }
}
