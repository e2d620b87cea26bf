use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::types::{Point, SurfaceSize};
use crate::error::{ChartError, ChartResult};

/// Number of tick marks a track keeps visible at any time.
pub const TICK_WINDOW_LEN: usize = 10;

/// Tick marks are never packed closer than this, whatever the surface size.
pub const MIN_TICK_SPACING_PX: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Direction in which labels grow along the axis: `+1` toward larger
    /// pixel coordinates, `-1` toward smaller ones (the y axis grows upward).
    #[must_use]
    pub const fn growth_sign(self) -> f64 {
        match self {
            Self::X => 1.0,
            Self::Y => -1.0,
        }
    }

    #[must_use]
    pub fn along(self, point: Point) -> f64 {
        match self {
            Self::X => point.x,
            Self::Y => point.y,
        }
    }

    fn along_extent(self, size: SurfaceSize) -> f64 {
        match self {
            Self::X => size.width_px(),
            Self::Y => size.height_px(),
        }
    }

    fn cross_extent(self, size: SurfaceSize) -> f64 {
        match self {
            Self::X => size.height_px(),
            Self::Y => size.width_px(),
        }
    }
}

/// Placement of one axis' tick marks, as ratios of the surface extent.
///
/// `origin_ratio` is measured along the axis and doubles as the exit
/// boundary; `span_ratio` is the extent covered by the whole window.
/// The cross ratios place the tick line perpendicular to the axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickTrackLayout {
    pub origin_ratio: f64,
    pub span_ratio: f64,
    pub cross_start_ratio: f64,
    pub cross_end_ratio: f64,
    pub label_offset_x_px: f64,
    pub label_offset_y_px: f64,
}

impl TickTrackLayout {
    #[must_use]
    pub const fn default_x() -> Self {
        Self {
            origin_ratio: 0.1,
            span_ratio: 0.9,
            cross_start_ratio: 0.92,
            cross_end_ratio: 0.94,
            label_offset_x_px: -5.0,
            label_offset_y_px: 38.0,
        }
    }

    #[must_use]
    pub const fn default_y() -> Self {
        Self {
            origin_ratio: 0.85,
            span_ratio: 0.9,
            cross_start_ratio: 0.04,
            cross_end_ratio: 0.05,
            label_offset_x_px: -30.0,
            label_offset_y_px: 5.0,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("origin_ratio", self.origin_ratio),
            ("cross_start_ratio", self.cross_start_ratio),
            ("cross_end_ratio", self.cross_end_ratio),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "tick layout `{name}` must be finite and in [0, 1]"
                )));
            }
        }
        if !self.span_ratio.is_finite() || self.span_ratio <= 0.0 || self.span_ratio > 1.0 {
            return Err(ChartError::InvalidData(
                "tick layout `span_ratio` must be finite and in (0, 1]".to_owned(),
            ));
        }
        if !self.label_offset_x_px.is_finite() || !self.label_offset_y_px.is_finite() {
            return Err(ChartError::InvalidData(
                "tick label offsets must be finite".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// One graduation on an axis: a short perpendicular line plus its label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickMark {
    pub label: u64,
    pub start: Point,
    pub end: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleTrackState {
    Empty,
    Seeded,
    Scrolling,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TrackGeometry {
    origin: f64,
    spacing: f64,
    cross_start: f64,
    cross_end: f64,
}

/// Bounded scrolling window of tick marks for one axis.
///
/// Marks are kept in spatial order from the exit boundary outward. Scrolling
/// evicts marks from the front once they pass the boundary and appends fresh
/// ones one spacing beyond the trailing mark, so the labels always form a
/// contiguous ascending run of [`TICK_WINDOW_LEN`] integers.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleTrack {
    axis: Axis,
    layout: TickTrackLayout,
    geometry: Option<TrackGeometry>,
    marks: VecDeque<TickMark>,
    state: ScaleTrackState,
}

impl ScaleTrack {
    #[must_use]
    pub fn new(axis: Axis, layout: TickTrackLayout) -> Self {
        Self {
            axis,
            layout,
            geometry: None,
            marks: VecDeque::with_capacity(TICK_WINDOW_LEN),
            state: ScaleTrackState::Empty,
        }
    }

    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    #[must_use]
    pub fn layout(&self) -> TickTrackLayout {
        self.layout
    }

    #[must_use]
    pub fn state(&self) -> ScaleTrackState {
        self.state
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Pixel range `(exit_boundary, far_end)` along the axis, once seeded.
    #[must_use]
    pub fn bounds(&self) -> Option<(f64, f64)> {
        let geometry = self.geometry?;
        let span = geometry.spacing * TICK_WINDOW_LEN as f64;
        Some((
            geometry.origin,
            geometry.origin + self.axis.growth_sign() * span,
        ))
    }

    /// Populates the window with evenly spaced marks labelled `1..=10`.
    ///
    /// No-op unless the track is empty.
    pub fn seed(&mut self, size: SurfaceSize) {
        if self.state != ScaleTrackState::Empty {
            return;
        }

        let along = self.axis.along_extent(size);
        let cross = self.axis.cross_extent(size);
        let geometry = TrackGeometry {
            origin: along * self.layout.origin_ratio,
            spacing: (along * self.layout.span_ratio / TICK_WINDOW_LEN as f64)
                .max(MIN_TICK_SPACING_PX),
            cross_start: cross * self.layout.cross_start_ratio,
            cross_end: cross * self.layout.cross_end_ratio,
        };

        self.marks.clear();
        let sign = self.axis.growth_sign();
        for (index, label) in (1..=TICK_WINDOW_LEN as u64).enumerate() {
            let position = geometry.origin + sign * geometry.spacing * index as f64;
            self.marks
                .push_back(place_mark(self.axis, &geometry, label, position));
        }
        self.geometry = Some(geometry);
        self.state = ScaleTrackState::Seeded;
    }

    /// Scrolls the window `step_px` against the growth direction and
    /// relabels it past every mark that crossed the exit boundary.
    ///
    /// Evicted marks are replaced one spacing beyond the trailing mark, so
    /// the window is laid out again from its new front in a single pass,
    /// however far it travelled. Returns the number of labels that scrolled
    /// out. Empty tracks, negative and non-finite steps are ignored.
    pub fn advance(&mut self, step_px: f64) -> usize {
        let Some(geometry) = self.geometry else {
            return 0;
        };
        if !step_px.is_finite() || step_px < 0.0 {
            return 0;
        }
        let Some(front) = self.marks.front().copied() else {
            return 0;
        };

        let sign = self.axis.growth_sign();
        let mut front_offset =
            (self.axis.along(front.start) - geometry.origin) * sign - step_px;
        let mut evicted = 0_u64;
        if front_offset < 0.0 {
            // Marks strictly past the boundary; the cast saturates for absurd steps.
            evicted = (-front_offset / geometry.spacing).ceil() as u64;
            front_offset = front_offset.rem_euclid(geometry.spacing);
            if front_offset >= geometry.spacing {
                // Overshoot within rounding of zero: the old front sits on the boundary.
                front_offset = 0.0;
                evicted -= 1;
            }
        }

        let first_label = front.label.saturating_add(evicted);
        for (index, mark) in self.marks.iter_mut().enumerate() {
            let position =
                geometry.origin + sign * (front_offset + geometry.spacing * index as f64);
            *mark = place_mark(
                self.axis,
                &geometry,
                first_label.saturating_add(index as u64),
                position,
            );
        }

        self.state = ScaleTrackState::Scrolling;
        usize::try_from(evicted).unwrap_or(usize::MAX)
    }

    /// Read-only view of the marks in spatial order. Recomputed per call.
    pub fn marks(&self) -> impl ExactSizeIterator<Item = &TickMark> + Clone + '_ {
        self.marks.iter()
    }

    pub fn labels(&self) -> impl ExactSizeIterator<Item = u64> + Clone + '_ {
        self.marks.iter().map(|mark| mark.label)
    }

    /// Drops all marks and returns to `Empty`; the next `seed` starts over at 1.
    pub fn reset(&mut self) {
        self.marks.clear();
        self.geometry = None;
        self.state = ScaleTrackState::Empty;
    }
}

fn place_mark(axis: Axis, geometry: &TrackGeometry, label: u64, position: f64) -> TickMark {
    match axis {
        Axis::X => TickMark {
            label,
            start: Point::new(position, geometry.cross_start),
            end: Point::new(position, geometry.cross_end),
        },
        Axis::Y => TickMark {
            label,
            start: Point::new(geometry.cross_start, position),
            end: Point::new(geometry.cross_end, position),
        },
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::{
        Axis, MIN_TICK_SPACING_PX, ScaleTrack, ScaleTrackState, TICK_WINDOW_LEN, TickTrackLayout,
    };
    use crate::core::SurfaceSize;

    fn x_track() -> ScaleTrack {
        ScaleTrack::new(Axis::X, TickTrackLayout::default_x())
    }

    fn y_track() -> ScaleTrack {
        ScaleTrack::new(Axis::Y, TickTrackLayout::default_y())
    }

    #[test]
    fn seed_places_ten_evenly_spaced_x_marks() {
        let mut track = x_track();
        assert_eq!(track.state(), ScaleTrackState::Empty);
        track.seed(SurfaceSize::new(1000, 500));

        assert_eq!(track.state(), ScaleTrackState::Seeded);
        assert_eq!(track.len(), TICK_WINDOW_LEN);
        assert_eq!(track.labels().collect::<Vec<_>>(), (1..=10).collect::<Vec<_>>());

        let xs: Vec<f64> = track.marks().map(|mark| mark.start.x).collect();
        for (index, x) in xs.iter().enumerate() {
            assert_abs_diff_eq!(*x, 100.0 + 90.0 * index as f64, epsilon = 1e-9);
        }
        let first = track.marks().next().expect("first mark");
        assert_abs_diff_eq!(first.start.y, 460.0, epsilon = 1e-9);
        assert_abs_diff_eq!(first.end.y, 470.0, epsilon = 1e-9);
    }

    #[test]
    fn seed_places_y_marks_growing_upward() {
        let mut track = y_track();
        track.seed(SurfaceSize::new(1000, 500));

        let ys: Vec<f64> = track.marks().map(|mark| mark.start.y).collect();
        assert_abs_diff_eq!(ys[0], 425.0, epsilon = 1e-9);
        assert_abs_diff_eq!(ys[1], 380.0, epsilon = 1e-9);
        assert!(ys.windows(2).all(|pair| pair[1] < pair[0]));

        let first = track.marks().next().expect("first mark");
        assert_abs_diff_eq!(first.start.x, 40.0, epsilon = 1e-9);
        assert_abs_diff_eq!(first.end.x, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn seed_is_idempotent() {
        let mut track = x_track();
        track.seed(SurfaceSize::new(1000, 500));
        track.advance(3.0);
        let before = track.clone();
        track.seed(SurfaceSize::new(400, 300));
        assert_eq!(track, before);
    }

    #[test]
    fn advance_on_empty_track_does_nothing() {
        let mut track = x_track();
        assert_eq!(track.advance(5.0), 0);
        assert_eq!(track.state(), ScaleTrackState::Empty);
        assert!(track.is_empty());
    }

    #[test]
    fn advance_moves_marks_against_growth_direction() {
        let mut x = x_track();
        let mut y = y_track();
        let size = SurfaceSize::new(1000, 500);
        x.seed(size);
        y.seed(size);

        x.advance(2.0);
        y.advance(0.5);

        assert_eq!(x.state(), ScaleTrackState::Scrolling);
        let first_x = x.marks().next().expect("mark");
        // The boundary mark moved past the origin and was replaced.
        assert_eq!(first_x.label, 2);
        assert_abs_diff_eq!(first_x.start.x, 188.0, epsilon = 1e-9);

        let first_y = y.marks().next().expect("mark");
        assert_eq!(first_y.label, 2);
        assert_abs_diff_eq!(first_y.start.y, 380.5, epsilon = 1e-9);
    }

    #[test]
    fn evicted_mark_is_replaced_one_spacing_past_the_trailing_mark() {
        let mut track = x_track();
        track.seed(SurfaceSize::new(1000, 500));
        let evicted = track.advance(1.0);
        assert_eq!(evicted, 1);

        let marks: Vec<_> = track.marks().copied().collect();
        assert_eq!(marks.len(), TICK_WINDOW_LEN);
        let last = marks.last().expect("last");
        assert_eq!(last.label, 11);
        assert_abs_diff_eq!(last.start.x, 99.0 + 90.0 * 10.0, epsilon = 1e-9);
        for pair in marks.windows(2) {
            assert_abs_diff_eq!(pair[1].start.x - pair[0].start.x, 90.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn large_step_evicts_several_marks_and_keeps_labels_contiguous() {
        let mut track = x_track();
        track.seed(SurfaceSize::new(1000, 500));
        let evicted = track.advance(200.0);
        assert_eq!(evicted, 3);
        assert_eq!(track.labels().collect::<Vec<_>>(), (4..=13).collect::<Vec<_>>());
    }

    #[test]
    fn reset_returns_to_empty_and_restarts_labels() {
        let mut track = y_track();
        let size = SurfaceSize::new(800, 600);
        track.seed(size);
        for _ in 0..400 {
            track.advance(0.5);
        }
        assert!(track.labels().next().expect("label") > 1);

        track.reset();
        assert_eq!(track.state(), ScaleTrackState::Empty);
        assert!(track.bounds().is_none());

        track.seed(size);
        assert_eq!(track.labels().next(), Some(1));
    }

    #[test]
    fn bounds_cover_the_window_span() {
        let mut track = y_track();
        track.seed(SurfaceSize::new(1000, 500));
        let (origin, far) = track.bounds().expect("bounds");
        assert_abs_diff_eq!(origin, 425.0, epsilon = 1e-9);
        assert_abs_diff_eq!(far, -25.0, epsilon = 1e-9);
    }

    #[test]
    fn non_finite_and_negative_steps_leave_the_window_untouched() {
        let mut track = x_track();
        track.seed(SurfaceSize::new(1000, 500));
        let before = track.clone();

        assert_eq!(track.advance(f64::NAN), 0);
        assert_eq!(track.advance(f64::INFINITY), 0);
        assert_eq!(track.advance(-5.0), 0);
        assert_eq!(track, before);
    }

    #[test]
    fn huge_step_relabels_in_one_pass() {
        let mut track = x_track();
        track.seed(SurfaceSize::new(1000, 500));

        // 1e10 px at 90 px spacing scrolls 111_111_112 labels out.
        let evicted = track.advance(1e10);
        assert_eq!(evicted, 111_111_112);
        let labels: Vec<u64> = track.labels().collect();
        assert_eq!(labels, (111_111_113..=111_111_122).collect::<Vec<_>>());

        let (origin, far) = track.bounds().expect("bounds");
        for mark in track.marks() {
            assert!(mark.start.x >= origin && mark.start.x < far);
        }
    }

    #[test]
    fn mark_landing_exactly_on_the_boundary_is_kept() {
        let mut track = x_track();
        track.seed(SurfaceSize::new(1000, 500));
        assert_eq!(track.advance(90.0), 1);
        let first = track.marks().next().expect("mark");
        assert_eq!(first.label, 2);
        assert_abs_diff_eq!(first.start.x, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn tiny_span_is_clamped_to_minimum_spacing() {
        let layout = TickTrackLayout {
            span_ratio: 1e-9,
            ..TickTrackLayout::default_x()
        };
        let mut track = ScaleTrack::new(Axis::X, layout);
        track.seed(SurfaceSize::new(1000, 500));
        let xs: Vec<f64> = track.marks().map(|mark| mark.start.x).collect();
        for pair in xs.windows(2) {
            assert_abs_diff_eq!(pair[1] - pair[0], MIN_TICK_SPACING_PX, epsilon = 1e-9);
        }
    }

    #[test]
    fn layout_validation_rejects_bad_ratios() {
        let mut layout = TickTrackLayout::default_x();
        assert!(layout.validate().is_ok());
        layout.span_ratio = 0.0;
        assert!(layout.validate().is_err());
        layout = TickTrackLayout::default_x();
        layout.origin_ratio = f64::NAN;
        assert!(layout.validate().is_err());
    }
}
