use approx::assert_abs_diff_eq;
use curve_chart_rs::core::{
    Axis, ScaleTrack, ScaleTrackState, SurfaceSize, TICK_WINDOW_LEN, TickTrackLayout,
};

fn seeded(axis: Axis, size: SurfaceSize) -> ScaleTrack {
    let layout = match axis {
        Axis::X => TickTrackLayout::default_x(),
        Axis::Y => TickTrackLayout::default_y(),
    };
    let mut track = ScaleTrack::new(axis, layout);
    track.seed(size);
    track
}

#[test]
fn state_machine_runs_empty_seeded_scrolling() {
    let mut track = ScaleTrack::new(Axis::X, TickTrackLayout::default_x());
    assert_eq!(track.state(), ScaleTrackState::Empty);
    assert_eq!(track.marks().len(), 0);

    track.seed(SurfaceSize::new(960, 640));
    assert_eq!(track.state(), ScaleTrackState::Seeded);

    track.advance(2.0);
    assert_eq!(track.state(), ScaleTrackState::Scrolling);
    track.advance(2.0);
    assert_eq!(track.state(), ScaleTrackState::Scrolling);
}

#[test]
fn window_keeps_ten_marks_across_many_frames() {
    let size = SurfaceSize::new(960, 640);
    let mut x = seeded(Axis::X, size);
    let mut y = seeded(Axis::Y, size);

    for _ in 0..2_000 {
        x.advance(2.0);
        y.advance(0.5);
        assert_eq!(x.marks().len(), TICK_WINDOW_LEN);
        assert_eq!(y.marks().len(), TICK_WINDOW_LEN);
    }
}

#[test]
fn labels_stay_contiguous_after_several_evictions() {
    let size = SurfaceSize::new(960, 640);
    let mut track = seeded(Axis::X, size);

    // Spacing is 86.4px; 13 evictions need a little over 12 spacings of travel.
    let mut evicted = 0;
    while evicted < 13 {
        evicted += track.advance(2.0);
    }

    let labels: Vec<u64> = track.labels().collect();
    assert_eq!(labels, (14..=23).collect::<Vec<_>>());
}

#[test]
fn marks_view_is_restartable() {
    let mut track = seeded(Axis::Y, SurfaceSize::new(800, 600));
    track.advance(10.0);

    let view = track.marks();
    let first_pass: Vec<_> = view.clone().map(|mark| mark.label).collect();
    let second_pass: Vec<_> = view.map(|mark| mark.label).collect();
    assert_eq!(first_pass, second_pass);
    assert_eq!(
        track.marks().map(|mark| mark.label).collect::<Vec<_>>(),
        first_pass
    );
}

#[test]
fn scrolling_marks_stay_inside_bounds() {
    let size = SurfaceSize::new(1200, 600);
    let mut x = seeded(Axis::X, size);
    let (origin, far) = x.bounds().expect("bounds");
    for _ in 0..500 {
        x.advance(3.0);
        for mark in x.marks() {
            assert!(mark.start.x >= origin - 1e-9);
            assert!(mark.start.x < far + 1e-9);
        }
    }
}

#[test]
fn y_marks_keep_their_cross_axis_geometry() {
    let size = SurfaceSize::new(1000, 500);
    let mut y = seeded(Axis::Y, size);
    for _ in 0..300 {
        y.advance(0.5);
    }
    for mark in y.marks() {
        assert_abs_diff_eq!(mark.start.x, 40.0, epsilon = 1e-9);
        assert_abs_diff_eq!(mark.end.x, 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(mark.start.y, mark.end.y, epsilon = 1e-9);
    }
}

#[test]
fn zero_step_keeps_positions() {
    let mut track = seeded(Axis::X, SurfaceSize::new(960, 640));
    let before: Vec<_> = track.marks().copied().collect();
    assert_eq!(track.advance(0.0), 0);
    let after: Vec<_> = track.marks().copied().collect();
    assert_eq!(before, after);
}

#[test]
fn invalid_steps_are_ignored() {
    let mut track = seeded(Axis::Y, SurfaceSize::new(960, 640));
    let before: Vec<_> = track.marks().copied().collect();

    assert_eq!(track.advance(f64::NAN), 0);
    assert_eq!(track.advance(f64::NEG_INFINITY), 0);
    assert_eq!(track.advance(-5.0), 0);

    let after: Vec<_> = track.marks().copied().collect();
    assert_eq!(before, after);
    assert_eq!(track.state(), ScaleTrackState::Seeded);
}

#[test]
fn one_huge_step_equals_many_small_ones_in_labels() {
    let size = SurfaceSize::new(960, 640);
    let mut stepped = seeded(Axis::X, size);
    let mut jumped = seeded(Axis::X, size);

    let mut evicted = 0;
    for _ in 0..500 {
        evicted += stepped.advance(2.0);
    }
    assert_eq!(jumped.advance(1_000.0), evicted);
    assert_eq!(
        stepped.labels().collect::<Vec<_>>(),
        jumped.labels().collect::<Vec<_>>()
    );
    for (a, b) in stepped.marks().zip(jumped.marks()) {
        assert_abs_diff_eq!(a.start.x, b.start.x, epsilon = 1e-6);
    }
}

#[test]
fn astronomically_large_step_keeps_the_window_in_bounds() {
    let mut track = seeded(Axis::X, SurfaceSize::new(960, 640));
    let evicted = track.advance(1e10);
    assert!(evicted > 100_000_000);
    assert_eq!(track.marks().len(), TICK_WINDOW_LEN);

    let labels: Vec<u64> = track.labels().collect();
    assert!(labels.windows(2).all(|pair| pair[1] == pair[0] + 1));
    let (origin, far) = track.bounds().expect("bounds");
    for mark in track.marks() {
        assert!(mark.start.x >= origin && mark.start.x < far);
    }
}
