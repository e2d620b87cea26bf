use std::cell::Cell;

use curve_chart_rs::animation::{FrameScheduler, SchedulerState, TickDecision};

fn drive(scheduler: &mut FrameScheduler, timestamps: &[f64], ticks: &Cell<u32>) {
    for &now in timestamps {
        scheduler
            .dispatch(now, |_| {
                ticks.set(ticks.get() + 1);
                Ok(TickDecision::Continue)
            })
            .expect("dispatch");
    }
}

#[test]
fn double_cancel_produces_no_late_ticks() {
    let mut scheduler = FrameScheduler::new();
    let ticks = Cell::new(0);
    scheduler.start();
    drive(&mut scheduler, &[0.0, 16.0, 33.0], &ticks);
    assert_eq!(ticks.get(), 3);

    scheduler.cancel();
    scheduler.cancel();

    // Refresh signals keep arriving long after cancellation.
    drive(&mut scheduler, &[50.0, 66.0, 500.0, 5_000.0], &ticks);
    assert_eq!(ticks.get(), 3);
    assert_eq!(scheduler.ticks_fired(), 3);
    assert_eq!(scheduler.state(), SchedulerState::Cancelled);
}

#[test]
fn never_started_scheduler_ignores_refresh_and_cancel() {
    let mut scheduler = FrameScheduler::new();
    let ticks = Cell::new(0);
    scheduler.cancel();
    drive(&mut scheduler, &[0.0, 16.0], &ticks);
    assert_eq!(ticks.get(), 0);
    assert_eq!(scheduler.state(), SchedulerState::Idle);
}

#[test]
fn held_token_cancels_between_frames() {
    let mut scheduler = FrameScheduler::new();
    let ticks = Cell::new(0);
    let token = scheduler.start();
    drive(&mut scheduler, &[0.0], &ticks);

    token.cancel();
    assert!(!scheduler.is_pending());
    drive(&mut scheduler, &[16.0, 32.0], &ticks);
    assert_eq!(ticks.get(), 1);
    assert_eq!(scheduler.state(), SchedulerState::Cancelled);
}

#[test]
fn missed_frames_only_widen_elapsed_delta() {
    let mut scheduler = FrameScheduler::new();
    scheduler.start();
    let mut seen = Vec::new();
    for now in [100.0, 116.0, 400.0, 416.0] {
        scheduler
            .dispatch(now, |elapsed| {
                seen.push(elapsed);
                Ok(TickDecision::Continue)
            })
            .expect("dispatch");
    }
    assert_eq!(seen, vec![0.0, 16.0, 300.0, 316.0]);
}

#[test]
fn restart_begins_a_fresh_clock() {
    let mut scheduler = FrameScheduler::new();
    scheduler.start();
    scheduler
        .dispatch(1_000.0, |_| Ok(TickDecision::Continue))
        .expect("dispatch");
    scheduler
        .dispatch(1_200.0, |_| Ok(TickDecision::Continue))
        .expect("dispatch");

    scheduler.start();
    let mut first_elapsed = None;
    scheduler
        .dispatch(5_000.0, |elapsed| {
            first_elapsed = Some(elapsed);
            Ok(TickDecision::Continue)
        })
        .expect("dispatch");
    assert_eq!(first_elapsed, Some(0.0));
}
