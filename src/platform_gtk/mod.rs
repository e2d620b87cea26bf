//! GTK4 host adapter.
//!
//! The `DrawingArea` frame clock is the refresh signal: each tick callback
//! advances the controller into an offscreen [`RecordingSurface`], and the
//! draw function replays the recorded frame onto the widget's Cairo context.

use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::warn;

use crate::api::{ChartController, ChartState};
use crate::core::{QuadraticCurve, SurfaceSize};
use crate::error::ChartResult;
use crate::render::{CairoSurface, RecordingSurface, Surface};

struct AdapterState {
    controller: ChartController,
    recorded: RecordingSurface,
    tick: Option<gtk::TickCallbackId>,
}

pub struct GtkChartAdapter {
    drawing_area: gtk::DrawingArea,
    state: Rc<RefCell<AdapterState>>,
}

impl GtkChartAdapter {
    #[must_use]
    pub fn new(controller: ChartController) -> Self {
        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_hexpand(true);
        drawing_area.set_vexpand(true);

        let state = Rc::new(RefCell::new(AdapterState {
            controller,
            recorded: RecordingSurface::new(SurfaceSize::new(0, 0)),
            tick: None,
        }));

        drawing_area.set_draw_func({
            let state = Rc::clone(&state);
            move |_area, context, width, height| {
                if width <= 0 || height <= 0 {
                    return;
                }
                let Ok(mut guard) = state.try_borrow_mut() else {
                    return;
                };
                let AdapterState {
                    controller,
                    recorded,
                    ..
                } = &mut *guard;

                let size = SurfaceSize::new(width as u32, height as u32);
                if recorded.size() != size {
                    sync_size(controller, recorded, size);
                    if !controller.is_animating() {
                        let repaint = if controller.state() == ChartState::Cleared {
                            controller.clear_chart(recorded)
                        } else {
                            controller.mount(recorded)
                        };
                        if let Err(err) = repaint {
                            warn!(error = %err, "failed to repaint chart after resize");
                        }
                    }
                }

                let mut surface = CairoSurface::new(context, size);
                if let Err(err) = recorded.frame().replay(&mut surface) {
                    warn!(error = %err, "failed to paint chart frame");
                }
            }
        });

        Self {
            drawing_area,
            state,
        }
    }

    #[must_use]
    pub fn widget(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    pub fn with_controller<T>(&self, f: impl FnOnce(&ChartController) -> T) -> T {
        f(&self.state.borrow().controller)
    }

    /// "Draw Line": starts a run and hooks the frame clock if needed.
    pub fn draw_line(&self, curve: QuadraticCurve, duration_ms: f64) -> ChartResult<()> {
        let mut guard = self.state.borrow_mut();
        guard.controller.draw_line(curve, duration_ms)?;
        if guard.tick.is_none() {
            guard.tick = Some(self.attach_tick_callback());
        }
        Ok(())
    }

    /// "Stop Animation": the tick callback detaches itself on the next frame.
    pub fn stop_animation(&self) {
        self.state.borrow_mut().controller.stop_animation();
        self.drawing_area.queue_draw();
    }

    /// "Clear Chart".
    pub fn clear_chart(&self) -> ChartResult<()> {
        {
            let mut guard = self.state.borrow_mut();
            let AdapterState {
                controller,
                recorded,
                ..
            } = &mut *guard;
            if recorded.size().is_valid() {
                controller.clear_chart(recorded)?;
            } else {
                controller.stop_animation();
            }
        }
        self.drawing_area.queue_draw();
        Ok(())
    }

    fn attach_tick_callback(&self) -> gtk::TickCallbackId {
        let state = Rc::clone(&self.state);
        self.drawing_area.add_tick_callback(move |area, clock| {
            let Ok(mut guard) = state.try_borrow_mut() else {
                return gtk::glib::ControlFlow::Continue;
            };
            let AdapterState {
                controller,
                recorded,
                tick,
            } = &mut *guard;

            let size = SurfaceSize::new(area.width().max(0) as u32, area.height().max(0) as u32);
            if size.is_valid() {
                if recorded.size() != size {
                    sync_size(controller, recorded, size);
                }
                // Frame clock time is in microseconds.
                let now_ms = clock.frame_time() as f64 / 1000.0;
                if let Err(err) = controller.on_frame(recorded, now_ms) {
                    warn!(error = %err, "chart frame tick failed");
                }
                area.queue_draw();
            }

            if controller.is_animating() {
                gtk::glib::ControlFlow::Continue
            } else {
                *tick = None;
                gtk::glib::ControlFlow::Break
            }
        })
    }
}

fn sync_size(controller: &mut ChartController, recorded: &mut RecordingSurface, size: SurfaceSize) {
    recorded.resize(size);
    controller.reseed_scales();
}
