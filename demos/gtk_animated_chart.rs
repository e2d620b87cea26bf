use std::rc::Rc;

use curve_chart_rs::api::{ChartConfig, ChartController};
use curve_chart_rs::core::{Point, QuadraticCurve};
use curve_chart_rs::platform_gtk::GtkChartAdapter;
use gtk4 as gtk;
use gtk4::prelude::*;

const DRAW_DURATION_MS: f64 = 5_000.0;

fn main() {
    let _ = curve_chart_rs::telemetry::init_tracing_with_filter("curve_chart_rs=debug,info");
    let app = gtk::Application::builder()
        .application_id("rs.curve_chart.demos.gtk_animated_chart")
        .build();
    app.connect_activate(build_ui);
    app.run();
}

fn demo_curve() -> QuadraticCurve {
    QuadraticCurve::new(
        Point::new(39.0, 600.0),
        Point::new(600.0, 600.0),
        Point::new(800.0, 60.0),
    )
}

fn build_ui(app: &gtk::Application) {
    let controller = match ChartController::new(ChartConfig::default()) {
        Ok(controller) => controller,
        Err(err) => {
            eprintln!("failed to initialize chart controller: {err}");
            return;
        }
    };
    let adapter = Rc::new(GtkChartAdapter::new(controller));

    let draw_button = gtk::Button::with_label("Draw Line");
    draw_button.connect_clicked({
        let adapter = Rc::clone(&adapter);
        move |_| {
            if let Err(err) = adapter.draw_line(demo_curve(), DRAW_DURATION_MS) {
                eprintln!("draw line failed: {err}");
            }
        }
    });

    let clear_button = gtk::Button::with_label("Clear Chart");
    clear_button.connect_clicked({
        let adapter = Rc::clone(&adapter);
        move |_| {
            if let Err(err) = adapter.clear_chart() {
                eprintln!("clear chart failed: {err}");
            }
        }
    });

    let stop_button = gtk::Button::with_label("Stop Animation");
    stop_button.connect_clicked({
        let adapter = Rc::clone(&adapter);
        move |_| adapter.stop_animation()
    });

    let controls = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    controls.append(&draw_button);
    controls.append(&clear_button);
    controls.append(&stop_button);

    let root = gtk::Box::new(gtk::Orientation::Vertical, 8);
    root.set_margin_top(8);
    root.set_margin_bottom(8);
    root.set_margin_start(8);
    root.set_margin_end(8);
    root.append(&controls);
    root.append(adapter.widget());

    let window = gtk::ApplicationWindow::builder()
        .application(app)
        .title("Canvas chart")
        .default_width(960)
        .default_height(720)
        .child(&root)
        .build();
    window.present();
}
