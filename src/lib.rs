//! curve-chart-rs: animated quadratic-bezier chart core.
//!
//! A [`ChartController`] animates one bezier curve over two scrolling tick
//! scales. Drawing goes through the [`render::Surface`] seam and frames are
//! paced by the host's refresh signal via [`animation::FrameScheduler`].

pub mod animation;
pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{ChartConfig, ChartController};
pub use error::{ChartError, ChartResult};
