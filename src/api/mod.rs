//! Host-facing chart API: configuration, the controller and snapshots.

mod chart_config;
mod chart_controller;
mod chart_scene;
mod chart_snapshot;
mod validation;

pub use chart_config::{
    AxisLineLayout, ChartConfig, ChartLayout, ChartStyle, ScaleScrollBehavior,
};
pub use chart_controller::{ChartController, ChartState, FrameReport};
pub use chart_snapshot::{
    CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshot, ChartSnapshotJsonContractV1,
};
