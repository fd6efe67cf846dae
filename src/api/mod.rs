mod cluster_controller;
mod engine;
mod engine_accessors;
mod engine_config;
mod engine_events;
mod engine_init;
mod engine_snapshot;
mod fit_transform;
mod hover_controller;
mod intent_controller;
mod pan_intent_resolver;
mod time_axis;
mod visible_window;
mod zoom_intent_resolver;

pub use engine::TimelineEngine;
pub use engine_config::{
    DEFAULT_TICK_COUNT, DebounceTuning, HoverTuning, TimelineEngineConfig, WheelZoomTuning,
};
pub use engine_events::EngineEvent;
pub use engine_snapshot::{
    ClusterSnapshot, ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshot, EngineSnapshotJsonContractV1,
};
pub use fit_transform::{
    FitTuning, fit_transform, fit_transform_unconstrained, frame_window, go_to_date_transform,
    reset_transform,
};
pub use time_axis::{build_axis_ticks, format_tick_label, time_ticks};
pub use visible_window::visible_events;
pub use zoom_intent_resolver::WheelDeltaMode;
