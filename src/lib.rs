//! timeline-atlas: clustering and viewport-transform engine for zoomable
//! event timelines and their companion world map.
//!
//! The engine maps dates to pixels under a pan/zoom transform, greedily
//! clusters nearby events, stacks cluster labels and frames event subsets.
//! Drawing is left to a [`render::Renderer`] implementation.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{TimelineEngine, TimelineEngineConfig};
pub use error::{TimelineError, TimelineResult};
