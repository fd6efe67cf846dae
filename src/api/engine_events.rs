use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::ViewTransform;
use crate::interaction::HoverChange;

/// Notifications queued for the renderer, drained with
/// [`TimelineEngine::drain_events`](super::TimelineEngine::drain_events).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    TransformChanged {
        transform: ViewTransform,
        visible_start: DateTime<Utc>,
        visible_end: DateTime<Utc>,
    },
    ClustersRecomputed {
        timeline_clusters: usize,
        map_clusters: usize,
    },
    HoverChanged(HoverChange),
}
