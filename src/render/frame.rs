use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{ViewTransform, Viewport};
use crate::error::{TimelineError, TimelineResult};
use crate::extensions::EventCluster;

/// Axis tick at an effective-scale pixel position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub time: DateTime<Utc>,
    pub x: f64,
    pub label: String,
}

/// Backend-agnostic scene for one draw pass of the timeline and map views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub map_viewport: Viewport,
    pub transform: ViewTransform,
    pub timeline_clusters: Vec<EventCluster>,
    pub map_clusters: Vec<EventCluster>,
    pub ticks: Vec<AxisTick>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport, map_viewport: Viewport, transform: ViewTransform) -> Self {
        Self {
            viewport,
            map_viewport,
            transform,
            timeline_clusters: Vec::new(),
            map_clusters: Vec::new(),
            ticks: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_timeline_clusters(mut self, clusters: Vec<EventCluster>) -> Self {
        self.timeline_clusters = clusters;
        self
    }

    #[must_use]
    pub fn with_map_clusters(mut self, clusters: Vec<EventCluster>) -> Self {
        self.map_clusters = clusters;
        self
    }

    #[must_use]
    pub fn with_ticks(mut self, ticks: Vec<AxisTick>) -> Self {
        self.ticks = ticks;
        self
    }

    pub fn validate(&self) -> TimelineResult<()> {
        self.viewport.validate()?;
        self.map_viewport.validate()?;
        self.transform.validate()?;

        for cluster in self.timeline_clusters.iter().chain(&self.map_clusters) {
            if cluster.count == 0 || cluster.count != cluster.events.len() {
                return Err(TimelineError::InvalidData(format!(
                    "cluster count {} does not match {} members",
                    cluster.count,
                    cluster.events.len()
                )));
            }
            if !cluster.centroid_x.is_finite() || !cluster.y_offset.is_finite() {
                return Err(TimelineError::InvalidData(
                    "cluster geometry must be finite".to_owned(),
                ));
            }
        }
        for tick in &self.ticks {
            if !tick.x.is_finite() {
                return Err(TimelineError::InvalidData(
                    "tick position must be finite".to_owned(),
                ));
            }
        }

        Ok(())
    }
}
