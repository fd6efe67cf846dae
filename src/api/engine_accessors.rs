use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::core::primitives::millis_to_datetime;
use crate::core::{Event, MapGeography, TimeDomain, TimeScale, ViewTransform};
use crate::error::TimelineResult;
use crate::extensions::{ClusterKey, EventCluster};
use crate::interaction::{IntentClass, InteractionMode, PendingRecompute};
use crate::render::{AxisTick, Renderer};

use super::time_axis::build_axis_ticks;
use super::{TimelineEngine, TimelineEngineConfig};

impl<R: Renderer> TimelineEngine<R> {
    #[must_use]
    pub fn config(&self) -> TimelineEngineConfig {
        self.config
    }

    #[must_use]
    pub fn domain(&self) -> TimeDomain {
        self.domain
    }

    #[must_use]
    pub fn base_scale(&self) -> TimeScale {
        self.base_scale
    }

    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// Base scale composed with the current transform.
    pub fn effective_scale(&self) -> TimelineResult<TimeScale> {
        self.transform.rescale(self.base_scale)
    }

    /// Dates at pixel 0 and at the right edge under the current transform.
    pub fn visible_range(&self) -> TimelineResult<(DateTime<Utc>, DateTime<Utc>)> {
        let start = self.transform.date_millis_at(self.base_scale, 0.0)?;
        let end = self
            .transform
            .date_millis_at(self.base_scale, self.viewport_width_px())?;
        Ok((millis_to_datetime(start)?, millis_to_datetime(end)?))
    }

    /// Axis ticks for the current transform; never waits for debounce.
    pub fn axis_ticks(&self) -> TimelineResult<Vec<AxisTick>> {
        build_axis_ticks(
            self.effective_scale()?,
            self.viewport_width_px(),
            self.config.tick_count,
            self.created_at,
        )
    }

    #[must_use]
    pub fn viewport_width_px(&self) -> f64 {
        self.config.viewport.width_px()
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[must_use]
    pub fn timeline_clusters(&self) -> &[EventCluster] {
        &self.timeline_clusters
    }

    #[must_use]
    pub fn map_clusters(&self) -> &[EventCluster] {
        &self.map_clusters
    }

    #[must_use]
    pub fn geography(&self) -> &MapGeography {
        &self.geography
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    #[must_use]
    pub fn hovered_cluster(&self) -> Option<ClusterKey> {
        self.interaction.hovered()
    }

    #[must_use]
    pub fn has_pending_recompute(&self) -> bool {
        self.scheduler.has_pending()
    }

    /// Pending debounced recomputation for one intent class, if any.
    #[must_use]
    pub fn pending_recompute(&self, class: IntentClass) -> Option<PendingRecompute> {
        self.scheduler.pending(class)
    }

    #[must_use]
    pub fn next_recompute_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Active temporal threshold for the current zoom level.
    #[must_use]
    pub fn cluster_threshold_px(&self) -> f64 {
        self.config
            .cluster_tuning
            .threshold_for_scale(self.transform.scale_k)
    }
}
