use tracing::{debug, trace};

use crate::core::{Event, Projection};
use crate::error::TimelineResult;
use crate::extensions::{cluster_events_within_radius, layout_labels};
use crate::render::Renderer;

use super::engine_events::EngineEvent;
use super::visible_window::visible_events;
use super::TimelineEngine;

impl<R: Renderer> TimelineEngine<R> {
    /// Replaces the event list and recomputes clusters immediately.
    ///
    /// Every event is validated first; on error the previous list is kept.
    pub fn set_events(&mut self, events: Vec<Event>) -> TimelineResult<()> {
        for event in &events {
            event.validate()?;
        }
        debug!(count = events.len(), "set timeline events");
        self.events = events;
        self.scheduler.cancel_all();
        self.recompute_clusters()
    }

    /// Installs the map projection; map clusters become spatially aware.
    pub fn load_map_geography(
        &mut self,
        projection: impl Projection + Send + Sync + 'static,
    ) -> TimelineResult<()> {
        self.geography.load(projection)?;
        debug!("map geography loaded");
        self.recompute_clusters()
    }

    /// Recomputes timeline and map clusters against the latest transform.
    ///
    /// Always queues `ClustersRecomputed`, including `{ 0, 0 }` when no event
    /// is visible, so renderers can drop stale glyphs. A pointer still over
    /// the timeline is hit-tested again and may queue `HoverChanged`.
    pub fn recompute_clusters(&mut self) -> TimelineResult<()> {
        let effective = self.effective_scale()?;
        let width = self.viewport_width_px();
        let threshold = self.cluster_threshold_px();
        let tuning = self.config.cluster_tuning;

        let visible = visible_events(&self.events, effective, width)?;
        if visible.is_empty() {
            self.timeline_clusters.clear();
            self.map_clusters.clear();
            trace!("no visible events; clusters cleared");
            self.emit_clusters_recomputed();
            self.refresh_hover();
            return Ok(());
        }

        let timeline = cluster_events_within_radius(
            &visible,
            effective,
            threshold,
            None,
            tuning.spatial_radius_px,
        )?;
        let timeline = layout_labels(timeline, self.config.label_layout)?;

        let projection = self.geography.projection().map(|p| p as &dyn Projection);
        let map = cluster_events_within_radius(
            &visible,
            effective,
            threshold,
            projection,
            tuning.spatial_radius_px,
        )?;

        debug!(
            visible = visible.len(),
            threshold,
            timeline_clusters = timeline.len(),
            map_clusters = map.len(),
            spatial = projection.is_some(),
            "clusters recomputed"
        );
        self.timeline_clusters = timeline;
        self.map_clusters = map;
        self.emit_clusters_recomputed();
        self.refresh_hover();
        Ok(())
    }

    fn emit_clusters_recomputed(&mut self) {
        self.pending_events.push(EngineEvent::ClustersRecomputed {
            timeline_clusters: self.timeline_clusters.len(),
            map_clusters: self.map_clusters.len(),
        });
    }
}
