use chrono::{DateTime, Utc};

use crate::core::{Event, MapGeography, TimeDomain, TimeScale, ViewTransform};
use crate::error::TimelineResult;
use crate::extensions::EventCluster;
use crate::interaction::{InteractionState, RecomputeScheduler};
use crate::render::{RenderFrame, Renderer};

use super::TimelineEngineConfig;
use super::engine_events::EngineEvent;
use super::time_axis::build_axis_ticks;

/// Main orchestration facade consumed by host applications.
///
/// `TimelineEngine` owns the viewport transform, the loaded events and the
/// latest cluster sets, and forwards fully built frames to its renderer.
pub struct TimelineEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: TimelineEngineConfig,
    pub(super) domain: TimeDomain,
    pub(super) base_scale: TimeScale,
    pub(super) transform: ViewTransform,
    pub(super) events: Vec<Event>,
    pub(super) geography: MapGeography,
    pub(super) interaction: InteractionState,
    pub(super) scheduler: RecomputeScheduler,
    pub(super) timeline_clusters: Vec<EventCluster>,
    pub(super) map_clusters: Vec<EventCluster>,
    pub(super) pending_events: Vec<EngineEvent>,
    pub(super) created_at: DateTime<Utc>,
}

impl<R: Renderer> TimelineEngine<R> {
    /// Builds the current frame from the latest transform and cluster sets.
    pub fn build_render_frame(&self) -> TimelineResult<RenderFrame> {
        let ticks = build_axis_ticks(
            self.effective_scale()?,
            self.viewport_width_px(),
            self.config.tick_count,
            self.created_at,
        )?;
        Ok(
            RenderFrame::new(self.config.viewport, self.config.map_viewport, self.transform)
                .with_timeline_clusters(self.timeline_clusters.clone())
                .with_map_clusters(self.map_clusters.clone())
                .with_ticks(ticks),
        )
    }

    pub fn render(&mut self) -> TimelineResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }

    /// Takes all queued notifications in emission order.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.pending_events)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
