use tracing::trace;

use crate::core::ScreenPoint;
use crate::extensions::{ClusterKey, cluster_key_at};
use crate::interaction::HoverChange;
use crate::render::Renderer;

use super::TimelineEngine;
use super::engine_events::EngineEvent;

impl<R: Renderer> TimelineEngine<R> {
    /// Tracks the pointer over the timeline and reports hover transitions.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<HoverChange> {
        self.interaction.on_pointer_move(x, y);
        let hovered = self.cluster_key_under(x, y);
        let change = self.interaction.set_hovered(hovered)?;
        self.emit_hover_change(change);
        Some(change)
    }

    pub fn pointer_leave(&mut self) -> Option<HoverChange> {
        let change = self.interaction.on_pointer_leave()?;
        self.emit_hover_change(change);
        Some(change)
    }

    /// Re-runs the hit test at the last pointer position against the current
    /// timeline clusters.
    pub(super) fn refresh_hover(&mut self) {
        let Some((x, y)) = self.interaction.cursor() else {
            return;
        };
        let hovered = self.cluster_key_under(x, y);
        if let Some(change) = self.interaction.set_hovered(hovered) {
            self.emit_hover_change(change);
        }
    }

    fn cluster_key_under(&self, x: f64, y: f64) -> Option<ClusterKey> {
        let baseline = f64::from(self.config.viewport.height) * self.config.hover.baseline_ratio;
        cluster_key_at(
            &self.timeline_clusters,
            ScreenPoint::new(x, y),
            baseline,
            self.config.hover.radius_px,
        )
    }

    fn emit_hover_change(&mut self, change: HoverChange) {
        trace!(previous = ?change.previous, current = ?change.current, "hover changed");
        self.pending_events.push(EngineEvent::HoverChanged(change));
    }
}
