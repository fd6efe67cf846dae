use std::borrow::Borrow;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::core::{Event, ViewTransform};
use crate::error::TimelineResult;
use crate::interaction::IntentClass;
use crate::render::Renderer;

use super::engine_events::EngineEvent;
use super::fit_transform::{fit_transform_unconstrained, go_to_date_transform, reset_transform};
use super::pan_intent_resolver::resolve_pixel_pan;
use super::zoom_intent_resolver::{WheelDeltaMode, resolve_wheel_zoom_factor, resolve_zoom_anchor};
use super::TimelineEngine;

impl<R: Renderer> TimelineEngine<R> {
    pub fn pan_start(&mut self) {
        self.interaction.on_pan_start();
    }

    pub fn pan_end(&mut self) {
        self.interaction.on_pan_end();
    }

    /// Drags the timeline by `delta_px`.
    ///
    /// The transform updates immediately; cluster recomputation is debounced.
    pub fn pan_by_pixels(&mut self, delta_px: f64, at: Instant) -> TimelineResult<()> {
        let Some(candidate) = resolve_pixel_pan(self.transform, delta_px)? else {
            return Ok(());
        };
        self.commit_continuous(candidate, IntentClass::Pan, at)
    }

    /// Wheel zoom anchored at `pointer_x`, in pixel delta mode.
    pub fn wheel_zoom(&mut self, delta_y: f64, pointer_x: f64, at: Instant) -> TimelineResult<()> {
        self.wheel_zoom_with_mode(delta_y, WheelDeltaMode::Pixel, pointer_x, at)
    }

    pub fn wheel_zoom_with_mode(
        &mut self,
        delta_y: f64,
        delta_mode: WheelDeltaMode,
        pointer_x: f64,
        at: Instant,
    ) -> TimelineResult<()> {
        let Some(factor) =
            resolve_wheel_zoom_factor(delta_y, delta_mode, self.config.wheel_zoom.sensitivity)?
        else {
            return Ok(());
        };
        let anchor = resolve_zoom_anchor(pointer_x, self.viewport_width_px())?;
        let scale_k = self
            .config
            .scale_extent
            .clamp(self.transform.scale_k * factor);
        let candidate = self.transform.scaled_about(scale_k, anchor)?;
        self.commit_continuous(candidate, IntentClass::WheelZoom, at)
    }

    /// Frames a window of ± the configured months around `date`.
    pub fn go_to_date(&mut self, date: DateTime<Utc>) -> TimelineResult<()> {
        let candidate = go_to_date_transform(
            date,
            self.base_scale,
            self.viewport_width_px(),
            self.config.fit,
        )?;
        debug!(%date, "go to date");
        self.commit_discrete(candidate)
    }

    /// Frames `targets` with padding.
    pub fn zoom_to_events<E: Borrow<Event>>(&mut self, targets: &[E]) -> TimelineResult<()> {
        let candidate = fit_transform_unconstrained(
            targets,
            self.base_scale,
            self.viewport_width_px(),
            self.config.fit,
        )?;
        debug!(targets = targets.len(), "zoom to events");
        self.commit_discrete(candidate)
    }

    pub fn reset_zoom(&mut self) -> TimelineResult<()> {
        let transform = reset_transform(self.domain, self.base_scale, self.viewport_width_px())?;
        debug!("reset zoom");
        self.commit_discrete(transform)
    }

    /// Runs a debounced recomputation when its quiet period has elapsed.
    ///
    /// Returns `true` when clusters were recomputed.
    pub fn poll_recompute(&mut self, now: Instant) -> TimelineResult<bool> {
        if !self.scheduler.take_due(now) {
            return Ok(false);
        }
        trace!("debounced recomputation fired");
        self.recompute_clusters()?;
        Ok(true)
    }

    /// Runs any pending recomputation right away.
    pub fn flush_pending_recompute(&mut self) -> TimelineResult<bool> {
        if !self.scheduler.cancel_all() {
            return Ok(false);
        }
        self.recompute_clusters()?;
        Ok(true)
    }

    fn commit_continuous(
        &mut self,
        candidate: ViewTransform,
        class: IntentClass,
        at: Instant,
    ) -> TimelineResult<()> {
        self.commit_transform(candidate)?;
        let pending = self.scheduler.schedule(class, at);
        trace!(class = ?pending.class, deadline = ?pending.scheduled_at, "recomputation deferred");
        Ok(())
    }

    /// Discrete intents supersede pending debounced work and recompute now.
    fn commit_discrete(&mut self, candidate: ViewTransform) -> TimelineResult<()> {
        let width = self.viewport_width_px();
        let scale_k = self.config.scale_extent.clamp(candidate.scale_k);
        let candidate = if scale_k == candidate.scale_k {
            candidate
        } else {
            candidate.scaled_about(scale_k, width / 2.0)?
        };
        self.commit_transform(candidate)?;
        self.scheduler.cancel_all();
        self.recompute_clusters()
    }

    fn commit_transform(&mut self, candidate: ViewTransform) -> TimelineResult<()> {
        let transform =
            candidate.constrain(self.domain, self.base_scale, self.viewport_width_px())?;
        if transform == self.transform {
            return Ok(());
        }
        self.transform = transform;
        let (visible_start, visible_end) = self.visible_range()?;
        trace!(
            translate_x = transform.translate_x,
            scale_k = transform.scale_k,
            "transform committed"
        );
        self.pending_events.push(EngineEvent::TransformChanged {
            transform,
            visible_start,
            visible_end,
        });
        Ok(())
    }
}
