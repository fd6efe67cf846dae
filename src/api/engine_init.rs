use chrono::{DateTime, Utc};
use tracing::debug;

use crate::core::{MapGeography, TimeDomain, TimeScale};
use crate::error::TimelineResult;
use crate::interaction::{InteractionState, RecomputeScheduler};
use crate::render::Renderer;

use super::{TimelineEngine, TimelineEngineConfig, fit_transform::reset_transform};

impl<R: Renderer> TimelineEngine<R> {
    /// Creates an engine whose default domain ends at the current wall clock.
    pub fn new(renderer: R, config: TimelineEngineConfig) -> TimelineResult<Self> {
        Self::new_at(renderer, config, Utc::now())
    }

    /// Creates an engine as if constructed at `now`.
    ///
    /// `now` bounds the default domain and decides which year's tick labels
    /// carry a time of day.
    pub fn new_at(
        renderer: R,
        config: TimelineEngineConfig,
        now: DateTime<Utc>,
    ) -> TimelineResult<Self> {
        let config = config.validate()?;
        let domain = match config.domain {
            Some(domain) => domain,
            None => TimeDomain::historical(now)?,
        };
        let width = config.viewport.width_px();
        let base_scale = TimeScale::new(domain, 0.0, width)?;
        let transform = reset_transform(domain, base_scale, width)?;

        debug!(
            width = config.viewport.width,
            map_width = config.map_viewport.width,
            domain_min = %domain.min(),
            domain_max = %domain.max(),
            "timeline engine initialized"
        );

        Ok(Self {
            renderer,
            config,
            domain,
            base_scale,
            transform,
            events: Vec::new(),
            geography: MapGeography::new(),
            interaction: InteractionState::default(),
            scheduler: RecomputeScheduler::new(config.debounce.quiescence()),
            timeline_clusters: Vec::new(),
            map_clusters: Vec::new(),
            pending_events: Vec::new(),
            created_at: now,
        })
    }
}
