use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{TimelineError, TimelineResult};

use super::domain::TimeDomain;
use super::time_scale::TimeScale;

/// Horizontal pan/zoom transform composed on top of a base [`TimeScale`].
///
/// The effective pixel of a date is `translate_x + scale_k * base(date)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub translate_x: f64,
    pub scale_k: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewTransform {
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            translate_x: 0.0,
            scale_k: 1.0,
        }
    }

    pub fn new(translate_x: f64, scale_k: f64) -> TimelineResult<Self> {
        Self {
            translate_x,
            scale_k,
        }
        .validate()
    }

    pub fn validate(self) -> TimelineResult<Self> {
        if !self.translate_x.is_finite() {
            return Err(TimelineError::InvalidData(
                "transform translate_x must be finite".to_owned(),
            ));
        }
        if !self.scale_k.is_finite() || self.scale_k <= 0.0 {
            return Err(TimelineError::InvalidData(
                "transform scale_k must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Applies the transform to a base-scale pixel.
    #[must_use]
    pub fn apply_x(self, base_px: f64) -> f64 {
        self.translate_x + self.scale_k * base_px
    }

    /// Maps a screen pixel back into base-scale pixels.
    #[must_use]
    pub fn invert_x(self, screen_px: f64) -> f64 {
        (screen_px - self.translate_x) / self.scale_k
    }

    #[must_use]
    pub fn with_translate_x(mut self, translate_x: f64) -> Self {
        self.translate_x = translate_x;
        self
    }

    /// Rescales to `scale_k` while keeping the base pixel under `anchor_px` fixed.
    pub fn scaled_about(self, scale_k: f64, anchor_px: f64) -> TimelineResult<Self> {
        if !anchor_px.is_finite() {
            return Err(TimelineError::InvalidData(
                "zoom anchor must be finite".to_owned(),
            ));
        }
        let anchor_base = self.invert_x(anchor_px);
        Self::new(anchor_px - anchor_base * scale_k, scale_k)
    }

    /// Returns the effective scale: same pixel range as `base`, with its domain
    /// pulled back through this transform.
    pub fn rescale(self, base: TimeScale) -> TimelineResult<TimeScale> {
        let transform = self.validate()?;
        let (range_start, range_end) = base.range();
        let domain_start = base.invert(transform.invert_x(range_start))?;
        let domain_end = base.invert(transform.invert_x(range_end))?;
        TimeScale::from_millis(domain_start, domain_end, range_start, range_end)
    }

    /// Date (epoch millis) shown at `screen_px` under this transform.
    pub fn date_millis_at(self, base: TimeScale, screen_px: f64) -> TimelineResult<f64> {
        base.invert(self.invert_x(screen_px))
    }

    /// Keeps the visible window `[0, pixel_width]` inside `domain`.
    ///
    /// The left edge is pinned to `domain.min` first, then the right edge to
    /// `domain.max`; when the window is wider than the domain the right edge
    /// wins. `scale_k` is never altered.
    pub fn constrain(
        self,
        domain: TimeDomain,
        base: TimeScale,
        pixel_width: f64,
    ) -> TimelineResult<Self> {
        let mut transform = self.validate()?;
        if !pixel_width.is_finite() || pixel_width <= 0.0 {
            return Err(TimelineError::DegenerateViewport {
                width: pixel_width.max(0.0) as u32,
                height: 0,
            });
        }

        let left_ms = transform.date_millis_at(base, 0.0)?;
        if left_ms < domain.min_millis() {
            let pinned = -transform.scale_k * base.scale(domain.min());
            trace!(from = transform.translate_x, to = pinned, "pin left edge to domain min");
            transform.translate_x = pinned;
        }

        let right_ms = transform.date_millis_at(base, pixel_width)?;
        if right_ms > domain.max_millis() {
            let pinned = pixel_width - transform.scale_k * base.scale(domain.max());
            trace!(from = transform.translate_x, to = pinned, "pin right edge to domain max");
            transform.translate_x = pinned;
        }

        transform.validate()
    }
}

/// Allowed zoom range for `scale_k`.
///
/// The transform math never enforces this itself; callers clamp before
/// constraining.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleExtent {
    pub min_k: f64,
    pub max_k: f64,
}

impl Default for ScaleExtent {
    fn default() -> Self {
        Self {
            min_k: 1.0,
            max_k: 1_000_000.0,
        }
    }
}

impl ScaleExtent {
    pub fn validate(self) -> TimelineResult<Self> {
        if !self.min_k.is_finite() || !self.max_k.is_finite() || self.min_k <= 0.0 {
            return Err(TimelineError::InvalidData(
                "scale extent bounds must be finite and > 0".to_owned(),
            ));
        }
        if self.min_k > self.max_k {
            return Err(TimelineError::InvalidData(
                "scale extent requires min_k <= max_k".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn clamp(self, scale_k: f64) -> f64 {
        scale_k.clamp(self.min_k, self.max_k)
    }
}
