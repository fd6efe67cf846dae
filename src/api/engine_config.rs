use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{ScaleExtent, TimeDomain, Viewport};
use crate::error::{TimelineError, TimelineResult};
use crate::extensions::{ClusterTuning, LabelLayoutTuning};

use super::FitTuning;

pub const DEFAULT_TICK_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelZoomTuning {
    /// Exponent applied per pixel of wheel delta.
    pub sensitivity: f64,
}

impl Default for WheelZoomTuning {
    fn default() -> Self {
        Self { sensitivity: 0.002 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebounceTuning {
    /// Quiet period after the last continuous intent before clusters recompute.
    pub quiescence_ms: u64,
}

impl Default for DebounceTuning {
    fn default() -> Self {
        Self { quiescence_ms: 50 }
    }
}

impl DebounceTuning {
    #[must_use]
    pub fn quiescence(self) -> Duration {
        Duration::from_millis(self.quiescence_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverTuning {
    pub radius_px: f64,
    /// Label baseline as a share of the timeline height.
    pub baseline_ratio: f64,
}

impl Default for HoverTuning {
    fn default() -> Self {
        Self {
            radius_px: 12.0,
            baseline_ratio: 0.5,
        }
    }
}

/// Public engine bootstrap configuration.
///
/// Serializable so host applications can persist and reload their setup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineEngineConfig {
    pub viewport: Viewport,
    pub map_viewport: Viewport,
    /// Pannable date range; `None` means year 1 up to construction time.
    #[serde(default)]
    pub domain: Option<TimeDomain>,
    #[serde(default)]
    pub cluster_tuning: ClusterTuning,
    #[serde(default)]
    pub label_layout: LabelLayoutTuning,
    #[serde(default)]
    pub scale_extent: ScaleExtent,
    #[serde(default)]
    pub fit: FitTuning,
    #[serde(default)]
    pub wheel_zoom: WheelZoomTuning,
    #[serde(default)]
    pub debounce: DebounceTuning,
    #[serde(default)]
    pub hover: HoverTuning,
    #[serde(default = "default_tick_count")]
    pub tick_count: usize,
}

impl TimelineEngineConfig {
    /// Creates a config with default tuning and the historical domain.
    #[must_use]
    pub fn new(viewport: Viewport, map_viewport: Viewport) -> Self {
        Self {
            viewport,
            map_viewport,
            domain: None,
            cluster_tuning: ClusterTuning::default(),
            label_layout: LabelLayoutTuning::default(),
            scale_extent: ScaleExtent::default(),
            fit: FitTuning::default(),
            wheel_zoom: WheelZoomTuning::default(),
            debounce: DebounceTuning::default(),
            hover: HoverTuning::default(),
            tick_count: DEFAULT_TICK_COUNT,
        }
    }

    #[must_use]
    pub fn with_domain(mut self, domain: TimeDomain) -> Self {
        self.domain = Some(domain);
        self
    }

    #[must_use]
    pub fn with_cluster_tuning(mut self, tuning: ClusterTuning) -> Self {
        self.cluster_tuning = tuning;
        self
    }

    #[must_use]
    pub fn with_label_layout(mut self, tuning: LabelLayoutTuning) -> Self {
        self.label_layout = tuning;
        self
    }

    #[must_use]
    pub fn with_scale_extent(mut self, extent: ScaleExtent) -> Self {
        self.scale_extent = extent;
        self
    }

    #[must_use]
    pub fn with_fit(mut self, tuning: FitTuning) -> Self {
        self.fit = tuning;
        self
    }

    #[must_use]
    pub fn with_debounce(mut self, tuning: DebounceTuning) -> Self {
        self.debounce = tuning;
        self
    }

    pub fn validate(self) -> TimelineResult<Self> {
        self.viewport.validate()?;
        self.map_viewport.validate()?;
        if let Some(domain) = self.domain {
            TimeDomain::new(domain.min(), domain.max())?;
        }
        self.cluster_tuning.validate()?;
        self.label_layout.validate()?;
        self.scale_extent.validate()?;
        self.fit.validate()?;
        if !self.wheel_zoom.sensitivity.is_finite() || self.wheel_zoom.sensitivity <= 0.0 {
            return Err(TimelineError::InvalidData(
                "wheel zoom sensitivity must be finite and > 0".to_owned(),
            ));
        }
        if !self.hover.radius_px.is_finite() || self.hover.radius_px <= 0.0 {
            return Err(TimelineError::InvalidData(
                "hover radius must be finite and > 0".to_owned(),
            ));
        }
        if !(0.0..=1.0).contains(&self.hover.baseline_ratio) {
            return Err(TimelineError::InvalidData(
                "hover baseline ratio must be within [0, 1]".to_owned(),
            ));
        }
        if self.tick_count == 0 {
            return Err(TimelineError::InvalidData(
                "tick count must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize engine config: {e}"))
        })
    }

    /// Parses and validates a JSON config.
    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            TimelineError::InvalidData(format!("failed to parse engine config json: {e}"))
        })?;
        config.validate()
    }
}

fn default_tick_count() -> usize {
    DEFAULT_TICK_COUNT
}
