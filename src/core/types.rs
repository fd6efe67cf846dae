use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

use super::primitives::datetime_to_millis;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn validate(self) -> TimelineResult<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(TimelineError::DegenerateViewport {
                width: self.width,
                height: self.height,
            })
        }
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        f64::from(self.width)
    }
}

/// A dated, geolocated entry on the timeline.
///
/// Events are immutable once loaded; the engine only ever reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub date: DateTime<Utc>,
    pub title: String,
    pub lat: f64,
    pub lng: f64,
}

impl Event {
    pub fn new(
        date: DateTime<Utc>,
        title: impl Into<String>,
        lat: f64,
        lng: f64,
    ) -> TimelineResult<Self> {
        let event = Self {
            date,
            title: title.into(),
            lat,
            lng,
        };
        event.validate()?;
        Ok(event)
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(TimelineError::InvalidData(format!(
                "event `{}` latitude must be within [-90, 90], got {}",
                self.title, self.lat
            )));
        }
        if !self.lng.is_finite() || !(-180.0..=180.0).contains(&self.lng) {
            return Err(TimelineError::InvalidData(format!(
                "event `{}` longitude must be within [-180, 180], got {}",
                self.title, self.lng
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn millis(&self) -> f64 {
        datetime_to_millis(self.date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
