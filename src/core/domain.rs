use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

use super::primitives::datetime_to_millis;

/// Permissible date range for panning and zooming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeDomain")]
pub struct TimeDomain {
    min: DateTime<Utc>,
    max: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawTimeDomain {
    min: DateTime<Utc>,
    max: DateTime<Utc>,
}

impl TryFrom<RawTimeDomain> for TimeDomain {
    type Error = TimelineError;

    fn try_from(raw: RawTimeDomain) -> TimelineResult<Self> {
        Self::new(raw.min, raw.max)
    }
}

impl TimeDomain {
    pub fn new(min: DateTime<Utc>, max: DateTime<Utc>) -> TimelineResult<Self> {
        if min >= max {
            return Err(TimelineError::InvalidData(format!(
                "time domain requires min < max, got [{min}, {max}]"
            )));
        }
        Ok(Self { min, max })
    }

    /// Domain spanning the first day of year 1 up to `now`.
    pub fn historical(now: DateTime<Utc>) -> TimelineResult<Self> {
        let first = Utc
            .with_ymd_and_hms(1, 1, 1, 0, 0, 0)
            .single()
            .ok_or_else(|| TimelineError::InvalidInstant("0001-01-01 is ambiguous".to_owned()))?;
        Self::new(first, now)
    }

    #[must_use]
    pub fn min(self) -> DateTime<Utc> {
        self.min
    }

    #[must_use]
    pub fn max(self) -> DateTime<Utc> {
        self.max
    }

    #[must_use]
    pub fn min_millis(self) -> f64 {
        datetime_to_millis(self.min)
    }

    #[must_use]
    pub fn max_millis(self) -> f64 {
        datetime_to_millis(self.max)
    }

    #[must_use]
    pub fn span_millis(self) -> f64 {
        self.max_millis() - self.min_millis()
    }

    #[must_use]
    pub fn contains(self, time: DateTime<Utc>) -> bool {
        time >= self.min && time <= self.max
    }
}
