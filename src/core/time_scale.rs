use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TimelineResult;

use super::domain::TimeDomain;
use super::primitives::{datetime_to_millis, ensure_finite_millis, millis_to_datetime};
use super::scale::LinearScale;

/// Invertible mapping between instants and horizontal pixels.
///
/// The numeric domain is epoch milliseconds. Dates outside the domain are still
/// mapped by linear extrapolation so transforms can represent over-pan before
/// they are constrained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    linear: LinearScale,
}

impl TimeScale {
    /// Builds a scale mapping `domain` onto `[range_start, range_end]`.
    pub fn new(domain: TimeDomain, range_start: f64, range_end: f64) -> TimelineResult<Self> {
        Self::from_millis(
            domain.min_millis(),
            domain.max_millis(),
            range_start,
            range_end,
        )
    }

    pub fn from_millis(
        domain_start_ms: f64,
        domain_end_ms: f64,
        range_start: f64,
        range_end: f64,
    ) -> TimelineResult<Self> {
        ensure_finite_millis(domain_start_ms, "scale domain start")?;
        ensure_finite_millis(domain_end_ms, "scale domain end")?;
        let linear = LinearScale::new(domain_start_ms, domain_end_ms, range_start, range_end)?;
        Ok(Self { linear })
    }

    /// Domain bounds in epoch milliseconds.
    #[must_use]
    pub fn domain_millis(self) -> (f64, f64) {
        self.linear.domain()
    }

    pub fn domain_dates(self) -> TimelineResult<(DateTime<Utc>, DateTime<Utc>)> {
        let (start, end) = self.linear.domain();
        Ok((millis_to_datetime(start)?, millis_to_datetime(end)?))
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    #[must_use]
    pub fn pixels_per_milli(self) -> f64 {
        self.linear.slope()
    }

    #[must_use]
    pub fn scale(self, time: DateTime<Utc>) -> f64 {
        self.linear
            .domain_to_pixel_unchecked(datetime_to_millis(time))
    }

    /// Maps raw epoch milliseconds; fails only for non-finite input.
    pub fn scale_millis(self, millis: f64) -> TimelineResult<f64> {
        self.linear.domain_to_pixel(millis)
    }

    /// Inverse of [`TimeScale::scale_millis`].
    pub fn invert(self, pixel: f64) -> TimelineResult<f64> {
        self.linear.pixel_to_domain(pixel)
    }

    pub fn invert_date(self, pixel: f64) -> TimelineResult<DateTime<Utc>> {
        millis_to_datetime(self.invert(pixel)?)
    }
}
