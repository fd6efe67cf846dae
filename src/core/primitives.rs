use chrono::{DateTime, Months, Utc};

use crate::error::{TimelineError, TimelineResult};

pub const MILLIS_PER_SECOND: f64 = 1_000.0;
pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Converts an instant into epoch milliseconds on the scale's numeric axis.
#[must_use]
pub fn datetime_to_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

/// Converts epoch milliseconds back into an instant.
///
/// Sub-millisecond fractions are rounded to the nearest millisecond.
pub fn millis_to_datetime(millis: f64) -> TimelineResult<DateTime<Utc>> {
    if !millis.is_finite() {
        return Err(TimelineError::InvalidInstant(format!(
            "epoch millis must be finite, got {millis}"
        )));
    }
    let rounded = millis.round();
    if rounded > i64::MAX as f64 || rounded < i64::MIN as f64 {
        return Err(TimelineError::InvalidInstant(format!(
            "epoch millis {millis} is outside the representable range"
        )));
    }
    DateTime::<Utc>::from_timestamp_millis(rounded as i64).ok_or_else(|| {
        TimelineError::InvalidInstant(format!(
            "epoch millis {millis} is outside the representable date range"
        ))
    })
}

pub fn ensure_finite_millis(millis: f64, field_name: &str) -> TimelineResult<f64> {
    if millis.is_finite() {
        Ok(millis)
    } else {
        Err(TimelineError::InvalidInstant(format!(
            "{field_name} must be a finite instant"
        )))
    }
}

#[must_use]
pub fn days_to_millis(days: f64) -> f64 {
    days * MILLIS_PER_DAY
}

/// Shifts an instant by whole calendar months, saturating at the chrono range.
pub fn shift_months(time: DateTime<Utc>, months: i32) -> TimelineResult<DateTime<Utc>> {
    let magnitude = Months::new(months.unsigned_abs());
    let shifted = if months >= 0 {
        time.checked_add_months(magnitude)
    } else {
        time.checked_sub_months(magnitude)
    };
    shifted.ok_or_else(|| {
        TimelineError::InvalidInstant(format!(
            "shifting {time} by {months} months leaves the representable range"
        ))
    })
}
