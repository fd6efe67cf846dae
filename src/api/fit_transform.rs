use std::borrow::Borrow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_millis, days_to_millis, shift_months};
use crate::core::{Event, TimeDomain, TimeScale, ViewTransform};
use crate::error::{TimelineError, TimelineResult};

/// Padding policy for zoom-to-fit and go-to-date framing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitTuning {
    /// Share of the target span added on each side.
    pub padding_ratio: f64,
    /// Lower bound of the per-side padding, in days.
    pub min_padding_days: f64,
    /// Half-width of the window framed by go-to-date, in calendar months.
    pub go_to_date_half_window_months: u32,
}

impl Default for FitTuning {
    fn default() -> Self {
        Self {
            padding_ratio: 0.2,
            min_padding_days: 30.0,
            go_to_date_half_window_months: 6,
        }
    }
}

impl FitTuning {
    pub fn validate(self) -> TimelineResult<Self> {
        if !self.padding_ratio.is_finite() || self.padding_ratio < 0.0 {
            return Err(TimelineError::InvalidData(
                "fit padding ratio must be finite and >= 0".to_owned(),
            ));
        }
        if !self.min_padding_days.is_finite() || self.min_padding_days <= 0.0 {
            return Err(TimelineError::InvalidData(
                "fit min padding days must be finite and > 0".to_owned(),
            ));
        }
        if self.go_to_date_half_window_months == 0 || self.go_to_date_half_window_months > 12_000 {
            return Err(TimelineError::InvalidData(
                "go-to-date half window must be within 1..=12000 months".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Transform placing `center_ms` at the viewport center with
/// `[start_ms, end_ms]` spanning the full width.
pub fn frame_window(
    start_ms: f64,
    end_ms: f64,
    center_ms: f64,
    base: TimeScale,
    pixel_width: f64,
) -> TimelineResult<ViewTransform> {
    if !pixel_width.is_finite() || pixel_width <= 0.0 {
        return Err(TimelineError::DegenerateViewport {
            width: pixel_width.max(0.0) as u32,
            height: 0,
        });
    }
    let span_px = base.scale_millis(end_ms)? - base.scale_millis(start_ms)?;
    let scale_k = pixel_width / span_px;
    if !scale_k.is_finite() || scale_k <= 0.0 {
        return Err(TimelineError::InvalidData(format!(
            "framed window produced invalid scale {scale_k}"
        )));
    }
    let translate_x = pixel_width / 2.0 - base.scale_millis(center_ms)? * scale_k;
    ViewTransform::new(translate_x, scale_k)
}

/// Fit transform before domain constraints are applied.
///
/// The target range is padded by `max(padding_ratio * span, min_padding_days)`
/// on each side and its midpoint is mapped to the viewport center.
pub fn fit_transform_unconstrained<E: Borrow<Event>>(
    targets: &[E],
    base: TimeScale,
    pixel_width: f64,
    tuning: FitTuning,
) -> TimelineResult<ViewTransform> {
    let tuning = tuning.validate()?;
    let (min_date, max_date) = target_bounds(targets)?;
    let min_ms = datetime_to_millis(min_date);
    let max_ms = datetime_to_millis(max_date);

    let center_ms = (min_ms + max_ms) / 2.0;
    let padding =
        (tuning.padding_ratio * (max_ms - min_ms)).max(days_to_millis(tuning.min_padding_days));
    frame_window(min_ms - padding, max_ms + padding, center_ms, base, pixel_width)
}

/// Frames `targets` with padding, then constrains the result to `domain`.
pub fn fit_transform<E: Borrow<Event>>(
    targets: &[E],
    domain: TimeDomain,
    base: TimeScale,
    pixel_width: f64,
    tuning: FitTuning,
) -> TimelineResult<ViewTransform> {
    fit_transform_unconstrained(targets, base, pixel_width, tuning)?.constrain(
        domain,
        base,
        pixel_width,
    )
}

/// Unconstrained transform framing `date ± half_window_months`.
pub fn go_to_date_transform(
    date: DateTime<Utc>,
    base: TimeScale,
    pixel_width: f64,
    tuning: FitTuning,
) -> TimelineResult<ViewTransform> {
    let tuning = tuning.validate()?;
    let months = i32::try_from(tuning.go_to_date_half_window_months).map_err(|_| {
        TimelineError::InvalidData("go-to-date half window is too large".to_owned())
    })?;
    let start = shift_months(date, -months)?;
    let end = shift_months(date, months)?;
    frame_window(
        datetime_to_millis(start),
        datetime_to_millis(end),
        datetime_to_millis(date),
        base,
        pixel_width,
    )
}

/// Identity transform passed through the domain constraint.
pub fn reset_transform(
    domain: TimeDomain,
    base: TimeScale,
    pixel_width: f64,
) -> TimelineResult<ViewTransform> {
    ViewTransform::identity().constrain(domain, base, pixel_width)
}

fn target_bounds<E: Borrow<Event>>(
    targets: &[E],
) -> TimelineResult<(DateTime<Utc>, DateTime<Utc>)> {
    let mut dates = targets.iter().map(|event| Borrow::<Event>::borrow(event).date);
    let first = dates.next().ok_or(TimelineError::EmptyTargetSet)?;
    Ok(dates.fold((first, first), |(min, max), date| {
        (min.min(date), max.max(date))
    }))
}
