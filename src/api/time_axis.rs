use chrono::{DateTime, Datelike, TimeZone, Utc};

use crate::core::TimeScale;
use crate::core::primitives::{
    MILLIS_PER_DAY, MILLIS_PER_SECOND, datetime_to_millis, millis_to_datetime,
};
use crate::error::{TimelineError, TimelineResult};
use crate::render::AxisTick;

const MINUTE_MS: f64 = 60.0 * MILLIS_PER_SECOND;
const HOUR_MS: f64 = 60.0 * MINUTE_MS;
const MONTH_MS: f64 = 30.0 * MILLIS_PER_DAY;
const YEAR_MS: f64 = 365.0 * MILLIS_PER_DAY;

#[derive(Debug, Clone, Copy, PartialEq)]
enum TickInterval {
    Fixed(f64),
    Months(u32),
    Years(i32),
}

impl TickInterval {
    fn approx_millis(self) -> f64 {
        match self {
            Self::Fixed(step) => step,
            Self::Months(months) => f64::from(months) * MONTH_MS,
            Self::Years(years) => f64::from(years) * YEAR_MS,
        }
    }
}

const INTERVALS: [TickInterval; 31] = [
    TickInterval::Fixed(MILLIS_PER_SECOND),
    TickInterval::Fixed(5.0 * MILLIS_PER_SECOND),
    TickInterval::Fixed(15.0 * MILLIS_PER_SECOND),
    TickInterval::Fixed(30.0 * MILLIS_PER_SECOND),
    TickInterval::Fixed(MINUTE_MS),
    TickInterval::Fixed(5.0 * MINUTE_MS),
    TickInterval::Fixed(15.0 * MINUTE_MS),
    TickInterval::Fixed(30.0 * MINUTE_MS),
    TickInterval::Fixed(HOUR_MS),
    TickInterval::Fixed(3.0 * HOUR_MS),
    TickInterval::Fixed(6.0 * HOUR_MS),
    TickInterval::Fixed(12.0 * HOUR_MS),
    TickInterval::Fixed(MILLIS_PER_DAY),
    TickInterval::Fixed(2.0 * MILLIS_PER_DAY),
    TickInterval::Fixed(7.0 * MILLIS_PER_DAY),
    TickInterval::Months(1),
    TickInterval::Months(3),
    TickInterval::Months(6),
    TickInterval::Years(1),
    TickInterval::Years(2),
    TickInterval::Years(5),
    TickInterval::Years(10),
    TickInterval::Years(25),
    TickInterval::Years(50),
    TickInterval::Years(100),
    TickInterval::Years(250),
    TickInterval::Years(500),
    TickInterval::Years(1_000),
    TickInterval::Years(2_500),
    TickInterval::Years(5_000),
    TickInterval::Years(10_000),
];

/// Formats a tick date for the axis readout.
///
/// Year 0 renders as `0000-MM-DD`, dates in the current year of `now` include
/// the time of day, everything else is `YYYY-MM-DD`.
#[must_use]
pub fn format_tick_label(time: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if time.year() == 0 {
        format!("0000-{}", time.format("%m-%d"))
    } else if time.year() == now.year() {
        time.format("%Y-%m-%d %H:%M").to_string()
    } else {
        time.format("%Y-%m-%d").to_string()
    }
}

/// Calendar-aligned tick instants inside the visible window of `effective`.
pub fn time_ticks(
    effective: TimeScale,
    pixel_width: f64,
    target_count: usize,
) -> TimelineResult<Vec<DateTime<Utc>>> {
    if target_count == 0 {
        return Err(TimelineError::InvalidData(
            "tick target count must be > 0".to_owned(),
        ));
    }
    if !pixel_width.is_finite() || pixel_width <= 0.0 {
        return Err(TimelineError::DegenerateViewport {
            width: pixel_width.max(0.0) as u32,
            height: 0,
        });
    }

    let start_ms = effective.invert(0.0)?;
    let end_ms = effective.invert(pixel_width)?;
    let (start_ms, end_ms) = (start_ms.min(end_ms), start_ms.max(end_ms));
    let span = end_ms - start_ms;

    let interval = INTERVALS
        .iter()
        .copied()
        .find(|interval| span / interval.approx_millis() <= target_count as f64)
        .unwrap_or(TickInterval::Years(10_000));

    let start = clamp_to_representable(start_ms)?;
    let end = clamp_to_representable(end_ms)?;
    let limit = target_count.saturating_mul(4).saturating_add(2);

    let ticks = match interval {
        TickInterval::Fixed(step) => fixed_ticks(start, end, step, limit)?,
        TickInterval::Months(months) => month_ticks(start, end, months, limit),
        TickInterval::Years(years) => year_ticks(start, end, years, limit),
    };
    Ok(ticks)
}

/// Ticks with pixel positions and formatted labels.
pub fn build_axis_ticks(
    effective: TimeScale,
    pixel_width: f64,
    target_count: usize,
    now: DateTime<Utc>,
) -> TimelineResult<Vec<AxisTick>> {
    Ok(time_ticks(effective, pixel_width, target_count)?
        .into_iter()
        .map(|time| AxisTick {
            time,
            x: effective.scale(time),
            label: format_tick_label(time, now),
        })
        .collect())
}

fn clamp_to_representable(millis: f64) -> TimelineResult<DateTime<Utc>> {
    let min = datetime_to_millis(DateTime::<Utc>::MIN_UTC);
    let max = datetime_to_millis(DateTime::<Utc>::MAX_UTC);
    millis_to_datetime(millis.clamp(min, max))
}

fn fixed_ticks(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    step: f64,
    limit: usize,
) -> TimelineResult<Vec<DateTime<Utc>>> {
    let start_ms = datetime_to_millis(start);
    let end_ms = datetime_to_millis(end);
    let mut ticks = Vec::new();
    let mut cursor = (start_ms / step).ceil() * step;
    while cursor <= end_ms && ticks.len() < limit {
        ticks.push(millis_to_datetime(cursor)?);
        cursor += step;
    }
    Ok(ticks)
}

fn month_ticks(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    months: u32,
    limit: usize,
) -> Vec<DateTime<Utc>> {
    let mut year = start.year();
    let mut month0 = start.month0();
    // Align to a month index divisible by the step.
    month0 -= month0 % months;

    let mut ticks = Vec::new();
    while ticks.len() < limit {
        let Some(tick) = Utc
            .with_ymd_and_hms(year, month0 + 1, 1, 0, 0, 0)
            .single()
        else {
            break;
        };
        if tick > end {
            break;
        }
        if tick >= start {
            ticks.push(tick);
        }
        month0 += months;
        if month0 >= 12 {
            year += (month0 / 12) as i32;
            month0 %= 12;
        }
    }
    ticks
}

fn year_ticks(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    years: i32,
    limit: usize,
) -> Vec<DateTime<Utc>> {
    let mut year = start.year().div_euclid(years) * years;
    let mut ticks = Vec::new();
    while ticks.len() < limit {
        let Some(tick) = Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single() else {
            break;
        };
        if tick > end {
            break;
        }
        if tick >= start {
            ticks.push(tick);
        }
        year = match year.checked_add(years) {
            Some(next) => next,
            None => break,
        };
    }
    ticks
}
