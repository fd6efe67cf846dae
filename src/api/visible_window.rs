use crate::core::{Event, TimeScale};
use crate::error::{TimelineError, TimelineResult};

/// Events whose date falls inside `[effective.invert(0), effective.invert(width)]`.
///
/// Input order is preserved; clustering is order-dependent.
pub fn visible_events<'a>(
    events: &'a [Event],
    effective: TimeScale,
    pixel_width: f64,
) -> TimelineResult<Vec<&'a Event>> {
    if !pixel_width.is_finite() || pixel_width <= 0.0 {
        return Err(TimelineError::DegenerateViewport {
            width: pixel_width.max(0.0) as u32,
            height: 0,
        });
    }
    let start_ms = effective.invert(0.0)?;
    let end_ms = effective.invert(pixel_width)?;
    let (start_ms, end_ms) = (start_ms.min(end_ms), start_ms.max(end_ms));

    Ok(events
        .iter()
        .filter(|event| {
            let millis = event.millis();
            millis >= start_ms && millis <= end_ms
        })
        .collect())
}
