use crate::core::ViewTransform;
use crate::error::{TimelineError, TimelineResult};

/// Shifts the transform by a screen-space drag delta.
///
/// Positive deltas drag content to the right, revealing earlier dates.
pub(super) fn resolve_pixel_pan(
    transform: ViewTransform,
    delta_px: f64,
) -> TimelineResult<Option<ViewTransform>> {
    if !delta_px.is_finite() {
        return Err(TimelineError::InvalidData(
            "pan delta must be finite".to_owned(),
        ));
    }
    if delta_px == 0.0 {
        return Ok(None);
    }
    let translate_x = transform.translate_x + delta_px;
    if !translate_x.is_finite() {
        return Err(TimelineError::InvalidData(
            "computed pan translation must be finite".to_owned(),
        ));
    }
    Ok(Some(transform.with_translate_x(translate_x)))
}

#[cfg(test)]
mod tests {
    use super::resolve_pixel_pan;
    use crate::core::ViewTransform;

    #[test]
    fn pan_adds_delta_to_translation() {
        let transform = ViewTransform::new(-40.0, 4.0).expect("transform");
        let panned = resolve_pixel_pan(transform, 25.0)
            .expect("pan")
            .expect("some");
        assert_eq!(panned.translate_x, -15.0);
        assert_eq!(panned.scale_k, 4.0);
    }

    #[test]
    fn zero_delta_is_a_no_op() {
        let transform = ViewTransform::identity();
        assert!(resolve_pixel_pan(transform, 0.0).expect("pan").is_none());
    }

    #[test]
    fn non_finite_delta_fails() {
        let err = resolve_pixel_pan(ViewTransform::identity(), f64::INFINITY)
            .expect_err("inf must fail");
        assert!(format!("{err}").contains("pan delta"));
    }
}
