use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

/// Unit of a wheel delta as reported by the host toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WheelDeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

impl WheelDeltaMode {
    fn unit_multiplier(self) -> f64 {
        match self {
            Self::Pixel => 1.0,
            Self::Line => 25.0,
            Self::Page => 500.0,
        }
    }
}

/// Converts a wheel delta into a multiplicative zoom factor.
///
/// `factor = 2^(-delta_y * sensitivity)`; negative deltas zoom in.
pub(super) fn resolve_wheel_zoom_factor(
    wheel_delta_y: f64,
    delta_mode: WheelDeltaMode,
    sensitivity: f64,
) -> TimelineResult<Option<f64>> {
    if !wheel_delta_y.is_finite() {
        return Err(TimelineError::InvalidData(
            "wheel delta must be finite".to_owned(),
        ));
    }
    if wheel_delta_y == 0.0 {
        return Ok(None);
    }

    let exponent = -wheel_delta_y * delta_mode.unit_multiplier() * sensitivity;
    let factor = 2f64.powf(exponent);
    if !factor.is_finite() || factor <= 0.0 {
        return Err(TimelineError::InvalidData(
            "computed wheel zoom factor must be finite and > 0".to_owned(),
        ));
    }
    Ok(Some(factor))
}

/// Validates a pointer anchor against the timeline width.
pub(super) fn resolve_zoom_anchor(pointer_x: f64, viewport_width_px: f64) -> TimelineResult<f64> {
    if !pointer_x.is_finite() {
        return Err(TimelineError::InvalidData(
            "zoom anchor must be finite".to_owned(),
        ));
    }
    Ok(pointer_x.clamp(0.0, viewport_width_px))
}

#[cfg(test)]
mod tests {
    use super::{WheelDeltaMode, resolve_wheel_zoom_factor, resolve_zoom_anchor};

    #[test]
    fn zero_wheel_delta_returns_none() {
        let factor = resolve_wheel_zoom_factor(0.0, WheelDeltaMode::Pixel, 0.002).expect("factor");
        assert!(factor.is_none());
    }

    #[test]
    fn negative_wheel_delta_zooms_in() {
        let factor = resolve_wheel_zoom_factor(-500.0, WheelDeltaMode::Pixel, 0.002)
            .expect("factor")
            .expect("some");
        assert!((factor - 2.0).abs() <= 1e-12);
    }

    #[test]
    fn line_mode_scales_delta() {
        let pixel = resolve_wheel_zoom_factor(100.0, WheelDeltaMode::Pixel, 0.002)
            .expect("factor")
            .expect("some");
        let line = resolve_wheel_zoom_factor(4.0, WheelDeltaMode::Line, 0.002)
            .expect("factor")
            .expect("some");
        assert!((pixel - line).abs() <= 1e-12);
    }

    #[test]
    fn anchor_is_clamped_into_viewport() {
        assert_eq!(resolve_zoom_anchor(-20.0, 800.0).expect("anchor"), 0.0);
        assert!(resolve_zoom_anchor(f64::NAN, 800.0).is_err());
    }
}
