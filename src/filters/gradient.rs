//! Linear gradient math for gradient fills.
//!
//! A gradient is an ordered list of colours spaced evenly along one of
//! three axes of a bounding box. Sampling is piecewise-linear across the
//! `N - 1` segments, with `t` clamped to 0.0-1.0 before lookup.

use serde::Deserialize;

use crate::color::Rgba;
use crate::error::InternalError;

/// Axis a linear gradient runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientDirection {
    /// Left to right.
    #[default]
    Horizontal,
    /// Top to bottom.
    Vertical,
    /// Top-left to bottom-right.
    Diagonal,
}

/// Normalized position of pixel `(x, y)` inside a `width` x `height` box.
///
/// - horizontal: `x / width`
/// - vertical: `y / height`
/// - diagonal: `(x + y) / (width + height)`
#[inline]
pub fn gradient_t(x: usize, y: usize, width: usize, height: usize, direction: GradientDirection) -> f32 {
    let t = match direction {
        GradientDirection::Horizontal => x as f32 / width.max(1) as f32,
        GradientDirection::Vertical => y as f32 / height.max(1) as f32,
        GradientDirection::Diagonal => (x + y) as f32 / (width + height).max(1) as f32,
    };
    t.clamp(0.0, 1.0)
}

/// Evenly spaced colour stops.
#[derive(Debug, Clone)]
pub struct GradientRamp<'a> {
    stops: &'a [Rgba],
}

impl<'a> GradientRamp<'a> {
    /// Wrap a stop list. Fewer than two stops is a pipeline defect, since
    /// validation rejects such gradients before they reach rendering.
    pub fn new(stops: &'a [Rgba]) -> Result<Self, InternalError> {
        if stops.len() < 2 {
            return Err(InternalError::EmptyGradient(stops.len()));
        }
        Ok(Self { stops })
    }

    /// Colour at `t`. `t <= 0` returns the first stop and `t >= 1` the last,
    /// exactly.
    pub fn sample(&self, t: f32) -> Rgba {
        let last = self.stops.len() - 1;
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if t >= 1.0 {
            return self.stops[last];
        }

        let scaled = t * last as f32;
        let index = (scaled.floor() as usize).min(last - 1);
        let local = (scaled - index as f32).clamp(0.0, 1.0);
        self.stops[index].lerp(self.stops[index + 1], local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stops() -> Vec<Rgba> {
        vec![
            Rgba::from_rgb8(255, 0, 0),
            Rgba::from_rgb8(0, 255, 0),
            Rgba::from_rgb8(0, 0, 255),
        ]
    }

    #[test]
    fn test_endpoints_return_first_and_last_stop() {
        let s = stops();
        let ramp = GradientRamp::new(&s).unwrap();
        assert_eq!(ramp.sample(0.0), s[0]);
        assert_eq!(ramp.sample(1.0), s[2]);
        // Out of range clamps
        assert_eq!(ramp.sample(-3.0), s[0]);
        assert_eq!(ramp.sample(7.0), s[2]);
    }

    #[test]
    fn test_middle_stop_hit_at_half() {
        let s = stops();
        let ramp = GradientRamp::new(&s).unwrap();
        let mid = ramp.sample(0.5);
        assert!((mid.g - 1.0).abs() < 1e-6);
        assert!(mid.r.abs() < 1e-6);
    }

    #[test]
    fn test_sampling_is_continuous_across_segments() {
        let s = stops();
        let ramp = GradientRamp::new(&s).unwrap();
        let before = ramp.sample(0.5 - 1e-4);
        let after = ramp.sample(0.5 + 1e-4);
        assert!((before.g - after.g).abs() < 1e-3);
        assert!((before.r - after.r).abs() < 1e-3);
        assert!((before.b - after.b).abs() < 1e-3);
    }

    #[test]
    fn test_single_stop_is_rejected() {
        let s = vec![Rgba::BLACK];
        assert_eq!(GradientRamp::new(&s).unwrap_err(), InternalError::EmptyGradient(1));
    }

    #[test]
    fn test_gradient_t_axes() {
        assert_eq!(gradient_t(0, 9, 10, 10, GradientDirection::Horizontal), 0.0);
        assert_eq!(gradient_t(5, 0, 10, 10, GradientDirection::Horizontal), 0.5);
        assert_eq!(gradient_t(3, 5, 10, 10, GradientDirection::Vertical), 0.5);
        assert_eq!(gradient_t(5, 5, 10, 10, GradientDirection::Diagonal), 0.5);
        assert_eq!(gradient_t(50, 0, 10, 10, GradientDirection::Horizontal), 1.0);
    }
}
