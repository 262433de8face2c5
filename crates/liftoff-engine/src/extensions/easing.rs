// extensions/easing.rs
//
// Pure easing functions for altitude-driven interpolation.
// No dependencies on Entity/Scene, just math.

use std::f32::consts::PI;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Smallest span any normalisation divides by.
pub const SPAN_EPSILON: f32 = 1e-6;

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Slow start.
    QuadIn,
    /// Slow end.
    QuadOut,
    /// Slow start and end.
    QuadInOut,
    /// Quarter-cosine slow start: `1 - cos(t·π/2)`.
    SineIn,
    SineOut,
    SineInOut,
}

impl Easing {
    /// Apply the easing function to a normalized time value `t`.
    /// `t` is clamped to [0, 1] first; every curve maps 0 → 0 and 1 → 1.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,

            // Quadratic
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }

            // Sine
            Easing::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Easing::SineOut => (t * PI / 2.0).sin(),
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two Vec3 values.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

/// Where `value` sits inside `[start, end]`, clamped to [0, 1].
/// A degenerate span divides by `SPAN_EPSILON` instead of zero.
#[inline]
pub fn progress(value: f32, start: f32, end: f32) -> f32 {
    let span = (end - start).max(SPAN_EPSILON);
    ((value - start) / span).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_endpoints() {
        assert_eq!(Easing::Linear.apply(0.0), 0.0);
        assert_eq!(Easing::Linear.apply(1.0), 1.0);
        assert_eq!(Easing::Linear.apply(0.5), 0.5);
    }

    #[test]
    fn quad_out_faster_start() {
        // QuadOut should be > 0.5 at t=0.5 (faster start, slower end)
        let mid = Easing::QuadOut.apply(0.5);
        assert!(mid > 0.5, "QuadOut at 0.5 should be > 0.5, got {}", mid);
    }

    #[test]
    fn sine_in_is_quarter_cosine() {
        assert_eq!(Easing::SineIn.apply(0.0), 0.0);
        assert!((Easing::SineIn.apply(1.0) - 1.0).abs() < 1e-6);
        let expected = 1.0 - (0.5f32 * PI / 2.0).cos();
        assert!((Easing::SineIn.apply(0.5) - expected).abs() < 1e-6);
        assert!(Easing::SineIn.apply(0.5) < 0.5);
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::QuadIn.apply(-3.0), 0.0);
        assert_eq!(Easing::QuadIn.apply(7.0), 1.0);
    }

    #[test]
    fn ease_interpolates() {
        let result = ease(100.0, 200.0, 0.5, Easing::Linear);
        assert!((result - 150.0).abs() < 0.001);
    }

    #[test]
    fn progress_clamps_and_guards_span() {
        assert_eq!(progress(100.0, 200.0, 330.0), 0.0);
        assert_eq!(progress(400.0, 200.0, 330.0), 1.0);
        assert!((progress(265.0, 200.0, 330.0) - 0.5).abs() < 1e-6);
        // zero-width span must not produce NaN
        assert_eq!(progress(5.0, 5.0, 5.0), 0.0);
        assert_eq!(progress(6.0, 5.0, 5.0), 1.0);
    }

    #[test]
    fn easing_parses_from_kebab_case() {
        let e: Easing = serde_json::from_str("\"sine-in\"").unwrap();
        assert_eq!(e, Easing::SineIn);
    }
}
