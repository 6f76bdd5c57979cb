// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing curves over normalized time.

/// A timing curve mapping normalized time `t ∈ [0, 1]` to progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    /// Constant velocity.
    Linear,
    /// Cubic ease-in for the first half, ease-out for the second.
    #[default]
    InOutCubic,
}

impl Easing {
    /// Evaluates the curve at `t`, clamping `t` to `[0, 1]` first.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::InOutCubic => ease_in_out_cubic(t),
        }
    }
}

/// `4t³` below the midpoint, `1 - (-2t + 2)³ / 2` above it.
#[must_use]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
    }

    #[test]
    fn cubic_is_continuous_at_midpoint() {
        let below = ease_in_out_cubic(0.5 - 1e-9);
        let above = ease_in_out_cubic(0.5);
        assert!((below - above).abs() < 1e-6, "{below} vs {above}");
    }

    #[test]
    fn cubic_is_monotonic() {
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = ease_in_out_cubic(f64::from(i) / 100.0);
            assert!(v >= prev, "not monotonic at step {i}");
            prev = v;
        }
    }

    #[test]
    fn apply_clamps_input() {
        assert_eq!(Easing::InOutCubic.apply(-1.0), 0.0);
        assert_eq!(Easing::InOutCubic.apply(2.0), 1.0);
        assert_eq!(Easing::Linear.apply(0.25), 0.25);
        assert_eq!(Easing::Linear.apply(f64::NAN), 0.0);
    }
}
