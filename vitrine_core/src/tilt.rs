// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-driven card tilt.
//!
//! The pointer's offset from the element's centre is normalised to `[-1, 1]`
//! on each axis and scaled to a rotation. Horizontal offset rotates about
//! the Y axis; vertical offset rotates about the X axis with the sign
//! flipped, so the card leans toward the pointer.

use alloc::format;
use alloc::string::String;

use kurbo::{Point, Rect};

use crate::config::TiltConfig;

/// CSS `transform` restoring a flat card.
pub const TILT_RESET: &str = "rotateX(0) rotateY(0)";

/// Rotation of one tilt target, in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tilt {
    /// Rotation about the horizontal axis.
    pub rotate_x: f64,
    /// Rotation about the vertical axis.
    pub rotate_y: f64,
}

impl Tilt {
    /// A flat card.
    pub const ZERO: Self = Self {
        rotate_x: 0.0,
        rotate_y: 0.0,
    };

    /// Computes the tilt for a pointer at `pointer` over an element whose
    /// current bounding box is `rect` (both in viewport coordinates).
    ///
    /// Degenerate boxes produce no tilt.
    #[must_use]
    pub fn from_pointer(rect: Rect, pointer: Point, config: &TiltConfig) -> Self {
        let half_w = rect.width() / 2.0;
        let half_h = rect.height() / 2.0;
        if !(half_w > 0.0 && half_h > 0.0) {
            return Self::ZERO;
        }
        let center = rect.center();
        let nx = ((pointer.x - center.x) / half_w).clamp(-1.0, 1.0);
        let ny = ((pointer.y - center.y) / half_h).clamp(-1.0, 1.0);
        // `+ 0.0` folds -0.0 into 0.0 so the CSS never reads "-0.00deg".
        Self {
            rotate_x: -config.max_degrees * ny + 0.0,
            rotate_y: config.max_degrees * nx + 0.0,
        }
    }

    /// CSS `transform` value, to two decimals.
    #[must_use]
    pub fn css(&self) -> String {
        format!(
            "rotateX({:.2}deg) rotateY({:.2}deg)",
            self.rotate_x, self.rotate_y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: Rect = Rect::new(100.0, 200.0, 300.0, 300.0);

    #[test]
    fn centre_is_flat() {
        let tilt = Tilt::from_pointer(CARD, Point::new(200.0, 250.0), &TiltConfig::portfolio());
        assert_eq!(tilt, Tilt::ZERO);
        assert_eq!(tilt.css(), "rotateX(0.00deg) rotateY(0.00deg)");
    }

    #[test]
    fn corners_reach_max_with_inverted_x() {
        let config = TiltConfig::portfolio();
        let top_left = Tilt::from_pointer(CARD, Point::new(100.0, 200.0), &config);
        assert_eq!(top_left.rotate_x, 10.0, "above centre lifts the top edge");
        assert_eq!(top_left.rotate_y, -10.0);

        let bottom_right = Tilt::from_pointer(CARD, Point::new(300.0, 300.0), &config);
        assert_eq!(bottom_right.rotate_x, -10.0);
        assert_eq!(bottom_right.rotate_y, 10.0);
    }

    #[test]
    fn partial_offset_scales_linearly() {
        let tilt = Tilt::from_pointer(CARD, Point::new(250.0, 275.0), &TiltConfig::portfolio());
        assert_eq!(tilt.rotate_y, 5.0);
        assert_eq!(tilt.rotate_x, -5.0);
        assert_eq!(tilt.css(), "rotateX(-5.00deg) rotateY(5.00deg)");
    }

    #[test]
    fn outside_pointer_is_clamped() {
        let tilt = Tilt::from_pointer(CARD, Point::new(900.0, -50.0), &TiltConfig::portfolio());
        assert_eq!(tilt.rotate_y, 10.0);
        assert_eq!(tilt.rotate_x, 10.0);
    }

    #[test]
    fn degenerate_rect_is_flat() {
        let flat = Rect::new(10.0, 10.0, 10.0, 50.0);
        assert_eq!(
            Tilt::from_pointer(flat, Point::new(10.0, 20.0), &TiltConfig::portfolio()),
            Tilt::ZERO
        );
    }
}
