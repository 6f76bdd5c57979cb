// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-page anchor navigation.
//!
//! A nav link is intercepted only when its `href` is an in-page fragment
//! that resolves to an element; everything else falls through to the
//! browser's own navigation.

use crate::config::NavigationConfig;
use crate::smooth_scroll::ScrollAnimation;
use crate::time::HostTime;

/// Returns the fragment selector for an in-page anchor, or `None` if the
/// link should navigate natively.
///
/// Only `#name` values qualify; an absent, empty or bare `#` href does not.
#[must_use]
pub fn fragment_target(href: Option<&str>) -> Option<&str> {
    let href = href?;
    (href.len() > 1 && href.starts_with('#')).then_some(href)
}

/// Distance from the top of the viewport to keep clear of the fixed navbar.
#[must_use]
pub fn navbar_clearance(navbar_height: Option<f64>, config: &NavigationConfig) -> f64 {
    navbar_height.unwrap_or(0.0).max(0.0) + f64::from(config.anchor_gap)
}

/// Document offset to scroll to so that an element whose bounding box top is
/// `element_top` (viewport coordinates, at scroll offset `scroll_y`) sits just
/// below the navbar. Never negative.
#[must_use]
pub fn anchor_scroll_target(element_top: f64, scroll_y: f64, clearance: f64) -> f64 {
    (element_top + scroll_y - clearance).max(0.0)
}

/// Builds the animation for an intercepted anchor click.
#[must_use]
pub fn anchor_animation(
    scroll_y: f64,
    element_top: f64,
    navbar_height: Option<f64>,
    now: HostTime,
    config: &NavigationConfig,
) -> ScrollAnimation {
    let target = anchor_scroll_target(
        element_top,
        scroll_y,
        navbar_clearance(navbar_height, config),
    );
    ScrollAnimation::new(scroll_y, target, now, config.anchor_duration)
}

/// Builds the animation for the back-to-top control.
#[must_use]
pub fn back_to_top_animation(scroll_y: f64, now: HostTime, config: &NavigationConfig) -> ScrollAnimation {
    ScrollAnimation::new(scroll_y, 0.0, now, config.back_to_top_duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Duration;

    #[test]
    fn fragment_filtering() {
        assert_eq!(fragment_target(Some("#about")), Some("#about"));
        assert_eq!(fragment_target(Some("#")), None);
        assert_eq!(fragment_target(Some("")), None);
        assert_eq!(fragment_target(None), None);
        assert_eq!(fragment_target(Some("/blog#top")), None);
    }

    #[test]
    fn target_clears_navbar_and_gap() {
        let config = NavigationConfig::portfolio();
        let clearance = navbar_clearance(Some(64.0), &config);
        assert_eq!(clearance, 76.0);
        // Element 300px below the viewport top while scrolled to 1000.
        assert_eq!(anchor_scroll_target(300.0, 1000.0, clearance), 1224.0);
    }

    #[test]
    fn target_is_clamped_at_top() {
        let clearance = navbar_clearance(None, &NavigationConfig::portfolio());
        assert_eq!(clearance, 12.0);
        assert_eq!(anchor_scroll_target(5.0, 0.0, clearance), 0.0);
    }

    #[test]
    fn anchor_animation_uses_configured_duration() {
        let config = NavigationConfig::portfolio();
        let anim = anchor_animation(200.0, 500.0, Some(60.0), HostTime(0), &config);
        assert_eq!(anim.from, 200.0);
        assert_eq!(anim.to, 628.0);
        assert_eq!(anim.duration, Duration::from_millis(650));

        let up = back_to_top_animation(900.0, HostTime(0), &config);
        assert_eq!(up.to, 0.0);
        assert_eq!(up.duration, Duration::from_millis(600));
    }
}
