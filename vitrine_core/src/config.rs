// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for every page controller.
//!
//! [`PageConfig::portfolio`] reproduces the stock portfolio page. Each field
//! is a plain `Copy` struct so hosts can override one concern without
//! touching the rest:
//!
//! ```rust
//! use vitrine_core::config::PageConfig;
//!
//! let mut config = PageConfig::portfolio();
//! config.tilt.max_degrees = 6.0;
//! assert_eq!(config.scroll.active_lookahead, 120.0);
//! ```

use crate::time::Duration;

/// Scroll-position thresholds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollConfig {
    /// The navbar gets its `scrolled` state strictly above this offset (px).
    pub scrolled_threshold: f64,
    /// The back-to-top control is visible strictly above this offset (px).
    pub back_to_top_threshold: f64,
    /// Distance below the viewport top at which a section counts as current
    /// for active-link highlighting (px).
    pub active_lookahead: f64,
}

impl ScrollConfig {
    /// Stock thresholds.
    #[must_use]
    pub const fn portfolio() -> Self {
        Self {
            scrolled_threshold: 12.0,
            back_to_top_threshold: 400.0,
            active_lookahead: 120.0,
        }
    }
}

/// Throttle intervals per concern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThrottleConfig {
    /// Navbar state and active link.
    pub navigation: Duration,
    /// Back-to-top visibility.
    pub back_to_top: Duration,
    /// Parallax transforms, roughly one animation frame.
    pub parallax: Duration,
    /// Body offset recomputation on resize.
    pub resize: Duration,
}

impl ThrottleConfig {
    /// Stock intervals.
    #[must_use]
    pub const fn portfolio() -> Self {
        Self {
            navigation: Duration::from_millis(100),
            back_to_top: Duration::from_millis(50),
            parallax: Duration::from_millis(16),
            resize: Duration::from_millis(150),
        }
    }
}

/// Parallax defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxConfig {
    /// Factor used when a layer's attribute is absent or malformed.
    pub default_factor: f64,
}

impl ParallaxConfig {
    /// Stock defaults.
    #[must_use]
    pub const fn portfolio() -> Self {
        Self {
            default_factor: 0.2,
        }
    }
}

/// Anchor and back-to-top scrolling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigationConfig {
    /// Extra space kept between the fixed navbar and a scrolled-to section
    /// (px).
    pub anchor_gap: u32,
    /// Length of an anchor scroll.
    pub anchor_duration: Duration,
    /// Length of the back-to-top scroll.
    pub back_to_top_duration: Duration,
}

impl NavigationConfig {
    /// Stock navigation.
    #[must_use]
    pub const fn portfolio() -> Self {
        Self {
            anchor_gap: 12,
            anchor_duration: Duration::from_millis(650),
            back_to_top_duration: Duration::from_millis(600),
        }
    }
}

/// Reveal-on-scroll intersection parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealOptions {
    /// How much of the viewport bottom is excluded from intersection, as a
    /// percentage of the viewport height.
    pub bottom_margin_percent: f64,
    /// Fraction of the element's area that must intersect.
    pub threshold: f64,
}

impl RevealOptions {
    /// Stock reveal parameters.
    #[must_use]
    pub const fn portfolio() -> Self {
        Self {
            bottom_margin_percent: 10.0,
            threshold: 0.15,
        }
    }
}

/// Tilt parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltConfig {
    /// Rotation at the element's edge, in degrees.
    pub max_degrees: f64,
}

impl TiltConfig {
    /// Stock tilt.
    #[must_use]
    pub const fn portfolio() -> Self {
        Self { max_degrees: 10.0 }
    }
}

/// Theme persistence policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThemeConfig {
    /// Also persist modes taken from the system preference.
    ///
    /// Persisting them turns the first visit's system mode into a sticky
    /// explicit preference, which stops live system changes from applying.
    pub persist_system_mode: bool,
}

impl ThemeConfig {
    /// Stock policy: only the toggle (and restored choices) persist.
    #[must_use]
    pub const fn portfolio() -> Self {
        Self {
            persist_system_mode: false,
        }
    }
}

/// Configuration for the whole page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageConfig {
    /// Scroll thresholds.
    pub scroll: ScrollConfig,
    /// Throttle intervals.
    pub throttle: ThrottleConfig,
    /// Parallax defaults.
    pub parallax: ParallaxConfig,
    /// Anchor scrolling.
    pub navigation: NavigationConfig,
    /// Reveal parameters.
    pub reveal: RevealOptions,
    /// Tilt parameters.
    pub tilt: TiltConfig,
    /// Theme persistence.
    pub theme: ThemeConfig,
}

impl PageConfig {
    /// The stock portfolio page.
    #[must_use]
    pub const fn portfolio() -> Self {
        Self {
            scroll: ScrollConfig::portfolio(),
            throttle: ThrottleConfig::portfolio(),
            parallax: ParallaxConfig::portfolio(),
            navigation: NavigationConfig::portfolio(),
            reveal: RevealOptions::portfolio(),
            tilt: TiltConfig::portfolio(),
            theme: ThemeConfig::portfolio(),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::portfolio()
    }
}
