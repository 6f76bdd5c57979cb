// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-derived page state.
//!
//! [`ScrollAnimator`] turns the live scroll position (plus a little layout
//! geometry) into the visual state of the navbar, the nav links, the
//! back-to-top control, the body offset and the parallax layers. Each
//! sub-behaviour is independent: hosts throttle them separately and call
//! only the update they need.
//!
//! The animator remembers what it last reported and emits a
//! [`ScrollChanges`] holding only what differs, so presenters touch the DOM
//! only when something actually changed. Parallax offsets are always
//! emitted because they move with every pixel of scroll.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::config::{ParallaxConfig, ScrollConfig};

/// Returns the index of the section that should be highlighted.
///
/// `section_tops` holds each nav link's target offset from the document top,
/// in link order, or `None` for links whose target does not exist. The
/// result is the last resolvable link whose section starts at or above
/// `scroll_y + lookahead`; if none qualifies, the first resolvable link.
/// Returns `None` only when no link resolves.
#[must_use]
pub fn active_section(section_tops: &[Option<f64>], scroll_y: f64, lookahead: f64) -> Option<usize> {
    let from_top = scroll_y + lookahead;
    let mut current = None;
    for (index, top) in section_tops.iter().enumerate() {
        let Some(top) = *top else {
            continue;
        };
        // The first resolvable section is the fallback.
        if current.is_none() || top <= from_top {
            current = Some(index);
        }
    }
    current
}

/// Parses a `data-parallax` attribute the way `parseFloat` does.
///
/// Leading whitespace is skipped and the longest numeric prefix is used, so
/// `"0.5px"` reads as `0.5`. Absent, empty, unparsable and non-finite values
/// yield `default`.
#[must_use]
pub fn parse_parallax_factor(raw: Option<&str>, default: f64) -> f64 {
    let Some(raw) = raw.map(str::trim_start).filter(|s| !s.is_empty()) else {
        return default;
    };
    let numeric_len = raw
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        .last()
        .map_or(0, |(i, c)| i + c.len_utf8());
    (1..=numeric_len)
        .rev()
        .find_map(|end| raw[..end].parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

/// Vertical translation of a parallax layer.
#[must_use]
pub fn parallax_offset(scroll_y: f64, factor: f64) -> f64 {
    scroll_y * factor
}

/// CSS `transform` for a parallax layer at `offset` pixels.
#[must_use]
pub fn parallax_transform(offset: f64) -> String {
    format!("translate3d(0, {offset}px, 0)")
}

/// CSS length in pixels.
#[must_use]
pub fn px(value: f64) -> String {
    format!("{value}px")
}

/// A parallax-enabled element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxLayer {
    /// Fraction of the scroll distance the layer moves.
    pub factor: f64,
}

impl ParallaxLayer {
    /// Creates a layer from its raw attribute value.
    #[must_use]
    pub fn from_attribute(raw: Option<&str>, config: &ParallaxConfig) -> Self {
        Self {
            factor: parse_parallax_factor(raw, config.default_factor),
        }
    }
}

/// New translation for one parallax layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxOffset {
    /// Index into the page's parallax layers.
    pub layer: usize,
    /// Vertical translation in pixels.
    pub translate_y: f64,
}

impl ParallaxOffset {
    /// CSS `transform` value for this offset.
    #[must_use]
    pub fn css(&self) -> String {
        parallax_transform(self.translate_y)
    }
}

/// Incremental visual updates produced by [`ScrollAnimator`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollChanges {
    /// New navbar `scrolled` state.
    pub navbar_scrolled: Option<bool>,
    /// New active nav link, by link index.
    pub active_link: Option<usize>,
    /// New back-to-top visibility.
    pub back_to_top_visible: Option<bool>,
    /// New body top padding in pixels.
    pub body_offset: Option<f64>,
    /// Parallax translations.
    pub parallax: Vec<ParallaxOffset>,
}

impl ScrollChanges {
    /// Returns `true` if there is nothing to apply.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.navbar_scrolled.is_none()
            && self.active_link.is_none()
            && self.back_to_top_visible.is_none()
            && self.body_offset.is_none()
            && self.parallax.is_empty()
    }
}

/// Live layout inputs for a full update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollGeometry<'a> {
    /// Current vertical scroll offset.
    pub scroll_y: f64,
    /// Rendered navbar height, or `None` if the page has no navbar.
    pub navbar_height: Option<f64>,
    /// Document-top offsets of each nav link's target.
    pub section_tops: &'a [Option<f64>],
}

/// Scroll-driven state for the page's fixed set of elements.
#[derive(Clone, Debug)]
pub struct ScrollAnimator {
    config: ScrollConfig,
    layers: Vec<ParallaxLayer>,
    navbar_scrolled: Option<bool>,
    active_link: Option<usize>,
    back_to_top_visible: Option<bool>,
    body_offset: Option<f64>,
}

impl ScrollAnimator {
    /// Creates an animator for the given parallax layers.
    #[must_use]
    pub fn new(config: ScrollConfig, layers: Vec<ParallaxLayer>) -> Self {
        Self {
            config,
            layers,
            navbar_scrolled: None,
            active_link: None,
            back_to_top_visible: None,
            body_offset: None,
        }
    }

    /// Thresholds in use.
    #[must_use]
    pub const fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Parallax layers in page order.
    #[must_use]
    pub fn layers(&self) -> &[ParallaxLayer] {
        &self.layers
    }

    /// Currently highlighted link.
    #[must_use]
    pub const fn active_link(&self) -> Option<usize> {
        self.active_link
    }

    /// Runs every sub-behaviour at once, as on page setup.
    pub fn update(&mut self, geometry: &ScrollGeometry<'_>) -> ScrollChanges {
        let mut changes = ScrollChanges::default();
        self.update_body_offset(geometry.navbar_height, &mut changes);
        self.update_navigation(geometry.scroll_y, geometry.section_tops, &mut changes);
        self.update_back_to_top(geometry.scroll_y, &mut changes);
        self.update_parallax(geometry.scroll_y, &mut changes);
        changes
    }

    /// Navbar `scrolled` state and the active link.
    pub fn update_navigation(
        &mut self,
        scroll_y: f64,
        section_tops: &[Option<f64>],
        changes: &mut ScrollChanges,
    ) {
        let scrolled = scroll_y > self.config.scrolled_threshold;
        changes.navbar_scrolled = diff(&mut self.navbar_scrolled, scrolled);

        if let Some(active) = active_section(section_tops, scroll_y, self.config.active_lookahead)
        {
            changes.active_link = diff(&mut self.active_link, active);
        }
    }

    /// Back-to-top visibility.
    pub fn update_back_to_top(&mut self, scroll_y: f64, changes: &mut ScrollChanges) {
        let visible = scroll_y > self.config.back_to_top_threshold;
        changes.back_to_top_visible = diff(&mut self.back_to_top_visible, visible);
    }

    /// Body padding matching the navbar height; zero without a navbar.
    pub fn update_body_offset(&mut self, navbar_height: Option<f64>, changes: &mut ScrollChanges) {
        let offset = navbar_height.unwrap_or(0.0).max(0.0);
        changes.body_offset = diff(&mut self.body_offset, offset);
    }

    /// Parallax translations for every layer.
    pub fn update_parallax(&self, scroll_y: f64, changes: &mut ScrollChanges) {
        changes.parallax = self
            .layers
            .iter()
            .enumerate()
            .map(|(layer, l)| ParallaxOffset {
                layer,
                translate_y: parallax_offset(scroll_y, l.factor),
            })
            .collect();
    }
}

fn diff<T: Copy + PartialEq>(last: &mut Option<T>, next: T) -> Option<T> {
    if *last == Some(next) {
        None
    } else {
        *last = Some(next);
        Some(next)
    }
}
