// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot reveal-on-scroll.
//!
//! Every reveal candidate starts [`RevealState::Pending`] and moves to
//! [`RevealState::Revealed`] the first time it is reported as intersecting.
//! The transition is one-way: once revealed, an element is released from
//! observation and later reports about it are ignored.
//!
//! Hosts with an `IntersectionObserver` feed its entries through
//! [`RevealController::observe`]. Hosts without one can evaluate geometry
//! directly with [`RevealController::evaluate`], which applies the same root
//! margin and threshold.

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::config::RevealOptions;

/// Class added to an element when it is revealed.
pub const REVEAL_CLASS: &str = "reveal-visible";

/// Lifecycle of one reveal candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevealState {
    /// Not yet seen; still observed.
    Pending,
    /// Seen; no longer observed.
    Revealed,
}

/// One intersection report for a candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionSample {
    /// Index of the candidate.
    pub target: usize,
    /// Whether the candidate intersects the (margin-adjusted) root.
    pub is_intersecting: bool,
}

impl RevealOptions {
    /// `rootMargin` string for an `IntersectionObserver`.
    #[must_use]
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}% 0px", self.bottom_margin_percent)
    }

    /// The viewport rectangle shrunk by the bottom margin.
    #[must_use]
    pub fn effective_root(&self, viewport: Rect) -> Rect {
        let cut = viewport.height() * self.bottom_margin_percent / 100.0;
        Rect::new(viewport.x0, viewport.y0, viewport.x1, viewport.y1 - cut)
    }
}

/// Fraction of `element`'s area inside `root`, in `[0, 1]`.
///
/// Zero-area elements count as fully visible when their position lies inside
/// `root`, matching how browsers report empty targets.
#[must_use]
pub fn intersection_ratio(element: Rect, root: Rect) -> f64 {
    let area = element.area();
    if area <= 0.0 {
        let inside = element.x0 >= root.x0
            && element.x0 <= root.x1
            && element.y0 >= root.y0
            && element.y0 <= root.y1;
        return if inside { 1.0 } else { 0.0 };
    }
    let overlap = element.intersect(root);
    (overlap.area() / area).clamp(0.0, 1.0)
}

/// Reveal bookkeeping for the page's fixed set of candidates.
#[derive(Clone, Debug)]
pub struct RevealController {
    options: RevealOptions,
    states: Vec<RevealState>,
}

impl RevealController {
    /// Creates a controller with `count` pending candidates.
    #[must_use]
    pub fn new(options: RevealOptions, count: usize) -> Self {
        Self {
            options,
            states: vec![RevealState::Pending; count],
        }
    }

    /// Intersection parameters in use.
    #[must_use]
    pub const fn options(&self) -> &RevealOptions {
        &self.options
    }

    /// State of candidate `target`.
    #[must_use]
    pub fn state(&self, target: usize) -> Option<RevealState> {
        self.states.get(target).copied()
    }

    /// Number of candidates still pending.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.states
            .iter()
            .filter(|s| **s == RevealState::Pending)
            .count()
    }

    /// Indices of the candidates still pending.
    pub fn pending(&self) -> impl Iterator<Item = usize> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == RevealState::Pending)
            .map(|(i, _)| i)
    }

    /// Returns `true` once every candidate has been revealed.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.pending_count() == 0
    }

    /// Applies one batch of observer reports.
    ///
    /// Returns the candidates that transitioned to revealed; the host adds
    /// [`REVEAL_CLASS`] to each and stops observing it.
    pub fn observe(&mut self, samples: impl IntoIterator<Item = IntersectionSample>) -> Vec<usize> {
        let mut revealed = Vec::new();
        for sample in samples {
            if sample.is_intersecting && self.reveal(sample.target) {
                revealed.push(sample.target);
            }
        }
        revealed
    }

    /// Evaluates candidate geometry against the viewport without an
    /// observer.
    ///
    /// `rects` yields `(target, bounding box)` pairs in viewport
    /// coordinates. A pending candidate is revealed when at least the
    /// threshold fraction of it lies within the margin-adjusted viewport.
    pub fn evaluate(
        &mut self,
        viewport: Rect,
        rects: impl IntoIterator<Item = (usize, Rect)>,
    ) -> Vec<usize> {
        let root = self.options.effective_root(viewport);
        let threshold = self.options.threshold;
        let samples: Vec<_> = rects
            .into_iter()
            .filter(|(target, _)| self.state(*target) == Some(RevealState::Pending))
            .map(|(target, rect)| {
                let ratio = intersection_ratio(rect, root);
                IntersectionSample {
                    target,
                    is_intersecting: ratio > 0.0 && ratio >= threshold,
                }
            })
            .collect();
        self.observe(samples)
    }

    fn reveal(&mut self, target: usize) -> bool {
        match self.states.get_mut(target) {
            Some(state) if *state == RevealState::Pending => {
                *state = RevealState::Revealed;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1000.0, 800.0);

    fn card_at(top: f64) -> Rect {
        Rect::new(100.0, top, 500.0, top + 200.0)
    }

    #[test]
    fn root_margin_string() {
        assert_eq!(RevealOptions::portfolio().root_margin(), "0px 0px -10% 0px");
    }

    #[test]
    fn effective_root_trims_bottom() {
        let root = RevealOptions::portfolio().effective_root(VIEWPORT);
        assert_eq!(root, Rect::new(0.0, 0.0, 1000.0, 720.0));
    }

    #[test]
    fn ratio_of_partial_overlap() {
        let root = Rect::new(0.0, 0.0, 1000.0, 720.0);
        assert_eq!(intersection_ratio(card_at(690.0), root), 0.15);
        assert_eq!(intersection_ratio(card_at(100.0), root), 1.0);
        assert_eq!(intersection_ratio(card_at(900.0), root), 0.0);
    }

    #[test]
    fn observer_reports_reveal_once() {
        let mut controller = RevealController::new(RevealOptions::portfolio(), 2);
        let seen = |target| IntersectionSample {
            target,
            is_intersecting: true,
        };
        let gone = |target| IntersectionSample {
            target,
            is_intersecting: false,
        };

        assert_eq!(controller.observe([gone(0), gone(1)]), Vec::<usize>::new());
        assert_eq!(controller.observe([seen(0)]), [0]);
        assert_eq!(controller.observe([gone(0)]), Vec::<usize>::new());
        assert_eq!(
            controller.observe([seen(0), seen(1)]),
            [1],
            "0 is already revealed"
        );
        assert!(controller.is_done());
    }

    #[test]
    fn geometry_reveal_is_one_shot_across_scroll_in_out_in() {
        let mut controller = RevealController::new(RevealOptions::portfolio(), 1);

        // Below the fold.
        assert!(controller.evaluate(VIEWPORT, [(0, card_at(1200.0))]).is_empty());
        assert_eq!(controller.state(0), Some(RevealState::Pending));

        // Only 10% inside the trimmed root: not enough.
        assert!(controller.evaluate(VIEWPORT, [(0, card_at(700.0))]).is_empty());

        // Scrolled in.
        assert_eq!(controller.evaluate(VIEWPORT, [(0, card_at(400.0))]), [0]);
        // Out and back in again.
        assert!(controller.evaluate(VIEWPORT, [(0, card_at(-900.0))]).is_empty());
        assert!(controller.evaluate(VIEWPORT, [(0, card_at(400.0))]).is_empty());
        assert_eq!(controller.state(0), Some(RevealState::Revealed));
    }

    #[test]
    fn unknown_targets_are_ignored() {
        let mut controller = RevealController::new(RevealOptions::portfolio(), 1);
        let revealed = controller.observe([IntersectionSample {
            target: 7,
            is_intersecting: true,
        }]);
        assert!(revealed.is_empty());
        assert_eq!(controller.pending_count(), 1);
    }
}
