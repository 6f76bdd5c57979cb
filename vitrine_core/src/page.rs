// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page orchestration over a host.
//!
//! [`PageController`] owns every controller for one page and routes host
//! events through them to a [`Presenter`]. Hosts implement [`PageHost`] to
//! supply live geometry and the clock; the controller never reads the page
//! itself.
//!
//! Deferred work stays with the host. Throttle timers call the `update_*`
//! methods, and an animation-frame driver calls
//! [`step_scroll`](PageController::step_scroll) until it returns `None` or a
//! finished sample:
//!
//! ```text
//!   scroll  ─► update_navigation / update_back_to_top / update_parallax
//!   resize  ─► update_layout
//!   click   ─► scroll_to_anchor / scroll_to_top ─► step_scroll per frame
//!   pointer ─► tilt / reset_tilt
//!   toggle  ─► toggle_theme        media change ─► system_theme_changed
//!   observer batch ─► observe_reveals   (or evaluate_reveals on scroll)
//! ```

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::backend::Presenter;
use crate::config::PageConfig;
use crate::navigation::{anchor_animation, back_to_top_animation, fragment_target};
use crate::reveal::{IntersectionSample, RevealController};
use crate::scroll::{ParallaxLayer, ScrollAnimator, ScrollChanges, ScrollGeometry};
use crate::smooth_scroll::{ScrollAnimation, ScrollSample, SmoothScroller};
use crate::theme::{PreferenceStore, ThemeChange, ThemeController, ThemeMode};
use crate::tilt::Tilt;
use crate::time::HostTime;
use crate::trace::{
    ActiveLinkEvent, AnimationPhase, RevealEvent, ScrollAnimationEvent, ThemeChangedEvent, Tracer,
};

/// Live page geometry and time, read at each event.
///
/// Offsets are CSS pixels; boxes are in viewport coordinates.
pub trait PageHost {
    /// Current host time.
    fn now(&self) -> HostTime;

    /// Current vertical scroll offset.
    fn scroll_y(&self) -> f64;

    /// The visible viewport.
    fn viewport(&self) -> Rect;

    /// Rendered navbar height, or `None` without a navbar.
    fn navbar_height(&self) -> Option<f64>;

    /// Document-top offset of each nav link's section, in link order.
    fn section_tops(&self) -> Vec<Option<f64>>;

    /// Bounding-box top of the element named by `fragment` (e.g. `#about`).
    fn fragment_top(&self, fragment: &str) -> Option<f64>;

    /// Bounding box of reveal candidate `target`.
    fn reveal_rect(&self, target: usize) -> Option<Rect>;
}

/// Every page behaviour over one presenter and preference store.
#[derive(Debug)]
pub struct PageController<P, S> {
    config: PageConfig,
    animator: ScrollAnimator,
    theme: ThemeController<S>,
    reveal: RevealController,
    scroller: SmoothScroller,
    presenter: P,
}

impl<P: Presenter, S: PreferenceStore> PageController<P, S> {
    /// Creates the controllers for a page with `layers` and `reveal_count`
    /// reveal candidates.
    ///
    /// The initial theme is returned alongside for
    /// [`first_pass`](Self::first_pass).
    pub fn new(
        config: PageConfig,
        presenter: P,
        store: S,
        layers: Vec<ParallaxLayer>,
        reveal_count: usize,
        system_prefers_dark: bool,
    ) -> (Self, ThemeChange) {
        let (theme, initial) = ThemeController::new(store, system_prefers_dark, config.theme);
        let controller = Self {
            config,
            animator: ScrollAnimator::new(config.scroll, layers),
            theme,
            reveal: RevealController::new(config.reveal, reveal_count),
            scroller: SmoothScroller::new(),
            presenter,
        };
        (controller, initial)
    }

    /// Applies the initial theme and every scroll-derived state, so the page
    /// is consistent before the first event.
    pub fn first_pass(
        &mut self,
        initial_theme: &ThemeChange,
        host: &impl PageHost,
        tracer: &mut Tracer<'_>,
    ) {
        self.present_theme(initial_theme, tracer);
        self.refresh(host, tracer);
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Current theme mode.
    #[must_use]
    pub const fn theme_mode(&self) -> ThemeMode {
        self.theme.mode()
    }

    /// Borrows the presenter.
    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Mutably borrows the presenter.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Returns `true` while a smooth scroll is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.scroller.is_animating()
    }

    /// Applies every scroll-derived state at once.
    pub fn refresh(&mut self, host: &impl PageHost, tracer: &mut Tracer<'_>) {
        let scroll_y = host.scroll_y();
        let tops = host.section_tops();
        let changes = self.animator.update(&ScrollGeometry {
            scroll_y,
            navbar_height: host.navbar_height(),
            section_tops: &tops,
        });
        self.apply_scroll(&changes, scroll_y, tracer);
    }

    /// Navbar state and active link.
    pub fn update_navigation(&mut self, host: &impl PageHost, tracer: &mut Tracer<'_>) {
        let scroll_y = host.scroll_y();
        let mut changes = ScrollChanges::default();
        self.animator
            .update_navigation(scroll_y, &host.section_tops(), &mut changes);
        self.apply_scroll(&changes, scroll_y, tracer);
    }

    /// Back-to-top visibility.
    pub fn update_back_to_top(&mut self, host: &impl PageHost) {
        let mut changes = ScrollChanges::default();
        self.animator
            .update_back_to_top(host.scroll_y(), &mut changes);
        self.presenter.apply_scroll(&changes);
    }

    /// Parallax transforms.
    pub fn update_parallax(&mut self, host: &impl PageHost) {
        let mut changes = ScrollChanges::default();
        self.animator.update_parallax(host.scroll_y(), &mut changes);
        self.presenter.apply_scroll(&changes);
    }

    /// Body offset, plus the active link, which depends on section offsets
    /// that move with the layout.
    pub fn update_layout(&mut self, host: &impl PageHost, tracer: &mut Tracer<'_>) {
        let scroll_y = host.scroll_y();
        let mut changes = ScrollChanges::default();
        self.animator
            .update_body_offset(host.navbar_height(), &mut changes);
        self.animator
            .update_navigation(scroll_y, &host.section_tops(), &mut changes);
        self.apply_scroll(&changes, scroll_y, tracer);
    }

    /// Flips the theme and remembers the choice.
    pub fn toggle_theme(&mut self, tracer: &mut Tracer<'_>) -> ThemeChange {
        let change = self.theme.toggle();
        self.present_theme(&change, tracer);
        change
    }

    /// Follows a system color-scheme change unless a choice is stored.
    pub fn system_theme_changed(
        &mut self,
        prefers_dark: bool,
        tracer: &mut Tracer<'_>,
    ) -> Option<ThemeChange> {
        let change = self.theme.system_changed(prefers_dark)?;
        self.present_theme(&change, tracer);
        Some(change)
    }

    /// Starts a smooth scroll to the section named by `href`.
    ///
    /// Returns `false`, leaving the click to the browser, when `href` is not
    /// an in-page fragment or names no element.
    pub fn scroll_to_anchor(
        &mut self,
        href: Option<&str>,
        host: &impl PageHost,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        let Some(element_top) = fragment_target(href).and_then(|f| host.fragment_top(f)) else {
            return false;
        };
        let animation = anchor_animation(
            host.scroll_y(),
            element_top,
            host.navbar_height(),
            host.now(),
            &self.config.navigation,
        );
        self.start_scroll(animation, tracer);
        true
    }

    /// Starts a smooth scroll back to the top of the page.
    pub fn scroll_to_top(&mut self, host: &impl PageHost, tracer: &mut Tracer<'_>) {
        let animation = back_to_top_animation(host.scroll_y(), host.now(), &self.config.navigation);
        self.start_scroll(animation, tracer);
    }

    /// Advances the smooth scroll to `now`.
    ///
    /// Returns the position to scroll to, or `None` when idle. The last
    /// sample of an animation is marked finished.
    pub fn step_scroll(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> Option<ScrollSample> {
        let animation = self.scroller.current().copied()?;
        let (token, sample) = self.scroller.step_current(now)?;
        if sample.finished {
            tracer.scroll_animation(&ScrollAnimationEvent {
                phase: AnimationPhase::Finished,
                token,
                from: animation.from,
                to: animation.to,
                at: now,
            });
        }
        Some(sample)
    }

    /// Tilts card `index` toward `pointer`, given the card's current box.
    pub fn tilt(&mut self, index: usize, rect: Rect, pointer: Point) {
        let tilt = Tilt::from_pointer(rect, pointer, &self.config.tilt);
        self.presenter.apply_tilt(index, Some(tilt));
    }

    /// Flattens card `index`.
    pub fn reset_tilt(&mut self, index: usize) {
        self.presenter.apply_tilt(index, None);
    }

    /// Applies one batch of observer reports.
    ///
    /// Returns the newly revealed candidates; the host stops observing them.
    pub fn observe_reveals(
        &mut self,
        samples: impl IntoIterator<Item = IntersectionSample>,
        tracer: &mut Tracer<'_>,
    ) -> Vec<usize> {
        let revealed = self.reveal.observe(samples);
        self.present_reveals(&revealed, tracer);
        revealed
    }

    /// Reveals pending candidates from their current geometry.
    pub fn evaluate_reveals(&mut self, host: &impl PageHost, tracer: &mut Tracer<'_>) -> Vec<usize> {
        let rects: Vec<_> = self
            .reveal
            .pending()
            .filter_map(|target| host.reveal_rect(target).map(|rect| (target, rect)))
            .collect();
        let revealed = self.reveal.evaluate(host.viewport(), rects);
        self.present_reveals(&revealed, tracer);
        revealed
    }

    fn start_scroll(&mut self, animation: ScrollAnimation, tracer: &mut Tracer<'_>) {
        let previous = self.scroller.current().copied();
        let started = self.scroller.begin(animation);
        if let (Some(old), Some(token)) = (previous, started.superseded) {
            tracer.scroll_animation(&ScrollAnimationEvent {
                phase: AnimationPhase::Superseded,
                token,
                from: old.from,
                to: old.to,
                at: animation.start,
            });
        }
        tracer.scroll_animation(&ScrollAnimationEvent {
            phase: AnimationPhase::Started,
            token: started.token,
            from: animation.from,
            to: animation.to,
            at: animation.start,
        });
    }

    fn apply_scroll(&mut self, changes: &ScrollChanges, scroll_y: f64, tracer: &mut Tracer<'_>) {
        self.presenter.apply_scroll(changes);
        if let Some(link) = changes.active_link {
            tracer.active_link(&ActiveLinkEvent { link, scroll_y });
        }
    }

    fn present_theme(&mut self, change: &ThemeChange, tracer: &mut Tracer<'_>) {
        self.presenter.apply_theme(change);
        tracer.theme_changed(&ThemeChangedEvent::from(change));
    }

    fn present_reveals(&mut self, revealed: &[usize], tracer: &mut Tracer<'_>) {
        let remaining = self.reveal.pending_count();
        for &target in revealed {
            self.presenter.reveal(target);
            tracer.reveal(&RevealEvent { target, remaining });
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::theme::MemoryStore;
    use crate::trace::TraceSink;

    /// Presenter that records every call.
    #[derive(Debug, Default)]
    struct Recorder {
        scroll: Vec<ScrollChanges>,
        themes: Vec<ThemeMode>,
        tilts: Vec<(usize, Option<Tilt>)>,
        revealed: Vec<usize>,
    }

    impl Presenter for Recorder {
        fn apply_scroll(&mut self, changes: &ScrollChanges) {
            self.scroll.push(changes.clone());
        }

        fn apply_theme(&mut self, change: &ThemeChange) {
            self.themes.push(change.mode);
        }

        fn apply_tilt(&mut self, target: usize, tilt: Option<Tilt>) {
            self.tilts.push((target, tilt));
        }

        fn reveal(&mut self, target: usize) {
            self.revealed.push(target);
        }
    }

    #[derive(Clone, Debug, Default)]
    struct FakeHost {
        now: HostTime,
        scroll_y: f64,
        navbar_height: Option<f64>,
        section_tops: Vec<Option<f64>>,
        fragments: Vec<(&'static str, f64)>,
        reveal_rects: Vec<Rect>,
    }

    impl PageHost for FakeHost {
        fn now(&self) -> HostTime {
            self.now
        }

        fn scroll_y(&self) -> f64 {
            self.scroll_y
        }

        fn viewport(&self) -> Rect {
            Rect::new(0.0, 0.0, 1000.0, 800.0)
        }

        fn navbar_height(&self) -> Option<f64> {
            self.navbar_height
        }

        fn section_tops(&self) -> Vec<Option<f64>> {
            self.section_tops.clone()
        }

        fn fragment_top(&self, fragment: &str) -> Option<f64> {
            self.fragments
                .iter()
                .find(|(id, _)| *id == fragment)
                .map(|(_, top)| *top)
        }

        fn reveal_rect(&self, target: usize) -> Option<Rect> {
            self.reveal_rects.get(target).copied()
        }
    }

    type TestPage = PageController<Recorder, MemoryStore>;

    fn page(layers: usize, reveal_count: usize) -> (TestPage, ThemeChange) {
        PageController::new(
            PageConfig::portfolio(),
            Recorder::default(),
            MemoryStore::new(),
            vec![ParallaxLayer { factor: 0.5 }; layers],
            reveal_count,
            false,
        )
    }

    fn sample(target: usize, is_intersecting: bool) -> IntersectionSample {
        IntersectionSample {
            target,
            is_intersecting,
        }
    }

    #[test]
    fn first_pass_applies_every_state() {
        let host = FakeHost {
            scroll_y: 500.0,
            navbar_height: Some(64.0),
            section_tops: vec![Some(0.0), Some(400.0), Some(900.0)],
            ..FakeHost::default()
        };
        let (mut page, initial) = page(2, 0);
        assert!(page.presenter().scroll.is_empty(), "nothing applied yet");

        page.first_pass(&initial, &host, &mut Tracer::none());
        let presenter = page.presenter();
        assert_eq!(presenter.themes, [ThemeMode::Light]);
        assert_eq!(presenter.scroll.len(), 1, "one batched pass");
        let changes = &presenter.scroll[0];
        assert_eq!(changes.body_offset, Some(64.0));
        assert_eq!(changes.navbar_scrolled, Some(true));
        assert_eq!(changes.active_link, Some(1), "620 reaches 400 but not 900");
        assert_eq!(changes.back_to_top_visible, Some(true));
        assert_eq!(changes.parallax.len(), 2);
        assert_eq!(changes.parallax[1].translate_y, 250.0);
    }

    #[test]
    fn anchor_without_target_is_left_to_the_browser() {
        let host = FakeHost {
            navbar_height: Some(64.0),
            fragments: vec![("#about", 300.0)],
            ..FakeHost::default()
        };
        let (mut page, _) = page(0, 0);
        for href in [None, Some(""), Some("#"), Some("#missing"), Some("/about")] {
            assert!(
                !page.scroll_to_anchor(href, &host, &mut Tracer::none()),
                "{href:?} navigates natively"
            );
        }
        assert!(!page.is_animating(), "no scroll started");

        assert!(page.scroll_to_anchor(Some("#about"), &host, &mut Tracer::none()));
        assert!(page.is_animating());
        let end = page
            .step_scroll(HostTime(10_000_000), &mut Tracer::none())
            .expect("animation in flight");
        assert!(end.finished);
        assert_eq!(end.y, 224.0, "300 less navbar and gap");
        assert_eq!(page.step_scroll(HostTime(10_000_000), &mut Tracer::none()), None);
    }

    #[test]
    fn resize_refreshes_active_link() {
        let mut host = FakeHost {
            scroll_y: 300.0,
            navbar_height: Some(64.0),
            section_tops: vec![Some(0.0), Some(800.0)],
            ..FakeHost::default()
        };
        let (mut page, initial) = page(1, 0);
        page.first_pass(&initial, &host, &mut Tracer::none());
        assert_eq!(page.presenter().scroll[0].active_link, Some(0));

        // The layout reflows: the second section moves up, the navbar shrinks.
        host.section_tops = vec![Some(0.0), Some(400.0)];
        host.navbar_height = Some(56.0);
        page.update_layout(&host, &mut Tracer::none());

        let last = page.presenter().scroll.last().expect("layout applied");
        assert_eq!(last.active_link, Some(1));
        assert_eq!(last.body_offset, Some(56.0));
        assert_eq!(last.navbar_scrolled, None, "unchanged");
        assert!(last.parallax.is_empty(), "parallax has its own handler");
    }

    #[test]
    fn revealed_candidates_are_reported_once() {
        let (mut page, _) = page(0, 3);
        let first = page.observe_reveals([sample(0, true), sample(1, false)], &mut Tracer::none());
        assert_eq!(first, [0]);

        let second = page.observe_reveals([sample(0, true), sample(1, true)], &mut Tracer::none());
        assert_eq!(second, [1], "candidate 0 was already revealed");
        assert_eq!(page.presenter().revealed, [0, 1]);
    }

    #[test]
    fn geometric_fallback_reveals_visible_candidates() {
        let host = FakeHost {
            reveal_rects: vec![
                Rect::new(0.0, 100.0, 200.0, 300.0),
                Rect::new(0.0, 2000.0, 200.0, 2200.0),
            ],
            ..FakeHost::default()
        };
        let (mut page, _) = page(0, 2);
        assert_eq!(page.evaluate_reveals(&host, &mut Tracer::none()), [0]);
        assert!(
            page.evaluate_reveals(&host, &mut Tracer::none()).is_empty(),
            "revealed once; the other is still below the fold"
        );
        assert_eq!(page.presenter().revealed, [0]);
    }

    #[test]
    fn new_scroll_supersedes_the_previous_one() {
        #[derive(Default)]
        struct Phases(Vec<(AnimationPhase, u64)>);

        impl TraceSink for Phases {
            fn on_scroll_animation(&mut self, e: &ScrollAnimationEvent) {
                self.0.push((e.phase, e.token.generation()));
            }
        }

        let host = FakeHost {
            scroll_y: 2000.0,
            fragments: vec![("#about", -500.0)],
            ..FakeHost::default()
        };
        let (mut page, _) = page(0, 0);
        let mut phases = Phases::default();
        let mut tracer = Tracer::new(&mut phases);
        page.scroll_to_top(&host, &mut tracer);
        assert!(page.scroll_to_anchor(Some("#about"), &host, &mut tracer));
        let mut frames = 0;
        while let Some(sample) = page.step_scroll(HostTime(10_000_000), &mut tracer) {
            frames += 1;
            assert_eq!(sample.y, 1488.0, "the anchor target, not the top");
        }
        assert_eq!(frames, 1);

        if cfg!(feature = "trace") {
            assert_eq!(
                phases.0,
                [
                    (AnimationPhase::Started, 1),
                    (AnimationPhase::Superseded, 1),
                    (AnimationPhase::Started, 2),
                    (AnimationPhase::Finished, 2),
                ]
            );
        }
    }

    #[test]
    fn toggle_presents_and_persists() {
        let (mut page, _) = page(0, 0);
        let change = page.toggle_theme(&mut Tracer::none());
        assert_eq!(change.mode, ThemeMode::Dark);
        assert!(change.persisted);
        assert_eq!(page.theme_mode(), ThemeMode::Dark);
        assert_eq!(
            page.system_theme_changed(false, &mut Tracer::none()),
            None,
            "explicit choice wins"
        );
        assert_eq!(page.presenter().themes, [ThemeMode::Dark]);
    }

    #[test]
    fn tilt_follows_pointer_and_resets() {
        let (mut page, _) = page(0, 0);
        let card = Rect::new(0.0, 0.0, 200.0, 100.0);
        page.tilt(1, card, Point::new(200.0, 50.0));
        page.reset_tilt(1);
        let max = page.config().tilt.max_degrees;
        assert_eq!(
            page.presenter().tilts,
            [
                (
                    1,
                    Some(Tilt {
                        rotate_x: 0.0,
                        rotate_y: max
                    })
                ),
                (1, None),
            ]
        );
    }
}
