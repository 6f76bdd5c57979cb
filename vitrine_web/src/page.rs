// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page installation: every behaviour wired to its browser events.
//!
//! [`install`] resolves the portfolio markup, builds a [`PageController`]
//! over a [`DomPresenter`] and registers:
//!
//! - three throttled `scroll` handlers (navigation, back-to-top, parallax)
//!   and a throttled `resize` handler
//! - anchor `click` handlers on the nav links and the back-to-top control,
//!   whose smooth scrolls are stepped by a [`RafLoop`]
//! - `pointermove` / `pointerleave` on each tilt card
//! - the theme toggle and the system color-scheme listener
//! - an `IntersectionObserver` for reveal candidates, or a throttled scroll
//!   check where the observer is unavailable
//!
//! Before returning it injects the palette stylesheet, writes the footer
//! year, applies the initial theme and runs one full scroll pass, so the
//! page is consistent before the first event. Listeners live for the rest
//! of the page's life.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::{Point, Rect};
use tracing::{debug, warn};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, DomRect, Event, EventTarget, HtmlElement, MediaQueryList, MouseEvent, Window,
};

use vitrine_core::config::PageConfig;
use vitrine_core::navigation::fragment_target;
use vitrine_core::page::{PageController, PageHost};
use vitrine_core::reveal::IntersectionSample;
use vitrine_core::scroll::ParallaxLayer;
use vitrine_core::theme::{MemoryStore, ThemeChange, ThemeMode, theme_stylesheet};
use vitrine_core::time::{Duration, HostTime};
use vitrine_core::trace::{ThrottleChannel, Tracer};

use crate::presenter::DomPresenter;
use crate::raf::RafLoop;
use crate::roles::{PARALLAX_ATTRIBUTE, PageRoles, Selectors, resolve_fragment};
use crate::storage::PageStore;
use crate::timer::ThrottledCallback;
use crate::{SharedSink, media, observer, traced};

type Controller = PageController<DomPresenter, PageStore>;

/// Geometry read from the live document.
struct DomHost {
    window: Window,
    document: Option<Document>,
    roles: PageRoles,
}

impl PageHost for DomHost {
    fn now(&self) -> HostTime {
        crate::now()
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport(&self) -> Rect {
        let extent = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Rect::new(
            0.0,
            0.0,
            extent(self.window.inner_width()),
            extent(self.window.inner_height()),
        )
    }

    fn navbar_height(&self) -> Option<f64> {
        self.roles.navbar_height()
    }

    fn section_tops(&self) -> Vec<Option<f64>> {
        self.roles.section_tops()
    }

    fn fragment_top(&self, fragment: &str) -> Option<f64> {
        let section = resolve_fragment(self.document.as_ref()?, Some(fragment))?;
        Some(section.get_bounding_client_rect().top())
    }

    fn reveal_rect(&self, target: usize) -> Option<Rect> {
        let el = self.roles.reveal.get(target)?;
        Some(dom_rect(&el.get_bounding_client_rect()))
    }
}

/// An installed page.
///
/// Clones share state. The methods are what the installed listeners call;
/// they can also be invoked directly, for example from other page scripts.
#[derive(Clone)]
pub struct Page {
    config: PageConfig,
    host: Rc<DomHost>,
    controller: Rc<RefCell<Controller>>,
    raf: Rc<RafLoop>,
    sink: SharedSink,
}

impl core::fmt::Debug for Page {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Page")
            .field("config", &self.config)
            .field("raf", &self.raf)
            .finish_non_exhaustive()
    }
}

/// Installs the portfolio page on the current document.
pub fn install(sink: SharedSink) -> Result<Page, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let roles = PageRoles::query(&document, &Selectors::PORTFOLIO);
    install_with(&window, roles, PageConfig::portfolio(), sink)
}

/// Installs the page behaviours over explicitly supplied elements.
pub fn install_with(
    window: &Window,
    roles: PageRoles,
    config: PageConfig,
    sink: SharedSink,
) -> Result<Page, JsValue> {
    traced(&sink, |t| roles.report(t));
    inject_stylesheet(window);

    let layers = roles
        .parallax
        .iter()
        .map(|el| {
            let raw = el.get_attribute(PARALLAX_ATTRIBUTE);
            ParallaxLayer::from_attribute(raw.as_deref(), &config.parallax)
        })
        .collect();
    let color_scheme = media::prefers_dark_query(window);
    let prefers_dark = color_scheme.as_ref().is_some_and(MediaQueryList::matches);
    let store = PageStore::local(window).unwrap_or_else(|error| {
        debug!(%error, "theme choice lasts for this page only");
        PageStore::Memory(MemoryStore::new())
    });

    let presenter = DomPresenter::new(roles.clone());
    presenter.set_year(js_sys::Date::new_0().get_full_year());
    let (controller, initial_theme) = PageController::new(
        config,
        presenter,
        store,
        layers,
        roles.reveal.len(),
        prefers_dark,
    );

    // Listener targets, cloned before the host takes the roles.
    let nav_links: Vec<HtmlElement> = roles.nav_links.iter().map(|n| n.link.clone()).collect();
    let back_to_top = roles.back_to_top.clone();
    let tilt_cards = roles.tilt.clone();
    let theme_toggle = roles.theme_toggle.clone();
    let reveal_targets = roles.reveal.clone();

    let host = DomHost {
        window: window.clone(),
        document: window.document(),
        roles,
    };
    let page = Page::new(host, config, controller, sink);

    page.with_controller(|c, host, t| c.first_pass(&initial_theme, host, t));
    warn_unsaved(&initial_theme);

    page.listen_scroll()?;
    for link in nav_links {
        let target = link.clone();
        let page = page.clone();
        listen(&link, "click", move |event| {
            let href = target.get_attribute("href");
            if page.scroll_to_anchor(href.as_deref()) {
                event.prevent_default();
            }
        })?;
    }
    if let Some(button) = back_to_top {
        let page = page.clone();
        listen(&button, "click", move |_event| page.scroll_to_top())?;
    }
    for (index, card) in tilt_cards.into_iter().enumerate() {
        let target = card.clone();
        let page_move = page.clone();
        listen(&card, "pointermove", move |event| {
            if let Some(pointer) = event.dyn_ref::<MouseEvent>() {
                let at = Point::new(f64::from(pointer.client_x()), f64::from(pointer.client_y()));
                page_move.tilt(index, dom_rect(&target.get_bounding_client_rect()), at);
            }
        })?;
        let page_leave = page.clone();
        listen(&card, "pointerleave", move |_event| page_leave.reset_tilt(index))?;
    }
    if let Some(toggle) = theme_toggle {
        let page = page.clone();
        listen(&toggle, "click", move |_event| page.toggle_theme())?;
    }
    if let Some(query) = color_scheme {
        let page = page.clone();
        media::watch(&query, move |dark| page.system_theme_changed(dark));
    }

    if !reveal_targets.is_empty() {
        if observer::supported(window) {
            let page = page.clone();
            observer::observe(reveal_targets, &config.reveal, move |samples| {
                page.observe_reveals(samples)
            })?;
        } else {
            debug!("IntersectionObserver unavailable; revealing from scroll geometry");
            page.listen_reveal_fallback()?;
            page.evaluate_reveals();
        }
    }

    Ok(page)
}

impl Page {
    fn new(host: DomHost, config: PageConfig, controller: Controller, sink: SharedSink) -> Self {
        let controller = Rc::new(RefCell::new(controller));
        let weak = Rc::downgrade(&controller);
        let step_window = host.window.clone();
        let step_sink = sink.clone();
        let raf = RafLoop::new(move |at| {
            let Some(controller) = weak.upgrade() else {
                return false;
            };
            step_scroll(&controller, &step_window, &step_sink, at)
        });
        Self {
            config,
            host: Rc::new(host),
            controller,
            raf: Rc::new(raf),
            sink,
        }
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Current theme mode, or `None` while a handler is running.
    #[must_use]
    pub fn theme_mode(&self) -> Option<ThemeMode> {
        self.controller.try_borrow().ok().map(|c| c.theme_mode())
    }

    /// Applies every scroll-derived state at once.
    pub fn refresh(&self) {
        self.with_controller(|c, host, t| c.refresh(host, t));
    }

    /// Navbar state and active link.
    pub fn update_navigation(&self) {
        self.with_controller(|c, host, t| c.update_navigation(host, t));
    }

    /// Back-to-top visibility.
    pub fn update_back_to_top(&self) {
        self.with_controller(|c, host, _| c.update_back_to_top(host));
    }

    /// Parallax transforms.
    pub fn update_parallax(&self) {
        self.with_controller(|c, host, _| c.update_parallax(host));
    }

    /// Body offset and active link, after the layout changed.
    pub fn update_layout(&self) {
        self.with_controller(|c, host, t| c.update_layout(host, t));
    }

    /// Flips the theme and remembers the choice.
    pub fn toggle_theme(&self) {
        if let Some(change) = self.with_controller(|c, _, t| c.toggle_theme(t)) {
            warn_unsaved(&change);
        }
    }

    /// Follows a system color-scheme change unless a choice is stored.
    pub fn system_theme_changed(&self, prefers_dark: bool) {
        let change = self.with_controller(|c, _, t| c.system_theme_changed(prefers_dark, t));
        if let Some(change) = change.flatten() {
            warn_unsaved(&change);
        }
    }

    /// Smoothly scrolls to the section named by `href` and records the
    /// fragment in the address bar.
    ///
    /// Returns `false`, leaving the click to the browser, when `href` is not
    /// an in-page fragment or names no element.
    pub fn scroll_to_anchor(&self, href: Option<&str>) -> bool {
        let started = self
            .with_controller(|c, host, t| c.scroll_to_anchor(href, host, t))
            .unwrap_or(false);
        if started {
            self.raf.start();
            if let (Some(fragment), Ok(history)) = (fragment_target(href), self.host.window.history())
            {
                let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(fragment));
            }
        }
        started
    }

    /// Smoothly scrolls back to the top of the page.
    pub fn scroll_to_top(&self) {
        if self
            .with_controller(|c, host, t| c.scroll_to_top(host, t))
            .is_some()
        {
            self.raf.start();
        }
    }

    /// Tilts card `index` toward `pointer`, given the card's current box.
    pub fn tilt(&self, index: usize, rect: Rect, pointer: Point) {
        self.with_controller(|c, _, _| c.tilt(index, rect, pointer));
    }

    /// Flattens card `index`.
    pub fn reset_tilt(&self, index: usize) {
        self.with_controller(|c, _, _| c.reset_tilt(index));
    }

    /// Applies one batch of observer reports; returns the revealed indices.
    pub fn observe_reveals(&self, samples: Vec<IntersectionSample>) -> Vec<usize> {
        self.with_controller(|c, _, t| c.observe_reveals(samples, t))
            .unwrap_or_default()
    }

    /// Reveals candidates from their current geometry.
    pub fn evaluate_reveals(&self) {
        self.with_controller(|c, host, t| c.evaluate_reveals(host, t));
    }

    fn listen_scroll(&self) -> Result<(), JsValue> {
        let throttles = &self.config.throttle;
        let handlers = [
            self.throttled(throttles.navigation, ThrottleChannel::Navigation, Self::update_navigation),
            self.throttled(throttles.back_to_top, ThrottleChannel::BackToTop, Self::update_back_to_top),
            self.throttled(throttles.parallax, ThrottleChannel::Parallax, Self::update_parallax),
        ];
        for handler in handlers {
            listen(&self.host.window, "scroll", move |_event| handler.invoke())?;
        }
        let resize = self.throttled(throttles.resize, ThrottleChannel::Resize, Self::update_layout);
        listen(&self.host.window, "resize", move |_event| resize.invoke())
    }

    fn listen_reveal_fallback(&self) -> Result<(), JsValue> {
        let reveal = self.throttled(
            self.config.throttle.navigation,
            ThrottleChannel::Reveal,
            Self::evaluate_reveals,
        );
        listen(&self.host.window, "scroll", move |_event| reveal.invoke())
    }

    fn throttled(
        &self,
        interval: Duration,
        channel: ThrottleChannel,
        handler: fn(&Self),
    ) -> ThrottledCallback {
        let page = self.clone();
        ThrottledCallback::new(interval, channel, self.sink.clone(), move || handler(&page))
    }

    fn with_controller<R>(
        &self,
        f: impl FnOnce(&mut Controller, &DomHost, &mut Tracer<'_>) -> R,
    ) -> Option<R> {
        // Handlers never overlap; a busy controller means a re-entrant DOM
        // callback, which is skipped.
        let mut controller = self.controller.try_borrow_mut().ok()?;
        Some(traced(&self.sink, |t| f(&mut *controller, &*self.host, t)))
    }
}

/// Advances the smooth scroll by one frame; returns whether another frame
/// is needed.
fn step_scroll(
    controller: &RefCell<Controller>,
    window: &Window,
    sink: &SharedSink,
    at: HostTime,
) -> bool {
    let Ok(mut controller) = controller.try_borrow_mut() else {
        // Busy; try again next frame.
        return true;
    };
    let Some(sample) = traced(sink, |t| controller.step_scroll(at, t)) else {
        return false;
    };
    drop(controller);

    window.scroll_to_with_x_and_y(0.0, sample.y);
    !sample.finished
}

fn warn_unsaved(change: &ThemeChange) {
    if let Some(error) = &change.persist_error {
        warn!(%error, mode = %change.mode, "theme preference not saved");
    }
}

fn inject_stylesheet(window: &Window) {
    let Some(document) = window.document() else {
        return;
    };
    let Some(head) = document.head() else {
        warn!("document has no <head>; theme palettes not installed");
        return;
    };
    let Ok(style) = document.create_element("style") else {
        return;
    };
    style.set_text_content(Some(&theme_stylesheet()));
    if head.append_child(&style).is_err() {
        warn!("failed to install theme palettes");
    }
}

fn dom_rect(rect: &DomRect) -> Rect {
    Rect::new(rect.left(), rect.top(), rect.right(), rect.bottom())
}

fn listen(
    target: &EventTarget,
    event: &str,
    mut handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |event: Event| handler(event)) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
