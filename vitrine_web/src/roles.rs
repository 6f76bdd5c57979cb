// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page elements each behaviour acts on.
//!
//! Behaviours never query the document themselves. [`PageRoles`] is built
//! once, either from a [`Selectors`] map with [`PageRoles::query`] or by
//! hand, and handed to the page at install time. Every single-element role
//! is optional and every list may be empty; behaviours whose elements are
//! absent are skipped.

use alloc::vec::Vec;

use wasm_bindgen::JsCast as _;
use web_sys::{Document, Element, HtmlElement};

use vitrine_core::navigation::fragment_target;
use vitrine_core::trace::{RoleLookupEvent, Tracer};

/// CSS selectors for each role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selectors {
    /// The fixed navbar.
    pub navbar: &'static str,
    /// Navigation links carrying an `href`, which names their section.
    pub nav_links: &'static str,
    /// The back-to-top control.
    pub back_to_top: &'static str,
    /// Parallax layers, configured by their `data-parallax` attribute.
    pub parallax: &'static str,
    /// Reveal-on-scroll candidates.
    pub reveal: &'static str,
    /// Tilt cards.
    pub tilt: &'static str,
    /// The theme toggle.
    pub theme_toggle: &'static str,
    /// The footer year.
    pub year: &'static str,
}

impl Selectors {
    /// Selectors used by the portfolio markup.
    pub const PORTFOLIO: Self = Self {
        navbar: "#navbar",
        nav_links: ".nav-link[href]",
        back_to_top: "#backToTop",
        parallax: "[data-parallax]",
        reveal: ".reveal",
        tilt: "[data-tilt]",
        theme_toggle: "#themeToggle",
        year: "#year",
    };
}

impl Default for Selectors {
    fn default() -> Self {
        Self::PORTFOLIO
    }
}

/// Attribute read from parallax layers.
pub(crate) const PARALLAX_ATTRIBUTE: &str = "data-parallax";

/// A navigation link and the section it points at.
#[derive(Clone, Debug)]
pub struct NavLink {
    /// The link itself.
    pub link: HtmlElement,
    /// Element named by the link's fragment, if it exists.
    pub section: Option<HtmlElement>,
}

impl NavLink {
    /// Resolves the section for `link` in `document`.
    #[must_use]
    pub fn resolve(document: &Document, link: HtmlElement) -> Self {
        let section = resolve_fragment(document, link.get_attribute("href").as_deref());
        Self { link, section }
    }

    /// Document-top offset of the section, for active-link tracking.
    #[must_use]
    pub fn section_top(&self) -> Option<f64> {
        self.section.as_ref().map(|s| f64::from(s.offset_top()))
    }
}

/// Element named by an in-page fragment href, if any.
pub(crate) fn resolve_fragment(document: &Document, href: Option<&str>) -> Option<HtmlElement> {
    // Malformed fragments are invalid selectors and resolve to nothing.
    query_one(document, fragment_target(href)?)
}

/// Resolved page elements.
#[derive(Clone, Debug, Default)]
pub struct PageRoles {
    /// Document root, carrying the theme attribute.
    pub root: Option<Element>,
    /// Document body, padded below the navbar.
    pub body: Option<HtmlElement>,
    /// The fixed navbar.
    pub navbar: Option<HtmlElement>,
    /// Navigation links in document order.
    pub nav_links: Vec<NavLink>,
    /// The back-to-top control.
    pub back_to_top: Option<HtmlElement>,
    /// Parallax layers.
    pub parallax: Vec<HtmlElement>,
    /// Reveal candidates.
    pub reveal: Vec<HtmlElement>,
    /// Tilt cards.
    pub tilt: Vec<HtmlElement>,
    /// The theme toggle.
    pub theme_toggle: Option<HtmlElement>,
    /// The footer year.
    pub year: Option<HtmlElement>,
}

impl PageRoles {
    /// Resolves every role in `document`.
    ///
    /// Invalid selectors resolve to nothing rather than failing setup.
    #[must_use]
    pub fn query(document: &Document, selectors: &Selectors) -> Self {
        let nav_links = query_all(document, selectors.nav_links)
            .into_iter()
            .map(|link| NavLink::resolve(document, link))
            .collect();
        Self {
            root: document.document_element(),
            body: document.body(),
            navbar: query_one(document, selectors.navbar),
            nav_links,
            back_to_top: query_one(document, selectors.back_to_top),
            parallax: query_all(document, selectors.parallax),
            reveal: query_all(document, selectors.reveal),
            tilt: query_all(document, selectors.tilt),
            theme_toggle: query_one(document, selectors.theme_toggle),
            year: query_one(document, selectors.year),
        }
    }

    /// Section offsets of each nav link, in link order.
    #[must_use]
    pub fn section_tops(&self) -> Vec<Option<f64>> {
        self.nav_links.iter().map(NavLink::section_top).collect()
    }

    /// Rendered navbar height, or `None` without a navbar.
    #[must_use]
    pub fn navbar_height(&self) -> Option<f64> {
        self.navbar.as_ref().map(|n| f64::from(n.offset_height()))
    }

    /// Reports how many elements each role resolved to.
    pub fn report(&self, tracer: &mut Tracer<'_>) {
        let one = |el: bool| usize::from(el);
        let resolved_sections = self.nav_links.iter().filter(|l| l.section.is_some()).count();
        let counts = [
            ("navbar", one(self.navbar.is_some()), true),
            ("nav-links", self.nav_links.len(), true),
            ("sections", resolved_sections, !self.nav_links.is_empty()),
            ("back-to-top", one(self.back_to_top.is_some()), true),
            ("parallax", self.parallax.len(), false),
            ("reveal", self.reveal.len(), false),
            ("tilt", self.tilt.len(), false),
            ("theme-toggle", one(self.theme_toggle.is_some()), true),
            ("year", one(self.year.is_some()), false),
        ];
        for (role, matched, expected) in counts {
            tracer.role_lookup(&RoleLookupEvent {
                role,
                matched,
                expected,
            });
        }
    }
}

fn query_one(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn query_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portfolio_selectors() {
        let s = Selectors::default();
        assert_eq!(s, Selectors::PORTFOLIO);
        assert_eq!(s.navbar, "#navbar");
        assert_eq!(s.back_to_top, "#backToTop");
        assert_eq!(s.theme_toggle, "#themeToggle");
        assert_eq!(s.parallax, "[data-parallax]");
        assert_eq!(s.nav_links, ".nav-link[href]", "links without a target are not nav links");
    }

    #[test]
    fn empty_roles_report_expected_gaps() {
        use vitrine_core::trace::TraceSink;

        #[derive(Default)]
        struct Missing(Vec<&'static str>);

        impl TraceSink for Missing {
            fn on_role_lookup(&mut self, e: &RoleLookupEvent) {
                if e.expected && e.matched == 0 {
                    self.0.push(e.role);
                }
            }
        }

        let roles = PageRoles::default();
        assert!(roles.section_tops().is_empty(), "no links, no sections");
        assert_eq!(roles.navbar_height(), None);

        let mut sink = Missing::default();
        roles.report(&mut Tracer::new(&mut sink));
        // Empty when tracing is compiled out.
        if !sink.0.is_empty() {
            assert_eq!(
                sink.0,
                ["navbar", "nav-links", "back-to-top", "theme-toggle"],
                "sections are only expected when links exist"
            );
        }
    }
}
