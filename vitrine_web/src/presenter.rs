// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM updates.
//!
//! [`DomPresenter`] writes computed state into the elements of a
//! [`PageRoles`]: classes for discrete states, inline styles for continuous
//! ones. DOM errors are ignored; a failed style write leaves the previous
//! value in place and the next update overwrites it.

use alloc::string::ToString as _;

use web_sys::{Element, HtmlElement};

use vitrine_core::backend::Presenter;
use vitrine_core::reveal::REVEAL_CLASS;
use vitrine_core::scroll::{ScrollChanges, px};
use vitrine_core::theme::{THEME_ATTRIBUTE, ThemeChange};
use vitrine_core::tilt::{TILT_RESET, Tilt};

use crate::roles::PageRoles;

/// Navbar class while the page is scrolled.
pub const SCROLLED_CLASS: &str = "scrolled";

/// Class of the highlighted nav link.
pub const ACTIVE_CLASS: &str = "active";

/// Back-to-top class while it is shown.
pub const VISIBLE_CLASS: &str = "visible";

/// Applies page state to the elements of a [`PageRoles`].
pub struct DomPresenter {
    roles: PageRoles,
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("nav_links", &self.roles.nav_links.len())
            .field("parallax", &self.roles.parallax.len())
            .field("reveal", &self.roles.reveal.len())
            .field("tilt", &self.roles.tilt.len())
            .finish_non_exhaustive()
    }
}

impl DomPresenter {
    /// Creates a presenter over `roles`.
    #[must_use]
    pub fn new(roles: PageRoles) -> Self {
        Self { roles }
    }

    /// Returns the elements this presenter writes to.
    #[must_use]
    pub fn roles(&self) -> &PageRoles {
        &self.roles
    }

    /// Writes the footer year.
    pub fn set_year(&self, year: u32) {
        if let Some(el) = &self.roles.year {
            el.set_text_content(Some(&year.to_string()));
        }
    }
}

fn set_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

impl Presenter for DomPresenter {
    fn apply_scroll(&mut self, changes: &ScrollChanges) {
        let roles = &self.roles;
        if let (Some(scrolled), Some(navbar)) = (changes.navbar_scrolled, &roles.navbar) {
            set_class(navbar, SCROLLED_CLASS, scrolled);
        }
        if let Some(active) = changes.active_link {
            for (i, nav) in roles.nav_links.iter().enumerate() {
                set_class(&nav.link, ACTIVE_CLASS, i == active);
            }
        }
        if let (Some(visible), Some(button)) = (changes.back_to_top_visible, &roles.back_to_top) {
            set_class(button, VISIBLE_CLASS, visible);
        }
        if let (Some(offset), Some(body)) = (changes.body_offset, &roles.body) {
            set_style(body, "padding-top", &px(offset));
        }
        for offset in &changes.parallax {
            if let Some(layer) = roles.parallax.get(offset.layer) {
                set_style(layer, "transform", &offset.css());
            }
        }
    }

    fn apply_theme(&mut self, change: &ThemeChange) {
        if let Some(root) = &self.roles.root {
            let _ = root.set_attribute(THEME_ATTRIBUTE, change.attribute_value());
        }
        if let Some(toggle) = &self.roles.theme_toggle {
            toggle.set_text_content(Some(change.indicator()));
        }
    }

    fn apply_tilt(&mut self, target: usize, tilt: Option<Tilt>) {
        if let Some(card) = self.roles.tilt.get(target) {
            match tilt {
                Some(tilt) => set_style(card, "transform", &tilt.css()),
                None => set_style(card, "transform", TILT_RESET),
            }
        }
    }

    fn reveal(&mut self, target: usize) {
        if let Some(el) = self.roles.reveal.get(target) {
            let _ = el.class_list().add_1(REVEAL_CLASS);
        }
    }
}
