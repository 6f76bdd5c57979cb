// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for host integrations.
//!
//! Vitrine splits host-specific work into *backend* crates. Each backend
//! provides the following pieces:
//!
//! - **Time** — a `now() -> HostTime` free function reading the host's
//!   monotonic clock.
//!
//! - **Deferred work** — a timer for [`Throttle`] trailing calls and a
//!   per-frame callback for [`SmoothScroller`] steps. These are
//!   backend-specific and not abstracted by a trait because their lifecycle
//!   is tied to the host's event loop.
//!
//! - **Preferences** — a [`PreferenceStore`] for the theme.
//!
//! - **Presenter** — implements the [`Presenter`] trait to apply computed
//!   state to the host's element tree.
//!
//! # Crate boundaries
//!
//! `vitrine_core` owns every decision and this contract module. Backend
//! crates depend on `vitrine_core` and provide host glue: a
//! [`PageHost`](crate::page::PageHost) reading geometry, listener
//! registration, and the timers and frame callbacks above.
//!
//! [`Throttle`]: crate::throttle::Throttle
//! [`SmoothScroller`]: crate::smooth_scroll::SmoothScroller
//! [`PreferenceStore`]: crate::theme::PreferenceStore

use crate::scroll::ScrollChanges;
use crate::theme::ThemeChange;
use crate::tilt::Tilt;

/// Applies computed page state to a host element tree.
///
/// [`PageController`] drives a presenter from host events. The browser
/// backend supplies a DOM presenter; recording presenters stand in for it in
/// native tests.
///
/// # Event pseudocode
///
/// ```rust,ignore
/// fn on_scroll() {
///     page.update_navigation(&host, &mut tracer);
///     // -> presenter.apply_scroll(&changes)
/// }
///
/// fn on_toggle_click() {
///     page.toggle_theme(&mut tracer);
///     // -> presenter.apply_theme(&change)
/// }
/// ```
///
/// [`PageController`]: crate::page::PageController
pub trait Presenter {
    /// Applies navbar, active-link, back-to-top, body-offset and parallax
    /// changes.
    fn apply_scroll(&mut self, changes: &ScrollChanges);

    /// Applies a theme transition (root attribute and toggle indicator).
    fn apply_theme(&mut self, change: &ThemeChange);

    /// Sets the rotation of tilt target `target`; `None` resets it.
    fn apply_tilt(&mut self, target: usize, tilt: Option<Tilt>);

    /// Marks reveal candidate `target` as revealed.
    fn reveal(&mut self, target: usize);
}
