// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bridge from [`TraceSink`] events to `tracing`.
//!
//! Routine decisions are emitted at `debug` and theme changes at `info`,
//! including ones whose preference write failed. An expected element that
//! is missing is a `warn`. Throttle invocations are emitted at `trace`.

use tracing::{debug, info, trace, warn};

use vitrine_core::trace::{
    ActiveLinkEvent, RevealEvent, RoleLookupEvent, ScrollAnimationEvent, ThemeChangedEvent,
    ThrottleEvent, TraceSink,
};

/// Target used for every event this sink emits.
pub const TARGET: &str = "vitrine";

/// A [`TraceSink`] that forwards to the current `tracing` subscriber.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Creates the sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TraceSink for TracingSink {
    fn on_throttle(&mut self, e: &ThrottleEvent) {
        trace!(
            target: TARGET,
            channel = e.channel.as_str(),
            kind = ?e.kind,
            at_us = e.at.ticks(),
            "throttle"
        );
    }

    fn on_theme_changed(&mut self, e: &ThemeChangedEvent) {
        // Storage failures are warned about by the page itself.
        info!(
            target: TARGET,
            mode = %e.mode,
            cause = ?e.cause,
            persisted = e.persisted,
            persist_failed = e.persist_failed,
            "theme changed"
        );
    }

    fn on_active_link(&mut self, e: &ActiveLinkEvent) {
        debug!(target: TARGET, link = e.link, scroll_y = e.scroll_y, "active link");
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        debug!(
            target: TARGET,
            target_index = e.target,
            remaining = e.remaining,
            "revealed"
        );
    }

    fn on_scroll_animation(&mut self, e: &ScrollAnimationEvent) {
        debug!(
            target: TARGET,
            phase = ?e.phase,
            generation = e.token.generation(),
            from = e.from,
            to = e.to,
            "scroll animation"
        );
    }

    fn on_role_lookup(&mut self, e: &RoleLookupEvent) {
        if e.expected && e.matched == 0 {
            warn!(target: TARGET, role = e.role, "no element found for role");
        } else {
            debug!(target: TARGET, role = e.role, matched = e.matched, "role resolved");
        }
    }
}
