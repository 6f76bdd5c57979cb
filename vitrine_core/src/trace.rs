// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for page controllers.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! host glue calls as controllers make decisions. All method bodies default
//! to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).

use crate::smooth_scroll::AnimationToken;
use crate::theme::{ThemeCause, ThemeChange, ThemeMode};
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which throttled handler a [`ThrottleEvent`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThrottleChannel {
    /// Navbar state and active link.
    Navigation,
    /// Back-to-top visibility.
    BackToTop,
    /// Parallax transforms.
    Parallax,
    /// Body offset on resize.
    Resize,
    /// Geometry-based reveal fallback.
    Reveal,
}

impl ThrottleChannel {
    /// Short lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Navigation => "navigation",
            Self::BackToTop => "back-to-top",
            Self::Parallax => "parallax",
            Self::Resize => "resize",
            Self::Reveal => "reveal",
        }
    }
}

/// What the throttle did with one invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThrottleKind {
    /// Ran immediately.
    Leading,
    /// Deferred to the end of the window.
    Scheduled,
    /// Dropped; a trailing call was already pending.
    Coalesced,
    /// The deferred call ran.
    Trailing,
}

/// Lifecycle point of a scroll animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationPhase {
    /// A new animation began.
    Started,
    /// An in-flight animation was cancelled by a newer one.
    Superseded,
    /// The animation reached its target.
    Finished,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted for each raw invocation of a throttled handler.
#[derive(Clone, Copy, Debug)]
pub struct ThrottleEvent {
    /// Which handler.
    pub channel: ThrottleChannel,
    /// What happened.
    pub kind: ThrottleKind,
    /// Host time of the decision.
    pub at: HostTime,
}

/// Emitted on every theme transition.
#[derive(Clone, Copy, Debug)]
pub struct ThemeChangedEvent {
    /// New mode.
    pub mode: ThemeMode,
    /// What triggered it.
    pub cause: ThemeCause,
    /// Whether the mode was written to storage.
    pub persisted: bool,
    /// Whether a storage write was attempted and failed.
    pub persist_failed: bool,
}

impl From<&ThemeChange> for ThemeChangedEvent {
    fn from(change: &ThemeChange) -> Self {
        Self {
            mode: change.mode,
            cause: change.cause,
            persisted: change.persisted,
            persist_failed: change.persist_error.is_some(),
        }
    }
}

/// Emitted when the highlighted nav link changes.
#[derive(Clone, Copy, Debug)]
pub struct ActiveLinkEvent {
    /// Index of the newly active link.
    pub link: usize,
    /// Scroll offset that selected it.
    pub scroll_y: f64,
}

/// Emitted when a reveal candidate is revealed.
#[derive(Clone, Copy, Debug)]
pub struct RevealEvent {
    /// Index of the candidate.
    pub target: usize,
    /// Candidates still pending afterwards.
    pub remaining: usize,
}

/// Emitted at scroll animation lifecycle points.
#[derive(Clone, Copy, Debug)]
pub struct ScrollAnimationEvent {
    /// Lifecycle point.
    pub phase: AnimationPhase,
    /// Animation the event refers to.
    pub token: AnimationToken,
    /// Start position.
    pub from: f64,
    /// Target position.
    pub to: f64,
    /// Host time of the event.
    pub at: HostTime,
}

/// Emitted once per role while resolving page elements at setup.
#[derive(Clone, Copy, Debug)]
pub struct RoleLookupEvent {
    /// Logical role name (e.g. `navbar`).
    pub role: &'static str,
    /// Number of elements found.
    pub matched: usize,
    /// Whether the page needs at least one element for this role to be
    /// fully functional.
    pub expected: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the page controllers.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called for each throttled invocation.
    fn on_throttle(&mut self, e: &ThrottleEvent) {
        _ = e;
    }

    /// Called on every theme transition.
    fn on_theme_changed(&mut self, e: &ThemeChangedEvent) {
        _ = e;
    }

    /// Called when the active nav link changes.
    fn on_active_link(&mut self, e: &ActiveLinkEvent) {
        _ = e;
    }

    /// Called when a candidate is revealed.
    fn on_reveal(&mut self, e: &RevealEvent) {
        _ = e;
    }

    /// Called at scroll animation lifecycle points.
    fn on_scroll_animation(&mut self, e: &ScrollAnimationEvent) {
        _ = e;
    }

    /// Called for each role resolved at setup.
    fn on_role_lookup(&mut self, e: &RoleLookupEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`ThrottleEvent`].
    #[inline]
    pub fn throttle(&mut self, e: &ThrottleEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_throttle(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ThemeChangedEvent`].
    #[inline]
    pub fn theme_changed(&mut self, e: &ThemeChangedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_theme_changed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`ActiveLinkEvent`].
    #[inline]
    pub fn active_link(&mut self, e: &ActiveLinkEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_active_link(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RevealEvent`].
    #[inline]
    pub fn reveal(&mut self, e: &RevealEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_reveal(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ScrollAnimationEvent`].
    #[inline]
    pub fn scroll_animation(&mut self, e: &ScrollAnimationEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_scroll_animation(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RoleLookupEvent`].
    #[inline]
    pub fn role_lookup(&mut self, e: &RoleLookupEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_role_lookup(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}
