// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-independent state machines for scroll-driven page effects.
//!
//! `vitrine_core` holds every decision a portfolio page makes in response to
//! browser input, with none of the browser. It is `no_std` compatible (with
//! `alloc`) so the same logic runs under `wasm32-unknown-unknown` and in
//! native unit tests.
//!
//! # Architecture
//!
//! Each controller is an explicit object constructed once at setup. Host
//! glue feeds it geometry and timestamps and applies what it returns:
//!
//! ```text
//!   browser event (scroll, resize, pointer, click, media change)
//!       │
//!       ▼
//!   Throttle::call() ──► Decision::{Run, Schedule, Coalesced}
//!       │
//!       ▼
//!   ScrollAnimator / ThemeController / RevealController / tilt / navigation
//!       │
//!       ▼
//!   ScrollChanges, ThemeChange, Tilt, reveal indices ──► Presenter
//! ```
//!
//! **[`throttle`]** — Leading-edge rate limiter with one coalesced trailing
//! call per window.
//!
//! **[`scroll`]** — Navbar, active-link, back-to-top, body-offset and
//! parallax state derived from the scroll position.
//!
//! **[`theme`]** — Light/dark mode with persisted explicit preference and
//! system-preference fallback, plus the palette stylesheet.
//!
//! **[`reveal`]** — One-shot reveal-on-intersection bookkeeping and the
//! viewport geometry behind it.
//!
//! **[`tilt`]** — Pointer-to-rotation mapping for tilt cards.
//!
//! **[`smooth_scroll`]** — Eased, cancellable scroll animations.
//!
//! **[`navigation`]** — Anchor resolution and scroll-target arithmetic.
//!
//! **[`page`]** — [`PageController`](page::PageController), which routes
//! host events through every controller above to a presenter, reading
//! geometry from a [`PageHost`](page::PageHost).
//!
//! **[`backend`]** — The [`Presenter`](backend::Presenter) trait that host
//! backends implement to apply computed changes.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types,
//! with a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod config;
pub mod easing;
mod error;
pub mod navigation;
pub mod page;
pub mod reveal;
pub mod scroll;
pub mod smooth_scroll;
pub mod theme;
pub mod throttle;
pub mod tilt;
pub mod time;
pub mod trace;

pub use error::Error;
