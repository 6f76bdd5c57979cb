// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser backend for vitrine.
//!
//! This crate connects the controllers in `vitrine_core` to browser APIs:
//!
//! - [`RafLoop`]: `requestAnimationFrame` driver for smooth scrolls
//! - [`ThrottledCallback`]: a [`Throttle`] armed with `setTimeout`
//! - [`PageRoles`]: the page elements each behaviour acts on
//! - [`DomPresenter`]: applies computed changes to the DOM
//! - [`PageStore`]: `localStorage`-backed theme preferences
//! - [`install`]: wires every behaviour to its events through a
//!   [`PageController`]
//!
//! [`Throttle`]: vitrine_core::throttle::Throttle
//! [`PageController`]: vitrine_core::page::PageController

#![no_std]

extern crate alloc;

mod media;
mod observer;
mod page;
mod presenter;
mod raf;
mod roles;
mod storage;
mod timer;

pub use page::{Page, install, install_with};
pub use presenter::{ACTIVE_CLASS, DomPresenter, SCROLLED_CLASS, VISIBLE_CLASS};
pub use raf::RafLoop;
pub use roles::{NavLink, PageRoles, Selectors};
pub use storage::PageStore;
pub use timer::ThrottledCallback;
pub use vitrine_core::backend::Presenter;

use alloc::rc::Rc;
use core::cell::RefCell;

use vitrine_core::time::HostTime;
use vitrine_core::trace::{TraceSink, Tracer};

/// A trace sink shared by every listener on the page.
pub type SharedSink = Rc<RefCell<dyn TraceSink>>;

/// Returns the current host time from `performance.now()`.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis_f64(raf::performance_now())
}

/// Runs `f` with a tracer over `sink`.
///
/// The tracer discards events unless the `trace` feature is enabled, or
/// while the sink is already borrowed.
pub(crate) fn traced<R>(sink: &SharedSink, f: impl FnOnce(&mut Tracer<'_>) -> R) -> R {
    if cfg!(feature = "trace")
        && let Ok(mut guard) = sink.try_borrow_mut()
    {
        return f(&mut Tracer::new(&mut *guard));
    }
    f(&mut Tracer::none())
}
