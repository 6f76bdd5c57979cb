// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Throttled event handlers backed by `setTimeout`.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use vitrine_core::throttle::{Decision, Throttle};
use vitrine_core::time::{Duration, HostTime};
use vitrine_core::trace::{ThrottleChannel, ThrottleEvent, ThrottleKind};

use crate::{SharedSink, now, traced};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(handler: &JsValue, timeout: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn clear_timeout(id: i32);
}

/// An event handler that runs at most once per interval.
///
/// The first call runs immediately; calls inside the window arm one
/// trailing run at the window's end. Clones share state, so one instance can
/// be handed to several listeners.
#[derive(Clone)]
pub struct ThrottledCallback {
    inner: Rc<ThrottleInner>,
}

struct ThrottleInner {
    throttle: RefCell<Throttle>,
    callback: RefCell<Box<dyn FnMut()>>,
    /// The `setTimeout` handler. Holds a weak reference back to this state.
    timer: Closure<dyn FnMut()>,
    timer_id: Cell<Option<i32>>,
    channel: ThrottleChannel,
    sink: SharedSink,
}

impl ThrottledCallback {
    /// Wraps `callback` so it runs at most once per `interval`.
    pub fn new(
        interval: Duration,
        channel: ThrottleChannel,
        sink: SharedSink,
        callback: impl FnMut() + 'static,
    ) -> Self {
        let inner = Rc::new_cyclic(|weak: &Weak<ThrottleInner>| {
            let weak = weak.clone();
            ThrottleInner {
                throttle: RefCell::new(Throttle::new(interval)),
                callback: RefCell::new(Box::new(callback)),
                timer: Closure::wrap(Box::new(move || {
                    if let Some(inner) = weak.upgrade() {
                        inner.fire();
                    }
                }) as Box<dyn FnMut()>),
                timer_id: Cell::new(None),
                channel,
                sink,
            }
        });
        Self { inner }
    }

    /// Registers one raw invocation.
    pub fn invoke(&self) {
        let inner = &self.inner;
        let at = now();
        let decision = inner.throttle.borrow_mut().call(at, ());
        let kind = match decision {
            Decision::Run { cancel_pending, .. } => {
                if cancel_pending && let Some(id) = inner.timer_id.take() {
                    clear_timeout(id);
                }
                ThrottleKind::Leading
            }
            Decision::Schedule { delay } => {
                let id = set_timeout(inner.timer.as_ref(), delay.as_timeout_millis());
                inner.timer_id.set(Some(id));
                ThrottleKind::Scheduled
            }
            Decision::Coalesced => ThrottleKind::Coalesced,
        };
        inner.trace(kind, at);
        if kind == ThrottleKind::Leading {
            inner.run();
        }
    }

    /// Returns `true` while a trailing run is armed.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.throttle.borrow().is_pending()
    }
}

impl ThrottleInner {
    fn fire(&self) {
        self.timer_id.set(None);
        let at = now();
        let due = self.throttle.borrow_mut().fire(at).is_some();
        if due {
            self.trace(ThrottleKind::Trailing, at);
            self.run();
        }
    }

    fn run(&self) {
        // A handler that re-enters its own throttle is dropped, not run
        // recursively.
        if let Ok(mut callback) = self.callback.try_borrow_mut() {
            callback();
        }
    }

    fn trace(&self, kind: ThrottleKind, at: HostTime) {
        let event = ThrottleEvent {
            channel: self.channel,
            kind,
            at,
        };
        traced(&self.sink, |t| t.throttle(&event));
    }
}

impl Drop for ThrottleInner {
    fn drop(&mut self) {
        if let Some(id) = self.timer_id.take() {
            clear_timeout(id);
        }
    }
}

impl core::fmt::Debug for ThrottledCallback {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ThrottledCallback")
            .field("channel", &self.inner.channel)
            .field("pending", &self.is_pending())
            .finish_non_exhaustive()
    }
}
