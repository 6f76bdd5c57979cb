// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! System color-scheme preference.

use alloc::boxed::Box;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, MediaQueryList, MediaQueryListEvent, Window};

use vitrine_core::theme::PREFERS_DARK_QUERY;

/// The `prefers-color-scheme: dark` query, if the browser supports it.
pub(crate) fn prefers_dark_query(window: &Window) -> Option<MediaQueryList> {
    window.match_media(PREFERS_DARK_QUERY).ok().flatten()
}

/// Calls `on_change` with the new value whenever the preference flips.
pub(crate) fn watch(query: &MediaQueryList, mut on_change: impl FnMut(bool) + 'static) {
    let closure = Closure::wrap(Box::new(move |event: Event| {
        if let Some(event) = event.dyn_ref::<MediaQueryListEvent>() {
            on_change(event.matches());
        }
    }) as Box<dyn FnMut(_)>);
    let _ = query.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
    closure.forget();
}
