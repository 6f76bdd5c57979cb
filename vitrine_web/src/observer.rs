// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `IntersectionObserver` feed for reveal-on-scroll.

use alloc::boxed::Box;
use alloc::vec::Vec;

use js_sys::{Array, Reflect};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use vitrine_core::config::RevealOptions;
use vitrine_core::reveal::IntersectionSample;

/// Returns `true` if the browser provides `IntersectionObserver`.
pub(crate) fn supported(window: &Window) -> bool {
    Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

/// Observes `elements` and passes each batch of entries to `on_samples`.
///
/// `on_samples` returns the indices it revealed; those elements are
/// unobserved.
pub(crate) fn observe(
    elements: Vec<HtmlElement>,
    options: &RevealOptions,
    mut on_samples: impl FnMut(Vec<IntersectionSample>) -> Vec<usize> + 'static,
) -> Result<(), JsValue> {
    let targets = elements.clone();
    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        let samples = entries
            .iter()
            .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
            .filter_map(|entry| {
                let node = JsValue::from(entry.target());
                let target = targets
                    .iter()
                    .position(|el| AsRef::<JsValue>::as_ref(el) == &node)?;
                Some(IntersectionSample {
                    target,
                    is_intersecting: entry.is_intersecting(),
                })
            })
            .collect();
        for el in revealed_targets(&targets, &on_samples(samples)) {
            observer.unobserve(el);
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_root_margin(&options.root_margin());
    init.set_threshold(&JsValue::from_f64(options.threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    for el in &elements {
        observer.observe(el);
    }
    callback.forget();
    Ok(())
}

/// Elements to stop observing once `revealed` have been revealed.
fn revealed_targets<'a, T>(targets: &'a [T], revealed: &'a [usize]) -> impl Iterator<Item = &'a T> {
    revealed.iter().filter_map(|&index| targets.get(index))
}
