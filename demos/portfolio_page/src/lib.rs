// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Portfolio page demo.
//!
//! Installs every page behaviour on `index.html` and routes diagnostics to
//! the browser console through `tracing`.
//!
//! Build with: `wasm-pack build --target web demos/portfolio_page`
//! Then serve `demos/portfolio_page/` and open `index.html`.

#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};
use vitrine_debug::TracingSink;
use vitrine_web::SharedSink;
use wasm_bindgen::prelude::*;

/// Buffers one formatted event and logs it to the console when dropped.
#[derive(Debug, Default)]
struct ConsoleWriter {
    line: Vec<u8>,
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.line.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.line);
        let text = text.trim_end();
        if !text.is_empty() {
            web_sys::console::log_1(&JsValue::from_str(text));
        }
    }
}

/// Entry point for the portfolio demo.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    // The wasm target has no wall clock for timestamps.
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(ConsoleWriter::default)
                .with_ansi(false)
                .without_time(),
        )
        .with(LevelFilter::DEBUG)
        .try_init();

    let sink: SharedSink = Rc::new(RefCell::new(TracingSink::new()));
    let page = vitrine_web::install(sink)?;
    tracing::info!(theme = ?page.theme_mode(), "portfolio page installed");
    Ok(())
}
