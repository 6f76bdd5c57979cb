// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and `tracing` bridges for vitrine diagnostics.
//!
//! This crate provides [`TraceSink`](vitrine_core::trace::TraceSink)
//! implementations for development:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`log::TracingSink`]: forwards events to the `tracing` ecosystem, so a
//!   page can share one subscriber with the rest of the application.

pub mod log;
pub mod pretty;

pub use log::TracingSink;
pub use pretty::PrettyPrintSink;
