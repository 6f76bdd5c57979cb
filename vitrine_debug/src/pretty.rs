// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Host times
//! are printed in milliseconds.

use std::io::Write;

use vitrine_core::theme::ThemeCause;
use vitrine_core::time::HostTime;
use vitrine_core::trace::{
    ActiveLinkEvent, AnimationPhase, RevealEvent, RoleLookupEvent, ScrollAnimationEvent,
    ThemeChangedEvent, ThrottleEvent, ThrottleKind, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    /// Skip per-invocation throttle lines, which are by far the noisiest.
    quiet_throttle: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("quiet_throttle", &self.quiet_throttle)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self::with_writer(writer)
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            quiet_throttle: false,
        }
    }

    /// Suppresses [`ThrottleEvent`] lines.
    #[must_use]
    pub fn quiet_throttle(mut self, quiet: bool) -> Self {
        self.quiet_throttle = quiet;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn ms(t: HostTime) -> f64 {
    t.ticks() as f64 / 1000.0
}

fn throttle_kind_name(kind: ThrottleKind) -> &'static str {
    match kind {
        ThrottleKind::Leading => "leading",
        ThrottleKind::Scheduled => "scheduled",
        ThrottleKind::Coalesced => "coalesced",
        ThrottleKind::Trailing => "trailing",
    }
}

fn cause_name(cause: ThemeCause) -> &'static str {
    match cause {
        ThemeCause::Restored => "restored",
        ThemeCause::System => "system",
        ThemeCause::Toggle => "toggle",
    }
}

fn phase_name(phase: AnimationPhase) -> &'static str {
    match phase {
        AnimationPhase::Started => "start",
        AnimationPhase::Superseded => "superseded",
        AnimationPhase::Finished => "finish",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_throttle(&mut self, e: &ThrottleEvent) {
        if self.quiet_throttle {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[throttle] {} {} at {:.1}ms",
            e.channel.as_str(),
            throttle_kind_name(e.kind),
            ms(e.at),
        );
    }

    fn on_theme_changed(&mut self, e: &ThemeChangedEvent) {
        let stored = match (e.persisted, e.persist_failed) {
            (true, _) => "stored",
            (false, true) => "FAILED",
            (false, false) => "-",
        };
        let _ = writeln!(
            self.writer,
            "[theme] mode={} cause={} persist={stored}",
            e.mode,
            cause_name(e.cause),
        );
    }

    fn on_active_link(&mut self, e: &ActiveLinkEvent) {
        let _ = writeln!(
            self.writer,
            "[nav] active={} scroll_y={:.0}",
            e.link, e.scroll_y,
        );
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        let _ = writeln!(
            self.writer,
            "[reveal] target={} remaining={}",
            e.target, e.remaining,
        );
    }

    fn on_scroll_animation(&mut self, e: &ScrollAnimationEvent) {
        let _ = writeln!(
            self.writer,
            "[scroll:{}] gen={} {:.0} -> {:.0} at {:.1}ms",
            phase_name(e.phase),
            e.token.generation(),
            e.from,
            e.to,
            ms(e.at),
        );
    }

    fn on_role_lookup(&mut self, e: &RoleLookupEvent) {
        let flag = if e.expected && e.matched == 0 {
            " MISSING"
        } else {
            ""
        };
        let _ = writeln!(
            self.writer,
            "[roles] {}={}{flag}",
            e.role, e.matched,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::theme::ThemeMode;
    use vitrine_core::trace::ThrottleChannel;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn pretty_print_theme() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_theme_changed(&ThemeChangedEvent {
            mode: ThemeMode::Dark,
            cause: ThemeCause::Toggle,
            persisted: true,
            persist_failed: false,
        });
        let out = output(sink);
        assert_eq!(out, "[theme] mode=dark cause=toggle persist=stored\n");
    }

    #[test]
    fn pretty_print_throttle_can_be_silenced() {
        let event = ThrottleEvent {
            channel: ThrottleChannel::Navigation,
            kind: ThrottleKind::Scheduled,
            at: HostTime(30_000),
        };

        let mut loud = PrettyPrintSink::with_writer(Vec::<u8>::new());
        loud.on_throttle(&event);
        let out = output(loud);
        assert!(out.contains("navigation scheduled"), "got: {out}");
        assert!(out.contains("30.0ms"), "got: {out}");

        let mut quiet = PrettyPrintSink::with_writer(Vec::<u8>::new()).quiet_throttle(true);
        quiet.on_throttle(&event);
        assert!(output(quiet).is_empty(), "throttle lines suppressed");
    }

    #[test]
    fn pretty_print_flags_missing_roles() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_role_lookup(&RoleLookupEvent {
            role: "navbar",
            matched: 0,
            expected: true,
        });
        sink.on_role_lookup(&RoleLookupEvent {
            role: "tilt",
            matched: 0,
            expected: false,
        });
        let out = output(sink);
        assert_eq!(out, "[roles] navbar=0 MISSING\n[roles] tilt=0\n");
    }

    #[test]
    fn pretty_print_reveal() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_reveal(&RevealEvent {
            target: 3,
            remaining: 1,
        });
        let out = output(sink);
        assert!(out.contains("[reveal] target=3 remaining=1"), "got: {out}");
    }
}
