// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leading-edge throttle with a single trailing call.
//!
//! [`Throttle`] is the decision half of a rate limiter. It never touches a
//! timer itself: the host calls [`Throttle::call`] on every raw event and
//! acts on the returned [`Decision`], then calls [`Throttle::fire`] when the
//! deferred timer it scheduled elapses.
//!
//! ```text
//!   interval = 100ms
//!   t=0    call ─► Run              (leading edge)
//!   t=30   call ─► Schedule(70ms)   (args stored)
//!   t=60   call ─► Coalesced
//!   t=90   call ─► Coalesced
//!   t=100  fire ─► Some(args)       (trailing edge)
//! ```
//!
//! The trailing call carries the arguments of the call that scheduled it;
//! later calls inside the same window are dropped.

use crate::time::{Duration, HostTime};

/// What the host should do with one raw invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision<T> {
    /// Run the callback now with these arguments.
    Run {
        /// Arguments of this invocation.
        args: T,
        /// A trailing timer was pending and must be cleared; its call is
        /// superseded by this one.
        cancel_pending: bool,
    },
    /// Arm a timer for `delay`; call [`Throttle::fire`] when it elapses.
    Schedule {
        /// Time remaining in the current window.
        delay: Duration,
    },
    /// A trailing call is already pending; nothing to do.
    Coalesced,
}

/// Rate limiter state for one wrapped callback.
///
/// `T` is the argument type carried to the trailing call; scroll and resize
/// handlers use `()`.
#[derive(Clone, Debug)]
pub struct Throttle<T = ()> {
    interval: Duration,
    last_run: Option<HostTime>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    /// Creates a throttle that runs at most once per `interval`.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
            pending: None,
        }
    }

    /// Returns the configured interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `true` while a trailing call is scheduled.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Registers one raw invocation at `now`.
    pub fn call(&mut self, now: HostTime, args: T) -> Decision<T> {
        let elapsed = self
            .last_run
            .map(|last| now.saturating_duration_since(last));
        match elapsed {
            Some(elapsed) if elapsed < self.interval => {
                if self.pending.is_some() {
                    Decision::Coalesced
                } else {
                    self.pending = Some(args);
                    Decision::Schedule {
                        delay: self.interval - elapsed,
                    }
                }
            }
            _ => {
                let cancel_pending = self.pending.take().is_some();
                self.last_run = Some(now);
                Decision::Run {
                    args,
                    cancel_pending,
                }
            }
        }
    }

    /// Resolves the trailing timer at `now`.
    ///
    /// Returns the stored arguments if the trailing call is still due, or
    /// `None` if it was superseded by a leading run in the meantime.
    pub fn fire(&mut self, now: HostTime) -> Option<T> {
        let args = self.pending.take()?;
        self.last_run = Some(now);
        Some(args)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    const MS: u64 = 1000;

    /// Replays raw calls against a throttle with a fake timer and returns the
    /// times (and args) at which the callback actually ran.
    fn simulate(interval_ms: u64, calls: &[(u64, u32)], until_ms: u64) -> Vec<(u64, u32)> {
        let mut throttle = Throttle::new(Duration::from_millis(interval_ms));
        let mut timer: Option<HostTime> = None;
        let mut runs = Vec::new();
        let mut calls = calls.iter().peekable();

        for t in 0..=until_ms * MS {
            let now = HostTime(t);
            if timer == Some(now) {
                timer = None;
                if let Some(args) = throttle.fire(now) {
                    runs.push((t / MS, args));
                }
            }
            while let Some(&&(at, args)) = calls.peek() {
                if at * MS != t {
                    break;
                }
                calls.next();
                match throttle.call(now, args) {
                    Decision::Run {
                        args,
                        cancel_pending,
                    } => {
                        if cancel_pending {
                            timer = None;
                        }
                        runs.push((t / MS, args));
                    }
                    Decision::Schedule { delay } => timer = Some(now + delay),
                    Decision::Coalesced => {}
                }
            }
        }
        runs
    }

    #[test]
    fn burst_yields_leading_and_single_trailing_run() {
        let runs = simulate(100, &[(0, 0), (30, 1), (60, 2), (90, 3)], 400);
        assert_eq!(
            runs,
            [(0, 0), (100, 1)],
            "one leading run at t=0 and one trailing run at t=100"
        );
    }

    #[test]
    fn trailing_call_uses_scheduling_arguments() {
        let mut throttle = Throttle::new(Duration::from_millis(50));
        assert!(matches!(
            throttle.call(HostTime(0), "a"),
            Decision::Run { args: "a", .. }
        ));
        assert_eq!(
            throttle.call(HostTime(10 * MS), "b"),
            Decision::Schedule {
                delay: Duration::from_millis(40)
            }
        );
        assert_eq!(throttle.call(HostTime(20 * MS), "c"), Decision::Coalesced);
        assert_eq!(throttle.fire(HostTime(50 * MS)), Some("b"));
        assert!(!throttle.is_pending(), "trailing call consumed");
    }

    #[test]
    fn spaced_calls_all_run_immediately() {
        let runs = simulate(100, &[(0, 0), (150, 1), (300, 2)], 500);
        assert_eq!(runs, [(0, 0), (150, 1), (300, 2)]);
    }

    #[test]
    fn late_timer_is_superseded_by_leading_run() {
        let mut throttle = Throttle::new(Duration::from_millis(100));
        let _ = throttle.call(HostTime(0), 0);
        assert!(matches!(
            throttle.call(HostTime(50 * MS), 1),
            Decision::Schedule { .. }
        ));
        // The host's timer is late; a fresh call past the window runs now.
        assert_eq!(
            throttle.call(HostTime(130 * MS), 2),
            Decision::Run {
                args: 2,
                cancel_pending: true
            }
        );
        assert_eq!(throttle.fire(HostTime(131 * MS)), None, "stale timer is a no-op");
    }

    #[test]
    fn trailing_run_restarts_the_window() {
        let runs = simulate(100, &[(0, 0), (10, 1), (150, 2), (210, 3)], 500);
        // Trailing at 100 resets `last`; 150 is inside the new window, so it
        // trails at 200. 210 is inside that window and trails at 300.
        assert_eq!(runs, [(0, 0), (100, 1), (200, 2), (300, 3)]);
    }
}
