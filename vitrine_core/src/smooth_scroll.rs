// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Eased, cancellable vertical scroll animations.
//!
//! [`ScrollAnimation`] is a pure function of time: given its start
//! position, target, start time and duration it yields the scroll position
//! for any later instant.
//!
//! [`SmoothScroller`] owns at most one animation at a time. Starting a new
//! one hands out a fresh [`AnimationToken`] and invalidates the previous
//! token, so a frame driver still holding the old token stops on its next
//! step instead of fighting the new animation for the scroll position.

use crate::easing::Easing;
use crate::time::{Duration, HostTime};

/// A single scroll from `from` to `to` over `duration`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollAnimation {
    /// Scroll position when the animation began.
    pub from: f64,
    /// Target scroll position.
    pub to: f64,
    /// Host time at which the animation began.
    pub start: HostTime,
    /// Total animation length.
    pub duration: Duration,
    /// Timing curve.
    pub easing: Easing,
}

/// One evaluated animation step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSample {
    /// Scroll position to apply.
    pub y: f64,
    /// Normalized time in `[0, 1]`.
    pub progress: f64,
    /// `true` once `progress` reached 1; no further steps are needed.
    pub finished: bool,
}

impl ScrollAnimation {
    /// Creates an ease-in-out-cubic animation.
    #[must_use]
    pub fn new(from: f64, to: f64, start: HostTime, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing: Easing::InOutCubic,
        }
    }

    /// Normalized time at `now`, clamped to `[0, 1]`.
    ///
    /// A zero duration is complete immediately.
    #[must_use]
    pub fn progress_at(&self, now: HostTime) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.ticks() as f64 / self.duration.ticks() as f64).min(1.0)
    }

    /// Evaluates the animation at `now`.
    #[must_use]
    pub fn sample(&self, now: HostTime) -> ScrollSample {
        let progress = self.progress_at(now);
        let y = self.from + (self.to - self.from) * self.easing.apply(progress);
        ScrollSample {
            y,
            progress,
            finished: progress >= 1.0,
        }
    }
}

/// Identifies one started animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimationToken(u64);

impl AnimationToken {
    /// Returns the generation number behind this token.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }
}

/// Result of [`SmoothScroller::begin`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Started {
    /// Token for the new animation.
    pub token: AnimationToken,
    /// Token of the in-flight animation this one replaced, if any.
    pub superseded: Option<AnimationToken>,
}

/// Owner of the page's single in-flight scroll animation.
#[derive(Clone, Debug, Default)]
pub struct SmoothScroller {
    generation: u64,
    active: Option<(AnimationToken, ScrollAnimation)>,
}

impl SmoothScroller {
    /// Creates an idle scroller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new animation, cancelling any in-flight one.
    pub fn begin(&mut self, animation: ScrollAnimation) -> Started {
        self.generation += 1;
        let token = AnimationToken(self.generation);
        let superseded = self.active.replace((token, animation)).map(|(old, _)| old);
        Started { token, superseded }
    }

    /// Advances the animation identified by `token` to `now`.
    ///
    /// Returns `None` if `token` is no longer current (superseded,
    /// cancelled or already finished); the caller should stop driving it.
    pub fn step(&mut self, token: AnimationToken, now: HostTime) -> Option<ScrollSample> {
        let (current, animation) = self.active?;
        if current != token {
            return None;
        }
        let sample = animation.sample(now);
        if sample.finished {
            self.active = None;
        }
        Some(sample)
    }

    /// Advances whichever animation is current.
    pub fn step_current(&mut self, now: HostTime) -> Option<(AnimationToken, ScrollSample)> {
        let (token, _) = self.active?;
        self.step(token, now).map(|sample| (token, sample))
    }

    /// Cancels the in-flight animation, returning its token.
    pub fn cancel(&mut self) -> Option<AnimationToken> {
        self.active.take().map(|(token, _)| token)
    }

    /// Returns the in-flight animation, if any.
    #[must_use]
    pub fn current(&self) -> Option<&ScrollAnimation> {
        self.active.as_ref().map(|(_, animation)| animation)
    }

    /// Returns `true` while an animation is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> HostTime {
        HostTime(v * 1000)
    }

    #[test]
    fn sample_follows_curve() {
        let anim = ScrollAnimation::new(100.0, 500.0, ms(1000), Duration::from_millis(650));
        assert_eq!(anim.sample(ms(1000)).y, 100.0);
        let mid = anim.sample(ms(1325));
        assert!((mid.y - 300.0).abs() < 1e-9, "midpoint is halfway: {}", mid.y);
        assert!(!mid.finished, "midpoint is not finished");
        let end = anim.sample(ms(1650));
        assert_eq!(end.y, 500.0);
        assert!(end.finished, "end is finished");
        assert_eq!(anim.sample(ms(5000)).y, 500.0, "clamps past the end");
    }

    #[test]
    fn sample_before_start_stays_at_origin() {
        let anim = ScrollAnimation::new(40.0, 0.0, ms(100), Duration::from_millis(600));
        assert_eq!(anim.sample(ms(50)).y, 40.0);
    }

    #[test]
    fn zero_duration_jumps_to_target() {
        let anim = ScrollAnimation::new(0.0, 800.0, ms(0), Duration::ZERO);
        let s = anim.sample(ms(0));
        assert_eq!(s.y, 800.0);
        assert!(s.finished, "zero duration finishes immediately");
    }

    #[test]
    fn scroller_finishes_and_goes_idle() {
        let mut scroller = SmoothScroller::new();
        let started = scroller.begin(ScrollAnimation::new(
            0.0,
            100.0,
            ms(0),
            Duration::from_millis(100),
        ));
        assert_eq!(started.superseded, None);
        assert!(scroller.step(started.token, ms(50)).is_some());
        let last = scroller.step(started.token, ms(100)).unwrap();
        assert!(last.finished, "reaches t = 1");
        assert!(!scroller.is_animating(), "idle after finishing");
        assert_eq!(scroller.step(started.token, ms(116)), None);
    }

    #[test]
    fn new_animation_cancels_in_flight_one() {
        let mut scroller = SmoothScroller::new();
        let first = scroller.begin(ScrollAnimation::new(
            0.0,
            1000.0,
            ms(0),
            Duration::from_millis(650),
        ));
        let _ = scroller.step(first.token, ms(16));
        let second = scroller.begin(ScrollAnimation::new(
            200.0,
            0.0,
            ms(20),
            Duration::from_millis(600),
        ));
        assert_eq!(second.superseded, Some(first.token));
        assert_ne!(first.token, second.token);
        assert_eq!(
            scroller.step(first.token, ms(32)),
            None,
            "stale driver must stop"
        );
        let (token, sample) = scroller.step_current(ms(32)).unwrap();
        assert_eq!(token, second.token);
        assert!(sample.y < 200.0, "second animation heads to 0");
    }

    #[test]
    fn cancel_returns_token() {
        let mut scroller = SmoothScroller::new();
        let started = scroller.begin(ScrollAnimation::new(
            0.0,
            10.0,
            ms(0),
            Duration::from_millis(10),
        ));
        assert_eq!(scroller.cancel(), Some(started.token));
        assert_eq!(scroller.cancel(), None);
        assert!(scroller.current().is_none());
    }
}
