//! Smooth scrolling
//!
//! A single owned, time-based scroll animation: ease-in-out quadratic over
//! a fixed duration, stepped once per frame, snapping to the exact target
//! at the end. Starting a new animation replaces any in-flight one, so two
//! animations can never race.

use std::time::{Duration, Instant};

/// Ease-in-out quadratic curve over `t` in `[0, 1]`.
pub fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - 0.5 * (-2.0 * t + 2.0).powi(2)
    }
}

#[derive(Debug, Clone, Copy)]
struct Animation {
    start: f64,
    target: f64,
    started_at: Instant,
    duration: Duration,
}

/// One frame of an animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollFrame {
    pub position: f64,
    /// The animation reached its target and has been released
    pub done: bool,
}

#[derive(Debug, Default)]
pub struct SmoothScroller {
    animation: Option<Animation>,
}

impl SmoothScroller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin animating from `from` to `target`, replacing any in-flight
    /// animation.
    pub fn start(&mut self, from: f64, target: f64, now: Instant, duration: Duration) {
        self.animation = Some(Animation {
            start: from,
            target,
            started_at: now,
            duration,
        });
    }

    /// Drop any in-flight animation. Returns whether one was running.
    pub fn cancel(&mut self) -> bool {
        self.animation.take().is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn target(&self) -> Option<f64> {
        self.animation.map(|animation| animation.target)
    }

    /// Advance to `now`. `None` when idle. The final frame lands on the
    /// exact target regardless of frame timing jitter.
    pub fn tick(&mut self, now: Instant) -> Option<ScrollFrame> {
        let animation = self.animation?;
        let elapsed = now.saturating_duration_since(animation.started_at);

        if animation.duration.is_zero() || elapsed >= animation.duration {
            self.animation = None;
            return Some(ScrollFrame {
                position: animation.target,
                done: true,
            });
        }

        let t = elapsed.as_secs_f64() / animation.duration.as_secs_f64();
        let position = animation.start + (animation.target - animation.start) * ease_in_out_quad(t);
        Some(ScrollFrame {
            position,
            done: false,
        })
    }
}
