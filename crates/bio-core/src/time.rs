//! Simulation time model.
//!
//! # Design
//!
//! Reactions fire at arbitrary points on a continuous time axis, so time is a
//! `f64` wrapped in [`Time`].  `Time` is totally ordered (via
//! `f64::total_cmp`) so it can key the event queue directly; `+∞` means
//! "never" and is what a reaction with zero propensity is scheduled at.
//!
//! The inner value must never be NaN.  Every constructor in the workspace
//! produces finite values or `+∞`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

// ── Time ──────────────────────────────────────────────────────────────────────

/// An absolute simulation time.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Time(pub f64);

impl Time {
    pub const ZERO: Time = Time(0.0);
    pub const INFINITY: Time = Time(f64::INFINITY);

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// `true` unless this is the "never" sentinel.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Time elapsed from `earlier` to `self` (may be negative).
    #[inline]
    pub fn since(self, earlier: Time) -> f64 {
        self.0 - earlier.0
    }
}

impl PartialEq for Time {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Time {}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Time {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Time {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl std::ops::Add<f64> for Time {
    type Output = Time;
    #[inline]
    fn add(self, rhs: f64) -> Time {
        Time(self.0 + rhs)
    }
}

impl std::ops::Sub for Time {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: Time) -> f64 {
        self.0 - rhs.0
    }
}

impl From<f64> for Time {
    fn from(t: f64) -> Time {
        Time(t)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_finite() {
            write!(f, "t={:.6}", self.0)
        } else {
            f.write_str("t=∞")
        }
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current simulation time and how many events have fired.
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    /// Time of the most recently processed event.
    pub current_time: Time,
    /// Number of events processed so far.
    pub steps: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock to `time` and count one step.
    ///
    /// # Panics
    /// Panics in debug mode if `time` is earlier than the current time.
    #[inline]
    pub fn advance_to(&mut self, time: Time) {
        debug_assert!(time >= self.current_time, "time went backwards: {time} < {}", self.current_time);
        self.current_time = time;
        self.steps += 1;
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (step {})", self.current_time, self.steps)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically built by the application crate and passed to the simulation
/// builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Events scheduled after this time are never processed.
    pub end_time: Time,

    /// Stop after this many events.  `None` means no step limit.
    pub max_steps: Option<u64>,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl SimConfig {
    /// `true` once either the step limit or the end time is exceeded.
    #[inline]
    pub fn is_finished(&self, clock: &SimClock, next_event: Time) -> bool {
        next_event > self.end_time || self.max_steps.is_some_and(|max| clock.steps >= max)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new()
    }
}
