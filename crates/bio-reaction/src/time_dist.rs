//! Firing-time distributions.
//!
//! A [`TimeDistribution`] owns the "when does this reaction fire next?"
//! question.  The reaction recomputes its propensity and hands it to
//! [`update`][TimeDistribution::update]; the scheduler then reads
//! [`next_occurrence`][TimeDistribution::next_occurrence].
//!
//! | Type              | Next occurrence                                          |
//! |-------------------|----------------------------------------------------------|
//! | `ExponentialTime` | Gibson–Bruck next-reaction sample; `∞` at zero propensity |
//! | `DiracComb`       | `start`, then every `1 / frequency`                      |
//! | `Trigger`         | `at`, once; `∞` afterwards                               |

use std::fmt;

use bio_core::Time;
use rand::{Rng, RngCore};

/// Computes the next firing time of a reaction.
///
/// Implementations receive randomness through `update` and never own a
/// generator, so a reaction and all its clones draw from one shared stream.
pub trait TimeDistribution: fmt::Debug {
    /// Absolute time of the next firing; [`Time::INFINITY`] for never.
    fn next_occurrence(&self) -> Time;

    /// Nominal rate; multiplied into the reaction propensity.
    fn rate(&self) -> f64;

    /// Recompute the next occurrence at `now`.
    ///
    /// `executed` is `true` right after the owning reaction fired.
    fn update(&mut self, now: Time, executed: bool, propensity: f64, rng: &mut dyn RngCore);

    /// A fresh distribution with the same parameters for a reaction copy
    /// created at `now`.
    fn clone_on_new_node(&self, now: Time) -> Box<dyn TimeDistribution>;
}

// ── ExponentialTime ───────────────────────────────────────────────────────────

/// Exponentially distributed waiting times (next-reaction method).
///
/// - propensity becomes non-zero, or the reaction just fired: fresh sample
///   `base + Exp(propensity)` with `base = max(now, start)`;
/// - propensity changes without execution: the pending time is rescaled,
///   `now + old / new × (τ − now)`;
/// - propensity drops to zero: `τ = ∞`.
#[derive(Clone, Debug, PartialEq)]
pub struct ExponentialTime {
    rate:           f64,
    start:          Time,
    tau:            Time,
    old_propensity: f64,
}

impl ExponentialTime {
    pub fn new(rate: f64, start: Time) -> Self {
        Self {
            rate,
            start,
            tau: Time::INFINITY,
            old_propensity: 0.0,
        }
    }

    fn sample(&self, now: Time, propensity: f64, rng: &mut dyn RngCore) -> Time {
        // 1 - U lies in (0, 1], so the logarithm is finite.
        let u: f64 = 1.0 - rng.r#gen::<f64>();
        now.max(self.start) + (-u.ln() / propensity)
    }
}

impl TimeDistribution for ExponentialTime {
    fn next_occurrence(&self) -> Time {
        self.tau
    }

    fn rate(&self) -> f64 {
        self.rate
    }

    fn update(&mut self, now: Time, executed: bool, propensity: f64, rng: &mut dyn RngCore) {
        let old = self.old_propensity;
        if propensity <= 0.0 {
            self.tau = Time::INFINITY;
        } else if executed || old <= 0.0 || !self.tau.is_finite() {
            self.tau = self.sample(now, propensity, rng);
        } else if old != propensity {
            let base = now.max(self.start);
            self.tau = base + old / propensity * self.tau.since(base);
        }
        self.old_propensity = propensity.max(0.0);
    }

    fn clone_on_new_node(&self, now: Time) -> Box<dyn TimeDistribution> {
        Box::new(ExponentialTime::new(self.rate, now))
    }
}

// ── DiracComb ─────────────────────────────────────────────────────────────────

/// Deterministic periodic firing, independent of propensity.
#[derive(Clone, Debug, PartialEq)]
pub struct DiracComb {
    start:     Time,
    frequency: f64,
    next:      Time,
}

impl DiracComb {
    /// Fires at `start`, then every `1 / frequency` time units.
    ///
    /// A non-positive or non-finite frequency never fires.
    pub fn new(start: Time, frequency: f64) -> Self {
        let next = if frequency > 0.0 && frequency.is_finite() {
            start
        } else {
            Time::INFINITY
        };
        Self { start, frequency, next }
    }

    pub fn period(&self) -> f64 {
        1.0 / self.frequency
    }
}

impl TimeDistribution for DiracComb {
    fn next_occurrence(&self) -> Time {
        self.next
    }

    fn rate(&self) -> f64 {
        self.frequency
    }

    fn update(&mut self, now: Time, executed: bool, _propensity: f64, _rng: &mut dyn RngCore) {
        if executed && self.next.is_finite() && now >= self.next {
            self.next = self.next + self.period();
        }
    }

    fn clone_on_new_node(&self, now: Time) -> Box<dyn TimeDistribution> {
        // Keep the comb's phase: the copy fires on the same grid.
        let mut copy = DiracComb::new(self.start, self.frequency);
        while copy.next.is_finite() && copy.next < now {
            copy.next = copy.next + copy.period();
        }
        Box::new(copy)
    }
}

// ── Trigger ───────────────────────────────────────────────────────────────────

/// Fires exactly once, at `at`.
#[derive(Clone, Debug, PartialEq)]
pub struct Trigger {
    at:    Time,
    fired: bool,
}

impl Trigger {
    pub fn new(at: Time) -> Self {
        Self { at, fired: false }
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

impl TimeDistribution for Trigger {
    fn next_occurrence(&self) -> Time {
        if self.fired { Time::INFINITY } else { self.at }
    }

    fn rate(&self) -> f64 {
        0.0
    }

    fn update(&mut self, now: Time, executed: bool, _propensity: f64, _rng: &mut dyn RngCore) {
        if executed && now >= self.at {
            self.fired = true;
        }
    }

    fn clone_on_new_node(&self, now: Time) -> Box<dyn TimeDistribution> {
        let mut copy = Trigger::new(self.at);
        copy.fired = self.fired || now > self.at;
        Box::new(copy)
    }
}
