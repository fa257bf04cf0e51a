//! `ReactionQueue`: reactions ordered by next occurrence.
//!
//! Entries are keyed by `(Time, ReactionId)`, so ties on time resolve to the
//! lower reaction id and the pop order is fully deterministic.  Reactions
//! whose next occurrence is infinite are kept out of the set entirely.
//!
//! Rescheduling is O(log R): the previous key of every reaction is
//! remembered, removed, and the new one inserted.

use std::collections::BTreeSet;

use bio_core::{ReactionId, Time};

#[derive(Debug, Default)]
pub struct ReactionQueue {
    ordered: BTreeSet<(Time, ReactionId)>,
    /// Current key per reaction, indexed by `ReactionId`.
    scheduled: Vec<Option<Time>>,
}

impl ReactionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the next occurrence of `reaction` to `time`, replacing any
    /// previous entry.  An infinite `time` just unschedules it.
    pub fn schedule(&mut self, reaction: ReactionId, time: Time) {
        self.unschedule(reaction);
        if !time.is_finite() {
            return;
        }
        if self.scheduled.len() <= reaction.index() {
            self.scheduled.resize(reaction.index() + 1, None);
        }
        self.scheduled[reaction.index()] = Some(time);
        self.ordered.insert((time, reaction));
    }

    /// Remove `reaction` from the queue.  Returns `false` if it was not queued.
    pub fn unschedule(&mut self, reaction: ReactionId) -> bool {
        match self.scheduled.get_mut(reaction.index()).and_then(Option::take) {
            Some(time) => self.ordered.remove(&(time, reaction)),
            None => false,
        }
    }

    /// The earliest entry, without removing it.
    pub fn peek(&self) -> Option<(Time, ReactionId)> {
        self.ordered.first().copied()
    }

    /// Remove and return the earliest entry.
    pub fn pop(&mut self) -> Option<(Time, ReactionId)> {
        let (time, reaction) = self.ordered.pop_first()?;
        self.scheduled[reaction.index()] = None;
        Some((time, reaction))
    }

    /// Scheduled time of `reaction`, if queued.
    pub fn time_of(&self, reaction: ReactionId) -> Option<Time> {
        self.scheduled.get(reaction.index()).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
