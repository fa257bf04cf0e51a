//! Simulation observer trait for progress reporting and data collection.

use bio_core::{NodeId, ReactionId, Time};
use bio_env::Environment;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// event loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: firing counter
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct FiringCounter { fired: usize, targeted: usize }
///
/// impl SimObserver for FiringCounter {
///     fn on_reaction_fired(&mut self, _t: Time, _r: ReactionId, _n: NodeId, target: Option<NodeId>) {
///         self.fired += 1;
///         self.targeted += usize::from(target.is_some());
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before the event at `time` is processed.
    fn on_step_start(&mut self, _time: Time) {}

    /// Called after `reaction` on `node` executed its actions.
    ///
    /// `target` is the neighbor its neighbor actions were applied to, if any.
    /// Not called for events whose conditions no longer held.
    fn on_reaction_fired(
        &mut self,
        _time:     Time,
        _reaction: ReactionId,
        _node:     NodeId,
        _target:   Option<NodeId>,
    ) {}

    /// Called after each processed event with read-only access to the
    /// environment, for snapshotting concentrations.
    fn on_step_end(&mut self, _time: Time, _env: &Environment) {}

    /// Called once when the run stops.
    fn on_sim_end(&mut self, _time: Time, _steps: u64) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
