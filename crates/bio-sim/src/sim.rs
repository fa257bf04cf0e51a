//! The `Sim` struct and its event loop.

use std::collections::BTreeSet;

use bio_core::{NodeId, ReactionId, SimClock, SimConfig, Time};
use bio_env::Environment;
use bio_reaction::BiochemicalReaction;
use tracing::{debug, info, trace};

use crate::{ReactionQueue, SimError, SimObserver, SimResult};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim` owns the environment and every reaction, and drives the
/// next-reaction loop:
///
/// 1. **Pop**: take the reaction with the earliest next occurrence.
/// 2. **Fire**: if all its conditions hold, execute its actions.
/// 3. **Reschedule**: update the fired reaction (`executed = true`), then every
///    dependent reaction (`executed = false`).
///
/// Dependents of a firing on node `n` with target `t` are the reactions
/// hosted on `n` and `t`, plus the neighbor-aware reactions hosted on any
/// neighbor of `n` or `t`.  Nothing else can observe the change.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
#[derive(Debug)]
pub struct Sim {
    /// Global configuration (end time, step limit, seed).
    pub config: SimConfig,

    /// Simulation clock: time of the last processed event and step count.
    pub clock: SimClock,

    env:       Environment,
    reactions: Vec<BiochemicalReaction>,
    /// Reactions hosted by each node, indexed by `NodeId`.
    by_node:   Vec<Vec<ReactionId>>,
    queue:     ReactionQueue,
}

impl Sim {
    pub(crate) fn new(config: SimConfig, env: Environment) -> Self {
        Self {
            clock: config.make_clock(),
            config,
            by_node: vec![Vec::new(); env.node_count()],
            env,
            reactions: Vec::new(),
            queue: ReactionQueue::new(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn time(&self) -> Time {
        self.clock.current_time
    }

    pub fn steps(&self) -> u64 {
        self.clock.steps
    }

    pub fn reactions(&self) -> &[BiochemicalReaction] {
        &self.reactions
    }

    pub fn reaction(&self, id: ReactionId) -> SimResult<&BiochemicalReaction> {
        self.reactions.get(id.index()).ok_or(SimError::ReactionNotFound(id))
    }

    /// Reactions hosted on `node`.
    pub fn reactions_on(&self, node: NodeId) -> &[ReactionId] {
        self.by_node
            .get(node.index())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The earliest pending event, if any.
    pub fn next_event(&self) -> Option<(Time, ReactionId)> {
        self.queue.peek()
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the queue is empty, the next event lies past
    /// `config.end_time`, or `config.max_steps` events have been processed.
    ///
    /// Use [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            nodes = self.env.node_count(),
            reactions = self.reactions.len(),
            end_time = %self.config.end_time,
            seed = self.config.seed,
            "simulation started"
        );
        while self.step(observer)? {}
        observer.on_sim_end(self.clock.current_time, self.clock.steps);
        info!(time = %self.clock.current_time, steps = self.clock.steps, "simulation finished");
        Ok(())
    }

    /// Process one event, honoring `end_time` and `max_steps`.
    ///
    /// Returns `false` when there was nothing (left) to process.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<bool> {
        match self.queue.peek() {
            Some((time, _)) if !self.config.is_finished(&self.clock, time) => {
                self.process_next(observer)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Process up to `n` events, ignoring `end_time` and `max_steps`.
    ///
    /// Returns the number of events processed; fewer than `n` only when the
    /// queue ran dry.  Useful for tests and incremental stepping.
    pub fn run_steps<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<u64> {
        for done in 0..n {
            if self.queue.is_empty() {
                return Ok(done);
            }
            self.process_next(observer)?;
        }
        Ok(n)
    }

    /// Link `a` and `b` and refresh every reaction that can observe it.
    pub fn add_link(&mut self, a: NodeId, b: NodeId) -> SimResult<bool> {
        let added = self.env.add_link(a, b)?;
        if added {
            let dependents = self.topology_dependents(a, b);
            self.refresh(dependents)?;
        }
        Ok(added)
    }

    /// Unlink `a` and `b` and refresh every reaction that can observe it.
    pub fn remove_link(&mut self, a: NodeId, b: NodeId) -> SimResult<bool> {
        let removed = self.env.remove_link(a, b)?;
        if removed {
            let dependents = self.topology_dependents(a, b);
            self.refresh(dependents)?;
        }
        Ok(removed)
    }

    /// Insert a copy of reaction `id` bound to `node`, created at the current
    /// time, and schedule it.
    pub fn clone_reaction_onto(&mut self, id: ReactionId, node: NodeId) -> SimResult<ReactionId> {
        let copy = self.reaction(id)?.clone_on_new_node(node, self.clock.current_time);
        let new_id = self.insert(copy)?;
        debug!(from = %id, to = %new_id, %node, "reaction cloned");
        Ok(new_id)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Register `reaction`, compute its first status, and queue it.
    ///
    /// A reaction whose first occurrence lies before the current time is
    /// rejected: the clock never moves backwards.
    pub(crate) fn insert(&mut self, reaction: BiochemicalReaction) -> SimResult<ReactionId> {
        let node = reaction.node();
        if !self.env.contains(node) {
            return Err(SimError::NodeNotFound(node));
        }
        let first = reaction.next_occurrence();
        if first < self.clock.current_time {
            return Err(SimError::Config(format!(
                "reaction on {node} first occurs at {first}, before the current time {}",
                self.clock.current_time,
            )));
        }
        let id = ReactionId(self.reactions.len() as u32);
        if self.by_node.len() < self.env.node_count() {
            self.by_node.resize(self.env.node_count(), Vec::new());
        }
        self.by_node[node.index()].push(id);
        self.reactions.push(reaction);
        self.update(id, false)?;
        Ok(id)
    }

    fn process_next<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let Some((time, id)) = self.queue.pop() else {
            return Ok(());
        };
        observer.on_step_start(time);
        self.clock.advance_to(time);

        let reaction = &mut self.reactions[id.index()];
        let node = reaction.node();
        let target = if reaction.can_execute(&self.env)? {
            let target = reaction.execute(&mut self.env)?;
            debug!(%time, reaction = %id, %node, ?target, "reaction fired");
            observer.on_reaction_fired(time, id, node, target);
            target
        } else {
            trace!(%time, reaction = %id, %node, "conditions no longer hold");
            None
        };

        // The fired reaction always resamples, even when its conditions
        // failed; otherwise it would be popped again at the same time.
        self.update(id, true)?;
        let mut dependents = self.firing_dependents(node, target)?;
        dependents.remove(&id);
        self.refresh(dependents)?;

        observer.on_step_end(time, &self.env);
        Ok(())
    }

    fn update(&mut self, id: ReactionId, executed: bool) -> SimResult<()> {
        let reaction = &mut self.reactions[id.index()];
        reaction.update_internal_status(self.clock.current_time, executed, &self.env)?;
        self.queue.schedule(id, reaction.next_occurrence());
        Ok(())
    }

    fn refresh(&mut self, ids: BTreeSet<ReactionId>) -> SimResult<()> {
        for id in ids {
            self.update(id, false)?;
        }
        Ok(())
    }

    fn firing_dependents(
        &self,
        node:   NodeId,
        target: Option<NodeId>,
    ) -> SimResult<BTreeSet<ReactionId>> {
        let mut out = BTreeSet::new();
        for changed in std::iter::once(node).chain(target) {
            out.extend(self.reactions_on(changed).iter().copied());
            for neighbor in self.env.neighborhood(changed)?.iter() {
                out.extend(
                    self.reactions_on(neighbor)
                        .iter()
                        .copied()
                        .filter(|r| self.reactions[r.index()].reads_neighborhood()),
                );
            }
        }
        Ok(out)
    }

    /// A link change only alters the neighborhoods of its two endpoints.
    fn topology_dependents(&self, a: NodeId, b: NodeId) -> BTreeSet<ReactionId> {
        self.reactions_on(a)
            .iter()
            .chain(self.reactions_on(b))
            .copied()
            .collect()
    }
}
