//! `BiochemicalReaction`: the per-firing coordinator.
//!
//! One reaction lives on one node.  Each update cycle it re-evaluates its
//! conditions against the live environment, rebuilds its candidate map
//! (neighbor-aware reactions only), and hands the resulting propensity to its
//! time distribution.  Each firing it picks a target from that map and
//! dispatches its actions.

use std::fmt;

use bio_core::{NodeId, SharedRng, Time};
use bio_env::Environment;
use rand::Rng;
use tracing::trace;

use crate::{
    Action, CandidateMap, Condition, ReactionError, ReactionResult, TimeDistribution,
    select_target,
};

/// How a reaction resolves the target of its neighbor actions.
///
/// Derived from the condition list in
/// [`set_conditions`][BiochemicalReaction::set_conditions] and never changed
/// by a firing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReactionMode {
    /// At least one neighbor condition: the target is drawn from the
    /// candidate map, weighted by propensity.
    NeighborAware,
    /// No neighbor condition: neighbor actions (if any) fall back to one
    /// uniformly drawn current neighbor.  The draw happens once per firing
    /// and every neighbor action of that firing targets the same node.
    LocalOnly,
}

impl ReactionMode {
    fn for_conditions(conditions: &[Condition]) -> Self {
        if conditions.iter().any(Condition::is_neighbor_scoped) {
            ReactionMode::NeighborAware
        } else {
            ReactionMode::LocalOnly
        }
    }
}

/// A stochastic reaction whose effects may target a weighted neighbor.
#[derive(Debug)]
pub struct BiochemicalReaction {
    node:              NodeId,
    conditions:        Vec<Condition>,
    actions:           Vec<Action>,
    time_distribution: Box<dyn TimeDistribution>,
    rng:               SharedRng,
    mode:              ReactionMode,
    candidates:        CandidateMap,
    propensity:        f64,
}

impl BiochemicalReaction {
    /// A reaction on `node` with no conditions and no actions.
    pub fn new<T>(node: NodeId, time_distribution: T, rng: SharedRng) -> Self
    where
        T: TimeDistribution + 'static,
    {
        Self::from_boxed(node, Box::new(time_distribution), rng)
    }

    fn from_boxed(node: NodeId, time_distribution: Box<dyn TimeDistribution>, rng: SharedRng) -> Self {
        Self {
            node,
            conditions: Vec::new(),
            actions: Vec::new(),
            time_distribution,
            rng,
            mode: ReactionMode::LocalOnly,
            candidates: CandidateMap::new(),
            propensity: 0.0,
        }
    }

    pub fn with_conditions<I, C>(mut self, conditions: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Condition>,
    {
        self.set_conditions(conditions.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_actions<I, A>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Action>,
    {
        self.set_actions(actions.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the condition list and re-derive the [`ReactionMode`].
    ///
    /// The candidate map is cleared; it is rebuilt on the next update.
    pub fn set_conditions(&mut self, conditions: Vec<Condition>) {
        self.mode = ReactionMode::for_conditions(&conditions);
        self.conditions = conditions;
        self.candidates = CandidateMap::new();
    }

    pub fn set_actions(&mut self, actions: Vec<Action>) {
        self.actions = actions;
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn mode(&self) -> ReactionMode {
        self.mode
    }

    /// Candidate map built by the last update.  Always empty in
    /// [`ReactionMode::LocalOnly`].
    pub fn candidates(&self) -> &CandidateMap {
        &self.candidates
    }

    /// Propensity computed by the last update.
    pub fn propensity(&self) -> f64 {
        self.propensity
    }

    pub fn rate(&self) -> f64 {
        self.time_distribution.rate()
    }

    pub fn next_occurrence(&self) -> Time {
        self.time_distribution.next_occurrence()
    }

    pub fn rng(&self) -> &SharedRng {
        &self.rng
    }

    /// `true` if some condition inspects the node's neighbors.  Such a
    /// reaction must be refreshed whenever a neighbor changes.
    pub fn reads_neighborhood(&self) -> bool {
        self.mode == ReactionMode::NeighborAware
    }

    /// `true` if some action may modify a node other than the own one.
    pub fn writes_neighborhood(&self) -> bool {
        self.actions.iter().any(Action::is_neighbor_scoped)
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// `true` if every condition currently holds.
    pub fn can_execute(&self, env: &Environment) -> ReactionResult<bool> {
        for condition in &self.conditions {
            if !condition.is_valid(env, self.node)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Re-evaluate conditions at `now` and reschedule.
    ///
    /// In [`ReactionMode::NeighborAware`] the candidate map is replaced by the
    /// intersection of every neighbor condition's valid-neighbor map.  The
    /// propensity is `rate × Π contributions`, or `0` if any condition fails.
    ///
    /// # Errors
    ///
    /// [`ReactionError::EmptyNeighborReduction`] if the reaction is
    /// neighbor-aware but no neighbor map was produced.  This is fatal.
    pub fn update_internal_status(
        &mut self,
        now:      Time,
        executed: bool,
        env:      &Environment,
    ) -> ReactionResult<()> {
        let mut valid = true;
        let mut product = self.time_distribution.rate();
        let mut neighbor_maps = Vec::new();

        for condition in &self.conditions {
            match condition {
                Condition::Local(c) => {
                    let own = env.node(self.node)?;
                    valid &= c.is_valid(own);
                    product *= c.propensity_contribution(own);
                }
                Condition::Neighbor(c) => {
                    let map = c.valid_neighbors(env, self.node)?;
                    valid &= !map.is_empty();
                    product *= map.total_propensity();
                    neighbor_maps.push(map);
                }
            }
        }

        if self.mode == ReactionMode::NeighborAware {
            self.candidates = CandidateMap::combine(neighbor_maps)
                .ok_or(ReactionError::EmptyNeighborReduction { node: self.node })?;
            trace!(node = %self.node, candidates = self.candidates.len(), "candidate map rebuilt");
        }

        self.propensity = if valid && !product.is_nan() { product } else { 0.0 };
        let mut rng = self.rng.borrow_mut();
        self.time_distribution.update(now, executed, self.propensity, &mut *rng);
        Ok(())
    }

    /// Fire once.  Returns the neighbor targeted by this firing, if any.
    ///
    /// Local actions always run.  Neighbor actions run against the target and
    /// are skipped when there is none.
    pub fn execute(&mut self, env: &mut Environment) -> ReactionResult<Option<NodeId>> {
        let target = match self.mode {
            ReactionMode::NeighborAware => {
                let mut rng = self.rng.borrow_mut();
                select_target(&self.candidates, &mut *rng)?
            }
            ReactionMode::LocalOnly if self.writes_neighborhood() => self.random_neighbor(env)?,
            ReactionMode::LocalOnly => None,
        };

        for action in &self.actions {
            match (action, target) {
                (Action::Local(a), _) => a.execute(env, self.node)?,
                (Action::Neighbor(a), Some(target)) => a.execute(env, self.node, target)?,
                (Action::Neighbor(_), None) => {
                    trace!(node = %self.node, %action, "neighbor action skipped: no target");
                }
            }
        }
        Ok(target)
    }

    /// A copy of this reaction bound to `node`, created at `now`.
    ///
    /// The copy shares this reaction's generator, gets a fresh time
    /// distribution, and starts with an empty candidate map.
    pub fn clone_on_new_node(&self, node: NodeId, now: Time) -> BiochemicalReaction {
        let mut copy = Self::from_boxed(
            node,
            self.time_distribution.clone_on_new_node(now),
            self.rng.clone(),
        );
        copy.set_conditions(self.conditions.clone());
        copy.set_actions(self.actions.clone());
        copy
    }

    fn random_neighbor(&self, env: &Environment) -> ReactionResult<Option<NodeId>> {
        let neighborhood = env.neighborhood(self.node)?;
        if neighborhood.is_empty() {
            return Ok(None);
        }
        let i = self.rng.borrow_mut().gen_range(0..neighborhood.len());
        Ok(neighborhood.nth(i))
    }
}

impl fmt::Display for BiochemicalReaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [", self.node)?;
        for (i, c) in self.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str("] --> [")?;
        for (i, a) in self.actions.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{a}")?;
        }
        f.write_str("]")
    }
}
