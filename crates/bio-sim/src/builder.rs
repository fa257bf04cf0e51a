//! Fluent builder for constructing a [`Sim`].

use bio_core::{SharedRng, SimConfig, SimRng};
use bio_env::Environment;
use bio_reaction::BiochemicalReaction;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: end time, step limit, seed
/// - [`Environment`]: nodes and their initial links
///
/// # Optional inputs
///
/// | Method            | Default                                  |
/// |-------------------|------------------------------------------|
/// | `.reaction(r)`    | no reactions (the run ends immediately)  |
/// | `.reactions(it)`  | (same, for many)                         |
///
/// Reactions usually share the builder's generator, seeded from
/// `config.seed`; grab a handle with [`rng`](Self::rng).
///
/// # Example
///
/// ```rust,ignore
/// let builder = SimBuilder::new(config, env);
/// let rng = builder.rng();
/// let mut sim = builder
///     .reaction(
///         BiochemicalReaction::new(a, ExponentialTime::new(1.0, Time::ZERO), rng)
///             .with_conditions([NeighborCondition::biomol_present(x.clone(), 1.0)])
///             .with_actions([NeighborAction::change_concentration(x, -1.0)]),
///     )
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:    SimConfig,
    env:       Environment,
    rng:       SharedRng,
    reactions: Vec<BiochemicalReaction>,
}

impl SimBuilder {
    pub fn new(config: SimConfig, env: Environment) -> Self {
        let rng = SimRng::new(config.seed).into_shared();
        Self {
            config,
            env,
            rng,
            reactions: Vec::new(),
        }
    }

    /// A handle onto the generator seeded from `config.seed`.
    pub fn rng(&self) -> SharedRng {
        self.rng.clone()
    }

    pub fn reaction(mut self, reaction: BiochemicalReaction) -> Self {
        self.reactions.push(reaction);
        self
    }

    pub fn reactions<I>(mut self, reactions: I) -> Self
    where
        I: IntoIterator<Item = BiochemicalReaction>,
    {
        self.reactions.extend(reactions);
        self
    }

    /// Validate inputs, compute every reaction's initial status at time zero,
    /// and return a ready-to-run [`Sim`].
    ///
    /// Reaction ids are assigned in insertion order.
    pub fn build(self) -> SimResult<Sim> {
        if self.config.end_time.as_f64().is_nan() {
            return Err(SimError::Config("end_time must not be NaN".into()));
        }
        if let Some(bad) = self.reactions.iter().find(|r| !self.env.contains(r.node())) {
            return Err(SimError::NodeNotFound(bad.node()));
        }

        let mut sim = Sim::new(self.config, self.env);
        for reaction in self.reactions {
            sim.insert(reaction)?;
        }
        Ok(sim)
    }
}
