//! `bio-sim`: event loop orchestrator for the biochemical reaction engine.
//!
//! # Next-reaction loop
//!
//! ```text
//! while let Some((t, r)) = queue.peek() and t <= config.end_time:
//!   ① Pop      remove r, advance the clock to t.
//!   ② Fire     if r.can_execute(env): target = r.execute(env).
//!   ③ Update   r.update_internal_status(t, executed = true, env).
//!   ④ Refresh  every dependent d ≠ r: d.update_internal_status(t, false, env),
//!                then requeue at d.next_occurrence().
//! ```
//!
//! Everything runs on the calling thread; a run is reproducible for a fixed
//! `config.seed`, environment, and reaction insertion order.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bio_core::{SimConfig, Time};
//! use bio_sim::{NoopObserver, SimBuilder};
//!
//! let config = SimConfig { end_time: Time(100.0), max_steps: None, seed: 42 };
//! let builder = SimBuilder::new(config, env);
//! let rng = builder.rng();
//! let mut sim = builder.reactions(make_reactions(rng)).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod queue;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use queue::ReactionQueue;
pub use sim::Sim;
