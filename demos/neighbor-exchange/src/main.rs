//! neighbor-exchange: a ring of cells passing a signal molecule around.
//!
//! Every cell carries some receptor `R`; cell 0 starts with all of the signal
//! `S`.  Each cell hands one unit of `S` to a neighbor, picked with weight
//! `C(R, 1)`, so receptor-rich neighbors receive more.  Cells with enough
//! adhesin form junctions with neighboring cells.  Halfway through the run
//! the ring is cut open and the signal must route around.
//!
//! Set `RUST_LOG=debug` to see every firing.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bio_core::{Molecule, NodeId, ReactionId, SimConfig, Time};
use bio_env::{Environment, NodeBuilder};
use bio_reaction::{
    Action, BiochemicalReaction, Condition, ExponentialTime, LocalAction, LocalCondition,
    NeighborAction, NeighborCondition,
};
use bio_sim::{SimBuilder, SimObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const CELL_COUNT:     u32 = 8;
const SEED:           u64 = 42;
const INITIAL_SIGNAL: f64 = 40.0;
const CUT_TIME:       f64 = 25.0;
const END_TIME:       f64 = 50.0;

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct FiringCounter {
    fired:    u64,
    targeted: u64,
    per_node: Vec<u64>,
}

impl SimObserver for FiringCounter {
    fn on_reaction_fired(&mut self, _time: Time, _reaction: ReactionId, node: NodeId, target: Option<NodeId>) {
        self.fired += 1;
        self.targeted += u64::from(target.is_some());
        if self.per_node.len() <= node.index() {
            self.per_node.resize(node.index() + 1, 0);
        }
        self.per_node[node.index()] += 1;
    }
}

// ── Model ─────────────────────────────────────────────────────────────────────

struct Molecules {
    signal:   Molecule,
    receptor: Molecule,
    adhesin:  Molecule,
}

impl Molecules {
    fn new() -> Result<Self> {
        Ok(Self {
            signal:   "S".parse()?,
            receptor: "R".parse()?,
            adhesin:  "Ad".parse()?,
        })
    }
}

fn build_ring(m: &Molecules) -> Result<(Environment, Vec<NodeId>)> {
    let mut env = Environment::new();
    let cells: Vec<NodeId> = (0..CELL_COUNT)
        .map(|i| {
            let signal = if i == 0 { INITIAL_SIGNAL } else { 0.0 };
            env.add_node(
                NodeBuilder::cell()
                    .concentration(&m.signal, signal)
                    .concentration(&m.receptor, f64::from(1 + i % 4))
                    .concentration(&m.adhesin, f64::from(i % 3))
                    .build(),
            )
        })
        .collect();
    for (i, &cell) in cells.iter().enumerate() {
        env.add_link(cell, cells[(i + 1) % cells.len()])?;
    }
    Ok((env, cells))
}

fn signal_transfer(m: &Molecules, cell: NodeId, builder: &SimBuilder) -> BiochemicalReaction {
    BiochemicalReaction::new(cell, ExponentialTime::new(1.0, Time::ZERO), builder.rng())
        .with_conditions([
            Condition::from(LocalCondition::biomol_present(m.signal.clone(), 1.0)),
            NeighborCondition::biomol_present(m.receptor.clone(), 1.0).into(),
        ])
        .with_actions([
            Action::from(LocalAction::change_concentration(m.signal.clone(), -1.0)),
            NeighborAction::change_concentration(m.signal.clone(), 1.0).into(),
        ])
}

fn junction_formation(m: &Molecules, cell: NodeId, builder: &SimBuilder) -> BiochemicalReaction {
    BiochemicalReaction::new(cell, ExponentialTime::new(0.05, Time::ZERO), builder.rng())
        .with_conditions([
            Condition::from(LocalCondition::biomol_present(m.adhesin.clone(), 2.0)),
            NeighborCondition::NeighborhoodPresent.into(),
        ])
        .with_actions([NeighborAction::create_junction("adherens")])
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let m = Molecules::new()?;
    let (env, cells) = build_ring(&m)?;

    let config = SimConfig {
        end_time:  Time(CUT_TIME),
        max_steps: None,
        seed:      SEED,
    };
    let builder = SimBuilder::new(config, env);
    let reactions: Vec<BiochemicalReaction> = cells
        .iter()
        .flat_map(|&cell| [signal_transfer(&m, cell, &builder), junction_formation(&m, cell, &builder)])
        .collect();
    let mut sim = builder.reactions(reactions).build()?;

    let mut counter = FiringCounter::default();
    sim.run(&mut counter)?;

    // Cut the ring between the first and the last cell, then keep going.
    let (first, last) = (cells[0], cells[cells.len() - 1]);
    sim.remove_link(first, last)?;
    info!(%first, %last, time = %sim.time(), "ring cut");
    sim.config.end_time = Time(END_TIME);
    sim.run(&mut counter)?;

    // ── Summary ───────────────────────────────────────────────────────────
    println!("\n=== neighbor-exchange: {} steps, final {} ===", sim.steps(), sim.time());
    println!("{:>10} {:>8} {:>8} {:>10} {:>8}", "cell", "S", "R", "junctions", "fired");
    let mut total = 0.0;
    for &cell in &cells {
        let node = sim.env().node(cell)?;
        let s = node.concentration(&m.signal);
        total += s;
        println!(
            "{:>10} {:>8.0} {:>8.0} {:>10} {:>8}",
            cell.to_string(),
            s,
            node.concentration(&m.receptor),
            node.as_cell().map_or(0, |c| c.junctions_count()),
            counter.per_node.get(cell.index()).copied().unwrap_or(0),
        );
    }
    println!(
        "signal total {total} (started with {INITIAL_SIGNAL}); {} firings, {} with a neighbor target",
        counter.fired, counter.targeted,
    );
    Ok(())
}
