//! Unit tests for bio-reaction.

use bio_core::{Molecule, NodeId};
use bio_env::{Environment, Node, NodeBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn mol(name: &str) -> Molecule {
    Molecule::new(name).unwrap()
}

fn cell(concentrations: &[(&str, f64)]) -> Node {
    concentrations
        .iter()
        .fold(NodeBuilder::cell(), |b, (name, c)| b.concentration(&mol(name), *c))
        .build()
}

/// `A` (cell, id 0) linked to each of `neighbors`, in order.
fn star(center: Node, neighbors: Vec<Node>) -> (Environment, NodeId, Vec<NodeId>) {
    let mut env = Environment::new();
    let a = env.add_node(center);
    let ids: Vec<NodeId> = neighbors.into_iter().map(|n| env.add_node(n)).collect();
    for &id in &ids {
        env.add_link(a, id).unwrap();
    }
    (env, a, ids)
}

// ── CandidateMap ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod candidates {
    use std::collections::BTreeSet;

    use bio_core::NodeId;
    use proptest::prelude::*;

    use crate::CandidateMap;

    #[test]
    fn insert_overwrites_in_place() {
        let mut map = CandidateMap::new();
        map.insert(NodeId(2), 1.0);
        map.insert(NodeId(1), 2.0);
        map.insert(NodeId(2), 5.0);
        assert_eq!(map.len(), 2);
        assert_eq!(map.nth(0), Some((NodeId(2), 5.0)));
        assert_eq!(map.get(NodeId(1)), Some(2.0));
    }

    #[test]
    fn intersection_multiplies_and_drops() {
        let first: CandidateMap = [(NodeId(1), 3.0), (NodeId(2), 4.0)].into_iter().collect();
        let second: CandidateMap = [(NodeId(1), 2.0)].into_iter().collect();
        let combined = CandidateMap::combine([first, second]).unwrap();
        let expected: CandidateMap = [(NodeId(1), 6.0)].into_iter().collect();
        assert_eq!(combined, expected);
        assert!(!combined.contains(NodeId(2)));
    }

    #[test]
    fn combine_of_nothing_is_none() {
        assert!(CandidateMap::combine(Vec::new()).is_none());
    }

    #[test]
    fn combine_of_one_is_identity() {
        let only: CandidateMap = [(NodeId(4), 1.5)].into_iter().collect();
        assert_eq!(CandidateMap::combine([only.clone()]), Some(only));
    }

    #[test]
    fn total_propensity_sums() {
        let map: CandidateMap = [(NodeId(0), 1.5), (NodeId(1), 2.5)].into_iter().collect();
        assert_eq!(map.total_propensity(), 4.0);
    }

    fn arb_map() -> impl Strategy<Value = CandidateMap> {
        prop::collection::btree_map(0u32..12, 0.1f64..50.0, 0..10)
            .prop_map(|m| m.into_iter().map(|(k, v)| (NodeId(k), v)).collect())
    }

    proptest! {
        #[test]
        fn combined_keys_are_the_intersection(maps in prop::collection::vec(arb_map(), 2..5)) {
            let expected = maps
                .iter()
                .map(|m| m.nodes().collect::<BTreeSet<_>>())
                .reduce(|acc, keys| acc.intersection(&keys).copied().collect())
                .unwrap();
            let combined = CandidateMap::combine(maps).unwrap();
            prop_assert_eq!(combined.nodes().collect::<BTreeSet<_>>(), expected);
        }
    }
}

// ── select_target ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod selector {
    use bio_core::{NodeId, SimRng};
    use proptest::prelude::*;

    use crate::{CandidateMap, ReactionError, select_target};

    #[test]
    fn empty_map_selects_nothing() {
        let mut rng = SimRng::new(1);
        assert_eq!(select_target(&CandidateMap::new(), rng.inner()).unwrap(), None);
    }

    #[test]
    fn single_candidate_always_selected() {
        let map: CandidateMap = [(NodeId(9), 0.25)].into_iter().collect();
        let mut rng = SimRng::new(1);
        for _ in 0..20 {
            assert_eq!(select_target(&map, rng.inner()).unwrap(), Some(NodeId(9)));
        }
    }

    #[test]
    fn same_seed_same_draws() {
        let map: CandidateMap =
            [(NodeId(1), 1.0), (NodeId(2), 3.0), (NodeId(3), 6.0)].into_iter().collect();
        let mut a = SimRng::new(77);
        let mut b = SimRng::new(77);
        let first: Vec<_> = (0..50).map(|_| select_target(&map, a.inner()).unwrap()).collect();
        let second: Vec<_> = (0..50).map(|_| select_target(&map, b.inner()).unwrap()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn heavier_candidate_wins_more_often() {
        let map: CandidateMap = [(NodeId(1), 1.0), (NodeId(2), 9.0)].into_iter().collect();
        let mut rng = SimRng::new(3);
        let heavy = (0..2_000)
            .filter(|_| select_target(&map, rng.inner()).unwrap() == Some(NodeId(2)))
            .count();
        assert!(heavy > 1_600, "heavy picked {heavy} times");
    }

    #[test]
    fn non_finite_weight_rejected() {
        let map: CandidateMap = [(NodeId(1), f64::INFINITY)].into_iter().collect();
        let mut rng = SimRng::new(1);
        assert!(matches!(
            select_target(&map, rng.inner()),
            Err(ReactionError::InvalidWeights(_))
        ));
    }

    #[test]
    fn all_zero_weights_rejected() {
        let map: CandidateMap = [(NodeId(1), 0.0), (NodeId(2), 0.0)].into_iter().collect();
        let mut rng = SimRng::new(1);
        assert!(select_target(&map, rng.inner()).is_err());
    }

    proptest! {
        #[test]
        fn selects_iff_non_empty(
            weights in prop::collection::vec(0.01f64..100.0, 0..8),
            seed in any::<u64>(),
        ) {
            let map: CandidateMap = weights
                .iter()
                .enumerate()
                .map(|(i, w)| (NodeId(i as u32), *w))
                .collect();
            let picked = select_target(&map, SimRng::new(seed).inner()).unwrap();
            prop_assert_eq!(picked.is_some(), !map.is_empty());
            if let Some(node) = picked {
                prop_assert!(map.contains(node));
            }
        }
    }
}

// ── Conditions ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod conditions {
    use bio_env::{Environment, NodeBuilder};
    use proptest::prelude::*;

    use super::{cell, mol, star};
    use crate::{Condition, LocalCondition, NeighborCondition};

    #[test]
    fn neighbor_propensity_is_binomial() {
        let cond = NeighborCondition::biomol_present(mol("X"), 2.0);
        assert_eq!(cond.propensity(&cell(&[("X", 5.0)])), 10.0);
    }

    #[test]
    fn neighbor_below_threshold_is_zero() {
        let cond = NeighborCondition::biomol_present(mol("X"), 3.0);
        assert_eq!(cond.propensity(&cell(&[("X", 2.9)])), 0.0);
    }

    #[test]
    fn valid_neighbors_without_neighbors_is_empty() {
        let mut env = Environment::new();
        let a = env.add_node(cell(&[]));
        let cond = NeighborCondition::biomol_present(mol("X"), 1.0);
        assert!(cond.valid_neighbors(&env, a).unwrap().is_empty());
    }

    #[test]
    fn valid_neighbors_filters_and_weights() {
        let (env, a, ids) = star(
            cell(&[]),
            vec![cell(&[("X", 5.0)]), cell(&[("X", 1.0)]), NodeBuilder::new().build()],
        );
        let cond = NeighborCondition::biomol_present(mol("X"), 2.0);
        let valid = cond.valid_neighbors(&env, a).unwrap();
        assert_eq!(valid.len(), 1);
        assert_eq!(valid.get(ids[0]), Some(10.0));
    }

    #[test]
    fn valid_neighbors_in_ascending_id_order() {
        let (env, a, ids) = star(cell(&[]), vec![cell(&[]), cell(&[]), cell(&[])]);
        let valid = NeighborCondition::NeighborhoodPresent.valid_neighbors(&env, a).unwrap();
        assert_eq!(valid.nodes().collect::<Vec<_>>(), ids);
    }

    #[test]
    fn local_biomol_validity_and_contribution() {
        let node = cell(&[("A", 4.0)]);
        let cond = LocalCondition::biomol_present(mol("A"), 2.0);
        assert!(cond.is_valid(&node));
        assert_eq!(cond.propensity_contribution(&node), 6.0);
        assert!(!LocalCondition::biomol_present(mol("A"), 4.5).is_valid(&node));
    }

    #[test]
    fn local_junction_condition_counts_instances() {
        let mut node = cell(&[]);
        let cond = LocalCondition::junction_present("gap");
        assert!(!cond.is_valid(&node));
        let junctions = node.as_cell_mut().unwrap();
        junctions.add_junction("gap", bio_core::NodeId(1));
        junctions.add_junction("gap", bio_core::NodeId(2));
        assert!(cond.is_valid(&node));
        assert_eq!(cond.propensity_contribution(&node), 2.0);
    }

    #[test]
    fn condition_dispatch() {
        let (env, a, _) = star(cell(&[("A", 1.0)]), vec![cell(&[("X", 1.0)])]);
        let local: Condition = LocalCondition::biomol_present(mol("A"), 1.0).into();
        let neighbor: Condition = NeighborCondition::biomol_present(mol("X"), 1.0).into();
        assert!(!local.is_neighbor_scoped());
        assert!(neighbor.is_neighbor_scoped());
        assert!(local.is_valid(&env, a).unwrap());
        assert!(neighbor.is_valid(&env, a).unwrap());
        assert_eq!(neighbor.propensity_contribution(&env, a).unwrap(), 1.0);
    }

    #[test]
    fn display() {
        let cond = NeighborCondition::biomol_present(mol("A"), 2.0);
        assert_eq!(cond.to_string(), "A >= 2 in neighbor");
    }

    proptest! {
        #[test]
        fn without_cell_capability_propensity_is_zero(
            quantity in 0.0f64..1_000.0,
            threshold in 0.0f64..100.0,
        ) {
            let plain = NodeBuilder::new().concentration(&mol("X"), quantity).build();
            let cond = NeighborCondition::biomol_present(mol("X"), threshold);
            prop_assert_eq!(cond.propensity(&plain), 0.0);
            prop_assert_eq!(NeighborCondition::NeighborhoodPresent.propensity(&plain), 0.0);
        }

        #[test]
        fn below_threshold_propensity_is_zero(threshold in 1.0f64..100.0, frac in 0.0f64..0.999) {
            let node = cell(&[("X", threshold * frac)]);
            let cond = NeighborCondition::biomol_present(mol("X"), threshold);
            prop_assert_eq!(cond.propensity(&node), 0.0);
        }
    }
}

// ── Actions ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod actions {
    use bio_env::NodeBuilder;

    use super::{cell, mol, star};
    use crate::{Action, LocalAction, NeighborAction};

    #[test]
    fn local_change_clamps_at_zero() {
        let (mut env, a, _) = star(cell(&[("A", 1.0)]), vec![]);
        LocalAction::change_concentration(mol("A"), -3.0).execute(&mut env, a).unwrap();
        assert_eq!(env.node(a).unwrap().concentration(&mol("A")), 0.0);
    }

    #[test]
    fn neighbor_change_targets_neighbor_only() {
        let (mut env, a, ids) = star(cell(&[("A", 1.0)]), vec![cell(&[("A", 1.0)])]);
        NeighborAction::change_concentration(mol("A"), 2.0)
            .execute(&mut env, a, ids[0])
            .unwrap();
        assert_eq!(env.node(a).unwrap().concentration(&mol("A")), 1.0);
        assert_eq!(env.node(ids[0]).unwrap().concentration(&mol("A")), 3.0);
    }

    #[test]
    fn create_junction_on_both_cells() {
        let (mut env, a, ids) = star(cell(&[]), vec![cell(&[])]);
        NeighborAction::create_junction("gap").execute(&mut env, a, ids[0]).unwrap();
        let own = env.node(a).unwrap().as_cell().unwrap();
        let other = env.node(ids[0]).unwrap().as_cell().unwrap();
        assert_eq!(own.junction_count("gap"), 1);
        assert_eq!(other.junction_count("gap"), 1);
        assert_eq!(own.junction_neighbors(), vec![ids[0]]);
    }

    #[test]
    fn create_junction_with_non_cell_is_noop() {
        let (mut env, a, ids) = star(cell(&[]), vec![NodeBuilder::new().build()]);
        NeighborAction::create_junction("gap").execute(&mut env, a, ids[0]).unwrap();
        assert_eq!(env.node(a).unwrap().as_cell().unwrap().junctions_count(), 0);
    }

    #[test]
    fn scope_and_display() {
        let local: Action = LocalAction::change_concentration(mol("A"), -1.0).into();
        let neighbor: Action = NeighborAction::change_concentration(mol("B"), 1.0).into();
        assert!(!local.is_neighbor_scoped());
        assert!(neighbor.is_neighbor_scoped());
        assert_eq!(local.to_string(), "A -1");
        assert_eq!(neighbor.to_string(), "B +1 in neighbor");
    }
}

// ── Time distributions ────────────────────────────────────────────────────────

#[cfg(test)]
mod time_distributions {
    use bio_core::{SimRng, Time};

    use crate::{DiracComb, ExponentialTime, TimeDistribution, Trigger};

    #[test]
    fn exponential_starts_unscheduled() {
        assert_eq!(ExponentialTime::new(1.0, Time::ZERO).next_occurrence(), Time::INFINITY);
    }

    #[test]
    fn exponential_zero_propensity_never_fires() {
        let mut rng = SimRng::new(5);
        let mut dist = ExponentialTime::new(1.0, Time::ZERO);
        dist.update(Time::ZERO, false, 2.0, rng.inner());
        assert!(dist.next_occurrence().is_finite());
        dist.update(Time(0.5), false, 0.0, rng.inner());
        assert_eq!(dist.next_occurrence(), Time::INFINITY);
    }

    #[test]
    fn exponential_sample_is_after_now_and_start() {
        let mut rng = SimRng::new(5);
        let mut dist = ExponentialTime::new(1.0, Time(10.0));
        dist.update(Time(2.0), false, 1.0, rng.inner());
        assert!(dist.next_occurrence() >= Time(10.0));
    }

    #[test]
    fn exponential_unchanged_propensity_keeps_tau() {
        let mut rng = SimRng::new(5);
        let mut dist = ExponentialTime::new(1.0, Time::ZERO);
        dist.update(Time::ZERO, false, 3.0, rng.inner());
        let tau = dist.next_occurrence();
        dist.update(Time::ZERO, false, 3.0, rng.inner());
        assert_eq!(dist.next_occurrence(), tau);
    }

    #[test]
    fn exponential_rescales_on_propensity_change() {
        let mut rng = SimRng::new(5);
        let mut dist = ExponentialTime::new(1.0, Time::ZERO);
        dist.update(Time::ZERO, false, 1.0, rng.inner());
        let tau = dist.next_occurrence().as_f64();
        dist.update(Time::ZERO, false, 2.0, rng.inner());
        let rescaled = dist.next_occurrence().as_f64();
        assert!((rescaled - tau / 2.0).abs() < 1e-12);
    }

    #[test]
    fn exponential_resamples_after_execution() {
        let mut rng = SimRng::new(5);
        let mut dist = ExponentialTime::new(1.0, Time::ZERO);
        dist.update(Time::ZERO, false, 1.0, rng.inner());
        let tau = dist.next_occurrence();
        dist.update(tau, true, 1.0, rng.inner());
        assert!(dist.next_occurrence() > tau);
    }

    #[test]
    fn dirac_comb_is_periodic() {
        let mut rng = SimRng::new(0);
        let mut dist = DiracComb::new(Time(1.0), 2.0);
        assert_eq!(dist.next_occurrence(), Time(1.0));
        dist.update(Time(1.0), true, 0.0, rng.inner());
        assert_eq!(dist.next_occurrence(), Time(1.5));
        dist.update(Time(1.2), false, 0.0, rng.inner());
        assert_eq!(dist.next_occurrence(), Time(1.5));
    }

    #[test]
    fn dirac_comb_zero_frequency_never_fires() {
        assert_eq!(DiracComb::new(Time::ZERO, 0.0).next_occurrence(), Time::INFINITY);
    }

    #[test]
    fn trigger_fires_once() {
        let mut rng = SimRng::new(0);
        let mut dist = Trigger::new(Time(3.0));
        assert_eq!(dist.next_occurrence(), Time(3.0));
        dist.update(Time(3.0), true, 0.0, rng.inner());
        assert!(dist.has_fired());
        assert_eq!(dist.next_occurrence(), Time::INFINITY);
    }

    #[test]
    fn clones_are_fresh() {
        let mut rng = SimRng::new(0);
        let mut dist = ExponentialTime::new(2.0, Time::ZERO);
        dist.update(Time::ZERO, false, 1.0, rng.inner());
        let copy = dist.clone_on_new_node(Time(4.0));
        assert_eq!(copy.next_occurrence(), Time::INFINITY);
        assert_eq!(copy.rate(), 2.0);

        let comb = DiracComb::new(Time::ZERO, 1.0).clone_on_new_node(Time(2.5));
        assert_eq!(comb.next_occurrence(), Time(3.0));
    }
}

// ── BiochemicalReaction ───────────────────────────────────────────────────────

#[cfg(test)]
mod reaction {
    use bio_core::{NodeId, SharedRng, Time};
    use bio_env::Environment;

    use super::{cell, mol, star};
    use crate::{
        BiochemicalReaction, ExponentialTime, LocalAction, LocalCondition, NeighborAction,
        NeighborCondition, ReactionMode,
    };

    fn transfer(node: NodeId, rng: SharedRng) -> BiochemicalReaction {
        BiochemicalReaction::new(node, ExponentialTime::new(1.0, Time::ZERO), rng)
            .with_conditions([NeighborCondition::biomol_present(mol("X"), 2.0)])
            .with_actions([NeighborAction::change_concentration(mol("X"), -1.0)])
    }

    #[test]
    fn mode_follows_conditions() {
        let rng = SharedRng::new(1);
        let local = BiochemicalReaction::new(NodeId(0), ExponentialTime::new(1.0, Time::ZERO), rng.clone())
            .with_conditions([LocalCondition::biomol_present(mol("A"), 1.0)]);
        assert_eq!(local.mode(), ReactionMode::LocalOnly);
        assert_eq!(transfer(NodeId(0), rng).mode(), ReactionMode::NeighborAware);
    }

    #[test]
    fn candidate_map_uses_binomial_propensity() {
        let (env, a, ids) = star(cell(&[]), vec![cell(&[("X", 5.0)])]);
        let mut r = transfer(a, SharedRng::new(1));
        r.update_internal_status(Time::ZERO, false, &env).unwrap();
        assert_eq!(r.candidates().get(ids[0]), Some(10.0));
        assert_eq!(r.propensity(), 10.0);
        assert!(r.next_occurrence().is_finite());
    }

    #[test]
    fn neighbor_dropping_out_leaves_the_map() {
        let (mut env, a, ids) = star(cell(&[]), vec![cell(&[("X", 5.0)]), cell(&[("X", 3.0)])]);
        let mut r = transfer(a, SharedRng::new(1));
        r.update_internal_status(Time::ZERO, false, &env).unwrap();
        assert!(r.candidates().contains(ids[0]));

        env.remove_link(a, ids[0]).unwrap();
        r.update_internal_status(Time(0.1), false, &env).unwrap();
        assert!(!r.candidates().contains(ids[0]));
        assert_eq!(r.candidates().get(ids[1]), Some(3.0));
    }

    #[test]
    fn two_neighbor_conditions_intersect() {
        let (env, a, ids) = star(
            cell(&[]),
            vec![cell(&[("X", 3.0), ("Y", 2.0)]), cell(&[("X", 4.0)])],
        );
        let mut r = BiochemicalReaction::new(a, ExponentialTime::new(1.0, Time::ZERO), SharedRng::new(1))
            .with_conditions([
                NeighborCondition::biomol_present(mol("X"), 1.0),
                NeighborCondition::biomol_present(mol("Y"), 1.0),
            ]);
        r.update_internal_status(Time::ZERO, false, &env).unwrap();
        assert_eq!(r.candidates().len(), 1);
        assert_eq!(r.candidates().get(ids[0]), Some(6.0));
        assert!(!r.candidates().contains(ids[1]));
    }

    #[test]
    fn update_is_idempotent() {
        let (env, a, _) = star(cell(&[]), vec![cell(&[("X", 5.0)]), cell(&[("X", 2.0)])]);
        let mut r = transfer(a, SharedRng::new(1));
        r.update_internal_status(Time::ZERO, false, &env).unwrap();
        let first = r.candidates().clone();
        r.update_internal_status(Time::ZERO, false, &env).unwrap();
        assert_eq!(r.candidates(), &first);
    }

    #[test]
    fn invalid_condition_zeroes_propensity() {
        let (env, a, _) = star(cell(&[("A", 0.5)]), vec![cell(&[("X", 5.0)])]);
        let mut r = transfer(a, SharedRng::new(1)).with_conditions([
            crate::Condition::from(NeighborCondition::biomol_present(mol("X"), 2.0)),
            LocalCondition::biomol_present(mol("A"), 1.0).into(),
        ]);
        r.update_internal_status(Time::ZERO, false, &env).unwrap();
        assert_eq!(r.propensity(), 0.0);
        assert_eq!(r.next_occurrence(), Time::INFINITY);
        assert!(!r.can_execute(&env).unwrap());
    }

    #[test]
    fn execute_targets_the_candidate() {
        let (mut env, a, ids) = star(cell(&[]), vec![cell(&[("X", 5.0)]), cell(&[("X", 1.0)])]);
        let mut r = transfer(a, SharedRng::new(1));
        r.update_internal_status(Time::ZERO, false, &env).unwrap();
        assert!(r.can_execute(&env).unwrap());
        assert_eq!(r.execute(&mut env).unwrap(), Some(ids[0]));
        assert_eq!(env.node(ids[0]).unwrap().concentration(&mol("X")), 4.0);
        assert_eq!(env.node(ids[1]).unwrap().concentration(&mol("X")), 1.0);
    }

    #[test]
    fn empty_map_skips_neighbor_actions_but_runs_local_ones() {
        let (mut env, a, ids) = star(cell(&[]), vec![cell(&[("X", 1.0)])]);
        let mut r = transfer(a, SharedRng::new(1)).with_actions([
            crate::Action::from(NeighborAction::change_concentration(mol("X"), 5.0)),
            LocalAction::change_concentration(mol("Y"), 1.0).into(),
        ]);
        r.update_internal_status(Time::ZERO, false, &env).unwrap();
        assert!(r.candidates().is_empty());
        assert_eq!(r.execute(&mut env).unwrap(), None);
        assert_eq!(env.node(ids[0]).unwrap().concentration(&mol("X")), 1.0);
        assert_eq!(env.node(a).unwrap().concentration(&mol("Y")), 1.0);
    }

    #[test]
    fn local_only_always_executes() {
        let mut env = Environment::new();
        let a = env.add_node(cell(&[]));
        let mut r = BiochemicalReaction::new(a, ExponentialTime::new(1.0, Time::ZERO), SharedRng::new(2))
            .with_actions([LocalAction::change_concentration(mol("A"), 1.0)]);
        for step in 0..3 {
            r.update_internal_status(Time(f64::from(step)), step > 0, &env).unwrap();
            assert_eq!(r.execute(&mut env).unwrap(), None);
        }
        assert_eq!(env.node(a).unwrap().concentration(&mol("A")), 3.0);

        // Linking neighbors changes nothing for a purely local reaction.
        let b = env.add_node(cell(&[]));
        env.add_link(a, b).unwrap();
        r.update_internal_status(Time(3.0), true, &env).unwrap();
        r.execute(&mut env).unwrap();
        assert_eq!(env.node(a).unwrap().concentration(&mol("A")), 4.0);
    }

    #[test]
    fn local_only_neighbor_action_uses_some_neighbor() {
        let (mut env, a, ids) = star(cell(&[]), vec![cell(&[]), cell(&[])]);
        let mut r = BiochemicalReaction::new(a, ExponentialTime::new(1.0, Time::ZERO), SharedRng::new(2))
            .with_actions([NeighborAction::change_concentration(mol("Z"), 1.0)]);
        r.update_internal_status(Time::ZERO, false, &env).unwrap();
        let target = r.execute(&mut env).unwrap().unwrap();
        assert!(ids.contains(&target));
        assert_eq!(env.node(target).unwrap().concentration(&mol("Z")), 1.0);
    }

    #[test]
    fn local_only_neighbor_actions_share_one_draw() {
        let neighbors = (0..6).map(|_| cell(&[])).collect();
        let (mut env, a, ids) = star(cell(&[]), neighbors);
        let mut r = BiochemicalReaction::new(a, ExponentialTime::new(1.0, Time::ZERO), SharedRng::new(4))
            .with_actions([
                NeighborAction::change_concentration(mol("Y"), 1.0),
                NeighborAction::change_concentration(mol("Z"), 1.0),
            ]);
        r.update_internal_status(Time::ZERO, false, &env).unwrap();
        for _ in 0..10 {
            let target = r.execute(&mut env).unwrap().unwrap();
            for &id in &ids {
                let node = env.node(id).unwrap();
                assert_eq!(node.concentration(&mol("Y")), node.concentration(&mol("Z")));
            }
            assert!(env.node(target).unwrap().concentration(&mol("Y")) >= 1.0);
        }
    }

    #[test]
    fn clone_shares_rng_and_starts_empty() {
        let (env, a, ids) = star(cell(&[]), vec![cell(&[("X", 5.0)])]);
        let rng = SharedRng::new(9);
        let mut original = transfer(a, rng.clone());
        original.update_internal_status(Time::ZERO, false, &env).unwrap();

        let copy = original.clone_on_new_node(ids[0], Time(1.0));
        assert!(copy.rng().ptr_eq(original.rng()));
        assert_eq!(rng.handle_count(), 3);
        assert_eq!(copy.node(), ids[0]);
        assert!(copy.candidates().is_empty());
        assert_eq!(copy.mode(), ReactionMode::NeighborAware);
        assert_eq!(copy.conditions(), original.conditions());
        assert_eq!(copy.next_occurrence(), Time::INFINITY);
    }

    #[test]
    fn same_seed_same_targets() {
        let neighbors = || vec![cell(&[("X", 3.0)]), cell(&[("X", 4.0)]), cell(&[("X", 6.0)])];
        let run = |seed| {
            let (mut env, a, _) = star(cell(&[]), neighbors());
            let mut r = transfer(a, SharedRng::new(seed))
                .with_actions([NeighborAction::change_concentration(mol("Y"), 1.0)]);
            (0..25)
                .map(|i| {
                    r.update_internal_status(Time(f64::from(i)), i > 0, &env).unwrap();
                    r.execute(&mut env).unwrap()
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(11), run(11));
    }

    #[test]
    fn only_empty_reduction_is_an_invariant_violation() {
        use crate::ReactionError;
        assert!(ReactionError::EmptyNeighborReduction { node: NodeId(0) }.is_invariant_violation());
        assert!(!ReactionError::InvalidWeights("nan".into()).is_invariant_violation());
    }

    #[test]
    fn display_lists_conditions_and_actions() {
        let r = transfer(NodeId(0), SharedRng::new(0));
        assert_eq!(r.to_string(), "NodeId(0): [X >= 2 in neighbor] --> [X -1 in neighbor]");
    }
}

// ── Shared helpers sanity ─────────────────────────────────────────────────────

#[test]
fn star_links_every_neighbor() {
    let (env, a, ids) = star(cell(&[]), vec![cell(&[]), cell(&[])]);
    assert_eq!(env.neighborhood(a).unwrap().len(), 2);
    assert!(ids.iter().all(|&id| env.are_neighbors(a, id)));
}
