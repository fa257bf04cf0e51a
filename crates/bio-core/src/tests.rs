//! Unit tests for bio-core primitives.

#[cfg(test)]
mod ids {
    use crate::{NodeId, ReactionId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(NodeId(0) < NodeId(1));
        assert!(ReactionId(100) > ReactionId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(ReactionId::default(), ReactionId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod molecule {
    use crate::Molecule;

    #[test]
    fn valid_name() {
        let m = Molecule::new("A").unwrap();
        assert_eq!(m.name(), "A");
        assert_eq!(m.to_string(), "A");
        assert_eq!("A".parse::<Molecule>().unwrap(), m);
    }

    #[test]
    fn rejects_empty_and_padded() {
        assert!(Molecule::new("").is_err());
        assert!(Molecule::new(" A").is_err());
    }

    #[test]
    fn clones_compare_equal() {
        let m = Molecule::new("ATP").unwrap();
        assert_eq!(m.clone(), m);
        assert!(Molecule::new("A").unwrap() < Molecule::new("B").unwrap());
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Time};

    #[test]
    fn equality_and_hash_agree() {
        use std::collections::HashSet;
        let t = Time(1.0);
        assert_eq!(Time(1.0), t);
        assert_ne!(Time::ZERO, t);
        let set: HashSet<Time> = [Time(1.0), Time(1.0)].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn infinity_sorts_last() {
        let mut v = vec![Time::INFINITY, Time(2.0), Time::ZERO];
        v.sort();
        assert_eq!(v, vec![Time::ZERO, Time(2.0), Time::INFINITY]);
        assert!(!Time::INFINITY.is_finite());
    }

    #[test]
    fn arithmetic() {
        assert_eq!(Time(1.5) + 2.0, Time(3.5));
        assert_eq!(Time(3.0) - Time(1.0), 2.0);
        assert_eq!(Time(3.0).since(Time(1.0)), 2.0);
    }

    #[test]
    fn clock_advances() {
        let mut clock = SimClock::new();
        clock.advance_to(Time(0.5));
        clock.advance_to(Time(0.5));
        clock.advance_to(Time(2.0));
        assert_eq!(clock.current_time, Time(2.0));
        assert_eq!(clock.steps, 3);
    }

    #[test]
    fn config_finish_conditions() {
        let cfg = SimConfig { end_time: Time(10.0), max_steps: Some(2), seed: 1 };
        let mut clock = cfg.make_clock();
        assert!(!cfg.is_finished(&clock, Time(5.0)));
        assert!(cfg.is_finished(&clock, Time(10.5)));
        assert!(cfg.is_finished(&clock, Time::INFINITY));
        clock.advance_to(Time(1.0));
        clock.advance_to(Time(2.0));
        assert!(cfg.is_finished(&clock, Time(5.0)));
    }
}

#[cfg(test)]
mod rng {
    use rand::Rng;

    use crate::{SharedRng, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn children_diverge() {
        let mut root = SimRng::new(1);
        let mut c0 = root.child(0);
        let mut c1 = root.child(1);
        let a: u64 = c0.random();
        let b: u64 = c1.random();
        assert_ne!(a, b);
    }

    #[test]
    fn shared_handles_draw_from_one_stream() {
        let shared = SharedRng::new(7);
        let alias = shared.clone();
        assert!(shared.ptr_eq(&alias));
        assert_eq!(shared.handle_count(), 2);

        let mut reference = SimRng::new(7);
        let first: u64 = shared.borrow_mut().r#gen();
        let second: u64 = alias.borrow_mut().r#gen();
        assert_eq!(first, reference.random::<u64>());
        assert_eq!(second, reference.random::<u64>());
    }

    #[test]
    fn separate_streams_are_not_aliased() {
        assert!(!SharedRng::new(7).ptr_eq(&SharedRng::new(7)));
    }
}

#[cfg(test)]
mod math {
    use proptest::prelude::*;

    use crate::{binomial_coefficient, concentration_propensity};

    #[test]
    fn small_binomials() {
        assert_eq!(binomial_coefficient(5, 2), 10.0);
        assert_eq!(binomial_coefficient(5, 0), 1.0);
        assert_eq!(binomial_coefficient(5, 5), 1.0);
        assert_eq!(binomial_coefficient(10, 3), 120.0);
        assert_eq!(binomial_coefficient(0, 0), 1.0);
    }

    #[test]
    fn upper_below_lower_is_zero() {
        assert_eq!(binomial_coefficient(2, 3), 0.0);
        assert_eq!(binomial_coefficient(0, 1), 0.0);
    }

    #[test]
    fn five_units_threshold_two() {
        assert_eq!(concentration_propensity(5.0, 2.0), 10.0);
    }

    #[test]
    fn fractional_quantities() {
        // trunc(5.9) = 5, ceil(1.2) = 2
        assert_eq!(concentration_propensity(5.9, 1.2), 10.0);
        // threshold met, but C(0, 1) = 0
        assert_eq!(concentration_propensity(0.7, 0.5), 0.0);
    }

    #[test]
    fn nan_is_zero() {
        assert_eq!(concentration_propensity(f64::NAN, 1.0), 0.0);
    }

    proptest! {
        #[test]
        fn below_threshold_is_zero(threshold in 0.0f64..1_000.0, gap in 1e-6f64..1_000.0) {
            prop_assert_eq!(concentration_propensity(threshold - gap, threshold), 0.0);
        }

        #[test]
        fn binomial_symmetry(n in 0u64..60, k in 0u64..60) {
            prop_assume!(k <= n);
            prop_assert_eq!(binomial_coefficient(n, k), binomial_coefficient(n, n - k));
        }

        #[test]
        fn at_or_above_threshold_is_non_negative(available in 0.0f64..500.0, threshold in 0.0f64..500.0) {
            prop_assert!(concentration_propensity(available, threshold) >= 0.0);
        }
    }
}
