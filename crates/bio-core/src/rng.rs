//! Deterministic RNG wrappers.
//!
//! # Determinism strategy
//!
//! A simulation run owns exactly one random stream.  Every reaction holds a
//! [`SharedRng`] handle onto it, and reactions cloned onto new nodes share the
//! same handle rather than copying generator state.  Because the event loop
//! is single-threaded and processes events in a total order, the sequence of
//! draws (and hence the whole run) is a pure function of the seed.
//!
//! `SharedRng` is `Rc<RefCell<…>>` and therefore `!Send`: the type system
//! refuses to move it onto another thread.  Callers who need parallel
//! randomness derive independent sub-streams with [`SimRng::child`].

use std::cell::{RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Owned simulation-level RNG.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset, useful for
    /// deterministic per-worker sub-streams.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Turn this generator into a handle that can be shared by reactions.
    pub fn into_shared(self) -> SharedRng {
        SharedRng(Rc::new(RefCell::new(self.0)))
    }
}

// ── SharedRng ─────────────────────────────────────────────────────────────────

/// A cloneable handle onto one shared random stream.
///
/// `Clone` copies the handle, never the generator state.
#[derive(Clone)]
pub struct SharedRng(Rc<RefCell<SmallRng>>);

impl SharedRng {
    /// Seed a fresh shared stream.
    pub fn new(seed: u64) -> Self {
        SimRng::new(seed).into_shared()
    }

    /// Borrow the generator for a sequence of draws.
    ///
    /// # Panics
    /// Panics if the generator is already borrowed.  Borrows never outlive a
    /// single condition/action/time-distribution call, so this only happens
    /// on re-entrant misuse.
    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, SmallRng> {
        self.0.borrow_mut()
    }

    /// `true` if both handles refer to the same generator.
    #[inline]
    pub fn ptr_eq(&self, other: &SharedRng) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of live handles onto this generator.
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

impl fmt::Debug for SharedRng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedRng")
            .field("handles", &self.handle_count())
            .finish_non_exhaustive()
    }
}

impl From<SimRng> for SharedRng {
    fn from(rng: SimRng) -> Self {
        rng.into_shared()
    }
}
