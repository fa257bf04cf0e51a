//! Type-erased, heterogeneous capability storage.
//!
//! # Design
//!
//! A capability is any `Clone + Send + Sync + 'static` value attached to a
//! node at construction time ([`CellProperty`][crate::CellProperty] is the
//! one the reaction layer cares about).  Each capability type `T` is stored
//! once per node behind a `Box<dyn CapabilitySlot>` in a `HashMap<TypeId, …>`
//! and queried by type:
//!
//! ```rust
//! use bio_env::CapabilityMap;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Motile { speed: f64 }
//!
//! let mut caps = CapabilityMap::new();
//! caps.insert(Motile { speed: 2.0 });
//! assert_eq!(caps.get::<Motile>(), Some(&Motile { speed: 2.0 }));
//! assert!(caps.get::<String>().is_none());
//! ```
//!
//! The query returns an optional typed view; there is no cast that can fail
//! at the call site.

use std::any::{Any, TypeId};
use std::collections::HashMap;

// ── Trait object ──────────────────────────────────────────────────────────────

/// Type-erased interface for one stored capability value.
///
/// The trait is sealed (only implementable inside this crate) via the private
/// `Sealed` supertrait; the only implementor is [`TypedCapability<T>`].
pub trait CapabilitySlot: Send + Sync + 'static + sealed::Sealed {
    /// `std::any::type_name` of the stored value, for diagnostics.
    fn type_name(&self) -> &'static str;

    /// Deep copy behind a new box.
    fn clone_box(&self) -> Box<dyn CapabilitySlot>;

    #[doc(hidden)]
    fn as_any(&self) -> &dyn Any;

    #[doc(hidden)]
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

mod sealed {
    pub trait Sealed {}
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// A capability value wrapped so it can be stored as `Box<dyn CapabilitySlot>`.
///
/// Use [`CapabilityMap::insert`] rather than constructing this directly.
pub struct TypedCapability<T: Clone + Send + Sync + 'static>(pub T);

impl<T: Clone + Send + Sync + 'static> sealed::Sealed for TypedCapability<T> {}

impl<T: Clone + Send + Sync + 'static> CapabilitySlot for TypedCapability<T> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn clone_box(&self) -> Box<dyn CapabilitySlot> {
        Box::new(TypedCapability(self.0.clone()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ── CapabilityMap ─────────────────────────────────────────────────────────────

/// The set of capabilities attached to one node, at most one value per type.
#[derive(Default)]
pub struct CapabilityMap {
    map: HashMap<TypeId, Box<dyn CapabilitySlot>>,
}

impl CapabilityMap {
    pub fn new() -> Self {
        Self { map: HashMap::new() }
    }

    /// Attach capability `value`, replacing any previous value of type `T`.
    ///
    /// Returns the replaced value, if there was one.
    pub fn insert<T: Clone + Send + Sync + 'static>(&mut self, value: T) -> Option<T> {
        self.map
            .insert(TypeId::of::<T>(), Box::new(TypedCapability(value)))
            .and_then(|old| {
                old.as_any()
                    .downcast_ref::<TypedCapability<T>>()
                    .map(|v| v.0.clone())
            })
    }

    // ── Read access ───────────────────────────────────────────────────────

    /// Typed view of capability `T`, or `None` if the node lacks it.
    pub fn get<T: Clone + Send + Sync + 'static>(&self) -> Option<&T> {
        self.map
            .get(&TypeId::of::<T>())
            .and_then(|v| v.as_any().downcast_ref::<TypedCapability<T>>())
            .map(|v| &v.0)
    }

    /// Mutable typed view of capability `T`.
    pub fn get_mut<T: Clone + Send + Sync + 'static>(&mut self) -> Option<&mut T> {
        self.map
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.as_any_mut().downcast_mut::<TypedCapability<T>>())
            .map(|v| &mut v.0)
    }

    // ── Metadata ──────────────────────────────────────────────────────────

    /// Number of distinct capability types attached.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// `true` if capability `T` is attached.
    pub fn contains<T: Clone + Send + Sync + 'static>(&self) -> bool {
        self.map.contains_key(&TypeId::of::<T>())
    }

    /// Type names of all attached capabilities, sorted.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.map.values().map(|v| v.type_name()).collect();
        names.sort_unstable();
        names
    }
}

impl Clone for CapabilityMap {
    fn clone(&self) -> Self {
        Self {
            map: self.map.iter().map(|(k, v)| (*k, v.clone_box())).collect(),
        }
    }
}

impl std::fmt::Debug for CapabilityMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.type_names()).finish()
    }
}
