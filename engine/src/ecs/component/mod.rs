//! Component types and their registration.
//!
//! Components are plain data records attached to entities. Before a type can be stored in a
//! [`World`](crate::ecs::World) it has to be registered, which assigns it a [`Slot`]: a small
//! integer that doubles as its bit position in every entity [`Signature`].
//!
//! ## Usage
//!
//! ```ignore
//! use signet_engine::ecs::component::{Component, Registry};
//!
//! #[derive(Component)]
//! struct Position { x: f32, y: f32 }
//!
//! let mut registry = Registry::new(32);
//! let slot = registry.register::<Position>()?;
//! assert_eq!(registry.slot_of::<Position>()?, slot);
//! ```

mod registry;
mod signature;

pub use registry::{ComponentInfo, Registry};
pub use signature::Signature;

/// A component type slot. Assigned in registration order starting at zero, and stable for the
/// lifetime of the registry that issued it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(u32);

impl Slot {
    /// Construct a slot from a raw value.
    #[inline]
    pub const fn new(slot: u32) -> Self {
        Self(slot)
    }

    /// Get the index of this slot for use in indexable storage (e.g. Vec, bitset).
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for Slot {
    #[inline]
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<usize> for Slot {
    #[inline]
    fn from(value: usize) -> Self {
        Self::new(value as u32)
    }
}

/// A trait representing a component in the ECS.
///
/// This only sets the trait bounds a type needs to be stored. Derive it with
/// `#[derive(Component)]`.
pub trait Component: 'static + Sized {}
