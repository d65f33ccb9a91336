//! Signature queries.
//!
//! A query names a set of component types, either a single type or a tuple of them. The world turns
//! it into a required [`Signature`] (the OR of each type's slot bit) and returns every live entity
//! whose own signature is a superset of it.
//!
//! ```ignore
//! // Every entity with both a Face and a Velocity.
//! for entity in world.query::<(Face, Velocity)>() {
//!     let velocity = *world.get_component::<Velocity>(entity);
//!     world.get_component::<Face>(entity).rect.x += velocity.x;
//! }
//! ```
//!
//! Results are materialized into a [`View`] at call time. Entities created or destroyed afterwards
//! are not reflected, and the world can be mutated freely while walking a view.

use crate::ecs::{
    component::{Component, Registry, Signature},
    entity::Entity,
    error::Result,
};

/// A snapshot of query results, in ascending entity order.
pub type View = Vec<Entity>;

/// A set of component types that can be queried for.
pub trait Query {
    /// Set the slot bit of every component type in this query.
    ///
    /// Fails if any of the types is not registered.
    fn require(registry: &Registry, signature: &mut Signature) -> Result<()>;

    /// Build the required signature for this query.
    fn signature(registry: &Registry) -> Result<Signature> {
        let mut signature = Signature::new(registry.capacity());
        Self::require(registry, &mut signature)?;
        Ok(signature)
    }
}

/// The empty query matches every live entity.
impl Query for () {
    #[inline]
    fn require(_registry: &Registry, _signature: &mut Signature) -> Result<()> {
        Ok(())
    }
}

impl<C: Component> Query for C {
    #[inline]
    fn require(registry: &Registry, signature: &mut Signature) -> Result<()> {
        signature.insert(registry.slot_of::<C>()?);
        Ok(())
    }
}

macro_rules! tuple_query {
    ($($name: ident),*) => {
        impl<$($name: Query),*> Query for ($($name,)*) {
            #[inline]
            fn require(registry: &Registry, signature: &mut Signature) -> Result<()> {
                $(
                    <$name>::require(registry, signature)?;
                )*
                Ok(())
            }
        }
    }
}

crate::all_tuples!(tuple_query);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{component::Slot, error::Error};
    use signet_macros::Component;

    #[derive(Component)]
    struct Position;
    #[derive(Component)]
    struct Velocity;
    #[derive(Component)]
    struct Health;
    #[derive(Component)]
    struct Unregistered;

    fn registry() -> Registry {
        let mut registry = Registry::new(8);
        registry.register::<Position>().unwrap();
        registry.register::<Velocity>().unwrap();
        registry.register::<Health>().unwrap();
        registry
    }

    #[test]
    fn single_component_signature() {
        // Given
        let registry = registry();

        // When
        let signature = <Velocity as Query>::signature(&registry).unwrap();

        // Then
        assert_eq!(signature, Signature::with_slots(8, [Slot::new(1)]));
    }

    #[test]
    fn tuple_signature_is_union() {
        // Given
        let registry = registry();

        // When
        let signature = <(Health, Position)>::signature(&registry).unwrap();

        // Then
        assert_eq!(signature, Signature::with_slots(8, [Slot::new(0), Slot::new(2)]));
    }

    #[test]
    fn nested_and_repeated_types_collapse() {
        // Given
        let registry = registry();

        // When
        let signature = <((Position, Velocity), Position)>::signature(&registry).unwrap();

        // Then
        assert_eq!(signature.len(), 2);
    }

    #[test]
    fn empty_query_requires_nothing() {
        // Given
        let registry = registry();

        // Then
        assert!(<()>::signature(&registry).unwrap().is_empty());
    }

    #[test]
    fn unregistered_type_fails() {
        // Given
        let registry = registry();

        // When
        let result = <(Position, Unregistered)>::signature(&registry);

        // Then
        assert!(matches!(result, Err(Error::ComponentNotRegistered { .. })));
    }
}
