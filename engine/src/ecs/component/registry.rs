use std::{
    any::{TypeId, type_name},
    collections::HashMap,
};

use crate::ecs::{
    component::{Component, Slot},
    error::{Error, Result},
};

/// Metadata about a registered component type, kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentInfo {
    /// The slot assigned at registration.
    slot: Slot,

    /// The Rust TypeId for runtime type checking.
    type_id: TypeId,

    /// The type name, as reported by `std::any::type_name`.
    name: &'static str,
}

impl ComponentInfo {
    fn new<C: Component>(slot: Slot) -> Self {
        Self {
            slot,
            type_id: TypeId::of::<C>(),
            name: type_name::<C>(),
        }
    }

    /// Get the assigned slot.
    #[inline]
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Get the Rust TypeId.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Get the type name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// A component registry. Assigns each component type a unique slot, in registration order, up to a
/// fixed number of slots.
///
/// Each world owns its own registry, so slot numbers are only meaningful within that world.
/// Registering the same type twice, or more types than there are slots, is an error.
#[derive(Debug)]
pub struct Registry {
    /// Map from TypeId to the assigned slot.
    type_map: HashMap<TypeId, Slot>,

    /// Registered component entries, indexed by slot.
    components: Vec<ComponentInfo>,

    /// Number of slots available.
    capacity: usize,
}

impl Registry {
    /// Create a new component registry with `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            type_map: HashMap::with_capacity(capacity),
            components: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Register a component type and assign it the next free slot.
    pub fn register<C: Component>(&mut self) -> Result<Slot> {
        let type_id = TypeId::of::<C>();
        if self.type_map.contains_key(&type_id) {
            return Err(Error::ComponentAlreadyRegistered {
                component: type_name::<C>(),
            });
        }
        if self.components.len() >= self.capacity {
            return Err(Error::ComponentLimitReached {
                component: type_name::<C>(),
                capacity: self.capacity,
            });
        }

        let slot = Slot::from(self.components.len());
        self.type_map.insert(type_id, slot);
        self.components.push(ComponentInfo::new::<C>(slot));
        log::debug!(
            "registered component `{}` in slot {}",
            type_name::<C>(),
            slot.index()
        );

        Ok(slot)
    }

    /// Get the slot assigned to `C`.
    #[inline]
    pub fn slot_of<C: Component>(&self) -> Result<Slot> {
        self.get::<C>().ok_or(Error::ComponentNotRegistered {
            component: type_name::<C>(),
        })
    }

    /// Get the slot assigned to `C`, if registered.
    #[inline]
    pub fn get<C: Component>(&self) -> Option<Slot> {
        self.type_map.get(&TypeId::of::<C>()).copied()
    }

    /// Check if `C` has been registered.
    #[inline]
    pub fn contains<C: Component>(&self) -> bool {
        self.type_map.contains_key(&TypeId::of::<C>())
    }

    /// Get component info by slot.
    #[inline]
    pub fn info(&self, slot: Slot) -> Option<&ComponentInfo> {
        self.components.get(slot.index())
    }

    /// Iterate all registrations in slot order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &ComponentInfo> {
        self.components.iter()
    }

    /// The number of registered component types.
    #[inline]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true if nothing has been registered yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// The number of slots available.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signet_macros::Component;

    #[test]
    fn component_registration() {
        // Given
        #[derive(Component, Debug)]
        struct Position();

        #[derive(Component, Debug)]
        struct Velocity();

        let mut registry = Registry::new(4);

        // When
        let pos_slot = registry.register::<Position>().unwrap();
        let vel_slot = registry.register::<Velocity>().unwrap();

        // Then - Slots are handed out in registration order
        assert_eq!(pos_slot, Slot::new(0));
        assert_eq!(vel_slot, Slot::new(1));
        assert_eq!(registry.len(), 2);
        assert_eq!(
            *registry.type_map.get(&TypeId::of::<Position>()).unwrap(),
            pos_slot
        );
        assert_eq!(
            *registry.type_map.get(&TypeId::of::<Velocity>()).unwrap(),
            vel_slot
        );
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        // Given
        #[derive(Component, Debug)]
        struct Health();

        let mut registry = Registry::new(4);
        let slot = registry.register::<Health>().unwrap();

        // When
        let result = registry.register::<Health>();

        // Then - The original slot is untouched
        assert!(matches!(
            result,
            Err(Error::ComponentAlreadyRegistered { component }) if component.ends_with("Health")
        ));
        assert_eq!(registry.slot_of::<Health>().unwrap(), slot);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registration_past_capacity_is_rejected() {
        // Given
        #[derive(Component, Debug)]
        struct A();
        #[derive(Component, Debug)]
        struct B();
        #[derive(Component, Debug)]
        struct C();

        let mut registry = Registry::new(2);
        registry.register::<A>().unwrap();
        registry.register::<B>().unwrap();

        // When
        let result = registry.register::<C>();

        // Then
        let err = result.unwrap_err();
        assert!(err.is_exhausted());
        assert!(matches!(
            err,
            Error::ComponentLimitReached { capacity: 2, .. }
        ));
        assert!(!registry.contains::<C>());
    }

    #[test]
    fn slot_retrieval() {
        // Given
        #[derive(Component, Debug)]
        struct Health();

        #[derive(Component, Debug)]
        struct Mana();

        let mut registry = Registry::new(4);
        let health_slot = registry.register::<Health>().unwrap();

        // Then
        assert_eq!(registry.slot_of::<Health>().unwrap(), health_slot);
        assert_eq!(registry.get::<Mana>(), None);
        assert!(matches!(
            registry.slot_of::<Mana>(),
            Err(Error::ComponentNotRegistered { .. })
        ));
    }

    #[test]
    fn component_info_retrieval() {
        // Given
        #[derive(Component, Debug)]
        struct Health();

        let mut registry = Registry::new(4);
        let slot = registry.register::<Health>().unwrap();

        // When
        let info = registry.info(slot).unwrap();

        // Then
        assert_eq!(info.slot(), slot);
        assert_eq!(info.type_id(), TypeId::of::<Health>());
        assert!(info.name().ends_with("Health"));
        assert!(registry.info(Slot::new(1)).is_none());
    }

    #[test]
    fn iteration_follows_slot_order() {
        // Given
        #[derive(Component, Debug)]
        struct Position();
        #[derive(Component, Debug)]
        struct Velocity();
        #[derive(Component, Debug)]
        struct Health();

        let mut registry = Registry::new(4);
        registry.register::<Velocity>().unwrap();
        registry.register::<Health>().unwrap();
        registry.register::<Position>().unwrap();

        // When
        let infos: Vec<_> = registry.iter().collect();

        // Then - One record per registration, with slots in issue order
        assert_eq!(infos.len(), registry.len());
        for (i, info) in infos.iter().enumerate() {
            assert_eq!(info.slot(), Slot::new(i as u32));
            assert_eq!(registry.info(info.slot()), Some(*info));
        }
        assert_eq!(infos[0].type_id(), TypeId::of::<Velocity>());
        assert_eq!(infos[1].type_id(), TypeId::of::<Health>());
        assert!(infos[2].name().ends_with("Position"));
    }

    #[test]
    fn registries_are_independent() {
        // Given
        #[derive(Component, Debug)]
        struct Position();
        #[derive(Component, Debug)]
        struct Velocity();

        let mut first = Registry::new(4);
        let mut second = Registry::new(4);

        // When - Same types, opposite order
        first.register::<Position>().unwrap();
        first.register::<Velocity>().unwrap();
        second.register::<Velocity>().unwrap();
        second.register::<Position>().unwrap();

        // Then
        assert_eq!(first.slot_of::<Position>().unwrap(), Slot::new(0));
        assert_eq!(second.slot_of::<Position>().unwrap(), Slot::new(1));
    }
}
