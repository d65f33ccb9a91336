//! Packed per-type component storage.
//!
//! Every registered component type gets its own [`Store`]: a dense array of values plus the maps
//! needed to find an entity's value and to find the entity owning a value.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Store<Position>                                          │
//! │                                                          │
//! │  index:    entity id → row   [_, 2, _, 0, _, 1, ...]     │
//! │  entities: row → entity id   [3, 5, 1]                   │
//! │  values:   row → value       [P3, P5, P1]                │
//! │                              ▲▲▲▲▲▲▲▲▲▲▲                 │
//! │                              always packed in [0, len)   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Removal
//!
//! Removing a value moves the last value into the hole and shrinks the array by one, so the packed
//! region never has gaps. The moved entity's index entry is rewritten to its new row. Order is not
//! preserved.
//!
//! # Type Erasure
//!
//! The world keeps its stores in a slot-indexed table of `Box<dyn ErasedStore>`. The erased
//! interface only carries the lifecycle hook the world needs when an entity is destroyed; typed
//! access resolves the store through its registered slot, so callers never see a cast.
//!
//! # Capacity
//!
//! All arrays are allocated at construction with room for one value per possible entity id and are
//! never grown.

mod index;

use std::any::{Any, type_name};

use index::{Row, SparseIndex};

use crate::ecs::{
    component::{Component, Slot},
    entity::Entity,
    error::{Error, Result},
};

/// Packed storage for every value of component type `C`.
#[derive(Debug)]
pub struct Store<C: Component> {
    /// Component values, packed in `[0, len)`.
    values: Vec<C>,

    /// The owning entity of each packed value.
    entities: Vec<Entity>,

    /// Entity id to packed row.
    index: SparseIndex,
}

impl<C: Component> Store<C> {
    /// Create a store with room for entity ids `[0, capacity)`.
    pub fn new(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            entities: Vec::with_capacity(capacity),
            index: SparseIndex::new(capacity),
        }
    }

    /// Append a value for `entity`.
    ///
    /// Fails if `entity` already has a value here or lies outside the store's range.
    pub fn insert(&mut self, entity: Entity, value: C) -> Result<()> {
        if entity.index() >= self.index.capacity() {
            return Err(Error::EntityOutOfRange {
                entity,
                capacity: self.index.capacity(),
            });
        }
        if self.index.contains(entity) {
            return Err(Error::ComponentAlreadyPresent {
                entity,
                component: type_name::<C>(),
            });
        }

        let row = Row::new(self.values.len());
        self.values.push(value);
        self.entities.push(entity);
        self.index.insert(entity, row);
        Ok(())
    }

    /// Remove and return the value for `entity`.
    ///
    /// The last packed value is moved into the vacated row. Fails if `entity` has no value here.
    pub fn remove(&mut self, entity: Entity) -> Result<C> {
        let row = self.index.remove(entity).ok_or(Error::ComponentMissing {
            entity,
            component: type_name::<C>(),
        })?;

        let value = self.values.swap_remove(row.index());
        self.entities.swap_remove(row.index());

        // Whatever now sits at `row` came from the end; repoint it.
        if let Some(&moved) = self.entities.get(row.index()) {
            self.index.insert(moved, row);
        }

        Ok(value)
    }

    /// Get a mutable reference to the value for `entity`.
    pub fn get(&mut self, entity: Entity) -> Result<&mut C> {
        match self.index.get(entity) {
            Some(row) => Ok(&mut self.values[row.index()]),
            None => Err(Error::ComponentMissing {
                entity,
                component: type_name::<C>(),
            }),
        }
    }

    /// Get a shared reference to the value for `entity`.
    pub fn get_ref(&self, entity: Entity) -> Result<&C> {
        match self.index.get(entity) {
            Some(row) => Ok(&self.values[row.index()]),
            None => Err(Error::ComponentMissing {
                entity,
                component: type_name::<C>(),
            }),
        }
    }

    /// Remove the value for `entity` if there is one.
    pub fn on_entity_destroyed(&mut self, entity: Entity) {
        if self.index.contains(entity) {
            // Cannot fail: presence was just checked.
            let _ = self.remove(entity);
        }
    }

    /// Check if `entity` has a value here.
    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.index.contains(entity)
    }

    /// The number of stored values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no values are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The packed values, in storage order.
    #[inline]
    pub fn values(&self) -> &[C] {
        &self.values
    }

    /// The owning entities, parallel to [`values`](Self::values).
    #[inline]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Iterate `(entity, value)` pairs in storage order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &C)> {
        self.entities.iter().copied().zip(self.values.iter())
    }
}

/// The type-erased face of a [`Store`].
///
/// This is all the world needs to keep a store consistent without knowing its component type.
pub trait ErasedStore: Any {
    /// Drop `entity`'s value if present, otherwise do nothing.
    fn on_entity_destroyed(&mut self, entity: Entity);

    /// Check if `entity` has a value in this store.
    fn contains(&self, entity: Entity) -> bool;

    /// The number of stored values.
    fn len(&self) -> usize;

    /// Returns true if no values are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The component type name, for diagnostics.
    fn component_name(&self) -> &'static str;

    /// Upcast for typed access.
    fn as_any(&self) -> &dyn Any;

    /// Upcast for typed mutable access.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<C: Component> ErasedStore for Store<C> {
    #[inline]
    fn on_entity_destroyed(&mut self, entity: Entity) {
        Store::on_entity_destroyed(self, entity)
    }

    #[inline]
    fn contains(&self, entity: Entity) -> bool {
        Store::contains(self, entity)
    }

    #[inline]
    fn len(&self) -> usize {
        Store::len(self)
    }

    #[inline]
    fn component_name(&self) -> &'static str {
        type_name::<C>()
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Every store in a world, indexed by component slot.
pub struct Stores {
    stores: Vec<Box<dyn ErasedStore>>,

    /// Entity capacity each new store is built with.
    entity_capacity: usize,
}

impl Stores {
    /// Create an empty table with room for `slots` stores, each covering `entity_capacity` ids.
    pub fn new(slots: usize, entity_capacity: usize) -> Self {
        Self {
            stores: Vec::with_capacity(slots),
            entity_capacity,
        }
    }

    /// Create the store for a freshly registered slot.
    ///
    /// Slots are issued densely from zero, so the new store lands at index `slot`.
    pub fn add<C: Component>(&mut self, slot: Slot) {
        debug_assert_eq!(
            slot.index(),
            self.stores.len(),
            "component slots must be dense"
        );
        self.stores.push(Box::new(Store::<C>::new(self.entity_capacity)));
    }

    /// Get the typed store in `slot`, if it holds `C`.
    #[inline]
    pub fn get<C: Component>(&self, slot: Slot) -> Option<&Store<C>> {
        self.stores.get(slot.index())?.as_any().downcast_ref()
    }

    /// Get the typed store in `slot` mutably, if it holds `C`.
    #[inline]
    pub fn get_mut<C: Component>(&mut self, slot: Slot) -> Option<&mut Store<C>> {
        self.stores
            .get_mut(slot.index())?
            .as_any_mut()
            .downcast_mut()
    }

    /// Get the erased store in `slot`.
    #[inline]
    pub fn erased(&self, slot: Slot) -> Option<&dyn ErasedStore> {
        self.stores.get(slot.index()).map(|store| store.as_ref())
    }

    /// Tell every store that `entity` is gone.
    pub fn on_entity_destroyed(&mut self, entity: Entity) {
        for store in self.stores.iter_mut() {
            store.on_entity_destroyed(entity);
        }
    }

    /// The number of stores.
    #[inline]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Returns true if no stores exist yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signet_macros::Component;
    use std::collections::HashSet;

    #[derive(Component, Debug, Clone, Copy, PartialEq)]
    struct Position {
        x: i32,
        y: i32,
    }

    #[derive(Component, Debug, PartialEq)]
    struct Name(String);

    fn e(id: u32) -> Entity {
        Entity::from(id)
    }

    #[test]
    fn insert_and_get() {
        // Given
        let mut store = Store::<Position>::new(8);

        // When
        store.insert(e(3), Position { x: 1, y: 2 }).unwrap();
        store.insert(e(5), Position { x: 3, y: 4 }).unwrap();

        // Then
        assert_eq!(store.len(), 2);
        assert_eq!(*store.get_ref(e(3)).unwrap(), Position { x: 1, y: 2 });
        assert_eq!(*store.get(e(5)).unwrap(), Position { x: 3, y: 4 });
        assert_eq!(store.entities(), &[e(3), e(5)]);
    }

    #[test]
    fn get_returns_mutable_reference() {
        // Given
        let mut store = Store::<Position>::new(4);
        store.insert(e(0), Position { x: 0, y: 0 }).unwrap();

        // When
        store.get(e(0)).unwrap().x = 10;

        // Then
        assert_eq!(store.get_ref(e(0)).unwrap().x, 10);
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        // Given
        let mut store = Store::<Position>::new(4);
        store.insert(e(1), Position { x: 1, y: 1 }).unwrap();

        // When
        let result = store.insert(e(1), Position { x: 2, y: 2 });

        // Then - Original value is kept
        assert!(matches!(result, Err(Error::ComponentAlreadyPresent { .. })));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_ref(e(1)).unwrap().x, 1);
    }

    #[test]
    fn insert_out_of_range_is_rejected() {
        // Given
        let mut store = Store::<Position>::new(4);

        // When
        let result = store.insert(e(4), Position { x: 0, y: 0 });

        // Then
        assert_eq!(
            result,
            Err(Error::EntityOutOfRange {
                entity: e(4),
                capacity: 4
            })
        );
    }

    #[test]
    fn remove_moves_last_into_hole() {
        // Given
        let mut store = Store::<Position>::new(8);
        store.insert(e(0), Position { x: 0, y: 0 }).unwrap();
        store.insert(e(1), Position { x: 1, y: 1 }).unwrap();
        store.insert(e(2), Position { x: 2, y: 2 }).unwrap();

        // When
        let removed = store.remove(e(0)).unwrap();

        // Then - e(2) moved into row 0 and is still reachable
        assert_eq!(removed, Position { x: 0, y: 0 });
        assert_eq!(store.entities(), &[e(2), e(1)]);
        assert_eq!(
            store.values(),
            &[Position { x: 2, y: 2 }, Position { x: 1, y: 1 }]
        );
        assert_eq!(store.get_ref(e(2)).unwrap().x, 2);
        assert_eq!(store.get_ref(e(1)).unwrap().x, 1);
        assert!(!store.contains(e(0)));
    }

    #[test]
    fn remove_last_row() {
        // Given
        let mut store = Store::<Position>::new(4);
        store.insert(e(0), Position { x: 0, y: 0 }).unwrap();
        store.insert(e(1), Position { x: 1, y: 1 }).unwrap();

        // When
        store.remove(e(1)).unwrap();

        // Then
        assert_eq!(store.entities(), &[e(0)]);
        assert_eq!(store.get_ref(e(0)).unwrap().x, 0);
    }

    #[test]
    fn remove_missing_is_rejected() {
        // Given
        let mut store = Store::<Position>::new(4);

        // When
        let result = store.remove(e(2));

        // Then
        assert!(matches!(
            result,
            Err(Error::ComponentMissing { entity, .. }) if entity == e(2)
        ));
        assert!(store.get(e(2)).is_err());
    }

    #[test]
    fn reinsert_after_remove() {
        // Given
        let mut store = Store::<Name>::new(4);
        store.insert(e(1), Name("first".into())).unwrap();
        store.remove(e(1)).unwrap();

        // When
        store.insert(e(1), Name("second".into())).unwrap();

        // Then
        assert_eq!(store.get_ref(e(1)).unwrap(), &Name("second".into()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn on_entity_destroyed_is_noop_when_absent() {
        // Given
        let mut store = Store::<Position>::new(4);
        store.insert(e(1), Position { x: 1, y: 1 }).unwrap();

        // When
        store.on_entity_destroyed(e(0));
        store.on_entity_destroyed(e(3));

        // Then
        assert_eq!(store.len(), 1);

        // When
        store.on_entity_destroyed(e(1));

        // Then
        assert!(store.is_empty());
    }

    #[test]
    fn stays_packed_under_interleaving() {
        // Given
        let mut store = Store::<Position>::new(64);
        let mut holders = HashSet::new();

        // When - Deterministic interleaving of inserts and removes
        for step in 0..200u32 {
            let id = (step * 7 + 3) % 64;
            if holders.contains(&id) {
                store.remove(e(id)).unwrap();
                holders.remove(&id);
            } else {
                store
                    .insert(e(id), Position { x: id as i32, y: 0 })
                    .unwrap();
                holders.insert(id);
            }
        }

        // Then - Packed array holds exactly the holders, each reachable through the index
        assert_eq!(store.len(), holders.len());
        let packed: HashSet<u32> = store.iter().map(|(entity, _)| entity.id()).collect();
        assert_eq!(packed, holders);
        for (entity, value) in store.iter() {
            assert_eq!(value.x, entity.id() as i32);
            assert_eq!(store.get_ref(entity).unwrap().x, entity.id() as i32);
        }
    }

    #[test]
    fn erased_store_roundtrip() {
        // Given
        let mut stores = Stores::new(2, 8);
        stores.add::<Position>(Slot::new(0));
        stores.add::<Name>(Slot::new(1));

        // When
        stores
            .get_mut::<Position>(Slot::new(0))
            .unwrap()
            .insert(e(2), Position { x: 5, y: 5 })
            .unwrap();
        stores
            .get_mut::<Name>(Slot::new(1))
            .unwrap()
            .insert(e(2), Name("two".into()))
            .unwrap();

        // Then - Typed access only succeeds for the matching type
        assert!(stores.get::<Name>(Slot::new(0)).is_none());
        assert_eq!(stores.erased(Slot::new(0)).unwrap().len(), 1);
        assert!(stores.erased(Slot::new(1)).unwrap().contains(e(2)));
        assert!(
            stores
                .erased(Slot::new(1))
                .unwrap()
                .component_name()
                .ends_with("Name")
        );

        // When
        stores.on_entity_destroyed(e(2));

        // Then
        assert!(stores.erased(Slot::new(0)).unwrap().is_empty());
        assert!(stores.erased(Slot::new(1)).unwrap().is_empty());
    }
}
