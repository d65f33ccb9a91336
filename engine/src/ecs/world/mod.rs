//! The World is the central container for all entities and components in the ECS.
//!
//! A `World` owns every piece of ECS state: the entity id pool, the signature table, the component
//! registry and one packed store per registered type. Client code only ever holds [`Entity`]
//! handles and borrows of individual values.
//!
//! # Architecture
//!
//! The World coordinates several subsystems:
//! - **Entity Pool**: hands out and recycles ids from `[0, ENTITIES)`, FIFO
//! - **Component Registry**: assigns each component type a slot in `[0, COMPONENTS)`
//! - **Stores**: one packed array per registered type, indexed by slot
//! - **Signatures**: one bitset per entity id; bit `k` is set iff the store in slot `k` holds a
//!   value for that entity
//!
//! # Entity lifecycle
//!
//! ```text
//!            create_entity()                    destroy_entity(e)
//!   Free ─────────────────────▶ Live ─────────────────────────────▶ Free
//!   (queued in pool,            (signature gains and loses bits     (signature cleared, every
//!    signature empty)            as components come and go)          store notified, id queued)
//! ```
//!
//! # Errors
//!
//! Every operation comes in two forms. The `try_` form returns an [`Error`](crate::ecs::Error)
//! describing the violated precondition. The plain form treats any violation as a bug in the host:
//! it logs the error and panics.
//!
//! # Example
//!
//! ```ignore
//! use signet_engine::ecs::World;
//!
//! let mut world = World::new();
//! world.register_component::<Position>();
//! world.register_component::<Velocity>();
//!
//! let e0 = world.create_entity();
//! world.add_component(e0, Position { x: 0, y: 0 });
//! world.add_component(e0, Velocity { x: 1, y: 1 });
//!
//! let e1 = world.create_entity();
//! world.add_component(e1, Position { x: 5, y: 5 });
//!
//! assert_eq!(world.query::<(Position, Velocity)>(), vec![e0]);
//! assert_eq!(world.query::<Position>(), vec![e0, e1]);
//! ```

use std::marker::PhantomData;

use crate::{
    config::{MAX_COMPONENTS, MAX_ENTITIES},
    ecs::{
        component::{self, Component, Signature, Slot},
        entity::{self, Entity},
        error::{Error, Result, fatal},
        query::{Query, View},
        storage::{self, Store},
    },
};

/// The World is the central container for all entities and their components.
///
/// `ENTITIES` and `COMPONENTS` are the build-time ceilings on live entities and registered
/// component types. [`World::new`] uses the crate defaults; pick other values with
/// [`World::with_limits`].
pub struct World<const ENTITIES: usize = MAX_ENTITIES, const COMPONENTS: usize = MAX_COMPONENTS> {
    /// The world's entity id pool.
    entities: entity::Pool,

    /// One signature per entity id.
    signatures: Box<[Signature]>,

    /// Component type to slot assignments.
    registry: component::Registry,

    /// One store per registered slot.
    stores: storage::Stores,

    /// Marker to make World !Send. World must stay on the thread that created it.
    _not_send: PhantomData<*mut ()>,
}

impl World {
    /// Create a world with the default capacity limits.
    pub fn new() -> Self {
        Self::with_limits()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl<const ENTITIES: usize, const COMPONENTS: usize> World<ENTITIES, COMPONENTS> {
    /// Create a world sized by its const parameters. All entity-indexed storage is allocated here.
    pub fn with_limits() -> Self {
        log::debug!("creating world: {ENTITIES} entities, {COMPONENTS} component slots");
        Self {
            entities: entity::Pool::new(ENTITIES),
            signatures: vec![Signature::new(COMPONENTS); ENTITIES].into_boxed_slice(),
            registry: component::Registry::new(COMPONENTS),
            stores: storage::Stores::new(COMPONENTS, ENTITIES),
            _not_send: PhantomData,
        }
    }

    /// The maximum number of simultaneously live entities.
    #[inline]
    pub const fn entity_capacity(&self) -> usize {
        ENTITIES
    }

    /// The maximum number of component types.
    #[inline]
    pub const fn component_capacity(&self) -> usize {
        COMPONENTS
    }

    /// The number of live entities.
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.entities.live_count()
    }

    /// Access the component registry.
    #[inline]
    pub fn registry(&self) -> &component::Registry {
        &self.registry
    }

    // ── Registration ────────────────────────────────────────────────

    /// Register a component type, creating its store.
    ///
    /// Fails if `C` is already registered or every slot is taken.
    pub fn try_register_component<C: Component>(&mut self) -> Result<Slot> {
        let slot = self.registry.register::<C>()?;
        self.stores.add::<C>(slot);
        Ok(slot)
    }

    /// Register a component type, creating its store.
    ///
    /// # Panics
    /// Panics if `C` is already registered or every slot is taken.
    #[track_caller]
    pub fn register_component<C: Component>(&mut self) -> Slot {
        fatal(self.try_register_component::<C>())
    }

    /// Get the slot assigned to `C`.
    #[inline]
    pub fn try_component_slot<C: Component>(&self) -> Result<Slot> {
        self.registry.slot_of::<C>()
    }

    /// Get the slot assigned to `C`.
    ///
    /// # Panics
    /// Panics if `C` was never registered.
    #[track_caller]
    pub fn component_slot<C: Component>(&self) -> Slot {
        fatal(self.try_component_slot::<C>())
    }

    // ── Entities ────────────────────────────────────────────────────

    /// Create a new entity with no components.
    ///
    /// Fails if every entity id is in use.
    pub fn try_create_entity(&mut self) -> Result<Entity> {
        let entity = self.entities.allocate()?;
        log::trace!("created entity {entity}");
        Ok(entity)
    }

    /// Create a new entity with no components.
    ///
    /// # Panics
    /// Panics if every entity id is in use.
    #[track_caller]
    pub fn create_entity(&mut self) -> Entity {
        fatal(self.try_create_entity())
    }

    /// Destroy an entity and every component it holds, returning its id to the pool.
    ///
    /// Fails if `entity` is out of range or not alive.
    pub fn try_destroy_entity(&mut self, entity: Entity) -> Result<()> {
        self.entities.check_live(entity)?;

        self.signatures[entity.index()].clear();
        self.stores.on_entity_destroyed(entity);
        self.entities.release(entity)?;

        log::trace!("destroyed entity {entity}");
        Ok(())
    }

    /// Destroy an entity and every component it holds, returning its id to the pool.
    ///
    /// # Panics
    /// Panics if `entity` is out of range or not alive.
    #[track_caller]
    pub fn destroy_entity(&mut self, entity: Entity) {
        fatal(self.try_destroy_entity(entity))
    }

    /// Check if `entity` is currently alive. Out of range ids are never alive.
    #[inline]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_live(entity)
    }

    /// Get the signature of `entity`.
    ///
    /// Fails if `entity` is out of range. A free id always has an empty signature.
    pub fn try_signature(&self, entity: Entity) -> Result<&Signature> {
        self.entities.check_range(entity)?;
        Ok(&self.signatures[entity.index()])
    }

    /// Get the signature of `entity`.
    ///
    /// # Panics
    /// Panics if `entity` is out of range.
    #[track_caller]
    pub fn signature(&self, entity: Entity) -> &Signature {
        fatal(self.try_signature(entity))
    }

    // ── Components ──────────────────────────────────────────────────

    /// Attach a component value to a live entity.
    ///
    /// Fails if the entity is not alive, `C` is not registered, or the entity already has a `C`.
    pub fn try_add_component<C: Component>(&mut self, entity: Entity, value: C) -> Result<()> {
        self.entities.check_live(entity)?;
        let slot = self.registry.slot_of::<C>()?;

        self.store_mut_in::<C>(slot)?.insert(entity, value)?;
        self.signatures[entity.index()].insert(slot);

        log::trace!("added `{}` to entity {entity}", std::any::type_name::<C>());
        Ok(())
    }

    /// Attach a component value to a live entity.
    ///
    /// # Panics
    /// Panics if the entity is not alive, `C` is not registered, or the entity already has a `C`.
    #[track_caller]
    pub fn add_component<C: Component>(&mut self, entity: Entity, value: C) {
        fatal(self.try_add_component(entity, value))
    }

    /// Detach and return an entity's `C` value.
    ///
    /// Fails if the entity is out of range, `C` is not registered, or the entity has no `C`.
    pub fn try_remove_component<C: Component>(&mut self, entity: Entity) -> Result<C> {
        self.entities.check_range(entity)?;
        let slot = self.registry.slot_of::<C>()?;

        let value = self.store_mut_in::<C>(slot)?.remove(entity)?;
        self.signatures[entity.index()].remove(slot);

        log::trace!(
            "removed `{}` from entity {entity}",
            std::any::type_name::<C>()
        );
        Ok(value)
    }

    /// Detach and return an entity's `C` value.
    ///
    /// # Panics
    /// Panics if the entity is out of range, `C` is not registered, or the entity has no `C`.
    #[track_caller]
    pub fn remove_component<C: Component>(&mut self, entity: Entity) -> C {
        fatal(self.try_remove_component(entity))
    }

    /// Get a mutable reference to an entity's `C` value.
    ///
    /// Fails if the entity is out of range, `C` is not registered, or the entity has no `C`.
    pub fn try_get_component<C: Component>(&mut self, entity: Entity) -> Result<&mut C> {
        self.entities.check_range(entity)?;
        let slot = self.registry.slot_of::<C>()?;
        self.store_mut_in::<C>(slot)?.get(entity)
    }

    /// Get a mutable reference to an entity's `C` value.
    ///
    /// # Panics
    /// Panics if the entity is out of range, `C` is not registered, or the entity has no `C`.
    #[track_caller]
    pub fn get_component<C: Component>(&mut self, entity: Entity) -> &mut C {
        fatal(self.try_get_component(entity))
    }

    /// Get a shared reference to an entity's `C` value.
    ///
    /// Fails if the entity is out of range, `C` is not registered, or the entity has no `C`.
    pub fn try_get_component_ref<C: Component>(&self, entity: Entity) -> Result<&C> {
        self.entities.check_range(entity)?;
        self.try_store::<C>()?.get_ref(entity)
    }

    /// Get a shared reference to an entity's `C` value.
    ///
    /// # Panics
    /// Panics under the same conditions as [`get_component`](Self::get_component).
    #[track_caller]
    pub fn get_component_ref<C: Component>(&self, entity: Entity) -> &C {
        fatal(self.try_get_component_ref(entity))
    }

    /// Check if `entity` currently has a `C`. Unregistered types and out of range ids report false.
    pub fn has_component<C: Component>(&self, entity: Entity) -> bool {
        match (
            self.registry.get::<C>(),
            self.signatures.get(entity.index()),
        ) {
            (Some(slot), Some(signature)) => signature.contains(slot),
            _ => false,
        }
    }

    /// Read-only access to the packed store for `C`.
    pub fn try_store<C: Component>(&self) -> Result<&Store<C>> {
        let slot = self.registry.slot_of::<C>()?;
        self.stores
            .get::<C>(slot)
            .ok_or(Error::ComponentNotRegistered {
                component: std::any::type_name::<C>(),
            })
    }

    /// Read-only access to the packed store for `C`.
    ///
    /// # Panics
    /// Panics if `C` was never registered.
    #[track_caller]
    pub fn store<C: Component>(&self) -> &Store<C> {
        fatal(self.try_store::<C>())
    }

    /// Resolve the typed store behind a registered slot.
    #[inline]
    fn store_mut_in<C: Component>(&mut self, slot: Slot) -> Result<&mut Store<C>> {
        self.stores
            .get_mut::<C>(slot)
            .ok_or(Error::ComponentNotRegistered {
                component: std::any::type_name::<C>(),
            })
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Collect every live entity holding all components in `Q`, in ascending id order.
    ///
    /// Fails if any type in `Q` is not registered.
    pub fn try_query<Q: Query>(&self) -> Result<View> {
        let required = Q::signature(&self.registry)?;
        Ok(self.query_signature(&required))
    }

    /// Collect every live entity holding all components in `Q`, in ascending id order.
    ///
    /// # Panics
    /// Panics if any type in `Q` is not registered.
    #[track_caller]
    pub fn query<Q: Query>(&self) -> View {
        fatal(self.try_query::<Q>())
    }

    /// Collect every live entity whose signature contains `required`, in ascending id order.
    ///
    /// The scan covers the whole id range and skips free ids, so recycled ids anywhere in the range
    /// are found.
    pub fn query_signature(&self, required: &Signature) -> View {
        self.entities
            .iter_live()
            .filter(|entity| self.signatures[entity.index()].contains_all(required))
            .collect()
    }
}
