//! Random churn scenario.
//!
//! Applies a seeded stream of create, destroy, add, remove and mutate operations to a small world,
//! mirroring each one in a plain shadow model. [`ChurnScenario::verify`] compares every store, every
//! signature and a set of queries against the shadow.
//!
//! This scenario tests:
//! - Store packing under arbitrary interleavings of insert and swap-remove
//! - Signature maintenance across destroy and id recycling
//! - Query exactness against an independent model

use std::{collections::BTreeMap, fmt::Debug};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use signet_engine::ecs::{Component, Entity, Query, World};

use crate::components::{Health, Position, Velocity};
use crate::scenarios::Scenario;

/// The world used by the churn scenario: small enough to hit exhaustion regularly.
pub type ChurnWorld = World<256, 4>;

/// Configuration for the churn scenario.
pub struct ChurnConfig {
    /// Entities created during setup.
    pub initial_entities: usize,
    /// Random operations applied per frame.
    pub ops_per_frame: usize,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for ChurnConfig {
    fn default() -> Self {
        Self {
            initial_entities: 128,
            ops_per_frame: 512,
            seed: 0x5167,
        }
    }
}

/// What the shadow model expects one live entity to hold.
#[derive(Debug, Default, Clone, Copy)]
struct Expected {
    position: Option<Position>,
    velocity: Option<Velocity>,
    health: Option<Health>,
}

/// Random churn scenario with a shadow model.
pub struct ChurnScenario {
    config: ChurnConfig,
    world: ChurnWorld,
    shadow: BTreeMap<Entity, Expected>,
    rng: ChaCha8Rng,
    exhausted: usize,
}

impl ChurnScenario {
    /// Create a new churn scenario with default config.
    pub fn new() -> Self {
        Self::with_config(ChurnConfig::default())
    }

    /// Create a new churn scenario with custom config.
    pub fn with_config(config: ChurnConfig) -> Self {
        let mut world = ChurnWorld::with_limits();
        world.register_component::<Position>();
        world.register_component::<Velocity>();
        world.register_component::<Health>();
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            world,
            config,
            shadow: BTreeMap::new(),
            exhausted: 0,
        }
    }

    /// The number of create attempts rejected because the pool was full.
    pub fn exhausted(&self) -> usize {
        self.exhausted
    }

    /// Access the underlying world.
    pub fn world(&self) -> &ChurnWorld {
        &self.world
    }

    /// Compare the world against the shadow model, describing the first difference found.
    pub fn verify(&self) -> Result<(), String> {
        if self.world.entity_count() != self.shadow.len() {
            return Err(format!(
                "world has {} live entities, shadow has {}",
                self.world.entity_count(),
                self.shadow.len()
            ));
        }

        for id in 0..self.world.entity_capacity() {
            let entity = Entity::from(id);
            let expected_alive = self.shadow.contains_key(&entity);
            if self.world.is_alive(entity) != expected_alive {
                return Err(format!("entity {entity}: liveness differs from shadow"));
            }
            if !expected_alive && !self.world.signature(entity).is_empty() {
                return Err(format!("free entity {entity} has a non-empty signature"));
            }
        }

        self.verify_store(|expected| expected.position)?;
        self.verify_store(|expected| expected.velocity)?;
        self.verify_store(|expected| expected.health)?;

        self.verify_query::<()>(|_| true)?;
        self.verify_query::<Position>(|e| e.position.is_some())?;
        self.verify_query::<(Position, Velocity)>(|e| {
            e.position.is_some() && e.velocity.is_some()
        })?;
        self.verify_query::<(Velocity, Health)>(|e| e.velocity.is_some() && e.health.is_some())?;
        self.verify_query::<(Health, Velocity, Position)>(|e| {
            e.position.is_some() && e.velocity.is_some() && e.health.is_some()
        })
    }

    fn verify_store<C>(&self, pick: impl Fn(&Expected) -> Option<C>) -> Result<(), String>
    where
        C: Component + PartialEq + Debug,
    {
        let name = std::any::type_name::<C>();
        let store = self.world.store::<C>();
        let holders: BTreeMap<Entity, C> = self
            .shadow
            .iter()
            .filter_map(|(entity, expected)| pick(expected).map(|value| (*entity, value)))
            .collect();

        if store.len() != holders.len() {
            return Err(format!(
                "store `{name}` holds {} values, shadow expects {}",
                store.len(),
                holders.len()
            ));
        }

        let slot = self.world.component_slot::<C>();
        for (entity, value) in store.iter() {
            match holders.get(&entity) {
                Some(expected) if expected == value => {}
                Some(expected) => {
                    return Err(format!(
                        "store `{name}`: entity {entity} holds {value:?}, expected {expected:?}"
                    ));
                }
                None => return Err(format!("store `{name}`: unexpected entity {entity}")),
            }
            if !self.world.signature(entity).contains(slot) {
                return Err(format!(
                    "store `{name}`: entity {entity} missing signature bit"
                ));
            }
        }
        Ok(())
    }

    fn verify_query<Q: Query>(&self, matches: impl Fn(&Expected) -> bool) -> Result<(), String> {
        let expected: Vec<Entity> = self
            .shadow
            .iter()
            .filter(|(_, e)| matches(e))
            .map(|(entity, _)| *entity)
            .collect();
        let actual = self.world.query::<Q>();
        if actual != expected {
            return Err(format!(
                "query `{}` returned {actual:?}, expected {expected:?}",
                std::any::type_name::<Q>()
            ));
        }
        Ok(())
    }

    fn pick_live(&mut self) -> Option<Entity> {
        if self.shadow.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..self.shadow.len());
        self.shadow.keys().nth(index).copied()
    }

    fn create(&mut self) {
        match self.world.try_create_entity() {
            Ok(entity) => {
                self.shadow.insert(entity, Expected::default());
            }
            Err(err) if err.is_exhausted() => self.exhausted += 1,
            Err(err) => panic!("unexpected create failure: {err}"),
        }
    }

    /// Add `value` if the entity lacks a `C`, otherwise remove it, in both the world and the shadow.
    fn toggle<C: Component + Copy>(
        &mut self,
        entity: Entity,
        value: C,
        field: impl Fn(&mut Expected) -> &mut Option<C>,
    ) {
        let Some(expected) = self.shadow.get_mut(&entity) else {
            return;
        };
        let slot = field(expected);
        if slot.is_some() {
            self.world.remove_component::<C>(entity);
            *slot = None;
        } else {
            self.world.add_component(entity, value);
            *slot = Some(value);
        }
    }

    fn step(&mut self) {
        let roll = self.rng.gen_range(0..100);
        if roll < 15 {
            self.create();
            return;
        }

        let Some(entity) = self.pick_live() else {
            self.create();
            return;
        };

        match roll {
            15..30 => {
                self.world.destroy_entity(entity);
                self.shadow.remove(&entity);
            }
            30..50 => {
                let value = Position {
                    x: self.rng.r#gen(),
                    y: self.rng.r#gen(),
                };
                self.toggle(entity, value, |e| &mut e.position);
            }
            50..70 => {
                let value = Velocity {
                    x: self.rng.r#gen(),
                    y: self.rng.r#gen(),
                };
                self.toggle(entity, value, |e| &mut e.velocity);
            }
            70..85 => {
                let current = self.rng.gen_range(0.0..100.0);
                let value = Health {
                    current,
                    max: 100.0,
                };
                self.toggle(entity, value, |e| &mut e.health);
            }
            _ => {
                // Mutate in place through the facade.
                if self.world.has_component::<Position>(entity) {
                    let position = self.world.get_component::<Position>(entity);
                    position.x += 1.0;
                    let updated = *position;
                    if let Some(expected) = self.shadow.get_mut(&entity) {
                        expected.position = Some(updated);
                    }
                }
            }
        }
    }
}

impl Default for ChurnScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for ChurnScenario {
    fn name(&self) -> &'static str {
        "churn"
    }

    fn description(&self) -> &'static str {
        "Seeded random create/destroy/add/remove against a shadow model"
    }

    fn entity_count(&self) -> usize {
        self.world.entity_count()
    }

    fn setup(&mut self) {
        for _ in 0..self.config.initial_entities {
            self.create();
        }
    }

    fn update(&mut self) {
        for _ in 0..self.config.ops_per_frame {
            self.step();
        }
    }

    fn teardown(&mut self) {
        for entity in self.world.query::<()>() {
            self.world.destroy_entity(entity);
        }
        self.shadow.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn churn_matches_shadow_every_frame() {
        // Given
        let mut scenario = ChurnScenario::new();
        scenario.setup();
        assert_eq!(scenario.verify(), Ok(()));

        // When / Then
        for frame in 0..20 {
            scenario.update();
            if let Err(mismatch) = scenario.verify() {
                panic!("frame {frame}: {mismatch}");
            }
        }
    }

    #[test]
    fn churn_reaches_exhaustion() {
        // Given - Start with the pool full so creates are rejected
        let mut scenario = ChurnScenario::with_config(ChurnConfig {
            initial_entities: 300,
            ops_per_frame: 64,
            seed: 7,
        });

        // When
        scenario.setup();

        // Then
        assert_eq!(scenario.entity_count(), 256);
        assert_eq!(scenario.exhausted(), 44);
        scenario.update();
        assert_eq!(scenario.verify(), Ok(()));
    }

    #[test]
    fn teardown_empties_everything() {
        // Given
        let mut scenario = ChurnScenario::new();
        scenario.setup();
        scenario.update();

        // When
        scenario.teardown();

        // Then
        assert_eq!(scenario.entity_count(), 0);
        assert!(scenario.world().store::<Velocity>().is_empty());
        assert_eq!(scenario.verify(), Ok(()));
    }

    #[test]
    fn same_seed_same_world() {
        // Given
        let mut first = ChurnScenario::new();
        let mut second = ChurnScenario::new();

        // When
        for scenario in [&mut first, &mut second] {
            scenario.setup();
            scenario.update();
        }

        // Then
        assert_eq!(first.world().query::<()>(), second.world().query::<()>());
        assert_eq!(
            first.world().store::<Position>().entities(),
            second.world().store::<Position>().entities()
        );
    }
}
