//! Particle system benchmark scenario.
//!
//! Simulates a particle system that keeps the world near full:
//! - 4,000 particles in a 4,096 entity world
//! - Simple components: Particle, Position, Velocity, Lifetime, Color
//! - Systems: movement, lifetime decay, fade, destroy and replace dead particles
//!
//! This scenario tests:
//! - Query cost with a nearly full pool
//! - Component access through the facade
//! - Entity destroy/create throughput with id recycling

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use signet_engine::ecs::{Entity, World};

use crate::components::{self, Color, Lifetime, Particle, Position, Velocity};
use crate::scenarios::Scenario;

/// Configuration for the particle benchmark.
pub struct ParticleConfig {
    /// Total number of particles to maintain.
    pub particle_count: usize,
    /// Simulated delta time per frame.
    pub delta_time: f32,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            particle_count: 4_000,
            delta_time: 1.0 / 60.0, // 60 FPS
            seed: 12345,
        }
    }
}

struct ParticleFactory(ChaCha8Rng);

impl ParticleFactory {
    fn create_particle(&mut self, world: &mut World) -> Entity {
        let rng = &mut self.0;
        let entity = world.create_entity();
        world.add_component(entity, Particle);
        world.add_component(
            entity,
            Position {
                x: rng.gen_range(-100.0..100.0),
                y: rng.gen_range(-100.0..100.0),
            },
        );
        world.add_component(
            entity,
            Velocity {
                x: rng.gen_range(-10.0..10.0),
                y: rng.gen_range(-10.0..10.0),
            },
        );
        world.add_component(
            entity,
            Lifetime {
                remaining: rng.gen_range(0.05..0.5),
                total: 0.5,
            },
        );
        world.add_component(
            entity,
            Color {
                r: rng.gen_range(0.0..1.0),
                g: rng.gen_range(0.0..1.0),
                b: rng.gen_range(0.0..1.0),
                a: 1.0,
            },
        );
        entity
    }
}

/// System: Update particle positions based on velocity.
fn system_movement(world: &mut World, dt: f32) {
    for entity in world.query::<(Position, Velocity)>() {
        let velocity = *world.get_component::<Velocity>(entity);
        let position = world.get_component::<Position>(entity);
        position.x += velocity.x * dt;
        position.y += velocity.y * dt;
    }
}

/// System: Decay particle lifetimes.
fn system_lifetime_decay(world: &mut World, dt: f32) {
    for entity in world.query::<Lifetime>() {
        world.get_component::<Lifetime>(entity).remaining -= dt;
    }
}

/// System: Fade particles based on remaining lifetime.
fn system_fade(world: &mut World) {
    for entity in world.query::<(Lifetime, Color)>() {
        let lifetime = *world.get_component::<Lifetime>(entity);
        world.get_component::<Color>(entity).a = (lifetime.remaining / lifetime.total).max(0.0);
    }
}

/// System: Replace dead particles (lifetime <= 0) with fresh ones.
fn system_kill_particles(world: &mut World, factory: &mut ParticleFactory) -> usize {
    let mut killed = 0;
    for entity in world.query::<(Particle, Lifetime)>() {
        if world.get_component_ref::<Lifetime>(entity).remaining <= 0.0 {
            world.destroy_entity(entity);
            factory.create_particle(world);
            killed += 1;
        }
    }
    killed
}

/// Particle system benchmark scenario.
pub struct ParticleScenario {
    config: ParticleConfig,
    world: World,
    factory: ParticleFactory,
    respawned: usize,
}

impl ParticleScenario {
    /// Create a new particle scenario with default config.
    pub fn new() -> Self {
        Self::with_config(ParticleConfig::default())
    }

    /// Create a new particle scenario with custom config.
    pub fn with_config(config: ParticleConfig) -> Self {
        let mut world = World::new();
        components::register_all(&mut world);
        Self {
            factory: ParticleFactory(ChaCha8Rng::seed_from_u64(config.seed)),
            world,
            config,
            respawned: 0,
        }
    }

    /// Total particles replaced since setup.
    pub fn respawned(&self) -> usize {
        self.respawned
    }

    /// Access the underlying world.
    pub fn world(&self) -> &World {
        &self.world
    }
}

impl Default for ParticleScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for ParticleScenario {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn description(&self) -> &'static str {
        "Particle system with movement, lifetime, and respawn"
    }

    fn entity_count(&self) -> usize {
        self.world.entity_count()
    }

    fn setup(&mut self) {
        for _ in 0..self.config.particle_count {
            self.factory.create_particle(&mut self.world);
        }
    }

    fn update(&mut self) {
        let dt = self.config.delta_time;
        system_movement(&mut self.world, dt);
        system_lifetime_decay(&mut self.world, dt);
        system_fade(&mut self.world);
        self.respawned += system_kill_particles(&mut self.world, &mut self.factory);
    }

    fn teardown(&mut self) {
        for entity in self.world.query::<()>() {
            self.world.destroy_entity(entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_scenario_setup() {
        let mut scenario = ParticleScenario::with_config(ParticleConfig {
            particle_count: 100,
            ..Default::default()
        });

        scenario.setup();
        assert_eq!(scenario.entity_count(), 100);
        assert_eq!(scenario.world().store::<Color>().len(), 100);

        scenario.teardown();
        assert_eq!(scenario.entity_count(), 0);
        assert!(scenario.world().store::<Position>().is_empty());
    }

    #[test]
    fn particle_scenario_update_keeps_population() {
        let mut scenario = ParticleScenario::with_config(ParticleConfig {
            particle_count: 100,
            ..Default::default()
        });

        scenario.setup();

        // Lifetimes are at most half a second, so 60 frames replaces every particle at least once.
        for _ in 0..60 {
            scenario.update();
        }

        assert_eq!(scenario.entity_count(), 100);
        assert!(scenario.respawned() >= 100);
        assert_eq!(scenario.world().query::<(Particle, Lifetime)>().len(), 100);

        scenario.teardown();
    }

    #[test]
    fn full_pool_recycles() {
        // Given - Every id in use
        let mut scenario = ParticleScenario::with_config(ParticleConfig {
            particle_count: 4096,
            ..Default::default()
        });
        scenario.setup();

        // When
        for _ in 0..40 {
            scenario.update();
        }

        // Then - Dead particles were replaced through recycled ids
        assert_eq!(scenario.entity_count(), 4096);
        assert!(scenario.respawned() > 0);
    }
}
