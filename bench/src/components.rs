//! Common component types used across benchmarks.
//!
//! These components are sized like typical 2D game data.

use signet_engine::ecs::World;
use signet_macros::Component;

/// 2D position component (8 bytes).
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// 2D velocity component (8 bytes).
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

/// Health component for damageable entities.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

/// Particle lifetime tracking.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Lifetime {
    pub remaining: f32,
    pub total: f32,
}

/// RGBA color (16 bytes).
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// A particle marker.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Particle;

/// Register every benchmark component on a world.
pub fn register_all<const E: usize, const C: usize>(world: &mut World<E, C>) {
    world.register_component::<Position>();
    world.register_component::<Velocity>();
    world.register_component::<Health>();
    world.register_component::<Lifetime>();
    world.register_component::<Color>();
    world.register_component::<Particle>();
}
