//! # Signet
//!
//! A small, fixed-capacity Entity Component System.
//!
//! Entities are plain integer handles drawn from a preallocated pool. Each registered component
//! type owns a packed store, and every entity carries a bitset signature describing which stores
//! currently hold a value for it. Queries are answered by comparing signatures, so they never need
//! to touch component data.
//!
//! ```ignore
//! use signet_engine::ecs::{Component, World};
//!
//! #[derive(Component)]
//! struct Position { x: i32, y: i32 }
//!
//! let mut world = World::new();
//! world.register_component::<Position>();
//!
//! let entity = world.create_entity();
//! world.add_component(entity, Position { x: 0, y: 0 });
//! assert_eq!(world.query::<Position>(), vec![entity]);
//! ```

// Allows `::signet_engine::...` paths emitted by the derive macros to resolve inside this crate.
extern crate self as signet_engine;

pub mod config;
pub mod ecs;
