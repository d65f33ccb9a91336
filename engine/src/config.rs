//! Build-time capacity limits.
//!
//! These are the default ceilings used by [`World::new`](crate::ecs::World::new). A host that needs
//! a different budget picks it at compile time through the `World` const parameters; there is no
//! way to resize a world once it exists.

/// Maximum number of simultaneously live entities in a default world.
pub const MAX_ENTITIES: usize = 4096;

/// Maximum number of distinct component types a default world can register.
pub const MAX_COMPONENTS: usize = 32;
