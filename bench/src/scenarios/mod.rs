//! Workload scenarios.
//!
//! These scenarios drive the ECS through the same per-frame pattern a game would: create and
//! destroy entities, attach and detach components, and query.
//!
//! # Scenarios
//!
//! - **Particles**: Every live slot used, simple components, short lifetimes
//! - **Churn**: Seeded random operations mirrored in a shadow model for verification

pub mod churn;
pub mod particles;

pub use churn::{ChurnConfig, ChurnScenario};
pub use particles::{ParticleConfig, ParticleScenario};

/// Common trait for benchmark scenarios.
pub trait Scenario {
    /// Human-readable name of the scenario.
    fn name(&self) -> &'static str;

    /// Brief description of what this scenario tests.
    fn description(&self) -> &'static str;

    /// Number of entities currently live in this scenario.
    fn entity_count(&self) -> usize;

    /// Set up the scenario (create entities, initialize state).
    fn setup(&mut self);

    /// Run one "frame" of the scenario.
    fn update(&mut self);

    /// Clean up the scenario.
    fn teardown(&mut self);
}
