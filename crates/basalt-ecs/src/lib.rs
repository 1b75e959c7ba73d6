//! Basalt ECS - Entity/component registry with stable IDs
//!
//! Wraps hecs with stable entity identifiers, named lookup, and
//! deterministic spawn-order iteration.

mod world;

pub use world::SceneWorld;
