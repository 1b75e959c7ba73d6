//! Basalt Physics - Rapier 3D integration
//!
//! - `PhysicsWorld` — wraps the Rapier pipeline and body/collider sets;
//!   box-shaped rigid bodies, per-tick stepping, force/torque over all
//!   dynamic bodies
//! - `PhysicsSync` — maps scene entities to body handles and writes
//!   simulated poses back into their transforms

pub mod sync;
pub mod world;

pub use sync::PhysicsSync;
pub use world::PhysicsWorld;
