//! Basalt Core - Foundational types for the Basalt scene player
//!
//! This crate provides the types every other Basalt crate depends on:
//! - `EntityId` - Stable entity identifiers
//! - `Vec3`, `Vec2i`, `Transform` - Spatial types
//! - Error types and Result alias

mod error;
mod id;
mod types;

pub use error::{BasaltError, Result};
pub use id::EntityId;
pub use types::{mat4_mul, Color, Transform, Vec2i, Vec3};
