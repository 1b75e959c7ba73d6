//! Bridges scene entities and Rapier bodies
//!
//! Bodies are created at scene-build time and registered here; after each
//! physics step the simulated poses are written back into the entities'
//! transforms.

use crate::world::PhysicsWorld;
use basalt_core::{EntityId, Result, Transform};
use basalt_ecs::SceneWorld;
use rapier3d::prelude::RigidBodyHandle;
use std::collections::HashMap;

/// Entity -> rigid body registry with transform write-back
#[derive(Default)]
pub struct PhysicsSync {
    body_map: HashMap<EntityId, RigidBodyHandle>,
}

impl PhysicsSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the body backing an entity
    pub fn register(&mut self, entity: EntityId, handle: RigidBodyHandle) {
        self.body_map.insert(entity, handle);
    }

    /// The body handle backing an entity, if it has one
    pub fn handle_for(&self, entity: EntityId) -> Option<RigidBodyHandle> {
        self.body_map.get(&entity).copied()
    }

    /// Number of registered bodies
    pub fn body_count(&self) -> usize {
        self.body_map.len()
    }

    /// Write simulated poses back into entity transforms, in spawn order.
    ///
    /// Only dynamic bodies are written back; fixed bodies keep the pose the
    /// scene gave them.
    pub fn sync_from_physics(&self, world: &mut SceneWorld, physics: &PhysicsWorld) -> Result<()> {
        let entities: Vec<EntityId> = world.entities().collect();
        for entity in entities {
            let Some(handle) = self.handle_for(entity) else {
                continue;
            };
            if !physics.is_dynamic(handle) {
                continue;
            }

            let Some(position) = physics.body_translation(handle) else {
                continue;
            };
            let rotation = physics.body_rotation(handle);

            world.update::<Transform>(entity, |t| {
                t.position = position;
                t.rotation_quat = rotation;
            })?;
        }
        Ok(())
    }
}
