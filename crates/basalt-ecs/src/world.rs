//! SceneWorld - ECS world with stable IDs and validated component access

use basalt_core::{BasaltError, EntityId, Result};
use bimap::BiMap;
use std::collections::HashMap;

/// The entity/component registry for a Basalt scene
///
/// Wraps hecs::World with:
/// - Stable EntityId mapping
/// - Entity name lookup
/// - Deterministic spawn-order iteration
///
/// Component lookups are validated: a missing entity or component is an
/// explicit error, never a panic.
pub struct SceneWorld {
    /// The underlying hecs world
    world: hecs::World,
    /// Bidirectional mapping: EntityId <-> hecs::Entity
    id_map: BiMap<EntityId, hecs::Entity>,
    /// Entity name -> EntityId mapping
    name_map: HashMap<String, EntityId>,
    /// EntityIds in spawn order
    order: Vec<EntityId>,
}

impl Default for SceneWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneWorld {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            world: hecs::World::new(),
            id_map: BiMap::new(),
            name_map: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Spawn a new empty entity with a name
    pub fn spawn(&mut self, name: impl Into<String>) -> Result<EntityId> {
        let name = name.into();

        if self.name_map.contains_key(&name) {
            return Err(BasaltError::DuplicateEntityName(name));
        }

        let entity_id = EntityId::new();
        let hecs_entity = self.world.spawn(());

        self.id_map.insert(entity_id, hecs_entity);
        self.name_map.insert(name, entity_id);
        self.order.push(entity_id);

        Ok(entity_id)
    }

    /// Attach (or replace) a component on an entity
    pub fn insert<T: hecs::Component>(&mut self, id: EntityId, component: T) -> Result<()> {
        let entity = self.resolve(id)?;
        self.world
            .insert_one(entity, component)
            .map_err(|_| BasaltError::EntityNotFound(id.to_string()))
    }

    /// Read a component by value
    pub fn get<T: hecs::Component + Clone>(&self, id: EntityId) -> Result<T> {
        let entity = self.resolve(id)?;
        self.world
            .get::<&T>(entity)
            .map(|c| (*c).clone())
            .map_err(|_| component_not_found::<T>(id))
    }

    /// Mutate a component in place
    pub fn update<T: hecs::Component>(
        &mut self,
        id: EntityId,
        f: impl FnOnce(&mut T),
    ) -> Result<()> {
        let entity = self.resolve(id)?;
        let mut component = self
            .world
            .get::<&mut T>(entity)
            .map_err(|_| component_not_found::<T>(id))?;
        f(&mut *component);
        Ok(())
    }

    /// Does the entity carry a component of this type?
    pub fn has<T: hecs::Component>(&self, id: EntityId) -> bool {
        self.resolve(id)
            .map(|e| self.world.get::<&T>(e).is_ok())
            .unwrap_or(false)
    }

    /// Get entity ID by name
    pub fn id(&self, name: &str) -> Option<EntityId> {
        self.name_map.get(name).copied()
    }

    /// Get entity name by ID
    pub fn name(&self, id: EntityId) -> Option<&str> {
        self.name_map
            .iter()
            .find(|(_, v)| **v == id)
            .map(|(k, _)| k.as_str())
    }

    /// Iterate entity IDs in spawn order
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.order.iter().copied()
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.order.len()
    }

    fn resolve(&self, id: EntityId) -> Result<hecs::Entity> {
        self.id_map
            .get_by_left(&id)
            .copied()
            .ok_or_else(|| BasaltError::EntityNotFound(id.to_string()))
    }
}

fn component_not_found<T>(id: EntityId) -> BasaltError {
    BasaltError::ComponentNotFound {
        entity: id.to_string(),
        component: std::any::type_name::<T>().to_string(),
    }
}
