//! Fixed scene construction
//!
//! Builds the hardcoded scene: a large static floor, the player (the camera
//! entity), and five stacks of five dynamic box props. Returns validated
//! handles for the entities the frame loop addresses directly, so a wiring
//! mistake surfaces at construction time instead of mid-tick.

use basalt_core::{Color, EntityId, Result, Transform, Vec3};
use basalt_ecs::SceneWorld;
use basalt_physics::{PhysicsSync, PhysicsWorld};
use basalt_render::BoxVisual;

const FLOOR_POSITION: Vec3 = Vec3::new(0.0, -10.0, -20.0);
const FLOOR_HALF_EXTENTS: Vec3 = Vec3::new(100.0, 1.0, 100.0);
const FLOOR_COLOR: Color = Color::new(0.55, 0.40, 0.25, 1.0);

const PROPS_PER_GROUP: usize = 5;
const STACK_SPACING: f32 = 5.0;

struct PropGroup {
    name: &'static str,
    origin: Vec3,
    half_extent: f32,
    color: Color,
}

const PROP_GROUPS: [PropGroup; 5] = [
    PropGroup {
        name: "crimson",
        origin: Vec3::new(0.0, 0.0, -50.0),
        half_extent: 3.5,
        color: Color::new(0.75, 0.12, 0.18, 1.0),
    },
    PropGroup {
        name: "amber",
        origin: Vec3::new(0.0, 0.0, -10.0),
        half_extent: 4.8,
        color: Color::new(0.90, 0.55, 0.10, 1.0),
    },
    PropGroup {
        name: "ivory",
        origin: Vec3::new(-20.0, 0.0, -10.0),
        half_extent: 3.5,
        color: Color::new(0.92, 0.89, 0.80, 1.0),
    },
    PropGroup {
        name: "gold",
        origin: Vec3::new(20.0, 0.0, -10.0),
        half_extent: 1.8,
        color: Color::new(0.95, 0.82, 0.20, 1.0),
    },
    PropGroup {
        name: "sage",
        origin: Vec3::new(20.0, 0.0, -50.0),
        half_extent: 5.0,
        color: Color::new(0.45, 0.60, 0.40, 1.0),
    },
];

/// Named handles for the entities the frame loop addresses directly
pub struct SceneHandles {
    pub player: EntityId,
    pub floor: EntityId,
    pub props: Vec<EntityId>,
}

/// Build the fixed scene: world, physics bodies, and handles
pub fn build_scene() -> Result<(SceneWorld, PhysicsWorld, PhysicsSync, SceneHandles)> {
    let mut world = SceneWorld::new();
    let mut physics = PhysicsWorld::new();
    let mut sync = PhysicsSync::new();

    let floor = world.spawn("floor")?;
    world.insert(floor, Transform::from_position(FLOOR_POSITION))?;
    world.insert(
        floor,
        BoxVisual {
            half_extents: FLOOR_HALF_EXTENTS,
            color: FLOOR_COLOR,
        },
    )?;
    sync.register(floor, physics.insert_static_box(FLOOR_POSITION, FLOOR_HALF_EXTENTS));

    // The player entity carries the camera; it has no body or visual
    let player = world.spawn("player")?;
    world.insert(player, Transform::default())?;

    let mut props = Vec::with_capacity(PROP_GROUPS.len() * PROPS_PER_GROUP);
    for group in &PROP_GROUPS {
        for i in 0..PROPS_PER_GROUP {
            let position = Vec3::new(
                group.origin.x,
                group.origin.y + STACK_SPACING * i as f32,
                group.origin.z,
            );
            let half = Vec3::new(group.half_extent, group.half_extent, group.half_extent);

            let prop = world.spawn(format!("{}-{}", group.name, i))?;
            world.insert(prop, Transform::from_position(position))?;
            world.insert(
                prop,
                BoxVisual {
                    half_extents: half,
                    color: group.color,
                },
            )?;
            sync.register(prop, physics.insert_dynamic_box(position, half));
            props.push(prop);
        }
    }

    log::info!(
        "Scene built: {} entities, {} dynamic bodies",
        world.entity_count(),
        physics.dynamic_body_count()
    );

    Ok((world, physics, sync, SceneHandles { player, floor, props }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_has_expected_population() {
        let (world, physics, sync, handles) = build_scene().unwrap();

        // floor + player + 5 groups of 5 props
        assert_eq!(world.entity_count(), 2 + 25);
        assert_eq!(handles.props.len(), 25);
        assert_eq!(physics.dynamic_body_count(), 25);
        assert_eq!(sync.body_count(), 26);
    }

    #[test]
    fn player_handle_is_valid_and_unbodied() {
        let (world, _, sync, handles) = build_scene().unwrap();
        assert_eq!(world.id("player"), Some(handles.player));
        assert!(world.get::<Transform>(handles.player).is_ok());
        assert!(sync.handle_for(handles.player).is_none());
    }

    #[test]
    fn floor_is_static_and_placed() {
        let (world, physics, sync, handles) = build_scene().unwrap();
        let t: Transform = world.get(handles.floor).unwrap();
        assert_eq!(t.position, Vec3::new(0.0, -10.0, -20.0));

        let body = sync.handle_for(handles.floor).unwrap();
        assert!(!physics.is_dynamic(body));
    }

    #[test]
    fn props_stack_upward_in_fives() {
        let (world, _, _, handles) = build_scene().unwrap();
        let first: Transform = world.get(handles.props[0]).unwrap();
        let second: Transform = world.get(handles.props[1]).unwrap();
        assert_eq!(second.position.y - first.position.y, STACK_SPACING);
        assert_eq!(first.position.z, second.position.z);
    }

    #[test]
    fn every_prop_has_visual_and_body() {
        let (world, physics, sync, handles) = build_scene().unwrap();
        for &prop in &handles.props {
            assert!(world.has::<BoxVisual>(prop));
            let body = sync.handle_for(prop).unwrap();
            assert!(physics.is_dynamic(body));
        }
    }
}
