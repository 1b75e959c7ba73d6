//! The per-tick movement pass
//!
//! Reads the finalized input state and applies every world mutation for the
//! tick: player translation and view rotation, forces and torques on the
//! dynamic props, haptic feedback, and quit detection. Event dispatch never
//! mutates the world; this pass is the only place input becomes motion.
//!
//! Opposite directions are else-if paired so they never both apply in one
//! tick; key input and stick input for the same direction are independent
//! and additive.

use basalt_core::{EntityId, Result, Transform, Vec3};
use basalt_ecs::SceneWorld;
use basalt_physics::PhysicsWorld;
use basalt_runtime::{AxisSlot, InputRouter, PadButton};
use winit::keyboard::KeyCode;

/// Degrees of view rotation per count of mouse motion
const MOUSE_SENSITIVITY: f32 = 0.1;
/// Degrees of view rotation per tick while a rotation slot is held
const STICK_TURN_STEP: f32 = 1.0;
/// Upward force on every dynamic body while ArrowUp is held
const KEY_FORCE: Vec3 = Vec3::new(0.0, 5.0, 0.0);
/// Torque on every dynamic body while ArrowDown is held
const KEY_TORQUE: Vec3 = Vec3::new(0.0, 5.0, 0.0);
/// Stronger force/torque on the shoulder and trigger buttons
const PAD_FORCE: Vec3 = Vec3::new(0.0, 10.0, 0.0);
const PAD_TORQUE: Vec3 = Vec3::new(0.0, 10.0, 0.0);

const RUMBLE_STRENGTH: f32 = 0.75;
const RUMBLE_MILLIS: u32 = 500;

/// Force-feedback sink. The gamepad backend implements this; a scene without
/// a rumble-capable pad plugs in a no-op.
pub trait Haptics {
    fn rumble(&mut self, strength: f32, millis: u32);
}

/// What the movement pass decided beyond world mutation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementOutcome {
    pub quit_requested: bool,
}

/// Run the movement pass for one tick
pub fn movement_pass(
    input: &InputRouter,
    world: &mut SceneWorld,
    physics: &mut PhysicsWorld,
    player: EntityId,
    haptics: &mut dyn Haptics,
) -> Result<MovementOutcome> {
    let mut outcome = MovementOutcome::default();
    let mut transform: Transform = world.get(player)?;

    // View rotation first, so this tick's translations use the rotated axes
    let mouse = input.mouse_delta();
    if mouse.x != 0 {
        transform.yaw_by(mouse.x as f32 * MOUSE_SENSITIVITY);
    }
    if mouse.y != 0 {
        transform.pitch_by(mouse.y as f32 * MOUSE_SENSITIVITY);
    }

    // Keyboard translation
    if input.key(KeyCode::KeyW) {
        transform.translate(transform.forward());
    } else if input.key(KeyCode::KeyS) {
        transform.translate(-transform.forward());
    }
    if input.key(KeyCode::KeyA) {
        transform.translate(-transform.right());
    } else if input.key(KeyCode::KeyD) {
        transform.translate(transform.right());
    }
    if input.key(KeyCode::Space) {
        transform.translate(Vec3::UP);
    } else if input.key(KeyCode::ShiftLeft) {
        transform.translate(-Vec3::UP);
    }

    // Keyboard prop agitation
    if input.key(KeyCode::ArrowUp) {
        physics.apply_force_all(KEY_FORCE);
    }
    if input.key(KeyCode::ArrowDown) {
        physics.apply_torque_all(KEY_TORQUE);
    }

    if input.key(KeyCode::Escape) {
        outcome.quit_requested = true;
    }

    // Stick translation (additive with the keyboard)
    if input.axis(AxisSlot::StrafeLeft) {
        transform.translate(-transform.right());
    } else if input.axis(AxisSlot::StrafeRight) {
        transform.translate(transform.right());
    }
    if input.axis(AxisSlot::Forward) {
        transform.translate(transform.forward());
    } else if input.axis(AxisSlot::Backward) {
        transform.translate(-transform.forward());
    }

    // Stick view rotation
    if input.axis(AxisSlot::YawLeft) {
        transform.yaw_by(-STICK_TURN_STEP);
    } else if input.axis(AxisSlot::YawRight) {
        transform.yaw_by(STICK_TURN_STEP);
    }
    if input.axis(AxisSlot::PitchUp) {
        transform.pitch_by(-STICK_TURN_STEP);
    } else if input.axis(AxisSlot::PitchDown) {
        transform.pitch_by(STICK_TURN_STEP);
    }

    // Shoulder/trigger prop agitation with rumble
    if input.button(PadButton::LeftShoulder) {
        physics.apply_force_all(PAD_FORCE);
        haptics.rumble(RUMBLE_STRENGTH, RUMBLE_MILLIS);
    } else if input.button(PadButton::LeftTrigger) {
        physics.apply_torque_all(PAD_TORQUE);
        haptics.rumble(RUMBLE_STRENGTH, RUMBLE_MILLIS);
    }

    // One-shot vertical nudges on the action buttons
    if input.button_down(PadButton::ActionUp) {
        transform.translate(Vec3::UP);
    } else if input.button_down(PadButton::ActionDown) {
        transform.translate(-Vec3::UP);
    }

    world.update::<Transform>(player, |t| *t = transform)?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::build_scene;
    use basalt_core::Vec2i;
    use basalt_runtime::{dispatch, DeviceEvent};

    #[derive(Default)]
    struct RecordingHaptics {
        calls: Vec<(f32, u32)>,
    }

    impl Haptics for RecordingHaptics {
        fn rumble(&mut self, strength: f32, millis: u32) {
            self.calls.push((strength, millis));
        }
    }

    fn press(input: &mut InputRouter, code: KeyCode) {
        dispatch(input, DeviceEvent::Key { code, pressed: true });
    }

    #[test]
    fn forward_key_moves_player_one_forward_unit() {
        let (mut world, mut physics, _, handles) = build_scene().unwrap();
        let mut input = InputRouter::new();
        let mut haptics = RecordingHaptics::default();

        let before: Vec<(EntityId, Transform)> = world
            .entities()
            .map(|e| (e, world.get::<Transform>(e).unwrap()))
            .collect();

        press(&mut input, KeyCode::KeyW);
        let outcome =
            movement_pass(&input, &mut world, &mut physics, handles.player, &mut haptics).unwrap();
        assert!(!outcome.quit_requested);

        for (entity, old) in before {
            let new: Transform = world.get(entity).unwrap();
            if entity == handles.player {
                let delta = new.position - old.position;
                assert!((delta - old.forward()).length() < 1e-6);
                assert!(((delta).length() - 1.0).abs() < 1e-6);
            } else {
                assert_eq!(new, old, "only the player may move");
            }
        }
    }

    #[test]
    fn opposite_keys_do_not_cancel_by_addition() {
        let (mut world, mut physics, _, handles) = build_scene().unwrap();
        let mut input = InputRouter::new();
        let mut haptics = RecordingHaptics::default();

        press(&mut input, KeyCode::KeyW);
        press(&mut input, KeyCode::KeyS);
        movement_pass(&input, &mut world, &mut physics, handles.player, &mut haptics).unwrap();

        // The else-if pair means W wins outright; no zero-sum wobble
        let t: Transform = world.get(handles.player).unwrap();
        assert!((t.position - Transform::default().forward()).length() < 1e-6);
    }

    #[test]
    fn key_and_stick_forward_are_additive() {
        let (mut world, mut physics, _, handles) = build_scene().unwrap();
        let mut input = InputRouter::new();
        let mut haptics = RecordingHaptics::default();

        press(&mut input, KeyCode::KeyW);
        dispatch(&mut input, DeviceEvent::StickMotion { axis: 1, value: -20000 });
        movement_pass(&input, &mut world, &mut physics, handles.player, &mut haptics).unwrap();

        let t: Transform = world.get(handles.player).unwrap();
        assert!((t.position.z - -2.0).abs() < 1e-6);
    }

    #[test]
    fn escape_requests_quit() {
        let (mut world, mut physics, _, handles) = build_scene().unwrap();
        let mut input = InputRouter::new();
        let mut haptics = RecordingHaptics::default();

        press(&mut input, KeyCode::Escape);
        let outcome =
            movement_pass(&input, &mut world, &mut physics, handles.player, &mut haptics).unwrap();
        assert!(outcome.quit_requested);
    }

    #[test]
    fn mouse_delta_rotates_view_before_translation() {
        let (mut world, mut physics, _, handles) = build_scene().unwrap();
        let mut input = InputRouter::new();
        let mut haptics = RecordingHaptics::default();

        // 900 counts of yaw at 0.1 deg/count = a 90 degree turn
        dispatch(&mut input, DeviceEvent::MouseMotion { delta: Vec2i::new(900, 0) });
        press(&mut input, KeyCode::KeyW);
        movement_pass(&input, &mut world, &mut physics, handles.player, &mut haptics).unwrap();

        let t: Transform = world.get(handles.player).unwrap();
        // Forward after the turn points along -X
        assert!((t.position.x - -1.0).abs() < 1e-4);
        assert!(t.position.z.abs() < 1e-4);
    }

    #[test]
    fn shoulder_button_forces_props_and_rumbles() {
        let (mut world, mut physics, sync, handles) = build_scene().unwrap();
        let mut input = InputRouter::new();
        let mut haptics = RecordingHaptics::default();

        dispatch(&mut input, DeviceEvent::PadButton { button: 9, pressed: true });
        movement_pass(&input, &mut world, &mut physics, handles.player, &mut haptics).unwrap();

        assert_eq!(haptics.calls, vec![(0.75, 500)]);

        // The force lands on dynamic bodies only; step and check one prop rises
        physics.step(1.0 / 60.0);
        let body = sync.handle_for(handles.props[0]).unwrap();
        assert!(physics.rigid_body_set.get(body).unwrap().linvel().y > 0.0);
    }

    #[test]
    fn action_nudge_fires_once_per_press() {
        let (mut world, mut physics, _, handles) = build_scene().unwrap();
        let mut input = InputRouter::new();
        let mut haptics = RecordingHaptics::default();

        dispatch(&mut input, DeviceEvent::PadButton { button: 3, pressed: true });
        movement_pass(&input, &mut world, &mut physics, handles.player, &mut haptics).unwrap();
        input.end_frame();

        // Still held next tick, but the edge is gone
        movement_pass(&input, &mut world, &mut physics, handles.player, &mut haptics).unwrap();

        let t: Transform = world.get(handles.player).unwrap();
        assert_eq!(t.position.y, 1.0);
    }

    #[test]
    fn missing_player_is_a_descriptive_error() {
        let (mut world, mut physics, _, _) = build_scene().unwrap();
        let mut input = InputRouter::new();
        let mut haptics = RecordingHaptics::default();

        let bogus = EntityId::from_raw(u64::MAX);
        let err = movement_pass(&input, &mut world, &mut physics, bogus, &mut haptics);
        assert!(err.is_err());
    }
}
