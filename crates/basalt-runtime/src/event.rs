//! Device event dispatch
//!
//! Platform and gamepad backends translate their native events into
//! [`DeviceEvent`]s; [`dispatch`] folds each event into the input router.
//! Dispatch is purely state-setting — world mutation happens later, in the
//! movement pass, from the finalized per-tick state.

use crate::input::InputRouter;
use crate::pad::{apply_stick_axis, PadButton, StickAxis};
use basalt_core::Vec2i;
use winit::keyboard::KeyCode;

/// A normalized device event, decoupled from the platform backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    /// Platform quit signal
    Quit,
    /// The window was closed
    WindowClosed,
    /// Key press or release
    Key { code: KeyCode, pressed: bool },
    /// Relative mouse motion
    MouseMotion { delta: Vec2i },
    /// Raw stick axis deflection (i16 device units)
    StickMotion { axis: u8, value: i16 },
    /// Raw controller button press or release
    PadButton { button: u8, pressed: bool },
}

/// Outcome of dispatching one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Continue,
    QuitRequested,
}

/// Fold one event into the router. Each event kind has exactly one handler;
/// unmapped stick/button numbers are ignored.
pub fn dispatch(input: &mut InputRouter, event: DeviceEvent) -> Dispatch {
    match event {
        DeviceEvent::Quit | DeviceEvent::WindowClosed => return Dispatch::QuitRequested,
        DeviceEvent::Key { code, pressed } => input.set_key(code, pressed),
        DeviceEvent::MouseMotion { delta } => input.move_mouse(delta),
        DeviceEvent::StickMotion { axis, value } => {
            if let Some(stick) = StickAxis::from_raw(axis) {
                apply_stick_axis(input, stick, value);
            }
        }
        DeviceEvent::PadButton { button, pressed } => {
            if let Some(button) = PadButton::from_raw_button(button) {
                input.set_button(button, pressed);
            }
        }
    }
    Dispatch::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pad::AxisSlot;

    #[test]
    fn quit_events_request_quit() {
        let mut input = InputRouter::new();
        assert_eq!(dispatch(&mut input, DeviceEvent::Quit), Dispatch::QuitRequested);
        assert_eq!(
            dispatch(&mut input, DeviceEvent::WindowClosed),
            Dispatch::QuitRequested
        );
    }

    #[test]
    fn key_events_set_state_only() {
        let mut input = InputRouter::new();
        let outcome = dispatch(
            &mut input,
            DeviceEvent::Key {
                code: KeyCode::KeyW,
                pressed: true,
            },
        );
        assert_eq!(outcome, Dispatch::Continue);
        assert!(input.key(KeyCode::KeyW));

        dispatch(
            &mut input,
            DeviceEvent::Key {
                code: KeyCode::KeyW,
                pressed: false,
            },
        );
        assert!(!input.key(KeyCode::KeyW));
    }

    #[test]
    fn stick_motion_thresholds_into_slots() {
        let mut input = InputRouter::new();
        dispatch(
            &mut input,
            DeviceEvent::StickMotion {
                axis: 1,
                value: -20000,
            },
        );
        assert!(input.axis(AxisSlot::Forward));
    }

    #[test]
    fn unmapped_device_numbers_are_ignored() {
        let mut input = InputRouter::new();
        dispatch(
            &mut input,
            DeviceEvent::StickMotion {
                axis: 6,
                value: 32000,
            },
        );
        dispatch(
            &mut input,
            DeviceEvent::PadButton {
                button: 14,
                pressed: true,
            },
        );
        for i in 0..AxisSlot::COUNT {
            assert!(!input.axis(AxisSlot::from_index(i).unwrap()));
        }
        for i in 0..PadButton::COUNT {
            assert!(!input.button(PadButton::from_index(i).unwrap()));
        }
    }

    #[test]
    fn mouse_motion_accumulates() {
        let mut input = InputRouter::new();
        dispatch(
            &mut input,
            DeviceEvent::MouseMotion {
                delta: Vec2i::new(3, -2),
            },
        );
        dispatch(
            &mut input,
            DeviceEvent::MouseMotion {
                delta: Vec2i::new(1, 1),
            },
        );
        assert_eq!(input.mouse_delta(), Vec2i::new(1, 1));
    }

    #[test]
    fn quit_event_flips_loop_state() {
        use crate::state::LoopState;

        let mut input = InputRouter::new();
        let mut state = LoopState::default();

        if dispatch(&mut input, DeviceEvent::Quit) == Dispatch::QuitRequested {
            state.request_quit();
        }
        assert!(!state.is_running());
    }

    #[test]
    fn mapped_pad_button_sets_slot() {
        let mut input = InputRouter::new();
        dispatch(
            &mut input,
            DeviceEvent::PadButton {
                button: 9,
                pressed: true,
            },
        );
        assert!(input.button(PadButton::LeftShoulder));
    }
}
