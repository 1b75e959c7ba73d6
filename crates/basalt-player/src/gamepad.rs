//! Gamepad input and haptics via gilrs
//!
//! Translates gilrs events into the runtime's normalized device events and
//! plays rumble effects for the movement pass. A machine without a pad (or
//! without a usable gamepad backend) degrades to a no-op after one warning.

use crate::movement::Haptics;
use basalt_runtime::DeviceEvent;
use gilrs::ff::{BaseEffect, BaseEffectType, Effect, EffectBuilder, Replay, Ticks};
use gilrs::{Axis, Button, Event, EventType, Gilrs};

pub struct GamepadInput {
    gilrs: Option<Gilrs>,
    /// Keeps the most recent rumble alive; dropping an effect stops it
    active_effect: Option<Effect>,
    ff_warned: bool,
}

impl GamepadInput {
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => {
                match gilrs.gamepads().next() {
                    Some((_, pad)) => log::info!("Controller connected: {}", pad.name()),
                    None => log::warn!("No controller connected"),
                }
                Some(gilrs)
            }
            Err(e) => {
                log::warn!("Gamepad backend unavailable: {e}");
                None
            }
        };

        Self {
            gilrs,
            active_effect: None,
            ff_warned: false,
        }
    }

    /// Drain pending pad events, translated to normalized device events
    pub fn poll(&mut self) -> Vec<DeviceEvent> {
        let Some(gilrs) = self.gilrs.as_mut() else {
            return Vec::new();
        };

        let mut events = Vec::new();
        while let Some(Event { event, .. }) = gilrs.next_event() {
            match event {
                EventType::ButtonPressed(button, _) => {
                    if let Some(button) = raw_button(button) {
                        events.push(DeviceEvent::PadButton {
                            button,
                            pressed: true,
                        });
                    }
                }
                EventType::ButtonReleased(button, _) => {
                    if let Some(button) = raw_button(button) {
                        events.push(DeviceEvent::PadButton {
                            button,
                            pressed: false,
                        });
                    }
                }
                EventType::AxisChanged(axis, value, _) => {
                    if let Some((axis, value)) = raw_axis(axis, value) {
                        events.push(DeviceEvent::StickMotion { axis, value });
                    }
                }
                EventType::Connected => log::info!("Controller connected"),
                EventType::Disconnected => log::warn!("Controller disconnected"),
                _ => {}
            }
        }
        events
    }
}

impl Default for GamepadInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Haptics for GamepadInput {
    fn rumble(&mut self, strength: f32, millis: u32) {
        let Some(gilrs) = self.gilrs.as_mut() else {
            return;
        };
        let Some(pad_id) = gilrs.gamepads().next().map(|(id, _)| id) else {
            return;
        };
        if !gilrs.gamepad(pad_id).is_ff_supported() {
            if !self.ff_warned {
                log::warn!("Controller does not support haptics");
                self.ff_warned = true;
            }
            return;
        }

        let magnitude = (strength.clamp(0.0, 1.0) * u16::MAX as f32) as u16;
        let built = EffectBuilder::new()
            .add_effect(BaseEffect {
                kind: BaseEffectType::Strong { magnitude },
                scheduling: Replay {
                    play_for: Ticks::from_ms(millis),
                    ..Default::default()
                },
                envelope: Default::default(),
            })
            .gamepads(&[pad_id])
            .finish(gilrs);

        match built {
            Ok(effect) => {
                if let Err(e) = effect.play() {
                    if !self.ff_warned {
                        log::warn!("Rumble failed: {e}");
                        self.ff_warned = true;
                    }
                    return;
                }
                self.active_effect = Some(effect);
            }
            Err(e) => {
                if !self.ff_warned {
                    log::warn!("Rumble failed: {e}");
                    self.ff_warned = true;
                }
            }
        }
    }
}

/// Map a gilrs button to the physical button number the dispatcher expects.
/// Only the shoulder, trigger, and the two action buttons are mapped.
fn raw_button(button: Button) -> Option<u8> {
    match button {
        Button::LeftTrigger => Some(9),
        Button::LeftTrigger2 => Some(10),
        Button::North => Some(3),
        Button::South => Some(0),
        _ => None,
    }
}

/// Map a gilrs axis to the physical axis number and i16 deflection the
/// dispatcher expects. gilrs reports stick-up as positive; the device model
/// expects stick-up negative, so Y values are negated.
fn raw_axis(axis: Axis, value: f32) -> Option<(u8, i16)> {
    let to_raw = |v: f32| (v.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
    match axis {
        Axis::LeftStickX => Some((0, to_raw(value))),
        Axis::LeftStickY => Some((1, to_raw(-value))),
        Axis::RightStickX => Some((2, to_raw(value))),
        Axis::RightStickY => Some((3, to_raw(-value))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_mapping_matches_dispatcher() {
        assert_eq!(raw_button(Button::LeftTrigger), Some(9));
        assert_eq!(raw_button(Button::LeftTrigger2), Some(10));
        assert_eq!(raw_button(Button::North), Some(3));
        assert_eq!(raw_button(Button::South), Some(0));
        assert_eq!(raw_button(Button::East), None);
    }

    #[test]
    fn axis_mapping_negates_y() {
        let (axis, value) = raw_axis(Axis::LeftStickY, 1.0).unwrap();
        assert_eq!(axis, 1);
        assert!(value < -8000, "full stick-up must clear the dead zone as forward");

        let (_, value) = raw_axis(Axis::LeftStickX, 0.1).unwrap();
        assert!(value.abs() < 8000, "small deflections stay inside the dead zone");

        assert_eq!(raw_axis(Axis::LeftZ, 1.0), None);
    }
}
