//! Input state management
//!
//! `InputState` is a plain snapshot of every tracked device input.
//! `InputRouter` owns the live snapshot plus the previous frame's snapshot,
//! giving held queries, per-frame edge queries, and mouse-delta reads.
//! All writes happen during event dispatch, all reads during the movement
//! pass, strictly ordered within one tick.

use crate::pad::{AxisSlot, PadButton};
use basalt_core::Vec2i;
use std::collections::HashSet;
use winit::keyboard::KeyCode;

/// A snapshot of all device inputs at a point in time
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Keys currently held down
    keys: HashSet<KeyCode>,
    /// Thresholded stick direction slots
    axes: [bool; AxisSlot::COUNT],
    /// Logical controller button slots
    buttons: [bool; PadButton::COUNT],
    /// Accumulated relative mouse motion
    mouse_pos: Vec2i,
    /// Mouse position just before the most recent motion event
    previous_mouse_pos: Vec2i,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Routes device state changes into the live snapshot and answers the
/// frame loop's held and edge queries.
///
/// Edge detection compares the live snapshot against the previous frame's
/// snapshot, captured exactly once per frame boundary by [`end_frame`].
///
/// [`end_frame`]: InputRouter::end_frame
#[derive(Debug, Default)]
pub struct InputRouter {
    current: InputState,
    previous: InputState,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    // --- State-setting operations (called from event dispatch only) ---

    /// Set the held flag for a key
    pub fn set_key(&mut self, code: KeyCode, down: bool) {
        if down {
            self.current.keys.insert(code);
        } else {
            self.current.keys.remove(&code);
        }
    }

    /// Set one axis slot
    pub fn set_axis(&mut self, slot: AxisSlot, state: bool) {
        self.current.axes[slot.index()] = state;
    }

    /// Set one button slot
    pub fn set_button(&mut self, button: PadButton, state: bool) {
        self.current.buttons[button.index()] = state;
    }

    /// Accumulate relative mouse motion. The pre-update position is retained
    /// so the delta reads relative to the position just before this event.
    pub fn move_mouse(&mut self, delta: Vec2i) {
        self.current.previous_mouse_pos = self.current.mouse_pos;
        self.current.mouse_pos += delta;
    }

    // --- Query operations (called from the movement pass only) ---

    /// Is the key currently held?
    pub fn key(&self, code: KeyCode) -> bool {
        self.current.keys.contains(&code)
    }

    /// Did the key transition not-held -> held this frame?
    pub fn key_down(&self, code: KeyCode) -> bool {
        self.current.keys.contains(&code) && !self.previous.keys.contains(&code)
    }

    /// Did the key transition held -> not-held this frame?
    pub fn key_up(&self, code: KeyCode) -> bool {
        !self.current.keys.contains(&code) && self.previous.keys.contains(&code)
    }

    /// Current state of one axis slot
    pub fn axis(&self, slot: AxisSlot) -> bool {
        self.current.axes[slot.index()]
    }

    /// Current state of one button slot
    pub fn button(&self, button: PadButton) -> bool {
        self.current.buttons[button.index()]
    }

    /// Did the button transition not-held -> held this frame?
    pub fn button_down(&self, button: PadButton) -> bool {
        self.current.buttons[button.index()] && !self.previous.buttons[button.index()]
    }

    /// Accumulated mouse position
    pub fn mouse_pos(&self) -> Vec2i {
        self.current.mouse_pos
    }

    /// Motion since the position just before the most recent motion event
    /// (or since the last frame boundary if no motion arrived this frame)
    pub fn mouse_delta(&self) -> Vec2i {
        self.current.mouse_pos - self.current.previous_mouse_pos
    }

    /// Capture the frame-boundary snapshot. Call exactly once per tick,
    /// after the movement pass has consumed this frame's state.
    pub fn end_frame(&mut self) {
        self.previous = self.current.clone();
        // Collapse the delta so a motionless frame reads zero
        self.current.previous_mouse_pos = self.current.mouse_pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_round_trip() {
        let mut input = InputRouter::new();
        assert!(!input.key(KeyCode::KeyW));

        input.set_key(KeyCode::KeyW, true);
        assert!(input.key(KeyCode::KeyW));

        input.set_key(KeyCode::KeyW, false);
        assert!(!input.key(KeyCode::KeyW));
    }

    #[test]
    fn key_down_fires_on_transition_tick_only() {
        let mut input = InputRouter::new();

        // Tick 1: key goes down
        input.set_key(KeyCode::Space, true);
        assert!(input.key_down(KeyCode::Space));
        input.end_frame();

        // Tick 2: still held, no edge
        assert!(input.key(KeyCode::Space));
        assert!(!input.key_down(KeyCode::Space));
        input.end_frame();

        // Tick 3: released
        input.set_key(KeyCode::Space, false);
        assert!(input.key_up(KeyCode::Space));
        assert!(!input.key_down(KeyCode::Space));
        input.end_frame();

        // Tick 4: stays released, no edge
        assert!(!input.key_up(KeyCode::Space));
    }

    #[test]
    fn button_edge_detection() {
        let mut input = InputRouter::new();

        input.set_button(PadButton::ActionUp, true);
        assert!(input.button_down(PadButton::ActionUp));
        input.end_frame();

        assert!(input.button(PadButton::ActionUp));
        assert!(!input.button_down(PadButton::ActionUp));
    }

    #[test]
    fn queries_are_idempotent() {
        let mut input = InputRouter::new();
        input.set_key(KeyCode::KeyA, true);
        input.set_axis(AxisSlot::Forward, true);
        input.set_button(PadButton::LeftShoulder, true);

        for _ in 0..3 {
            assert!(input.key(KeyCode::KeyA));
            assert!(input.axis(AxisSlot::Forward));
            assert!(input.button(PadButton::LeftShoulder));
            assert!(input.key_down(KeyCode::KeyA));
        }
    }

    #[test]
    fn mouse_delta_tracks_most_recent_motion() {
        let mut input = InputRouter::new();

        input.move_mouse(Vec2i::new(3, -2));
        assert_eq!(input.mouse_delta(), Vec2i::new(3, -2));

        input.move_mouse(Vec2i::new(1, 1));
        assert_eq!(input.mouse_delta(), Vec2i::new(1, 1));
        assert_eq!(input.mouse_pos(), Vec2i::new(4, -1));
    }

    #[test]
    fn mouse_delta_collapses_at_frame_boundary() {
        let mut input = InputRouter::new();
        input.move_mouse(Vec2i::new(5, 7));
        input.end_frame();
        assert_eq!(input.mouse_delta(), Vec2i::ZERO);
        assert_eq!(input.mouse_pos(), Vec2i::new(5, 7));
    }

    #[test]
    fn fresh_state_is_all_clear() {
        let input = InputRouter::new();
        assert!(!input.key(KeyCode::Escape));
        assert!(!input.axis(AxisSlot::StrafeLeft));
        assert!(!input.button(PadButton::ActionDown));
        assert_eq!(input.mouse_pos(), Vec2i::ZERO);
        assert_eq!(input.mouse_delta(), Vec2i::ZERO);
    }
}
