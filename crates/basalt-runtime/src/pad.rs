//! Gamepad mapping: dead-zone axis slots and button slots
//!
//! Raw stick deflections are thresholded into boolean axis slots (one slot
//! per direction, two per physical stick axis); raw button numbers map to a
//! small fixed set of logical buttons. The router never sees analog values.

use crate::input::InputRouter;
use basalt_core::{BasaltError, Result};

/// Stick deflection magnitude (in i16 device units) treated as "no input"
pub const DEAD_ZONE: i16 = 8000;

/// One boolean direction slot derived from a thresholded stick axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisSlot {
    StrafeLeft,
    StrafeRight,
    Forward,
    Backward,
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
}

impl AxisSlot {
    pub const COUNT: usize = 8;

    const ALL: [AxisSlot; Self::COUNT] = [
        AxisSlot::StrafeLeft,
        AxisSlot::StrafeRight,
        AxisSlot::Forward,
        AxisSlot::Backward,
        AxisSlot::YawLeft,
        AxisSlot::YawRight,
        AxisSlot::PitchUp,
        AxisSlot::PitchDown,
    ];

    /// Slot position in the axis table
    pub fn index(self) -> usize {
        match self {
            AxisSlot::StrafeLeft => 0,
            AxisSlot::StrafeRight => 1,
            AxisSlot::Forward => 2,
            AxisSlot::Backward => 3,
            AxisSlot::YawLeft => 4,
            AxisSlot::YawRight => 5,
            AxisSlot::PitchUp => 6,
            AxisSlot::PitchDown => 7,
        }
    }

    /// Validated conversion from a raw slot index
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(BasaltError::UnknownAxisSlot(index))
    }
}

/// Logical controller buttons tracked by the input state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadButton {
    LeftShoulder,
    LeftTrigger,
    ActionUp,
    ActionDown,
}

impl PadButton {
    pub const COUNT: usize = 4;

    const ALL: [PadButton; Self::COUNT] = [
        PadButton::LeftShoulder,
        PadButton::LeftTrigger,
        PadButton::ActionUp,
        PadButton::ActionDown,
    ];

    /// Slot position in the button table
    pub fn index(self) -> usize {
        match self {
            PadButton::LeftShoulder => 0,
            PadButton::LeftTrigger => 1,
            PadButton::ActionUp => 2,
            PadButton::ActionDown => 3,
        }
    }

    /// Validated conversion from a raw slot index
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(BasaltError::UnknownButtonSlot(index))
    }

    /// Map a physical controller button number to its logical slot.
    /// Unmapped button numbers return None and are ignored by dispatch.
    pub fn from_raw_button(raw: u8) -> Option<Self> {
        match raw {
            9 => Some(PadButton::LeftShoulder),
            10 => Some(PadButton::LeftTrigger),
            3 => Some(PadButton::ActionUp),
            0 => Some(PadButton::ActionDown),
            _ => None,
        }
    }
}

/// A physical analog stick axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
}

impl StickAxis {
    /// Map a physical axis number to a stick axis.
    /// Unmapped axis numbers return None and are ignored by dispatch.
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(StickAxis::LeftX),
            1 => Some(StickAxis::LeftY),
            2 => Some(StickAxis::RightX),
            3 => Some(StickAxis::RightY),
            _ => None,
        }
    }

    /// The (negative-deflection, positive-deflection) slot pair for this axis
    pub fn slot_pair(self) -> (AxisSlot, AxisSlot) {
        match self {
            StickAxis::LeftX => (AxisSlot::StrafeLeft, AxisSlot::StrafeRight),
            StickAxis::LeftY => (AxisSlot::Forward, AxisSlot::Backward),
            StickAxis::RightX => (AxisSlot::YawLeft, AxisSlot::YawRight),
            StickAxis::RightY => (AxisSlot::PitchUp, AxisSlot::PitchDown),
        }
    }
}

/// Threshold a raw stick value into the axis slot pair.
///
/// Deflection past the dead zone sets that side's slot; a value inside the
/// band clears both slots of the pair. A value past one side does not clear
/// the opposite slot (the stick must pass back through the band first).
pub fn apply_stick_axis(input: &mut InputRouter, stick: StickAxis, raw: i16) {
    let (negative, positive) = stick.slot_pair();
    if raw < -DEAD_ZONE {
        input.set_axis(negative, true);
    } else if raw > DEAD_ZONE {
        input.set_axis(positive, true);
    } else {
        input.set_axis(negative, false);
        input.set_axis(positive, false);
    }
}
