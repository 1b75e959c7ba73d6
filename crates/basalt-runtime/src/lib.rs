//! Basalt Runtime - Frame loop infrastructure
//!
//! Provides the core frame-loop building blocks:
//! - `InputState` / `InputRouter` — input snapshot with per-frame edge detection
//! - `AxisSlot` / `PadButton` / `StickAxis` — dead-zone pad mapping
//! - `DeviceEvent` / `dispatch` — state-setting event dispatch
//! - `LoopState` — the RUNNING → QUITTING loop machine
//! - `FrameClock` — monotonic elapsed-time tracking

mod clock;
mod event;
mod input;
mod pad;
mod state;

pub use clock::FrameClock;
pub use event::{dispatch, DeviceEvent, Dispatch};
pub use input::{InputRouter, InputState};
pub use pad::{apply_stick_axis, AxisSlot, PadButton, StickAxis, DEAD_ZONE};
pub use state::LoopState;
