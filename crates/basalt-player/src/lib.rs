//! Basalt Player - scene player library
//!
//! The binary wires these together; they are exposed as a library so the
//! movement pass and scene construction stay testable headlessly.

pub mod app;
pub mod gamepad;
pub mod movement;
pub mod scene;

pub use app::PlayerApp;
pub use gamepad::GamepadInput;
pub use movement::{movement_pass, Haptics, MovementOutcome};
pub use scene::{build_scene, SceneHandles};
