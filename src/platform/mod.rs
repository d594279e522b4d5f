//! Platform abstraction layer
//!
//! Handles the host-facing parts of the frame loop:
//! - Keyboard bindings and input snapshots
//! - Frame pacing (optional fixed target rate)

pub mod input;
pub mod pacing;

pub use input::{Control, InputState, KEY_BINDINGS, KeyBinding, KeyEffect, KeyPhase, binding_for};
pub use pacing::FramePacer;
