//! Keyboard bindings and per-frame input snapshots
//!
//! Key events only flip flags here. The frame loop takes one snapshot per
//! tick, so the simulation never sees raw events.

use crate::sim::{OrreryInput, TickInput};

/// Something a key can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Control {
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    CameraUp,
    CameraDown,
    ResetGame,
    SpeedUp,
    SlowDown,
    DistanceScaleDown,
    DistanceScaleUp,
    RadiusScaleDown,
    RadiusScaleUp,
    TogglePause,
}

impl Control {
    pub const COUNT: usize = 14;
}

/// What a key transition does to its control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEffect {
    Ignore,
    /// Control is held from now on
    Hold,
    /// Control is no longer held
    Release,
    /// Fire the control once on the next snapshot
    Trigger,
}

/// Key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Up,
}

/// One row of the binding table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    /// `KeyboardEvent.key` value (single letters lowercase)
    pub key: &'static str,
    pub control: Control,
    pub on_press: KeyEffect,
    pub on_release: KeyEffect,
}

const fn held(key: &'static str, control: Control) -> KeyBinding {
    KeyBinding {
        key,
        control,
        on_press: KeyEffect::Hold,
        on_release: KeyEffect::Release,
    }
}

/// Every bound key for both demos
pub const KEY_BINDINGS: &[KeyBinding] = &[
    // Arcade movement
    held("ArrowUp", Control::MoveForward),
    held("w", Control::MoveForward),
    held("ArrowDown", Control::MoveBack),
    held("s", Control::MoveBack),
    held("ArrowLeft", Control::MoveLeft),
    held("a", Control::MoveLeft),
    held("ArrowRight", Control::MoveRight),
    held("d", Control::MoveRight),
    // Arcade camera tilt
    held("PageUp", Control::CameraUp),
    held("PageDown", Control::CameraDown),
    KeyBinding {
        key: "Escape",
        control: Control::ResetGame,
        on_press: KeyEffect::Trigger,
        on_release: KeyEffect::Ignore,
    },
    // Orrery knobs
    held(",", Control::SpeedUp),
    held(".", Control::SlowDown),
    held("k", Control::DistanceScaleDown),
    held("l", Control::DistanceScaleUp),
    held("i", Control::RadiusScaleDown),
    held("o", Control::RadiusScaleUp),
    // Pause toggles when the key comes back up
    KeyBinding {
        key: " ",
        control: Control::TogglePause,
        on_press: KeyEffect::Ignore,
        on_release: KeyEffect::Trigger,
    },
];

/// Look up the binding for a `KeyboardEvent.key` value
pub fn binding_for(key: &str) -> Option<&'static KeyBinding> {
    if key.chars().count() == 1 {
        let lower = key.to_lowercase();
        KEY_BINDINGS.iter().find(|b| b.key == lower)
    } else {
        KEY_BINDINGS.iter().find(|b| b.key == key)
    }
}

/// Held flags and pending one-shot triggers
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: [bool; Control::COUNT],
    triggered: [bool; Control::COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a key transition. Returns `false` for unbound keys.
    pub fn handle_key(&mut self, key: &str, phase: KeyPhase) -> bool {
        let Some(binding) = binding_for(key) else {
            return false;
        };
        let effect = match phase {
            KeyPhase::Down => binding.on_press,
            KeyPhase::Up => binding.on_release,
        };
        let slot = binding.control as usize;
        match effect {
            KeyEffect::Ignore => {}
            KeyEffect::Hold => self.held[slot] = true,
            KeyEffect::Release => self.held[slot] = false,
            KeyEffect::Trigger => self.triggered[slot] = true,
        }
        true
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.held[control as usize]
    }

    /// Drop every held flag and pending trigger (e.g. on focus loss)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn take(&mut self, control: Control) -> bool {
        std::mem::take(&mut self.triggered[control as usize])
    }

    /// Snapshot for one arcade tick; consumes the reset trigger
    pub fn arcade_input(&mut self) -> TickInput {
        TickInput {
            move_forward: self.is_held(Control::MoveForward),
            move_back: self.is_held(Control::MoveBack),
            move_left: self.is_held(Control::MoveLeft),
            move_right: self.is_held(Control::MoveRight),
            camera_up: self.is_held(Control::CameraUp),
            camera_down: self.is_held(Control::CameraDown),
            reset: self.take(Control::ResetGame),
        }
    }

    /// Snapshot for one orrery frame; consumes the pause trigger
    pub fn orrery_input(&mut self) -> OrreryInput {
        OrreryInput {
            speed_up: self.is_held(Control::SpeedUp),
            slow_down: self.is_held(Control::SlowDown),
            distance_scale_down: self.is_held(Control::DistanceScaleDown),
            distance_scale_up: self.is_held(Control::DistanceScaleUp),
            radius_scale_down: self.is_held(Control::RadiusScaleDown),
            radius_scale_up: self.is_held(Control::RadiusScaleUp),
            toggle_pause: self.take(Control::TogglePause),
        }
    }
}
