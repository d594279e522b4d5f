//! Browser surface
//!
//! The page owns the renderer and its meshes. It forwards key events, calls
//! `frame` from `requestAnimationFrame` and copies the packed poses onto
//! its meshes (9 floats per slot, see [`Pose::PACKED_LEN`]).

use wasm_bindgen::prelude::*;

use crate::Settings;
use crate::platform::{FramePacer, InputState, KeyPhase};
use crate::scene::{PackedPoses, Pose, SceneSink};
use crate::sim::{ArcadeEvent, ArcadeState, OrreryState, orrery_tick, tick};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Orrery Arcade loaded");
}

/// Element receiving the arcade stats line
const STATS_ELEMENT_ID: &str = "stats";

#[derive(serde::Serialize)]
struct BodyInfo<'a> {
    name: &'a str,
    radius: f32,
    color: u32,
    parent: Option<usize>,
    /// Orbital inclination (radians), for hosts that tilt orbit rings
    inclination: f32,
}

/// Solar-system orrery driven by the page
#[wasm_bindgen]
pub struct OrreryApp {
    state: OrreryState,
    input: InputState,
    pacer: FramePacer,
    poses: PackedPoses,
}

#[wasm_bindgen]
impl OrreryApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<OrreryApp, JsValue> {
        let settings = Settings::load();
        let state =
            OrreryState::from_settings(&settings).map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!(
            "Orrery ready: system={}, {} bodies",
            settings.system.as_str(),
            state.orrery.len()
        );

        let mut poses = PackedPoses::default();
        state.orrery.sync_scene(&state.params, &mut poses);
        Ok(Self {
            state,
            input: InputState::new(),
            pacer: FramePacer::new(settings.target_fps),
            poses,
        })
    }

    pub fn key_down(&mut self, key: &str) -> bool {
        self.input.handle_key(key, KeyPhase::Down)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.input.handle_key(key, KeyPhase::Up)
    }

    /// Release everything (window lost focus)
    pub fn blur(&mut self) {
        self.input.clear();
    }

    /// Run the frames due at `now_ms`; returns how many ran
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        let due = self.pacer.frames_due(now_ms);
        for _ in 0..due {
            let input = self.input.orrery_input();
            orrery_tick(&mut self.state, &input);
        }
        if due > 0 {
            self.state
                .orrery
                .sync_scene(&self.state.params, &mut self.poses);
        }
        due
    }

    /// Packed poses, one slot per body in `bodies()` order
    pub fn poses(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(self.poses.data.as_slice())
    }

    /// JSON array of `{ name, radius, color, parent }` for building meshes
    pub fn bodies(&self) -> Result<String, JsValue> {
        let info: Vec<BodyInfo> = self
            .state
            .orrery
            .bodies()
            .map(|(id, body)| BodyInfo {
                name: &body.name,
                radius: body.radius,
                color: body.color,
                parent: self.state.orrery.parent(id).map(|p| p.0),
                inclination: self.state.orrery.orbit_of(id).map_or(0.0, |s| s.inclination),
            })
            .collect();
        serde_json::to_string(&info).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn running(&self) -> bool {
        self.state.running
    }

    pub fn time_factor(&self) -> f32 {
        self.state.params.time_factor.get()
    }
}

/// Kamikaze-ball arcade driven by the page.
///
/// Pose slots: 0 = ball, 1 = camera, 2.. = walls in layout order.
#[wasm_bindgen]
pub struct ArcadeApp {
    state: ArcadeState,
    input: InputState,
    pacer: FramePacer,
    poses: PackedPoses,
}

#[wasm_bindgen]
impl ArcadeApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ArcadeApp {
        let settings = Settings::load();
        let state = ArcadeState::from_settings(&settings);
        log::info!("Arcade ready: {} walls", state.walls.len());

        let mut app = Self {
            state,
            input: InputState::new(),
            pacer: FramePacer::new(settings.target_fps),
            poses: PackedPoses::default(),
        };
        app.sync_scene();
        app.publish_stats();
        app
    }

    pub fn key_down(&mut self, key: &str) -> bool {
        self.input.handle_key(key, KeyPhase::Down)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.input.handle_key(key, KeyPhase::Up)
    }

    pub fn blur(&mut self) {
        self.input.clear();
    }

    /// Run the frames due at `now_ms`; returns how many ran
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        let due = self.pacer.frames_due(now_ms);
        let mut stats_changed = false;
        for _ in 0..due {
            let input = self.input.arcade_input();
            tick(&mut self.state, &input);
            stats_changed |= self
                .state
                .drain_events()
                .contains(&ArcadeEvent::StatsChanged);
        }
        if due > 0 {
            self.sync_scene();
        }
        if stats_changed {
            self.publish_stats();
        }
        due
    }

    pub fn poses(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(self.poses.data.as_slice())
    }

    /// Number of pose slots
    pub fn slot_count(&self) -> usize {
        self.poses.data.len() / Pose::PACKED_LEN
    }

    /// JSON array of `{ x, y, width }`
    pub fn walls(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.walls).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn stats(&self) -> String {
        self.state.stats_line()
    }

    /// Ticks simulated since start
    pub fn ticks(&self) -> f64 {
        self.state.time_ticks as f64
    }

    fn sync_scene(&mut self) {
        self.poses.set_pose(0, self.state.ball.pose());
        self.poses.set_pose(1, self.state.camera.pose());
        for (i, wall) in self.state.walls.iter().enumerate() {
            self.poses.set_pose(2 + i, wall.pose());
        }
    }

    /// Write the stats line into the page, if it has a stats element
    fn publish_stats(&self) {
        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(STATS_ELEMENT_ID));
        if let Some(el) = element {
            el.set_text_content(Some(&self.state.stats_line()));
        }
    }
}

impl Default for ArcadeApp {
    fn default() -> Self {
        Self::new()
    }
}
