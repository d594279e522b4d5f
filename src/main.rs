//! Orrery Arcade entry point
//!
//! The browser build is driven through the library's `web` module. Natively
//! this runs both simulations headless and logs what they do.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use orrery_arcade::Settings;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Orrery Arcade (native, headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::from_path(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::error!("{}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Settings::load(),
    };

    if let Err(e) = headless::run_orrery(&settings, 96 * 365) {
        log::error!("Orrery failed to start: {}", e);
        std::process::exit(1);
    }
    headless::run_arcade(&settings, 3000);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use orrery_arcade::Settings;
    use orrery_arcade::sim::{
        ArcadeEvent, ArcadeState, CatalogError, OrreryInput, OrreryState, TickInput, orrery_tick,
        tick,
    };

    /// Advance the orrery `frames` times and report where the planets ended up
    pub fn run_orrery(settings: &Settings, frames: u32) -> Result<(), CatalogError> {
        let mut state = OrreryState::from_settings(settings)?;
        let input = OrreryInput::default();
        for _ in 0..frames {
            orrery_tick(&mut state, &input);
        }

        log::info!(
            "Orrery after {} frames (time factor {:.2}):",
            state.frames,
            state.params.time_factor.get()
        );
        let root = state.orrery.root();
        for (id, body) in state.orrery.bodies() {
            if state.orrery.parent(id) == Some(root) {
                let p = body.position;
                let inclination = state
                    .orrery
                    .orbit_of(id)
                    .map_or(0.0, |s| s.inclination.to_degrees());
                log::info!(
                    "  {:<8} ({:>9.2}, {:>9.2}) incl {:.2}°",
                    body.name,
                    p.x,
                    p.z,
                    inclination
                );
            }
        }
        Ok(())
    }

    /// Play the arcade with a simple autopilot: accelerate, dodge walls sideways
    pub fn run_arcade(settings: &Settings, ticks: u32) {
        let mut state = ArcadeState::from_settings(settings);
        for _ in 0..ticks {
            let input = autopilot(&state);
            tick(&mut state, &input);
            for event in state.drain_events() {
                if let ArcadeEvent::Halted { won } = event {
                    log::info!(
                        "Round {} {} at y={:.1}",
                        state.round,
                        if won { "won" } else { "lost" },
                        state.ball.pos.y
                    );
                }
            }
        }
        log::info!(
            "Arcade finished after {} ticks: {}",
            state.time_ticks,
            state.stats_line()
        );
    }

    fn autopilot(state: &ArcadeState) -> TickInput {
        let ahead = state.ball.pos + glam::Vec2::new(0.0, 80.0);
        let blocked = orrery_arcade::sim::check_wall_collision(ahead, &state.walls);
        TickInput {
            move_left: blocked && state.ball.pos.x > -300.0,
            move_right: blocked && state.ball.pos.x <= -300.0,
            move_forward: state.ball.delta < 3.0,
            ..Default::default()
        }
    }
}
