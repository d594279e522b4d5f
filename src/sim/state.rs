//! Arcade game state
//!
//! One ball rolls up the field along +Y. Steering moves it along X,
//! accelerating/braking changes how fast it rolls. Walls are thin
//! segments parallel to X.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::scene::Pose;
use crate::settings::{PanTarget, SpeedRamp};
use crate::wrap_angle;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArcadePhase {
    /// Ball advancing along Y
    Rolling,
    /// Ball stopped; the next tick re-serves it
    Halted { won: bool },
}

/// Something the host may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArcadeEvent {
    /// Ball hit a wall, left the field or reached the goal band
    Halted { won: bool },
    /// A new round was served
    RoundStarted { round: u32 },
    /// Wins, round or score changed
    StatsChanged,
}

/// A wall: `width` units long, centred at (`x`, `y`), parallel to X
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

impl WallSegment {
    pub const fn new(x: f32, y: f32, width: f32) -> Self {
        Self { x, y, width }
    }

    /// Unit-spaced sample points along the wall, left to right
    pub fn sample_points(&self) -> impl Iterator<Item = Vec2> + '_ {
        let count = self.width.max(0.0) as usize;
        (0..count).map(move |i| Vec2::new(self.x + i as f32 - self.width / 2.0, self.y))
    }

    /// Render pose: the wall stands upright (rotated a quarter turn about X)
    pub fn pose(&self) -> Pose {
        Pose {
            position: Vec3::new(self.x, self.y, 0.0),
            rotation: Vec3::new(std::f32::consts::FRAC_PI_2, 0.0, 0.0),
            scale: Vec3::ONE,
        }
    }
}

/// The five walls of the default field
pub fn default_walls() -> Vec<WallSegment> {
    vec![
        WallSegment::new(300.0, 300.0, 300.0),
        WallSegment::new(-300.0, 400.0, 100.0),
        WallSegment::new(-200.0, -200.0, 200.0),
        WallSegment::new(-100.0, 100.0, 200.0),
        WallSegment::new(300.0, -100.0, 400.0),
    ]
}

/// Camera tilting around the field's X axis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraRig {
    /// Tilt (radians, [0, 2π))
    pub angle: f32,
    /// Manual tilt speed (radians per tick)
    pub velocity: f32,
    /// Opening sweep still running
    pub auto_pan: bool,
    pub pan_target: f32,
}

impl CameraRig {
    pub fn new(target: PanTarget) -> Self {
        Self {
            angle: 0.0,
            velocity: 0.0,
            auto_pan: true,
            pan_target: target.angle(),
        }
    }

    /// One frame of the opening sweep or of manual control.
    ///
    /// `tilt` is +1 (up), -1 (down) or 0.
    pub fn update(&mut self, tilt: f32) {
        if self.auto_pan {
            self.angle += CAMERA_PAN_STEP;
            if self.angle >= self.pan_target {
                self.angle = self.pan_target;
                self.auto_pan = false;
                log::debug!("Camera sweep finished at {:.3} rad", self.angle);
            }
            return;
        }

        self.velocity =
            (self.velocity + tilt * CAMERA_ACCEL).clamp(-CAMERA_MAX_SPEED, CAMERA_MAX_SPEED);
        self.angle = wrap_angle(self.angle + self.velocity);
    }

    /// Camera position on its tilt circle
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            0.0,
            -CAMERA_BACK * self.angle.sin(),
            CAMERA_HEIGHT * self.angle.cos(),
        )
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position(),
            rotation: Vec3::new(self.angle, 0.0, 0.0),
            scale: Vec3::ONE,
        }
    }
}

/// The rolling ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Forward speed along Y (units per tick)
    pub delta: f32,
    /// Roll speed (radians per tick)
    pub angular_speed: f32,
    /// Accumulated roll about X
    pub roll: f32,
}

impl Ball {
    pub fn served(spin: f32) -> Self {
        Self {
            pos: Vec2::new(BALL_START_X, BALL_START_Y),
            delta: SERVE_DELTA,
            angular_speed: spin,
            roll: 0.0,
        }
    }

    /// Stop dead (waiting for the next serve)
    pub fn halt(&mut self) {
        self.delta = 0.0;
        self.angular_speed = 0.0;
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: Vec3::new(self.pos.x, self.pos.y, 0.0),
            rotation: Vec3::new(self.roll, 0.0, 0.0),
            scale: Vec3::ONE,
        }
    }
}

/// Events kept for a host that stops draining; older ones are dropped
pub const MAX_PENDING_EVENTS: usize = 64;

/// Complete arcade state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArcadeState {
    pub ball: Ball,
    pub camera: CameraRig,
    pub walls: Vec<WallSegment>,
    pub speed_ramp: SpeedRamp,
    pub phase: ArcadePhase,
    pub round: u32,
    pub wins: u32,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the host last drained them, at most
    /// [`MAX_PENDING_EVENTS`]. Drain once per frame.
    #[serde(skip)]
    pub events: Vec<ArcadeEvent>,
}

impl Default for ArcadeState {
    fn default() -> Self {
        Self::new(default_walls(), PanTarget::default(), SpeedRamp::default())
    }
}

impl ArcadeState {
    pub fn new(walls: Vec<WallSegment>, pan: PanTarget, speed_ramp: SpeedRamp) -> Self {
        Self {
            ball: Ball::served(speed_ramp.serve_spin(0)),
            camera: CameraRig::new(pan),
            walls,
            speed_ramp,
            phase: ArcadePhase::Rolling,
            round: 1,
            wins: 0,
            score: 0,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    pub fn from_settings(settings: &crate::Settings) -> Self {
        Self::new(settings.walls.clone(), settings.camera_pan, settings.speed_ramp)
    }

    /// Stop the ball and remember whether the round was won
    pub fn halt(&mut self, won: bool) {
        self.ball.halt();
        self.phase = ArcadePhase::Halted { won };
        self.emit(ArcadeEvent::Halted { won });
        log::debug!(
            "Ball halted at ({:.1}, {:.1}), won={}",
            self.ball.pos.x,
            self.ball.pos.y,
            won
        );
    }

    /// Settle the finished round and serve the next one.
    ///
    /// A win adds a win and [`WIN_BONUS`]; anything else costs
    /// [`ROUND_PENALTY`], never dropping below zero.
    pub fn reset_round(&mut self, won: bool) {
        if won {
            self.wins += 1;
            self.score += WIN_BONUS;
        } else {
            self.score = self.score.saturating_sub(ROUND_PENALTY);
        }
        self.round += 1;
        self.ball = Ball::served(self.speed_ramp.serve_spin(self.wins));
        self.phase = ArcadePhase::Rolling;

        self.emit(ArcadeEvent::RoundStarted { round: self.round });
        self.emit(ArcadeEvent::StatsChanged);
        log::info!("Round {} ({})", self.round, self.stats_line());
    }

    /// Back to round 1 with no wins and no score
    pub fn reset_game(&mut self) {
        self.round = 1;
        self.wins = 0;
        self.score = 0;
        self.ball = Ball::served(self.speed_ramp.serve_spin(0));
        self.phase = ArcadePhase::Rolling;

        self.emit(ArcadeEvent::RoundStarted { round: self.round });
        self.emit(ArcadeEvent::StatsChanged);
        log::info!("Game reset");
    }

    /// Text for the stats display
    pub fn stats_line(&self) -> String {
        format!(
            "Wins: {} | Round: {} | Score: {}",
            self.wins, self.round, self.score
        )
    }

    fn emit(&mut self, event: ArcadeEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<ArcadeEvent> {
        std::mem::take(&mut self.events)
    }
}
