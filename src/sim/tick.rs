//! Per-frame arcade update
//!
//! Advances the arcade state by one display frame from an input snapshot.

use super::collision::{BoundsCheck, clamp_to_field, first_wall_hit, reached_goal};
use super::state::{ArcadePhase, ArcadeState, Ball};
use crate::consts::*;

/// Controls held (or pressed) during a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_forward: bool,
    pub move_back: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub camera_up: bool,
    pub camera_down: bool,
    /// Back to round 1 (one-shot)
    pub reset: bool,
}

impl TickInput {
    /// +1 tilting up, -1 tilting down, 0 for neither or both
    pub fn camera_tilt(&self) -> f32 {
        match (self.camera_up, self.camera_down) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}

/// Advance the arcade by one frame
pub fn tick(state: &mut ArcadeState, input: &TickInput) {
    state.time_ticks += 1;

    if input.reset {
        state.reset_game();
    }

    state.camera.update(input.camera_tilt());

    // A halted ball is re-served instead of moving this frame
    if let ArcadePhase::Halted { won } = state.phase {
        state.reset_round(won);
        return;
    }

    steer(&mut state.ball, input);

    state.ball.pos.y += state.ball.delta;
    state.ball.roll -= state.ball.angular_speed;

    let bounds = clamp_to_field(&mut state.ball.pos);
    if reached_goal(state.ball.pos) {
        state.halt(true);
    } else if bounds != BoundsCheck::Inside {
        state.halt(false);
    } else if let Some(wall) = first_wall_hit(state.ball.pos, &state.walls) {
        log::debug!("Wall {} hit", wall);
        state.halt(false);
    }
}

/// Apply at most one control per tick: left, right, forward, back
fn steer(ball: &mut Ball, input: &TickInput) {
    if input.move_left {
        ball.pos.x = (ball.pos.x - STEER_STEP).max(-FIELD_X_LIMIT);
    } else if input.move_right {
        ball.pos.x = (ball.pos.x + STEER_STEP).min(FIELD_X_LIMIT);
    } else if input.move_forward {
        ball.delta += DELTA_STEP;
        ball.angular_speed += SPIN_STEP;
    } else if input.move_back {
        ball.delta -= DELTA_STEP;
        ball.angular_speed -= SPIN_STEP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{PanTarget, SpeedRamp};
    use crate::sim::state::{ArcadeEvent, MAX_PENDING_EVENTS, WallSegment};
    use glam::Vec2;
    use proptest::prelude::*;

    fn open_field() -> ArcadeState {
        ArcadeState::new(Vec::new(), PanTarget::Quarter, SpeedRamp::PerWin)
    }

    #[test]
    fn test_ball_rolls_forward() {
        let mut state = ArcadeState::default();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos.y, -399.0);
        assert!(state.ball.roll < 0.0);
        assert_eq!(state.phase, ArcadePhase::Rolling);
    }

    #[test]
    fn test_left_beats_right() {
        let mut state = open_field();
        let input = TickInput {
            move_left: true,
            move_right: true,
            move_forward: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.ball.pos.x, -STEER_STEP);
        // Forward was shadowed by the steering branch
        assert_eq!(state.ball.delta, SERVE_DELTA);
    }

    #[test]
    fn test_right_beats_forward() {
        let mut state = open_field();
        let input = TickInput {
            move_right: true,
            move_forward: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.ball.pos.x, STEER_STEP);
        assert_eq!(state.ball.delta, SERVE_DELTA);
    }

    #[test]
    fn test_forward_accelerates() {
        let mut state = open_field();
        let input = TickInput {
            move_forward: true,
            move_back: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!((state.ball.delta - (SERVE_DELTA + DELTA_STEP)).abs() < 1e-6);
    }

    #[test]
    fn test_steering_is_clamped() {
        let mut state = open_field();
        state.ball.delta = 0.0;
        let input = TickInput {
            move_right: true,
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut state, &input);
        }
        assert_eq!(state.ball.pos.x, FIELD_X_LIMIT);
    }

    #[test]
    fn test_win_then_reserve() {
        let mut state = open_field();
        state.ball.pos.y = 399.5;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, ArcadePhase::Halted { won: true });
        assert_eq!(state.ball.delta, 0.0);
        assert_eq!(state.ball.angular_speed, 0.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.wins, 1);
        assert_eq!(state.score, 100);
        assert_eq!(state.round, 2);
        assert_eq!(state.ball.pos, Vec2::new(0.0, -400.0));
        assert_eq!(state.phase, ArcadePhase::Rolling);
        assert!((state.ball.angular_speed - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_wall_hit_costs_score() {
        let mut state = ArcadeState::new(
            vec![WallSegment::new(0.0, -340.0, 100.0)],
            PanTarget::Quarter,
            SpeedRamp::PerWin,
        );
        state.score = 80;
        let mut ticks = 0;
        while state.phase == ArcadePhase::Rolling {
            tick(&mut state, &TickInput::default());
            ticks += 1;
            assert!(ticks < 100, "ball never reached the wall");
        }
        assert_eq!(state.phase, ArcadePhase::Halted { won: false });
        // Halts on the first tick the wall is closer than 50 (y = -389)
        assert!((state.ball.pos.y + 389.0).abs() < 1e-4);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 30);
        assert_eq!(state.wins, 0);
    }

    #[test]
    fn test_backing_out_of_field_halts() {
        let mut state = open_field();
        state.ball.delta = -60.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos.y, -FIELD_Y_LIMIT);
        assert_eq!(state.phase, ArcadePhase::Halted { won: false });
    }

    #[test]
    fn test_overshooting_top_wins() {
        let mut state = open_field();
        state.ball.delta = 10_000.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos.y, FIELD_Y_LIMIT);
        assert_eq!(state.phase, ArcadePhase::Halted { won: true });
    }

    #[test]
    fn test_reset_key_restarts_game() {
        let mut state = open_field();
        state.score = 500;
        state.wins = 4;
        state.round = 9;
        state.ball.pos.y = 100.0;
        let input = TickInput {
            reset: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!((state.round, state.wins, state.score), (1, 0, 0));
        assert_eq!(state.ball.pos.y, -399.0);
        assert!(state.drain_events().contains(&ArcadeEvent::StatsChanged));
    }

    #[test]
    fn test_events_follow_round() {
        let mut state = open_field();
        state.ball.pos.y = 399.5;
        tick(&mut state, &TickInput::default());
        tick(&mut state, &TickInput::default());
        assert_eq!(
            state.drain_events(),
            vec![
                ArcadeEvent::Halted { won: true },
                ArcadeEvent::RoundStarted { round: 2 },
                ArcadeEvent::StatsChanged,
            ]
        );
    }

    #[test]
    fn test_halted_ticks_still_count() {
        let mut state = open_field();
        state.ball.pos.y = 399.5;
        tick(&mut state, &TickInput::default());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.round, 2);
        assert_eq!(state.time_ticks, 2);
    }

    #[test]
    fn test_undrained_events_are_bounded() {
        let mut state = open_field();
        let reset = TickInput {
            reset: true,
            ..Default::default()
        };
        for _ in 0..100 {
            tick(&mut state, &reset);
        }
        let events = state.drain_events();
        assert_eq!(events.len(), MAX_PENDING_EVENTS);
        assert_eq!(events.last(), Some(&ArcadeEvent::StatsChanged));
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            TickInput {
                move_forward: true,
                ..Default::default()
            },
            TickInput {
                move_left: true,
                camera_up: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        let mut a = ArcadeState::default();
        let mut b = ArcadeState::default();
        for _ in 0..300 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }
        assert_eq!(a.ball.pos, b.ball.pos);
        assert_eq!(a.score, b.score);
        assert_eq!(a.camera.angle, b.camera.angle);
    }

    fn input() -> impl Strategy<Value = TickInput> {
        (any::<[bool; 6]>(), proptest::bool::weighted(0.01)).prop_map(|(b, reset)| TickInput {
            move_forward: b[0],
            move_back: b[1],
            move_left: b[2],
            move_right: b[3],
            camera_up: b[4],
            camera_down: b[5],
            reset,
        })
    }

    proptest! {
        #[test]
        fn prop_ball_stays_in_field(
            start_delta in -5000.0f32..5000.0,
            inputs in proptest::collection::vec(input(), 1..300),
        ) {
            let mut state = ArcadeState::default();
            state.ball.delta = start_delta;
            for input in &inputs {
                tick(&mut state, input);
                prop_assert!(state.ball.pos.y >= -FIELD_Y_LIMIT && state.ball.pos.y <= FIELD_Y_LIMIT);
                prop_assert!(state.ball.pos.x.abs() <= FIELD_X_LIMIT);
                if matches!(state.phase, ArcadePhase::Halted { .. }) {
                    prop_assert_eq!(state.ball.delta, 0.0);
                }
            }
        }
    }
}
