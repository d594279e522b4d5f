//! Ball/wall proximity and field bounds
//!
//! Walls are sampled at unit spacing and each sample is tested against the
//! ball centre. Cost is linear in total wall width, which is a few hundred
//! samples for any sensible field.

use glam::Vec2;

use super::state::WallSegment;
use crate::consts::*;

/// Result of clamping the ball into the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsCheck {
    Inside,
    /// Crossed +Y limit; position was clamped
    ClampedTop,
    /// Crossed -Y limit; position was clamped
    ClampedBottom,
}

/// True if any wall sample lies closer than [`WALL_HIT_DISTANCE`] to `ball_pos`
pub fn check_wall_collision(ball_pos: Vec2, walls: &[WallSegment]) -> bool {
    first_wall_hit(ball_pos, walls).is_some()
}

/// Index of the first wall the ball touches
pub fn first_wall_hit(ball_pos: Vec2, walls: &[WallSegment]) -> Option<usize> {
    walls.iter().position(|wall| {
        wall.sample_points()
            .any(|p| p.distance(ball_pos) < WALL_HIT_DISTANCE)
    })
}

/// Clamp Y into `[-FIELD_Y_LIMIT, FIELD_Y_LIMIT]`, reporting which edge was hit
pub fn clamp_to_field(pos: &mut Vec2) -> BoundsCheck {
    if pos.y > FIELD_Y_LIMIT {
        pos.y = FIELD_Y_LIMIT;
        BoundsCheck::ClampedTop
    } else if pos.y < -FIELD_Y_LIMIT {
        pos.y = -FIELD_Y_LIMIT;
        BoundsCheck::ClampedBottom
    } else {
        BoundsCheck::Inside
    }
}

/// Reached the goal band
#[inline]
pub fn reached_goal(pos: Vec2) -> bool {
    pos.y >= WIN_Y
}
