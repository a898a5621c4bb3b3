//! Player orb physics

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::CollisionKind;
use crate::consts::PLAYER_X_FRACTION;

/// The player's orb. Only `pos.y` and `velocity` change during play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Vertical velocity in pixels/frame (positive is down)
    pub velocity: f32,
    pub radius: f32,
}

impl Player {
    pub fn new(radius: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            velocity: 0.0,
            radius,
        }
    }

    /// Park the orb at its starting spot for a view size
    pub fn place(&mut self, width: f32, height: f32) {
        self.pos = Vec2::new(width * PLAYER_X_FRACTION, height / 2.0);
    }

    /// One frame of gravity followed by integration
    pub fn apply_gravity(&mut self, gravity: f32) {
        self.velocity += gravity;
        self.pos.y += self.velocity;
    }

    /// Thrust replaces the current velocity, so repeated inputs never stack
    pub fn apply_thrust(&mut self, impulse: f32) {
        self.velocity = impulse;
    }

    /// Point just under the orb where thrust particles appear
    pub fn exhaust_point(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y + self.radius)
    }

    /// Check the orb against the floor and ceiling
    pub fn boundary_collision(&self, ceiling: f32, floor: f32) -> Option<CollisionKind> {
        if self.pos.y + self.radius > floor {
            Some(CollisionKind::Floor)
        } else if self.pos.y - self.radius < ceiling {
            Some(CollisionKind::Ceiling)
        } else {
            None
        }
    }
}
