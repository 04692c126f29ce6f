//! Moving bodies shared by the player and enemies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Axis, Correction, resting_contact};
use super::level::Platform;
use super::rect::Rect;
use crate::consts::*;

/// Horizontal facing; enemies use it as their walk direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1 for left, +1 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// Direction toward a horizontal offset; zero counts as right
    pub fn toward(dx: f32) -> Self {
        if dx >= 0.0 { Facing::Right } else { Facing::Left }
    }
}

/// Position + velocity + grounded flag, integrated once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner in world space
    pub pos: Vec2,
    /// Velocity in px per frame
    pub vel: Vec2,
    pub size: Vec2,
    /// Set only by a top-axis correction during the current frame
    pub grounded: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            grounded: false,
        }
    }

    /// Bounding box derived from the current position
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Gravity applies only while airborne, capped at terminal fall speed
    pub fn apply_gravity(&mut self) {
        if !self.grounded {
            self.vel.y = (self.vel.y + GRAVITY).min(MAX_FALL_SPEED);
        }
    }

    /// Move by one frame of velocity and drop the grounded flag; the collision
    /// pass that follows re-asserts it.
    pub fn integrate(&mut self) {
        self.pos += self.vel;
        self.grounded = false;
    }

    /// Apply a collision correction (snap + velocity zeroing + grounding)
    pub fn apply(&mut self, correction: &Correction) {
        self.pos = correction.position;
        match correction.axis {
            Axis::Top => {
                self.vel.y = 0.0;
                self.grounded = true;
            }
            Axis::Bottom => self.vel.y = 0.0,
            Axis::Left | Axis::Right => self.vel.x = 0.0,
        }
    }

    /// After the collision pass, ground a body left standing exactly on a
    /// solid platform. Rising bodies are skipped.
    pub fn settle(&mut self, platforms: &[Platform]) {
        if self.grounded || self.vel.y < 0.0 {
            return;
        }
        let rect = self.rect();
        if let Some(correction) = platforms
            .iter()
            .find_map(|p| resting_contact(&rect, &p.rect, p.kind))
        {
            self.apply(&correction);
        }
    }
}
