//! The player-controlled character

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, Facing};
use super::rect::Rect;
use super::state::{DamageSource, GameEvent};
use crate::consts::*;
use crate::input::{InputState, Key};

/// Coarse animation pose handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pose {
    Idle,
    Walking,
    Jumping,
    Falling,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub lives: u32,
    pub invulnerable: bool,
    /// Seconds of invulnerability left
    pub invulnerable_timer: f32,
    pub has_key: bool,
    pub facing: Facing,
    /// Walk cycle frame (0..4)
    pub anim_frame: u8,
    anim_timer: f32,
}

impl Player {
    pub fn new(spawn: Vec2, lives: u32) -> Self {
        Self {
            body: Body::new(spawn, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)),
            lives,
            invulnerable: false,
            invulnerable_timer: 0.0,
            has_key: false,
            facing: Facing::Right,
            anim_frame: 0,
            anim_timer: 0.0,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }

    /// Steering and jumping from the held keys
    pub fn handle_input(&mut self, input: &mut InputState) {
        let mut move_dir = 0.0;
        if input.is_held(Key::Left) {
            move_dir = -1.0;
            self.facing = Facing::Left;
        }
        if input.is_held(Key::Right) {
            move_dir = 1.0;
            self.facing = Facing::Right;
        }

        let vel = &mut self.body.vel;
        if move_dir != 0.0 {
            vel.x = (vel.x + move_dir * PLAYER_ACCELERATION)
                .clamp(-PLAYER_MAX_VELOCITY_X, PLAYER_MAX_VELOCITY_X);
        } else {
            vel.x *= PLAYER_FRICTION;
            if vel.x.abs() < PLAYER_STOP_THRESHOLD {
                vel.x = 0.0;
            }
        }

        // Holding jump must not re-jump on landing
        if self.body.grounded && input.consume(Key::Jump) {
            self.body.vel.y = -PLAYER_JUMP_POWER;
            self.body.grounded = false;
        }
    }

    /// Gravity, movement and timers for one frame
    pub fn update(&mut self, dt: f32) {
        self.body.apply_gravity();
        self.body.integrate();
        self.update_animation(dt);

        if self.invulnerable {
            self.invulnerable_timer -= dt;
            if self.invulnerable_timer <= 0.0 {
                self.invulnerable = false;
                self.invulnerable_timer = 0.0;
            }
        }
    }

    fn update_animation(&mut self, dt: f32) {
        let interval = if self.body.vel.x.abs() > 2.0 { 0.06 } else { 0.1 };
        self.anim_timer += dt;
        if self.anim_timer > interval {
            self.anim_frame = (self.anim_frame + 1) % 4;
            self.anim_timer = 0.0;
        }
    }

    /// Lose one life unless invulnerable. Returns whether a life was lost.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.invulnerable {
            return false;
        }

        self.lives = self.lives.saturating_sub(1);
        self.invulnerable = true;
        self.invulnerable_timer = INVULNERABLE_DURATION;
        log::debug!("Player hit for {} ({} lives left)", amount, self.lives);
        true
    }

    /// Apply damage and describe it as an event
    pub fn hurt(&mut self, source: DamageSource, amount: u32) -> GameEvent {
        let absorbed = !self.take_damage(amount);
        GameEvent::Damage {
            source,
            amount,
            absorbed,
            lives_left: self.lives,
        }
    }

    pub fn pose(&self) -> Pose {
        let vel = self.body.vel;
        if !self.body.grounded {
            if vel.y < 0.0 { Pose::Jumping } else { Pose::Falling }
        } else if vel.x.abs() > 0.5 {
            Pose::Walking
        } else {
            Pose::Idle
        }
    }

    /// Blink while invulnerable: hidden on alternating tenths of a second
    pub fn blink_hidden(&self) -> bool {
        self.invulnerable && ((self.invulnerable_timer * 10.0).floor() as i32) % 2 == 0
    }
}
