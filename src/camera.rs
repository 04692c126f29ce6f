//! Scrolling viewport
//!
//! Eases toward the player each frame and answers world/screen queries for the
//! renderer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::rect::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Top-left of the viewport in world space
    pub pos: Vec2,
    pub size: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            size: Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
        }
    }
}

impl Camera {
    /// Ease toward the player, keeping them left of center and in the lower
    /// part of the view
    pub fn follow(&mut self, player_pos: Vec2) {
        let target = Vec2::new(
            player_pos.x - CAMERA_PADDING,
            player_pos.y - self.size.y * CAMERA_VERTICAL_ANCHOR,
        );
        self.pos += (target - self.pos) * CAMERA_SMOOTHING;
        self.pos.x = self.pos.x.max(0.0);
        self.pos.y = self.pos.y.clamp(0.0, CAMERA_MAX_Y);
    }

    #[inline]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.pos
    }

    #[inline]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.pos
    }

    pub fn view_rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Any part of `rect` in view (edges inclusive)
    pub fn is_visible(&self, rect: &Rect) -> bool {
        self.view_rect().touches(rect)
    }
}
