//! Collectible coins, keys and power-ups

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::player::Player;
use super::rect::Rect;
use crate::consts::ITEM_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Coin,
    Key,
    /// Collected but has no effect yet
    Powerup,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub pos: Vec2,
    pub kind: ItemKind,
    /// Never goes back to false
    pub collected: bool,
    /// Spin animation frame (0..4)
    pub spin_frame: u8,
    age: f32,
    spin_timer: f32,
}

impl Collectible {
    pub fn new(pos: Vec2, kind: ItemKind) -> Self {
        Self {
            pos,
            kind,
            collected: false,
            spin_frame: 0,
            age: 0.0,
            spin_timer: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::splat(ITEM_SIZE))
    }

    pub fn update(&mut self, dt: f32) {
        if self.collected {
            return;
        }
        self.age += dt;
        self.spin_timer += dt;
        if self.spin_timer > 0.15 {
            self.spin_frame = (self.spin_frame + 1) % 4;
            self.spin_timer = 0.0;
        }
    }

    /// Vertical draw offset of the idle bob; does not move the hitbox
    pub fn bob_offset(&self) -> f32 {
        (self.age * 6.0).sin() * 2.0
    }
}

/// What the player picked up this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pickups {
    pub coins: u32,
    pub keys: u32,
    pub powerups: u32,
}

impl Pickups {
    pub fn is_empty(&self) -> bool {
        self.coins == 0 && self.keys == 0 && self.powerups == 0
    }
}

/// Collect every un-collected item the player touches
pub fn collect_overlapping(items: &mut [Collectible], player: &mut Player) -> Pickups {
    let player_rect = player.rect();
    let mut pickups = Pickups::default();

    for item in items
        .iter_mut()
        .filter(|item| !item.collected && item.rect().touches(&player_rect))
    {
        item.collected = true;
        match item.kind {
            ItemKind::Coin => pickups.coins += 1,
            ItemKind::Key => {
                player.has_key = true;
                pickups.keys += 1;
            }
            ItemKind::Powerup => pickups.powerups += 1,
        }
    }

    pickups
}
