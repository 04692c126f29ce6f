//! Enemies: archetype stats and the patrol/chase state machine
//!
//! Every enemy is the same type; its archetype selects an immutable stats
//! record at construction.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, Facing};
use super::collision::{Axis, Contact, resolve};
use super::level::Platform;
use super::player::Player;
use super::state::{DamageSource, GameEvent};
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    #[default]
    Goomba,
    Koopa,
    Runner,
    Tank,
    Jumper,
    Boss,
}

/// Periodic hop for enemies that jump
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hop {
    /// Seconds on the ground between hops
    pub interval: f32,
    /// Upward velocity of each hop
    pub power: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeStats {
    pub health: i32,
    pub base_speed: f32,
    pub contact_damage: u32,
    pub stomp_damage_taken: i32,
    pub chase_range: f32,
    pub chase_height_tolerance: f32,
    pub hop: Option<Hop>,
    pub size: Vec2,
}

const BASE_STATS: ArchetypeStats = ArchetypeStats {
    health: 1,
    base_speed: 1.5,
    contact_damage: 10,
    stomp_damage_taken: 1,
    chase_range: 120.0,
    chase_height_tolerance: 60.0,
    hop: None,
    size: Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT),
};

impl Archetype {
    pub const ALL: [Archetype; 6] = [
        Archetype::Goomba,
        Archetype::Koopa,
        Archetype::Runner,
        Archetype::Tank,
        Archetype::Jumper,
        Archetype::Boss,
    ];

    pub const fn stats(self) -> ArchetypeStats {
        match self {
            Archetype::Goomba => ArchetypeStats {
                base_speed: 1.3,
                ..BASE_STATS
            },
            Archetype::Koopa => ArchetypeStats {
                health: 2,
                base_speed: 1.1,
                ..BASE_STATS
            },
            Archetype::Runner => ArchetypeStats {
                base_speed: 2.2,
                chase_range: 170.0,
                ..BASE_STATS
            },
            Archetype::Tank => ArchetypeStats {
                health: 3,
                base_speed: 0.9,
                contact_damage: 15,
                chase_range: 90.0,
                ..BASE_STATS
            },
            Archetype::Jumper => ArchetypeStats {
                health: 2,
                base_speed: 1.4,
                contact_damage: 12,
                hop: Some(Hop {
                    interval: 1.2,
                    power: 7.5,
                }),
                ..BASE_STATS
            },
            Archetype::Boss => ArchetypeStats {
                health: 6,
                base_speed: 1.0,
                contact_damage: 20,
                chase_range: 240.0,
                chase_height_tolerance: 90.0,
                hop: Some(Hop {
                    interval: 0.9,
                    power: 8.5,
                }),
                size: Vec2::new(ENEMY_WIDTH * 2.0, ENEMY_HEIGHT * 2.0),
                ..BASE_STATS
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Archetype::Goomba => "goomba",
            Archetype::Koopa => "koopa",
            Archetype::Runner => "runner",
            Archetype::Tank => "tank",
            Archetype::Jumper => "jumper",
            Archetype::Boss => "boss",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BehaviorState {
    /// Walk the patrol window, turning at its bounds, walls and ledges
    Patrol,
    /// Player is close: walk toward them, faster
    Chase,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub archetype: Archetype,
    pub stats: ArchetypeStats,
    pub body: Body,
    pub health: i32,
    pub state: BehaviorState,
    pub direction: Facing,
    pub patrol_left: f32,
    pub patrol_right: f32,
    /// Seconds spent grounded since the last hop
    pub jump_timer: f32,
    pub anim_frame: u8,
    anim_timer: f32,
}

impl Enemy {
    pub fn new(archetype: Archetype, spawn: Vec2) -> Self {
        let stats = archetype.stats();
        let mut body = Body::new(spawn, stats.size);
        body.vel.x = stats.base_speed;
        Self {
            archetype,
            stats,
            body,
            health: stats.health,
            state: BehaviorState::Patrol,
            direction: Facing::Right,
            patrol_left: spawn.x - ENEMY_PATROL_DISTANCE,
            patrol_right: spawn.x + ENEMY_PATROL_DISTANCE,
            jump_timer: 0.0,
            anim_frame: 0,
            anim_timer: 0.0,
        }
    }

    /// Chase when the player is inside both the horizontal range and the
    /// height tolerance, facing them; patrol otherwise.
    pub fn think(&mut self, player_pos: Vec2) -> BehaviorState {
        let dx = player_pos.x - self.body.pos.x;
        let dy = (player_pos.y - self.body.pos.y).abs();
        let next = if dx.abs() < self.stats.chase_range && dy < self.stats.chase_height_tolerance {
            self.direction = Facing::toward(dx);
            BehaviorState::Chase
        } else {
            BehaviorState::Patrol
        };
        if next != self.state {
            log::debug!("{} at {:.0} -> {:?}", self.archetype.as_str(), self.body.pos.x, next);
        }
        self.state = next;
        next
    }

    /// One frame of AI, movement and platform collision
    pub fn update(&mut self, dt: f32, player_pos: Option<Vec2>, platforms: &[Platform]) {
        self.body.apply_gravity();

        if let Some(target) = player_pos {
            self.think(target);
        }

        let speed_multiplier = match self.state {
            BehaviorState::Chase => CHASE_SPEED_MULTIPLIER,
            BehaviorState::Patrol => 1.0,
        };
        self.body.vel.x = self.direction.sign() * self.stats.base_speed * speed_multiplier;

        if let Some(hop) = self.stats.hop {
            if self.body.grounded {
                self.jump_timer += dt;
                if self.jump_timer >= hop.interval {
                    self.body.vel.y = -hop.power;
                    self.body.grounded = false;
                    self.jump_timer = 0.0;
                }
            }
        }

        self.body.integrate();
        self.collide(platforms);
        self.body.settle(platforms);

        if self.body.grounded {
            self.turn_at_patrol_bounds();
            if !self.floor_ahead(platforms) {
                self.direction = self.direction.flipped();
            }
        }

        self.anim_timer += dt;
        if self.anim_timer > 0.2 {
            self.anim_frame = (self.anim_frame + 1) % 2;
            self.anim_timer = 0.0;
        }
    }

    /// Push out of solid platforms; walls turn the enemy around. Hazards are
    /// walked through.
    fn collide(&mut self, platforms: &[Platform]) {
        for platform in platforms {
            if let Some(Contact::Push(correction)) = resolve(&self.body.rect(), &platform.rect, platform.kind) {
                self.body.apply(&correction);
                match correction.axis {
                    Axis::Left => self.direction = Facing::Left,
                    Axis::Right => self.direction = Facing::Right,
                    Axis::Top | Axis::Bottom => {}
                }
            }
        }
    }

    fn turn_at_patrol_bounds(&mut self) {
        let x = self.body.pos.x;
        match self.direction {
            Facing::Right if x > self.patrol_right => self.direction = Facing::Left,
            Facing::Left if x < self.patrol_left => self.direction = Facing::Right,
            _ => {}
        }
    }

    /// Probe just past the leading edge and below the feet
    pub fn floor_ahead(&self, platforms: &[Platform]) -> bool {
        let rect = self.body.rect();
        let probe = Vec2::new(
            match self.direction {
                Facing::Right => rect.right() + CLIFF_PROBE_AHEAD,
                Facing::Left => rect.left() - CLIFF_PROBE_AHEAD,
            },
            rect.bottom() + CLIFF_PROBE_BELOW,
        );
        platforms.iter().any(|p| p.rect.contains_point(probe))
    }

    /// Take one stomp; true once health is gone
    pub fn take_stomp(&mut self) -> bool {
        self.health -= self.stats.stomp_damage_taken;
        self.health <= 0
    }
}

/// Stomp when the player comes down on the enemy's upper part
pub fn is_stomp(player: &Player, enemy: &Enemy) -> bool {
    player.body.vel.y > 0.0
        && player.body.bottom() - STOMP_SLACK < enemy.body.pos.y + STOMP_SLACK
}

/// Resolve player contact with every enemy, last to first. Stomps hurt the
/// enemy and bounce the player; anything else hurts the player.
pub fn resolve_player_contacts(enemies: &mut Vec<Enemy>, player: &mut Player, events: &mut Vec<GameEvent>) {
    for i in (0..enemies.len()).rev() {
        if !enemies[i].body.rect().touches(&player.rect()) {
            continue;
        }

        if is_stomp(player, &enemies[i]) {
            let defeated = enemies[i].take_stomp();
            player.body.vel.y = -STOMP_BOUNCE;
            let archetype = enemies[i].archetype;
            events.push(GameEvent::Stomp {
                archetype,
                defeated,
            });
            if defeated {
                log::debug!("{} defeated", archetype.as_str());
                enemies.remove(i);
            }
        } else {
            let enemy = &enemies[i];
            events.push(player.hurt(DamageSource::Enemy(enemy.archetype), enemy.stats.contact_damage));
        }
    }
}
