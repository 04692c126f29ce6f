//! Game state and core simulation types
//!
//! A `GameState` owns one whole run: level flow, score and the live entities of
//! the current level. Nothing is global, so independent runs can be simulated
//! side by side.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::{Archetype, Enemy};
use super::items::Collectible;
use super::level::{LevelCatalog, LevelData, LevelError, Platform, Warp};
use super::player::Player;
use super::rect::Rect;
use crate::background::Backdrop;
use crate::camera::Camera;
use crate::consts::PIPE_COOLDOWN;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Updates suspended, rendering continues
    Paused,
    /// Last regular level finished
    Victory,
    /// Out of lives or fell off the level
    GameOver,
}

impl GamePhase {
    /// Run has ended; only a restart leaves this phase
    pub fn is_over(self) -> bool {
        matches!(self, GamePhase::Victory | GamePhase::GameOver)
    }
}

/// What hurt the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageSource {
    Hazard,
    Enemy(Archetype),
    Decoy,
}

/// Notable things that happened during one tick, for the host and HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// `absorbed` when invulnerability swallowed the hit
    Damage {
        source: DamageSource,
        amount: u32,
        absorbed: bool,
        lives_left: u32,
    },
    Stomp {
        archetype: Archetype,
        defeated: bool,
    },
    CoinsCollected {
        count: u32,
        points: u64,
    },
    KeyCollected,
    PowerupCollected,
    LevelLoaded {
        level: usize,
    },
    Warped {
        from: usize,
        to: usize,
    },
    DecoyWarp {
        damage: u32,
    },
    LevelComplete {
        level: usize,
    },
    SecretReturn {
        to: usize,
    },
    Victory {
        score: u64,
    },
    GameOver {
        score: u64,
    },
}

/// Pipe re-entry lockout
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum WarpGate {
    #[default]
    Ready,
    /// Seconds until pipes work again
    Cooling { remaining: f32 },
}

impl WarpGate {
    pub fn is_ready(&self) -> bool {
        matches!(self, WarpGate::Ready)
    }

    pub fn trigger(&mut self) {
        *self = WarpGate::Cooling {
            remaining: PIPE_COOLDOWN,
        };
    }

    pub fn tick(&mut self, dt: f32) {
        if let WarpGate::Cooling { remaining } = self {
            *remaining -= dt;
            if *remaining <= 0.0 {
                *self = WarpGate::Ready;
            }
        }
    }
}

/// Where the secret level sends the player when it is finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SecretReturn {
    #[default]
    Idle,
    Pending { level: usize },
}

impl SecretReturn {
    pub fn record(&mut self, level: usize) {
        *self = SecretReturn::Pending { level };
    }

    /// Take the pending level, leaving `Idle` behind
    pub fn take(&mut self) -> Option<usize> {
        match std::mem::take(self) {
            SecretReturn::Pending { level } => Some(level),
            SecretReturn::Idle => None,
        }
    }
}

/// Live entities of the loaded level. Rebuilt from `LevelData` on every load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    pub secret: bool,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Collectible>,
    pub warps: Vec<Warp>,
    pub goal: Rect,
}

impl Stage {
    pub fn load(level: &LevelData, lives: u32) -> Self {
        Self {
            name: level.name.clone(),
            secret: level.secret,
            player: Player::new(level.spawn, lives),
            platforms: level.platforms.clone(),
            enemies: level
                .enemies
                .iter()
                .map(|spawn| Enemy::new(spawn.archetype, Vec2::new(spawn.x, spawn.y)))
                .collect(),
            items: level
                .collectibles
                .iter()
                .map(|spawn| Collectible::new(Vec2::new(spawn.x, spawn.y), spawn.kind))
                .collect(),
            warps: level.warps.clone(),
            goal: level.goal(),
        }
    }
}

/// Complete state of one run (serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    catalog: LevelCatalog,
    pub settings: Settings,
    /// Current level number (1-based)
    pub level: usize,
    pub score: u64,
    pub phase: GamePhase,
    pub warp_gate: WarpGate,
    pub secret_return: SecretReturn,
    pub stage: Stage,
    pub camera: Camera,
    pub backdrop: Backdrop,
    /// Seconds of unpaused play, drives backdrop drift
    pub elapsed: f32,
    /// Simulated frame counter
    pub frame: u64,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a run on the configured starting level
    pub fn new(catalog: LevelCatalog, settings: Settings) -> Self {
        let level = catalog.clamp(settings.starting_level);
        let stage = Stage::load(catalog.get(level), settings.initial_lives);
        let state = Self {
            catalog,
            settings,
            level,
            score: 0,
            phase: GamePhase::Playing,
            warp_gate: WarpGate::Ready,
            secret_return: SecretReturn::Idle,
            stage,
            camera: Camera::default(),
            backdrop: Backdrop::for_level(level),
            elapsed: 0.0,
            frame: 0,
            events: Vec::new(),
        };
        state.log_level_loaded();
        state
    }

    /// Run over the levels shipped with the game
    pub fn builtin(settings: Settings) -> Result<Self, LevelError> {
        Ok(Self::new(LevelCatalog::builtin()?, settings))
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn is_secret_level(&self) -> bool {
        self.stage.secret
    }

    /// Back to the starting level with a fresh score
    pub fn restart(&mut self) {
        log::info!("Restarting run");
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.warp_gate = WarpGate::Ready;
        self.secret_return = SecretReturn::Idle;
        self.camera = Camera::default();
        self.elapsed = 0.0;
        self.frame = 0;
        self.events.clear();
        self.load_stage(self.catalog.clamp(self.settings.starting_level));
    }

    /// Replace the stage with a fresh copy of level `number` (unknown numbers
    /// load level 1). Lives reset; score, warp gate and secret return carry
    /// over.
    pub fn load_level(&mut self, number: usize) {
        let level = self.catalog.clamp(number);
        if level != number {
            log::warn!("Level {} does not exist; loading level {}", number, level);
        }
        self.load_stage(level);
        self.events.push(GameEvent::LevelLoaded { level });
    }

    fn load_stage(&mut self, level: usize) {
        self.level = level;
        self.stage = Stage::load(self.catalog.get(level), self.settings.initial_lives);
        self.backdrop = Backdrop::for_level(level);
        self.log_level_loaded();
    }

    fn log_level_loaded(&self) {
        log::info!(
            "Loaded level {} ({}){}",
            self.level,
            self.stage.name,
            if self.stage.secret { " [secret]" } else { "" }
        );
    }

    /// Playing <-> Paused; ended runs stay ended
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            ended => ended,
        };
        log::debug!("Phase now {:?}", self.phase);
    }

    /// Drain the events of the last tick
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
