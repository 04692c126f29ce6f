//! Static level data and the level catalog
//!
//! Levels are authored as JSON (`levels/levels.json`) and validated once when
//! the catalog is built. Level numbers are 1-based.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::enemy::Archetype;
use super::items::ItemKind;
use super::rect::Rect;
use crate::consts::DECOY_DAMAGE;

const BUILTIN_LEVELS: &str = include_str!("../../levels/levels.json");

/// Level data failed validation
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to parse level data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level catalog is empty")]
    Empty,
    #[error("level {level} ({name}) has no goal")]
    MissingGoal { level: usize, name: String },
    #[error("level {level} ({name}) has no platforms")]
    NoPlatforms { level: usize, name: String },
    #[error("level {level} ({name}): {what} has a negative extent")]
    NegativeExtent {
        level: usize,
        name: String,
        what: &'static str,
    },
    #[error("regular level count {count} is outside 1..={total}")]
    RegularCount { count: usize, total: usize },
    #[error("secret level {level} does not exist or is not flagged secret")]
    SecretLevel { level: usize },
}

/// Surface behavior of a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    #[default]
    Normal,
    /// Full-width floor strip
    Ground,
    /// Spikes: damage instead of support
    Hazard,
}

/// Immutable platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    #[serde(flatten)]
    pub rect: Rect,
    #[serde(default)]
    pub kind: SurfaceKind,
}

impl Platform {
    pub const fn new(rect: Rect, kind: SurfaceKind) -> Self {
        Self { rect, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub archetype: Archetype,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemSpawn {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub kind: ItemKind,
}

/// What a warp does when entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarpKind {
    /// Looks like a pipe, hurts instead
    Decoy { damage: u32 },
    /// Real pipe; `return_to` only matters when `target` is the secret level
    Pipe {
        target: Option<usize>,
        return_to: Option<usize>,
    },
}

impl WarpKind {
    /// Whether entering the warp does anything beyond starting the cooldown
    pub fn is_active(&self) -> bool {
        !matches!(self, WarpKind::Pipe { target: None, .. })
    }
}

/// Warp pipe as authored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Warp {
    #[serde(flatten)]
    pub rect: Rect,
    #[serde(default)]
    pub decoy: bool,
    #[serde(default)]
    pub damage: Option<u32>,
    #[serde(default)]
    pub target: Option<usize>,
    #[serde(default)]
    pub return_to: Option<usize>,
}

impl Warp {
    pub fn pipe(rect: Rect, target: usize, return_to: Option<usize>) -> Self {
        Self {
            rect,
            decoy: false,
            damage: None,
            target: Some(target),
            return_to,
        }
    }

    pub fn decoy(rect: Rect, damage: u32) -> Self {
        Self {
            rect,
            decoy: true,
            damage: Some(damage),
            target: None,
            return_to: None,
        }
    }

    /// The decoy flag wins over any target the data also carries
    pub fn kind(&self) -> WarpKind {
        if self.decoy {
            WarpKind::Decoy {
                damage: self.damage.unwrap_or(DECOY_DAMAGE),
            }
        } else {
            WarpKind::Pipe {
                target: self.target,
                return_to: self.return_to,
            }
        }
    }
}

/// One authored level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub name: String,
    pub spawn: Vec2,
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub collectibles: Vec<ItemSpawn>,
    #[serde(default)]
    pub warps: Vec<Warp>,
    pub goal: Option<Rect>,
    #[serde(default)]
    pub secret: bool,
}

impl LevelData {
    /// Goal rectangle; present on every level that passed validation
    pub fn goal(&self) -> Rect {
        self.goal.unwrap_or_default()
    }

    fn validate(&self, level: usize) -> Result<(), LevelError> {
        let name = || self.name.clone();
        let goal = self.goal.ok_or_else(|| LevelError::MissingGoal {
            level,
            name: name(),
        })?;
        if self.platforms.is_empty() {
            return Err(LevelError::NoPlatforms {
                level,
                name: name(),
            });
        }

        let negative = |what| LevelError::NegativeExtent {
            level,
            name: name(),
            what,
        };
        if !goal.is_valid() {
            return Err(negative("goal"));
        }
        if self.platforms.iter().any(|p| !p.rect.is_valid()) {
            return Err(negative("platform"));
        }
        if self.warps.iter().any(|w| !w.rect.is_valid()) {
            return Err(negative("warp"));
        }
        Ok(())
    }
}

/// All levels of a run plus the level-flow constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelCatalog {
    /// Levels `1..=regular_count` are played in order; finishing the last wins
    regular_count: usize,
    /// The one-off bonus level reachable only through a warp
    secret_level: Option<usize>,
    /// Where the secret level returns to when no return level was recorded
    secret_fallback: usize,
    levels: Vec<LevelData>,
}

impl LevelCatalog {
    /// The levels shipped with the game
    pub fn builtin() -> Result<Self, LevelError> {
        Self::from_json(BUILTIN_LEVELS)
    }

    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn new(
        levels: Vec<LevelData>,
        regular_count: usize,
        secret_level: Option<usize>,
        secret_fallback: usize,
    ) -> Result<Self, LevelError> {
        let catalog = Self {
            regular_count,
            secret_level,
            secret_fallback,
            levels,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), LevelError> {
        if self.levels.is_empty() {
            return Err(LevelError::Empty);
        }
        for (i, level) in self.levels.iter().enumerate() {
            level.validate(i + 1)?;
        }
        if self.regular_count == 0 || self.regular_count > self.levels.len() {
            return Err(LevelError::RegularCount {
                count: self.regular_count,
                total: self.levels.len(),
            });
        }
        if let Some(secret) = self.secret_level {
            let flagged = self.levels.get(secret.wrapping_sub(1)).is_some_and(|l| l.secret);
            if !flagged {
                return Err(LevelError::SecretLevel { level: secret });
            }
        }

        // Misconfigured warps are playable; flag them for the level author
        for (i, level) in self.levels.iter().enumerate() {
            for warp in &level.warps {
                if warp.decoy && warp.target.is_some() {
                    log::warn!(
                        "Level {} ({}): decoy warp at ({}, {}) also has a target; treating it as a decoy",
                        i + 1,
                        level.name,
                        warp.rect.x,
                        warp.rect.y
                    );
                }
                for n in [warp.target, warp.return_to].into_iter().flatten() {
                    if !self.contains(n) {
                        log::warn!(
                            "Level {} ({}): warp points at missing level {}; it will load level 1",
                            i + 1,
                            level.name,
                            n
                        );
                    }
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn regular_count(&self) -> usize {
        self.regular_count
    }

    pub fn secret_level(&self) -> Option<usize> {
        self.secret_level
    }

    pub fn secret_fallback(&self) -> usize {
        self.secret_fallback
    }

    pub fn contains(&self, number: usize) -> bool {
        (1..=self.levels.len()).contains(&number)
    }

    /// Unknown level numbers fall back to the first level
    pub fn clamp(&self, number: usize) -> usize {
        if self.contains(number) { number } else { 1 }
    }

    pub fn get(&self, number: usize) -> &LevelData {
        &self.levels[self.clamp(number) - 1]
    }

    pub fn is_secret(&self, number: usize) -> bool {
        self.secret_level == Some(number)
    }
}
