//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module draws or reads the
//! keyboard directly:
//! - Velocities are per frame, timers are scaled by delta-time
//! - Entities are updated in level order
//! - Input arrives through `InputState`, output leaves through `GameState`

pub mod body;
pub mod collision;
pub mod enemy;
pub mod flow;
pub mod items;
pub mod level;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;

pub use body::{Body, Facing};
pub use collision::{Axis, Contact, Correction, min_penetration, resolve, resting_contact};
pub use enemy::{Archetype, ArchetypeStats, BehaviorState, Enemy, is_stomp, resolve_player_contacts};
pub use items::{Collectible, ItemKind, Pickups, collect_overlapping};
pub use level::{
    EnemySpawn, ItemSpawn, LevelCatalog, LevelData, LevelError, Platform, SurfaceKind, Warp,
    WarpKind,
};
pub use player::{Player, Pose};
pub use rect::Rect;
pub use state::{DamageSource, GameEvent, GamePhase, GameState, SecretReturn, Stage, WarpGate};
pub use tick::tick;
