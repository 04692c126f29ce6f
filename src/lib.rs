//! Warp Runner - A side-scrolling platformer with warp pipes and a secret level
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, enemy AI, level flow)
//! - `input`: Held/consumed key state fed by the host
//! - `camera`: Scrolling viewport that follows the player
//! - `background`: Seeded parallax backdrop data
//! - `render`: Draw-call interface for a host renderer
//! - `session`: Frame clock driving update-then-render
//! - `settings`: Runtime configuration

pub mod background;
pub mod camera;
pub mod input;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;

pub use input::{InputState, Key};
pub use session::{FrameClock, Session};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
///
/// Velocities and accelerations are per frame; timers are in seconds.
pub mod consts {
    /// Largest delta-time fed to a single update (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Viewport (internal resolution)
    pub const VIEWPORT_WIDTH: f32 = 600.0;
    pub const VIEWPORT_HEIGHT: f32 = 450.0;

    /// Player body
    pub const PLAYER_WIDTH: f32 = 16.0;
    pub const PLAYER_HEIGHT: f32 = 24.0;
    pub const PLAYER_ACCELERATION: f32 = 0.3;
    pub const PLAYER_FRICTION: f32 = 0.8;
    /// Horizontal speed below which friction snaps to rest
    pub const PLAYER_STOP_THRESHOLD: f32 = 0.1;
    pub const PLAYER_JUMP_POWER: f32 = 9.0;
    pub const PLAYER_MAX_VELOCITY_X: f32 = 4.0;
    pub const PLAYER_INITIAL_LIVES: u32 = 3;
    /// Invulnerability window after a hit (seconds)
    pub const INVULNERABLE_DURATION: f32 = 1.5;
    /// Upward velocity given to the player after a stomp
    pub const STOMP_BOUNCE: f32 = 5.0;
    /// Slack (px) on both sides of the stomp line
    pub const STOMP_SLACK: f32 = 8.0;

    /// Shared physics
    pub const GRAVITY: f32 = 0.35;
    pub const MAX_FALL_SPEED: f32 = 10.0;

    /// Enemy body and patrol
    pub const ENEMY_WIDTH: f32 = 16.0;
    pub const ENEMY_HEIGHT: f32 = 16.0;
    pub const ENEMY_PATROL_DISTANCE: f32 = 100.0;
    /// Speed multiplier while chasing
    pub const CHASE_SPEED_MULTIPLIER: f32 = 1.25;
    /// Cliff probe offsets from the leading edge / bottom
    pub const CLIFF_PROBE_AHEAD: f32 = 1.0;
    pub const CLIFF_PROBE_BELOW: f32 = 2.0;

    /// Collectibles
    pub const ITEM_SIZE: f32 = 8.0;
    pub const COIN_VALUE: u64 = 10;

    /// Damage dealt by hazard surfaces and decoy warps
    pub const HAZARD_DAMAGE: u32 = 10;
    pub const DECOY_DAMAGE: u32 = 10;

    /// Seconds before another warp can trigger
    pub const PIPE_COOLDOWN: f32 = 0.5;

    /// Falling below this world Y ends the run
    pub const FALL_LIMIT_Y: f32 = 650.0;

    /// Camera follow
    pub const CAMERA_PADDING: f32 = 120.0;
    pub const CAMERA_SMOOTHING: f32 = 0.1;
    pub const CAMERA_MAX_Y: f32 = 200.0;
    /// Fraction of the viewport height kept above the player
    pub const CAMERA_VERTICAL_ANCHOR: f32 = 0.6;

    /// Parallax factors (fraction of camera motion applied to each layer)
    pub const CLOUD_FACTOR: f32 = 0.05;
    pub const MOUNTAIN_FACTOR: f32 = 0.15;
    pub const HILLS_FACTOR: f32 = 0.4;
    /// Cloud drift independent of the camera (px/s)
    pub const CLOUD_AUTO_SPEED: f32 = 8.0;
}
