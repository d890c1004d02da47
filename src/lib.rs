//! Rod Duel - two linked fighters trying to knock each other's head down
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, charge, physics, rounds)
//! - `config`: Data-driven match tuning with validation

pub mod config;
pub mod sim;

pub use config::{ConfigError, MatchConfig, Variant, VariantKind};
pub use sim::{MatchPhase, MatchSnapshot, MatchState};

use glam::Vec2;

/// Engine constants shared by the default configuration
pub mod consts {
    /// Largest time step the engine will integrate (seconds)
    pub const MAX_DT: f32 = 1.0 / 30.0;
    /// Largest `max_dt` a config may ask for
    pub const MAX_DT_LIMIT: f32 = MAX_DT * 2.0;
    /// Rigid pair solver passes per tick
    pub const RIGID_SOLVE_ITERS: u32 = 2;
    /// Separation below which the solver falls back to a fixed direction
    pub const MIN_SEPARATION: f32 = 1e-5;

    /// Default play area (pixels, y grows downward)
    pub const ARENA_WIDTH: f32 = 960.0;
    pub const ARENA_HEIGHT: f32 = 540.0;
    pub const GROUND_Y: f32 = ARENA_HEIGHT - 90.0;
    pub const WALL_MARGIN: f32 = 80.0;

    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 1900.0;
    /// Horizontal velocity kept per tick in the air
    pub const AIR_DRAG: f32 = 0.995;
    /// Vertical velocity multiplier when the foot lands
    pub const GROUND_BOUNCE: f32 = -0.18;
    /// Horizontal velocity kept per grounded tick
    pub const GROUND_FRICTION: f32 = 0.92;

    pub const HEAD_RADIUS: f32 = 24.0;
    pub const FOOT_RADIUS: f32 = 14.0;
    pub const HAND_OFFSET: f32 = 12.0;

    /// Seconds of holding for a full charge
    pub const CHARGE_MAX: f32 = 0.5;

    /// Rod length as a fraction of the spawn separation
    pub const ARM_BASE_FACTOR: f32 = 0.72;

    pub const WIN_SCORE: u32 = 5;
    /// Pause between a scored round and the respawn (seconds)
    pub const ROUND_RESET_DELAY: f32 = 0.7;
    /// Undrained events kept before the oldest are dropped
    pub const MAX_PENDING_EVENTS: usize = 256;
}

/// The body's "up" direction for a given orientation angle
#[inline]
pub fn forward_axis(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), -angle.cos())
}

/// Rotate a vector by `angle` radians
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}
