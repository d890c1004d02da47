//! Match configuration and tuning
//!
//! Everything the engine needs to know about the arena, the bodies and the
//! charge/release feel. Loaded from JSON or built from defaults, and
//! validated once when a match is created.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::charge::ReleasePolicy;
use crate::sim::kinematics::BodyKinematics;

/// Errors raised while building a match configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
        value: f32,
    },
    #[error("win score must be at least 1")]
    ZeroWinScore,
    #[error("rigid pair solver needs at least one iteration")]
    NoSolverIterations,
    #[error("spawn_x must place player 0 left of player 1, got [{left}, {right}]")]
    SpawnOrder { left: f32, right: f32 },
    #[error("rest length must be positive, got {0}")]
    RestLength(f32),
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which body model a match uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VariantKind {
    #[default]
    RigidTorso,
    ArticulatedLeg,
}

impl VariantKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantKind::RigidTorso => "torso",
            VariantKind::ArticulatedLeg => "leg",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "torso" | "rigid" | "a" => Some(VariantKind::RigidTorso),
            "leg" | "articulated" | "b" => Some(VariantKind::ArticulatedLeg),
            _ => None,
        }
    }
}

/// Straight torso that shortens while charging and kicks on release
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RigidTorso {
    /// Head-to-foot length when unbent
    pub body_length: f32,
    /// Length lost at full bend
    pub bend_max: f32,
    /// Kick speed at zero charge
    pub kick_base: f32,
    /// Extra kick speed at full charge
    pub kick_gain: f32,
    /// Sideways twist speed at full charge
    pub twist: f32,
}

impl Default for RigidTorso {
    fn default() -> Self {
        Self {
            body_length: 120.0,
            bend_max: 34.0,
            kick_base: 160.0,
            kick_gain: 620.0,
            twist: 220.0,
        }
    }
}

/// Fixed torso on a two-segment leg that pushes off the ground while charging
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticulatedLeg {
    pub torso_length: f32,
    pub thigh_length: f32,
    pub calf_length: f32,
    /// Knee angle at full fold (radians)
    pub fold_angle_max: f32,
    /// Thrust acceleration at zero charge
    pub thrust_base: f32,
    /// Extra thrust acceleration at full charge
    pub thrust_gain: f32,
    /// Sideways twist acceleration at full charge
    pub twist: f32,
    /// Charge seconds lost per second while not charging
    pub decay_rate: f32,
}

impl Default for ArticulatedLeg {
    fn default() -> Self {
        Self {
            torso_length: 70.0,
            thigh_length: 42.0,
            calf_length: 40.0,
            fold_angle_max: 1.7,
            thrust_base: 6000.0,
            thrust_gain: 18000.0,
            twist: 1500.0,
            decay_rate: 1.2,
        }
    }
}

/// Body model plus its tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Variant {
    RigidTorso(RigidTorso),
    ArticulatedLeg(ArticulatedLeg),
}

impl Default for Variant {
    fn default() -> Self {
        Variant::RigidTorso(RigidTorso::default())
    }
}

impl Variant {
    /// Default tuning for a variant
    pub fn from_kind(kind: VariantKind) -> Self {
        match kind {
            VariantKind::RigidTorso => Variant::RigidTorso(RigidTorso::default()),
            VariantKind::ArticulatedLeg => Variant::ArticulatedLeg(ArticulatedLeg::default()),
        }
    }

    pub fn kind(&self) -> VariantKind {
        match self {
            Variant::RigidTorso(_) => VariantKind::RigidTorso,
            Variant::ArticulatedLeg(_) => VariantKind::ArticulatedLeg,
        }
    }

    /// Geometry strategy (pose -> landmarks)
    pub fn kinematics(&self) -> &dyn BodyKinematics {
        match self {
            Variant::RigidTorso(v) => v,
            Variant::ArticulatedLeg(v) => v,
        }
    }

    /// Energy strategy (charge -> velocity)
    pub fn release(&self) -> &dyn ReleasePolicy {
        match self {
            Variant::RigidTorso(v) => v,
            Variant::ArticulatedLeg(v) => v,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Variant::RigidTorso(t) => {
                positive("body_length", t.body_length)?;
                check(
                    "bend_max",
                    t.bend_max,
                    t.bend_max >= 0.0 && t.bend_max < t.body_length,
                    "in [0, body_length)",
                )?;
                non_negative("kick_base", t.kick_base)?;
                non_negative("kick_gain", t.kick_gain)?;
                non_negative("twist", t.twist)
            }
            Variant::ArticulatedLeg(l) => {
                positive("torso_length", l.torso_length)?;
                positive("thigh_length", l.thigh_length)?;
                positive("calf_length", l.calf_length)?;
                check(
                    "fold_angle_max",
                    l.fold_angle_max,
                    (0.0..=std::f32::consts::PI).contains(&l.fold_angle_max),
                    "in [0, pi]",
                )?;
                non_negative("thrust_base", l.thrust_base)?;
                non_negative("thrust_gain", l.thrust_gain)?;
                non_negative("twist", l.twist)?;
                non_negative("decay_rate", l.decay_rate)
            }
        }
    }
}

/// Full match configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    // === Arena ===
    pub width: f32,
    /// Ground line (y grows downward)
    pub ground_y: f32,
    /// Horizontal clamp distance from each side wall
    pub wall_margin: f32,

    // === Physics ===
    pub gravity: f32,
    pub air_drag: f32,
    pub ground_bounce: f32,
    pub ground_friction: f32,
    /// Largest accepted time step; larger deltas are clamped
    pub max_dt: f32,
    pub solver_iterations: u32,

    // === Bodies ===
    pub head_radius: f32,
    pub foot_radius: f32,
    pub hand_offset: f32,
    pub variant: Variant,

    // === Charge ===
    pub charge_max: f32,
    /// Rate (1/s) at which the shape parameter follows the charge
    pub shape_response: f32,

    // === Spawn ===
    /// Spawn x for each player as a fraction of the width
    pub spawn_x: [f32; 2],
    /// Rod length as a fraction of the spawn separation
    pub rest_length_factor: f32,
    /// Full width of the random initial tilt (radians)
    pub spawn_angle_jitter: f32,
    pub colors: [u32; 2],
    pub seed: u64,

    // === Match ===
    pub win_score: u32,
    /// Pause between a scored round and the respawn (seconds)
    pub round_reset_delay: f32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            ground_y: GROUND_Y,
            wall_margin: WALL_MARGIN,

            gravity: GRAVITY,
            air_drag: AIR_DRAG,
            ground_bounce: GROUND_BOUNCE,
            ground_friction: GROUND_FRICTION,
            max_dt: MAX_DT,
            solver_iterations: RIGID_SOLVE_ITERS,

            head_radius: HEAD_RADIUS,
            foot_radius: FOOT_RADIUS,
            hand_offset: HAND_OFFSET,
            variant: Variant::default(),

            charge_max: CHARGE_MAX,
            shape_response: 30.0,

            spawn_x: [0.38, 0.62],
            rest_length_factor: ARM_BASE_FACTOR,
            spawn_angle_jitter: 0.3,
            colors: [0xd94848, 0x2c78d8],
            seed: 0,

            win_score: WIN_SCORE,
            round_reset_delay: ROUND_RESET_DELAY,
        }
    }
}

impl MatchConfig {
    /// Default tuning for the given body model
    pub fn for_variant(kind: VariantKind) -> Self {
        Self {
            variant: Variant::from_kind(kind),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Spawn centers: feet on the ground line, upright
    pub fn spawn_layout(&self) -> [Vec2; 2] {
        let y = self.ground_y - self.variant.kinematics().stand_height();
        [
            Vec2::new(self.width * self.spawn_x[0], y),
            Vec2::new(self.width * self.spawn_x[1], y),
        ]
    }

    /// Rod length implied by the spawn layout
    pub fn spawn_rest_length(&self) -> f32 {
        let [a, b] = self.spawn_layout();
        a.distance(b) * self.rest_length_factor
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("width", self.width)?;
        finite("ground_y", self.ground_y)?;
        check(
            "wall_margin",
            self.wall_margin,
            self.wall_margin >= 0.0 && self.wall_margin * 2.0 < self.width,
            "in [0, width/2)",
        )?;

        finite("gravity", self.gravity)?;
        check("air_drag", self.air_drag, (0.0..=1.0).contains(&self.air_drag), "in [0, 1]")?;
        check(
            "ground_bounce",
            self.ground_bounce,
            (-1.0..=0.0).contains(&self.ground_bounce),
            "in [-1, 0]",
        )?;
        check(
            "ground_friction",
            self.ground_friction,
            (0.0..=1.0).contains(&self.ground_friction),
            "in [0, 1]",
        )?;
        check(
            "max_dt",
            self.max_dt,
            self.max_dt > 0.0 && self.max_dt <= MAX_DT_LIMIT,
            "in (0, 1/15]",
        )?;
        if self.solver_iterations == 0 {
            return Err(ConfigError::NoSolverIterations);
        }

        positive("head_radius", self.head_radius)?;
        positive("foot_radius", self.foot_radius)?;
        finite("hand_offset", self.hand_offset)?;
        self.variant.validate()?;

        positive("charge_max", self.charge_max)?;
        positive("shape_response", self.shape_response)?;

        for x in self.spawn_x {
            check("spawn_x", x, (0.0..=1.0).contains(&x), "in [0, 1]")?;
        }
        let [left, right] = self.spawn_x;
        if left >= right {
            return Err(ConfigError::SpawnOrder { left, right });
        }
        positive("rest_length_factor", self.rest_length_factor)?;
        non_negative("spawn_angle_jitter", self.spawn_angle_jitter)?;

        if self.win_score == 0 {
            return Err(ConfigError::ZeroWinScore);
        }
        non_negative("round_reset_delay", self.round_reset_delay)?;

        let rest = self.spawn_rest_length();
        if !(rest.is_finite() && rest > 0.0) {
            return Err(ConfigError::RestLength(rest));
        }
        Ok(())
    }
}

fn check(
    field: &'static str,
    value: f32,
    ok: bool,
    expected: &'static str,
) -> Result<(), ConfigError> {
    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            expected,
            value,
        })
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    check(field, value, true, "finite")
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    check(field, value, value > 0.0, "positive")
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    check(field, value, value >= 0.0, "non-negative")
}
