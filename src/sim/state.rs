//! Match state and core simulation types
//!
//! All state for one match lives in `MatchState`; nothing is global, so any
//! number of matches can run side by side.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::HeadContact;
use super::kinematics::{BodyDims, Landmarks, Pose};
use crate::config::{ConfigError, MatchConfig};
use crate::consts::MAX_PENDING_EVENTS;

/// Fixed identity of a player, biasing twist and knee direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Player 0, twists with +1
    Left,
    /// Player 1, twists with -1
    Right,
}

impl Side {
    pub fn of(index: usize) -> Self {
        if index == 0 { Side::Left } else { Side::Right }
    }

    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

/// Whether the player is holding their charge input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChargeState {
    #[default]
    Idle,
    Charging,
}

/// One of the two linked fighters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Orientation (radians); forced to the rod angle by the pair solver
    pub angle: f32,
    pub charge: ChargeState,
    /// Seconds of stored charge, in [0, charge_max]
    pub charge_time: f32,
    /// Bend or leg-fold fraction in [0, 1], lags the charge
    pub shape: f32,
    /// Foot touched the ground in the last collider pass
    pub grounded: bool,
    pub score: u32,
    pub side: Side,
    /// 0xRRGGBB
    pub color: u32,
}

impl Player {
    pub fn new(side: Side, color: u32, pos: Vec2, angle: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angle,
            charge: ChargeState::Idle,
            charge_time: 0.0,
            shape: 0.0,
            grounded: true,
            score: 0,
            side,
            color,
        }
    }

    #[inline]
    pub fn is_charging(&self) -> bool {
        self.charge == ChargeState::Charging
    }

    /// Stored charge as a fraction of the maximum
    #[inline]
    pub fn charge01(&self, charge_max: f32) -> f32 {
        (self.charge_time / charge_max).clamp(0.0, 1.0)
    }

    /// Back to the spawn pose, keeping identity and score
    pub fn respawn(&mut self, pos: Vec2, angle: f32) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.angle = angle;
        self.charge = ChargeState::Idle;
        self.charge_time = 0.0;
        self.shape = 0.0;
        self.grounded = true;
    }
}

/// The massless rod joining the two centers
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PairConstraint {
    /// Length derived from the spawn separation
    pub base_rest_length: f32,
    /// Length enforced this tick
    pub rest_length: f32,
}

impl PairConstraint {
    pub fn new(rest_length: f32) -> Self {
        Self {
            base_rest_length: rest_length,
            rest_length,
        }
    }
}

/// Where the match is in its round cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Simulation running, inputs accepted
    Active,
    /// Round scored; respawn once `reset_remaining` runs out
    AwaitingReset,
    /// Winner reached the win score; only `reset()` leaves this phase
    MatchOver,
}

/// Notable things that happened during a tick, for the host to present
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// Players placed at the spawn layout and the round is live
    RoundStarted,
    /// A head touched the ground or a wall
    RoundScored {
        winner: usize,
        loser: usize,
        contact: HeadContact,
        score: u32,
    },
    /// Winner reached the win score
    MatchWon { winner: usize },
    /// A stored charge was turned into an instant kick
    Released { player: usize, charge01: f32 },
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }

    /// Uniform value in [0, 1); every draw moves to a fresh stream
    pub fn next_unit(&mut self) -> f32 {
        let value = self.to_rng().random::<f32>();
        self.stream = self.stream.wrapping_add(1);
        value
    }
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub config: MatchConfig,
    pub players: [Player; 2],
    pub pair: PairConstraint,
    pub phase: MatchPhase,
    /// Player who took the last round, while not Active
    pub winner: Option<usize>,
    /// Seconds left before the automatic respawn
    pub reset_remaining: Option<f32>,
    /// Engine clock (seconds of accepted time steps)
    pub time: f64,
    pub time_ticks: u64,
    pub rng_state: RngState,
    /// Undrained events, oldest first
    #[serde(skip)]
    pub(crate) events: VecDeque<MatchEvent>,
}

impl MatchState {
    /// Validate the config and spawn a fresh match
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rest = config.spawn_rest_length();
        let mut rng_state = RngState::new(config.seed);
        let players = fresh_players(&config, &mut rng_state);

        log::info!(
            "Match created: variant={}, rest length={:.1}, win score={}",
            config.variant.kind().as_str(),
            rest,
            config.win_score
        );

        Ok(Self {
            pair: PairConstraint::new(rest),
            players,
            phase: MatchPhase::Active,
            winner: None,
            reset_remaining: None,
            time: 0.0,
            time_ticks: 0,
            rng_state,
            events: VecDeque::from([MatchEvent::RoundStarted]),
            config,
        })
    }

    /// Landmarks of player `i` in its current pose
    pub fn landmarks(&self, i: usize) -> Landmarks {
        let dims = BodyDims::from(&self.config);
        self.config
            .variant
            .kinematics()
            .landmarks(&Pose::from(&self.players[i]), &dims)
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        self.events.drain(..).collect()
    }

    /// Queue an event for the host. Hosts that never drain only keep the
    /// most recent `MAX_PENDING_EVENTS`.
    pub(crate) fn record(&mut self, event: MatchEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Shared random tilt for a new round
    pub(crate) fn spawn_angle(&mut self) -> f32 {
        spawn_angle(&self.config, &mut self.rng_state)
    }
}

fn spawn_angle(config: &MatchConfig, rng: &mut RngState) -> f32 {
    (rng.next_unit() - 0.5) * config.spawn_angle_jitter
}

/// Brand new players with zero score
pub(crate) fn fresh_players(config: &MatchConfig, rng: &mut RngState) -> [Player; 2] {
    let layout = config.spawn_layout();
    [0, 1].map(|i| {
        let angle = spawn_angle(config, rng);
        Player::new(Side::of(i), config.colors[i], layout[i], angle)
    })
}
