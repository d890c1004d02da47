//! Simulation tick
//!
//! One call per host frame. While the round is active each player runs
//! charge -> integrate -> collide in index order, then the rod is solved.
//! Outside an active round the bodies stay frozen and only the respawn
//! timer is checked.

use serde::{Deserialize, Serialize};

use super::charge::{ChargeTuning, update_charge};
use super::collision::{Arena, head_contact, resolve_foot};
use super::constraint;
use super::integrate::{Integration, integrate};
use super::kinematics::{BodyDims, Pose};
use super::state::{MatchPhase, MatchState};

/// Abstract input events delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    ChargeStart(usize),
    ChargeEnd(usize),
    Reset,
}

impl MatchState {
    /// Apply one input event immediately
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::ChargeStart(i) => self.charge_start(i),
            InputEvent::ChargeEnd(i) => self.charge_end(i),
            InputEvent::Reset => self.reset(),
        }
    }

    /// Advance the match by `dt` seconds (clamped to the configured maximum)
    pub fn advance(&mut self, dt: f32) {
        tick(self, dt);
    }
}

/// Advance the match state by one frame
pub fn tick(state: &mut MatchState, dt: f32) {
    if !dt.is_finite() {
        log::warn!("Ignoring non-finite time step {}", dt);
        return;
    }
    let dt = dt.clamp(0.0, state.config.max_dt);

    state.time += f64::from(dt);
    state.time_ticks += 1;

    match state.phase {
        MatchPhase::Active => step_physics(state, dt),
        MatchPhase::AwaitingReset => state.update_round(dt),
        MatchPhase::MatchOver => {}
    }
}

fn step_physics(state: &mut MatchState, dt: f32) {
    let config = &state.config;
    let kinematics = config.variant.kinematics();
    let policy = config.variant.release();
    let dims = BodyDims::from(config);
    let motion = Integration::from(config);
    let arena = Arena::from(config);
    let tuning = ChargeTuning {
        charge_max: config.charge_max,
        shape_response: config.shape_response,
    };

    let mut contact = None;
    for (i, player) in state.players.iter_mut().enumerate() {
        update_charge(player, policy, tuning, dt);
        integrate(player, &motion, dt);

        let pts = kinematics.landmarks(&Pose::from(&*player), &dims);
        resolve_foot(player, &pts, &arena);

        // Judged on the pose before the foot push, like the foot itself
        if contact.is_none() {
            contact = head_contact(&pts, &arena).map(|c| (i, c));
        }
    }

    state.pair.rest_length = state.pair.base_rest_length;
    constraint::solve(
        &mut state.players,
        state.pair.rest_length,
        state.config.solver_iterations,
    );

    if let Some((loser, c)) = contact {
        state.end_round(loser, c);
    }
}
