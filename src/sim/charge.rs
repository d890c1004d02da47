//! Charge accumulation and release
//!
//! Holding the charge input stores energy; the variant's release policy
//! decides how it becomes motion. The rigid torso kicks once on release,
//! the articulated leg pushes off the ground for as long as it charges.

use glam::Vec2;

use super::state::{ChargeState, MatchEvent, MatchPhase, MatchState, Player, Side};
use crate::config::{ArticulatedLeg, RigidTorso};
use crate::forward_axis;

/// Energy strategy for a body model
pub trait ReleasePolicy {
    /// Whether pressing charge discards whatever is still stored
    fn restarts_on_press(&self) -> bool;

    /// Charge seconds lost per second while not charging
    fn idle_decay(&self) -> f32;

    /// One-off velocity change when the charge input is released
    fn release_impulse(&self, axis: Vec2, charge01: f32, side: Side) -> Option<Vec2>;

    /// Acceleration applied each grounded tick while charging
    fn sustained_thrust(&self, axis: Vec2, charge01: f32, side: Side) -> Option<Vec2>;
}

/// Perpendicular to the body axis, used for twist
#[inline]
fn lateral(axis: Vec2) -> Vec2 {
    Vec2::new(-axis.y, axis.x)
}

impl ReleasePolicy for RigidTorso {
    fn restarts_on_press(&self) -> bool {
        true
    }

    fn idle_decay(&self) -> f32 {
        0.0
    }

    fn release_impulse(&self, axis: Vec2, charge01: f32, side: Side) -> Option<Vec2> {
        let kick = self.kick_base + self.kick_gain * charge01;
        // Even a tap twists a little
        let twist = self.twist * (0.6 + 0.4 * charge01);
        Some(axis * kick + lateral(axis) * twist * side.sign())
    }

    fn sustained_thrust(&self, _axis: Vec2, _charge01: f32, _side: Side) -> Option<Vec2> {
        None
    }
}

impl ReleasePolicy for ArticulatedLeg {
    fn restarts_on_press(&self) -> bool {
        false
    }

    fn idle_decay(&self) -> f32 {
        self.decay_rate
    }

    fn release_impulse(&self, _axis: Vec2, _charge01: f32, _side: Side) -> Option<Vec2> {
        None
    }

    fn sustained_thrust(&self, axis: Vec2, charge01: f32, side: Side) -> Option<Vec2> {
        let push = self.thrust_base + self.thrust_gain * charge01;
        let twist = self.twist * charge01;
        Some(axis * push + lateral(axis) * twist * side.sign())
    }
}

/// Charge limits shared by both policies
#[derive(Debug, Clone, Copy)]
pub struct ChargeTuning {
    pub charge_max: f32,
    pub shape_response: f32,
}

/// Per-tick controller step for one player, run before integration.
///
/// Accumulates or decays the stored charge, eases the shape parameter toward
/// it, and applies sustained thrust. Thrust uses the grounded flag left by
/// the previous collider pass and clears it.
pub fn update_charge(
    player: &mut Player,
    policy: &dyn ReleasePolicy,
    tuning: ChargeTuning,
    dt: f32,
) {
    if player.is_charging() {
        player.charge_time = (player.charge_time + dt).min(tuning.charge_max);
    } else {
        player.charge_time = (player.charge_time - policy.idle_decay() * dt).max(0.0);
    }
    let charge01 = player.charge01(tuning.charge_max);

    // First-order lag toward the charge; never overshoots
    let blend = 1.0 - (-tuning.shape_response * dt).exp();
    player.shape = (player.shape + (charge01 - player.shape) * blend).clamp(0.0, 1.0);

    if player.is_charging() && player.grounded {
        let axis = forward_axis(player.angle);
        if let Some(accel) = policy.sustained_thrust(axis, charge01, player.side) {
            player.vel += accel * dt;
            player.grounded = false;
        }
    }
}

impl MatchState {
    /// Begin holding charge. Ignored outside an active round or when
    /// already charging.
    pub fn charge_start(&mut self, i: usize) {
        if self.phase != MatchPhase::Active {
            return;
        }
        let restart = self.config.variant.release().restarts_on_press();
        let Some(player) = self.players.get_mut(i) else {
            return;
        };
        if player.is_charging() {
            return;
        }
        player.charge = ChargeState::Charging;
        if restart {
            player.charge_time = 0.0;
        }
    }

    /// Let go of the charge. Ignored outside an active round or when not
    /// charging.
    pub fn charge_end(&mut self, i: usize) {
        if self.phase != MatchPhase::Active {
            return;
        }
        let charge_max = self.config.charge_max;
        let policy = self.config.variant.release();
        let Some(player) = self.players.get_mut(i) else {
            return;
        };
        if !player.is_charging() {
            return;
        }

        let charge01 = player.charge01(charge_max);
        let axis = forward_axis(player.angle);
        player.charge = ChargeState::Idle;
        if let Some(dv) = policy.release_impulse(axis, charge01, player.side) {
            player.vel += dv;
            player.charge_time = 0.0;
            log::debug!("Player {} released charge {:.2}", i, charge01);
            self.record(MatchEvent::Released { player: i, charge01 });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MatchConfig, VariantKind};

    const TUNING: ChargeTuning = ChargeTuning {
        charge_max: 0.5,
        shape_response: 30.0,
    };

    fn player() -> Player {
        Player::new(Side::Left, 0, Vec2::new(100.0, 100.0), 0.0)
    }

    #[test]
    fn test_charge_accumulates_and_clamps() {
        let torso = RigidTorso::default();
        let mut p = player();
        p.charge = ChargeState::Charging;
        for _ in 0..60 {
            update_charge(&mut p, &torso, TUNING, 1.0 / 60.0);
        }
        assert_eq!(p.charge_time, TUNING.charge_max);
        assert!(p.shape > 0.9 && p.shape <= 1.0);
    }

    #[test]
    fn test_shape_lags_charge() {
        let torso = RigidTorso::default();
        let mut p = player();
        p.charge = ChargeState::Charging;
        p.charge_time = TUNING.charge_max;
        update_charge(&mut p, &torso, TUNING, 1.0 / 120.0);
        // Target is 1.0, one tick only moves part of the way
        assert!(p.shape > 0.0 && p.shape < 1.0);
    }

    #[test]
    fn test_torso_charging_applies_no_force() {
        let torso = RigidTorso::default();
        let mut p = player();
        p.charge = ChargeState::Charging;
        update_charge(&mut p, &torso, TUNING, 1.0 / 60.0);
        assert_eq!(p.vel, Vec2::ZERO);
        assert!(p.grounded);
    }

    #[test]
    fn test_leg_thrust_needs_ground() {
        let leg = ArticulatedLeg::default();
        let mut p = player();
        p.charge = ChargeState::Charging;
        p.grounded = false;
        update_charge(&mut p, &leg, TUNING, 1.0 / 60.0);
        assert_eq!(p.vel, Vec2::ZERO);

        p.grounded = true;
        update_charge(&mut p, &leg, TUNING, 1.0 / 60.0);
        // Upright axis points up (negative y)
        assert!(p.vel.y < 0.0);
        assert!(!p.grounded);
    }

    #[test]
    fn test_leg_charge_decays_when_idle() {
        let leg = ArticulatedLeg::default();
        let mut p = player();
        p.charge_time = 0.3;
        update_charge(&mut p, &leg, TUNING, 0.1);
        assert!((p.charge_time - (0.3 - leg.decay_rate * 0.1)).abs() < 1e-6);
        for _ in 0..100 {
            update_charge(&mut p, &leg, TUNING, 0.1);
        }
        assert_eq!(p.charge_time, 0.0);
    }

    #[test]
    fn test_twist_direction_follows_side() {
        let torso = RigidTorso::default();
        let axis = Vec2::new(0.0, -1.0);
        let left = torso.release_impulse(axis, 1.0, Side::Left).unwrap();
        let right = torso.release_impulse(axis, 1.0, Side::Right).unwrap();
        assert!((left.y - right.y).abs() < 1e-4);
        assert!((left.x + right.x).abs() < 1e-4);
        assert!(left.x.abs() > 0.0);
    }

    #[test]
    fn test_charge_start_is_idempotent() {
        let mut state = MatchState::new(MatchConfig::default()).unwrap();
        state.charge_start(0);
        state.players[0].charge_time = 0.2;
        state.charge_start(0);
        assert_eq!(state.players[0].charge_time, 0.2);
        assert!(state.players[0].is_charging());
    }

    #[test]
    fn test_charge_end_without_start_is_noop() {
        let mut state = MatchState::new(MatchConfig::default()).unwrap();
        let before = state.players[1].vel;
        state.charge_end(1);
        assert_eq!(state.players[1].vel, before);
        assert_eq!(state.players[1].charge, ChargeState::Idle);
    }

    #[test]
    fn test_inputs_ignored_outside_active_round() {
        let mut state = MatchState::new(MatchConfig::default()).unwrap();
        state.phase = MatchPhase::AwaitingReset;
        state.charge_start(0);
        assert!(!state.players[0].is_charging());
    }

    #[test]
    fn test_out_of_range_player_ignored() {
        let mut state = MatchState::new(MatchConfig::default()).unwrap();
        state.charge_start(5);
        state.charge_end(5);
        assert!(state.players.iter().all(|p| !p.is_charging()));
    }

    #[test]
    fn test_leg_release_keeps_stored_charge() {
        let mut state = MatchState::new(MatchConfig::for_variant(VariantKind::ArticulatedLeg)).unwrap();
        state.charge_start(0);
        state.players[0].charge_time = 0.4;
        state.charge_end(0);
        assert_eq!(state.players[0].charge, ChargeState::Idle);
        assert_eq!(state.players[0].charge_time, 0.4);
        assert_eq!(state.players[0].vel, Vec2::ZERO);

        // Pressing again continues from the stored charge
        state.charge_start(0);
        assert_eq!(state.players[0].charge_time, 0.4);
    }
}
