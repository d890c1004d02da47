//! Read-only view of a match for renderers and HUDs

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::kinematics::Landmarks;
use super::state::{MatchPhase, MatchState, Side};

/// What a renderer needs to draw one player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f32,
    pub landmarks: Landmarks,
    pub score: u32,
    pub charging: bool,
    pub grounded: bool,
    /// Stored charge in [0, 1]
    pub charge01: f32,
    pub shape: f32,
    pub side: Side,
    pub color: u32,
}

/// Immutable copy of the match at one instant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub phase: MatchPhase,
    pub winner: Option<usize>,
    pub win_score: u32,
    pub players: [PlayerView; 2],
    pub rest_length: f32,
    pub ground_y: f32,
    pub time: f64,
}

impl MatchSnapshot {
    /// The player who has reached the win score, if any
    pub fn match_winner(&self) -> Option<usize> {
        match self.phase {
            MatchPhase::MatchOver => self.winner,
            _ => None,
        }
    }
}

impl MatchState {
    pub fn snapshot(&self) -> MatchSnapshot {
        let charge_max = self.config.charge_max;
        let players = [0, 1].map(|i| {
            let p = &self.players[i];
            PlayerView {
                position: p.pos,
                velocity: p.vel,
                angle: p.angle,
                landmarks: self.landmarks(i),
                score: p.score,
                charging: p.is_charging(),
                grounded: p.grounded,
                charge01: p.charge01(charge_max),
                shape: p.shape,
                side: p.side,
                color: p.color,
            }
        });

        MatchSnapshot {
            phase: self.phase,
            winner: self.winner,
            win_score: self.config.win_score,
            players,
            rest_length: self.pair.rest_length,
            ground_y: self.config.ground_y,
            time: self.time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MatchConfig, VariantKind};
    use crate::sim::collision::HeadContact;

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = MatchState::new(MatchConfig::default()).unwrap();
        state.charge_start(1);
        state.advance(1.0 / 60.0);
        let snap = state.snapshot();
        assert_eq!(snap.phase, MatchPhase::Active);
        assert_eq!(snap.winner, None);
        assert!(snap.players[1].charging);
        assert!(!snap.players[0].charging);
        assert_eq!(snap.players[0].position, state.players[0].pos);
        assert_eq!(snap.players[1].color, 0x2c78d8);
        assert!(snap.players[1].charge01 > 0.0);
        assert!(snap.players[0].landmarks.hip.is_none());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut state = MatchState::new(MatchConfig::default()).unwrap();
        let snap = state.snapshot();
        state.advance(1.0 / 60.0);
        assert_ne!(snap.time, state.time);
    }

    #[test]
    fn test_leg_snapshot_has_joints() {
        let state = MatchState::new(MatchConfig::for_variant(VariantKind::ArticulatedLeg)).unwrap();
        let snap = state.snapshot();
        assert!(snap.players[0].landmarks.hip.is_some());
        assert!(snap.players[0].landmarks.knee.is_some());
    }

    #[test]
    fn test_match_winner_only_when_over() {
        let mut state = MatchState::new(MatchConfig {
            win_score: 2,
            ..Default::default()
        })
        .unwrap();
        state.end_round(1, HeadContact::Ground);
        assert_eq!(state.snapshot().winner, Some(0));
        assert_eq!(state.snapshot().match_winner(), None);

        state.update_round(state.config.round_reset_delay);
        assert_eq!(state.phase, MatchPhase::Active);
        state.end_round(1, HeadContact::LeftWall);
        assert_eq!(state.snapshot().match_winner(), Some(0));
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = MatchState::new(MatchConfig::default()).unwrap();
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Active\""));
    }
}
