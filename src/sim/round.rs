//! Round and match flow
//!
//! Active -> (head contact) -> AwaitingReset -> (delay) -> Active, until a
//! player reaches the win score and the match stops in MatchOver.

use super::collision::HeadContact;
use super::state::{MatchEvent, MatchPhase, MatchState, PairConstraint, fresh_players};

impl MatchState {
    /// Start a new match from scratch: fresh players, zero scores
    pub fn reset(&mut self) {
        self.players = fresh_players(&self.config, &mut self.rng_state);
        self.pair = PairConstraint::new(self.config.spawn_rest_length());
        self.phase = MatchPhase::Active;
        self.winner = None;
        self.reset_remaining = None;
        self.record(MatchEvent::RoundStarted);
        log::info!("Match reset");
    }

    /// A head touched something: the other player takes the round.
    ///
    /// Only the first contact of an active round counts.
    pub(crate) fn end_round(&mut self, loser: usize, contact: HeadContact) {
        if self.phase != MatchPhase::Active {
            return;
        }
        let winner = 1 - loser;
        let score = {
            let p = &mut self.players[winner];
            p.score += 1;
            p.score
        };
        self.winner = Some(winner);
        self.record(MatchEvent::RoundScored {
            winner,
            loser,
            contact,
            score,
        });

        if score < self.config.win_score {
            self.phase = MatchPhase::AwaitingReset;
            self.reset_remaining = Some(self.config.round_reset_delay);
            log::info!(
                "Player {} scores ({:?}), {} - {}",
                winner,
                contact,
                self.players[0].score,
                self.players[1].score
            );
        } else {
            self.phase = MatchPhase::MatchOver;
            self.reset_remaining = None;
            self.record(MatchEvent::MatchWon { winner });
            log::info!("Player {} wins the match with {} points", winner, score);
        }
    }

    /// Count down the post-round pause and respawn once it has elapsed
    pub(crate) fn update_round(&mut self, dt: f32) {
        if self.phase != MatchPhase::AwaitingReset {
            return;
        }
        let Some(remaining) = self.reset_remaining.as_mut() else {
            return;
        };
        *remaining -= dt;
        if *remaining <= 0.0 {
            self.respawn_round();
        }
    }

    /// Put both players back at the spawn layout, keeping their scores
    fn respawn_round(&mut self) {
        let layout = self.config.spawn_layout();
        let angle = self.spawn_angle();
        for (player, pos) in self.players.iter_mut().zip(layout) {
            player.respawn(pos, angle);
        }
        self.pair = PairConstraint::new(self.config.spawn_rest_length());
        self.phase = MatchPhase::Active;
        self.winner = None;
        self.reset_remaining = None;
        self.record(MatchEvent::RoundStarted);
        log::info!("Round started");
    }
}
