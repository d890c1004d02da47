//! Gravity, drag and wall clamp for a single body

use super::state::Player;
use crate::config::MatchConfig;

/// Per-body motion parameters
#[derive(Debug, Clone, Copy)]
pub struct Integration {
    pub gravity: f32,
    pub air_drag: f32,
    pub min_x: f32,
    pub max_x: f32,
}

impl From<&MatchConfig> for Integration {
    fn from(c: &MatchConfig) -> Self {
        Self {
            gravity: c.gravity,
            air_drag: c.air_drag,
            min_x: c.wall_margin,
            max_x: c.width - c.wall_margin,
        }
    }
}

/// Advance one body by `dt` (semi-implicit Euler).
///
/// The wall clamp only moves the body; velocity is left alone.
pub fn integrate(player: &mut Player, params: &Integration, dt: f32) {
    player.vel.y += params.gravity * dt;
    player.pos += player.vel * dt;
    player.vel.x *= params.air_drag;
    player.pos.x = player.pos.x.clamp(params.min_x, params.max_x);
}
