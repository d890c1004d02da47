//! Rigid rod between the two players
//!
//! Equal point masses on a massless rod. Positions are corrected directly,
//! then velocities are rebuilt as a shared linear part plus a rotation about
//! the midpoint, so the pair keeps its linear momentum and any stretching
//! velocity is dropped.

use glam::Vec2;

use super::state::Player;
use crate::consts::MIN_SEPARATION;

/// One solver pass. Afterwards the centers are exactly `rest_length` apart
/// and both bodies are aligned with the rod.
pub fn solve_rigid_pair(a: &mut Player, b: &mut Player, rest_length: f32) {
    let mut d = b.pos - a.pos;
    let mut dist = d.length();
    if dist < MIN_SEPARATION {
        d = Vec2::X;
        dist = 1.0;
    }

    let n = d / dist;
    let mid = (a.pos + b.pos) * 0.5;
    let half = rest_length * 0.5;
    a.pos = mid - n * half;
    b.pos = mid + n * half;

    let v_center = (a.vel + b.vel) * 0.5;
    let rel = b.vel - a.vel;
    let omega = d.perp_dot(rel) / (dist * dist);

    // v = v_c + ω × r, with r measured from the midpoint
    let ra = -n * half;
    let rb = n * half;
    a.vel = v_center + ra.perp() * omega;
    b.vel = v_center + rb.perp() * omega;

    let angle = n.y.atan2(n.x);
    a.angle = angle;
    b.angle = angle;
}

/// Run the fixed number of solver passes for one tick
pub fn solve(players: &mut [Player; 2], rest_length: f32, iterations: u32) {
    let [a, b] = players;
    for _ in 0..iterations {
        solve_rigid_pair(a, b, rest_length);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Side;
    use proptest::prelude::*;

    fn pair(pa: Vec2, pb: Vec2, va: Vec2, vb: Vec2) -> [Player; 2] {
        let mut a = Player::new(Side::Left, 0, pa, 0.0);
        let mut b = Player::new(Side::Right, 0, pb, 0.0);
        a.vel = va;
        b.vel = vb;
        [a, b]
    }

    #[test]
    fn test_stretched_pair_snaps_to_length() {
        let mut players = pair(
            Vec2::new(0.0, 0.0),
            Vec2::new(200.0, 0.0),
            Vec2::ZERO,
            Vec2::ZERO,
        );
        solve(&mut players, 80.0, 2);
        assert!((players[0].pos - Vec2::new(60.0, 0.0)).length() < 1e-4);
        assert!((players[1].pos - Vec2::new(140.0, 0.0)).length() < 1e-4);
        assert_eq!(players[0].angle, 0.0);
        assert_eq!(players[1].angle, 0.0);
    }

    #[test]
    fn test_radial_velocity_removed() {
        // Moving apart along the rod: nothing rotational survives
        let mut players = pair(
            Vec2::new(0.0, 0.0),
            Vec2::new(80.0, 0.0),
            Vec2::new(-10.0, 0.0),
            Vec2::new(10.0, 0.0),
        );
        solve(&mut players, 80.0, 1);
        assert!(players[0].vel.length() < 1e-4);
        assert!(players[1].vel.length() < 1e-4);
    }

    #[test]
    fn test_tangential_velocity_becomes_rotation() {
        let mut players = pair(
            Vec2::new(0.0, 0.0),
            Vec2::new(80.0, 0.0),
            Vec2::new(0.0, -5.0),
            Vec2::new(0.0, 5.0),
        );
        solve(&mut players, 80.0, 1);
        assert!((players[0].vel - Vec2::new(0.0, -5.0)).length() < 1e-4);
        assert!((players[1].vel - Vec2::new(0.0, 5.0)).length() < 1e-4);
    }

    #[test]
    fn test_coincident_players_use_fallback_axis() {
        let mut players = pair(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0), Vec2::ZERO, Vec2::ZERO);
        solve(&mut players, 40.0, 2);
        assert!((players[0].pos - Vec2::new(-15.0, 5.0)).length() < 1e-4);
        assert!((players[1].pos - Vec2::new(25.0, 5.0)).length() < 1e-4);
        assert!(players.iter().all(|p| p.pos.is_finite() && p.vel.is_finite()));
    }

    #[test]
    fn test_vertical_rod_angle() {
        // Player 1 directly above player 0
        let mut players = pair(Vec2::new(0.0, 0.0), Vec2::new(0.0, -80.0), Vec2::ZERO, Vec2::ZERO);
        solve(&mut players, 80.0, 1);
        assert!((players[0].angle + std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    fn vec2() -> impl Strategy<Value = Vec2> {
        (-500.0f32..500.0, -500.0f32..500.0).prop_map(|(x, y)| Vec2::new(x, y))
    }

    proptest! {
        /// Property: after solving, the separation equals the rest length
        #[test]
        fn prop_separation_matches_rest(
            pa in vec2(), pb in vec2(), va in vec2(), vb in vec2(),
            rest in 10.0f32..300.0,
        ) {
            let mut players = pair(pa, pb, va, vb);
            solve(&mut players, rest, 2);
            let dist = players[0].pos.distance(players[1].pos);
            prop_assert!((dist - rest).abs() < 1e-2);
        }

        /// Property: the pair's average velocity is unchanged
        #[test]
        fn prop_linear_momentum_conserved(
            pa in vec2(), pb in vec2(), va in vec2(), vb in vec2(),
            rest in 10.0f32..300.0,
        ) {
            let mut players = pair(pa, pb, va, vb);
            let before = (va + vb) * 0.5;
            solve(&mut players, rest, 2);
            let after = (players[0].vel + players[1].vel) * 0.5;
            prop_assert!((before - after).length() < 1e-2);
        }

        /// Property: the midpoint does not move
        #[test]
        fn prop_midpoint_fixed(pa in vec2(), pb in vec2(), rest in 10.0f32..300.0) {
            let mut players = pair(pa, pb, Vec2::ZERO, Vec2::ZERO);
            solve(&mut players, rest, 2);
            let mid = (players[0].pos + players[1].pos) * 0.5;
            prop_assert!((mid - (pa + pb) * 0.5).length() < 1e-2);
        }
    }
}
