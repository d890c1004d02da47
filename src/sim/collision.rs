//! Ground and boundary collision
//!
//! The foot is the only part that rests on the ground. The head never
//! collides physically: touching the ground or a side wall ends the round.

use serde::{Deserialize, Serialize};

use super::kinematics::Landmarks;
use super::state::Player;
use crate::config::MatchConfig;

/// What a head ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadContact {
    Ground,
    LeftWall,
    RightWall,
}

/// Arena geometry and contact response
#[derive(Debug, Clone, Copy)]
pub struct Arena {
    pub ground_y: f32,
    pub width: f32,
    pub head_radius: f32,
    pub foot_radius: f32,
    pub bounce: f32,
    pub friction: f32,
}

impl From<&MatchConfig> for Arena {
    fn from(c: &MatchConfig) -> Self {
        Self {
            ground_y: c.ground_y,
            width: c.width,
            head_radius: c.head_radius,
            foot_radius: c.foot_radius,
            bounce: c.ground_bounce,
            friction: c.ground_friction,
        }
    }
}

/// How far the foot circle sinks below the ground line (positive = inside)
#[inline]
pub fn foot_penetration(landmarks: &Landmarks, arena: &Arena) -> f32 {
    landmarks.foot.y + arena.foot_radius - arena.ground_y
}

/// Push the body out of the ground through its foot and update `grounded`.
///
/// Returns the penetration that was resolved (0 when airborne). `landmarks`
/// still describe the pose before the push.
pub fn resolve_foot(player: &mut Player, landmarks: &Landmarks, arena: &Arena) -> f32 {
    let penetration = foot_penetration(landmarks, arena);
    if penetration <= 0.0 {
        player.grounded = false;
        return 0.0;
    }

    player.pos.y -= penetration;
    if player.vel.y > 0.0 {
        player.vel.y *= arena.bounce;
    }
    player.vel.x *= arena.friction;
    player.grounded = true;
    penetration
}

/// Check the head against the ground line and both side walls
pub fn head_contact(landmarks: &Landmarks, arena: &Arena) -> Option<HeadContact> {
    let head = landmarks.head;
    let r = arena.head_radius;
    if head.y + r > arena.ground_y {
        Some(HeadContact::Ground)
    } else if head.x - r < 0.0 {
        Some(HeadContact::LeftWall)
    } else if head.x + r > arena.width {
        Some(HeadContact::RightWall)
    } else {
        None
    }
}
