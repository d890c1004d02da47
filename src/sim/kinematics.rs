//! Body geometry: pose to world-space landmarks
//!
//! Both body models share the same pose (center, angle, shape, side) and
//! differ only in how the shape parameter deforms the body.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Player, Side};
use crate::config::{ArticulatedLeg, MatchConfig, RigidTorso};
use crate::{forward_axis, rotate};

/// World-space points of one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmarks {
    pub head: Vec2,
    pub foot: Vec2,
    pub hand: Vec2,
    /// Only the articulated leg has a hip and a knee
    pub hip: Option<Vec2>,
    pub knee: Option<Vec2>,
    /// Unit "up" axis of the body
    pub axis: Vec2,
}

/// Everything the geometry depends on
#[derive(Debug, Clone, Copy)]
pub struct Pose {
    pub center: Vec2,
    pub angle: f32,
    /// Bend or fold fraction in [0, 1]
    pub shape: f32,
    pub side: Side,
}

impl From<&Player> for Pose {
    fn from(p: &Player) -> Self {
        Self {
            center: p.pos,
            angle: p.angle,
            shape: p.shape,
            side: p.side,
        }
    }
}

/// Sizes shared by every body model
#[derive(Debug, Clone, Copy)]
pub struct BodyDims {
    pub head_radius: f32,
    pub hand_offset: f32,
}

impl From<&MatchConfig> for BodyDims {
    fn from(c: &MatchConfig) -> Self {
        Self {
            head_radius: c.head_radius,
            hand_offset: c.hand_offset,
        }
    }
}

/// Geometry strategy for a body model
pub trait BodyKinematics {
    /// Place the landmarks for a pose. Pure.
    fn landmarks(&self, pose: &Pose, dims: &BodyDims) -> Landmarks;

    /// Center-to-foot distance of an upright, undeformed body
    fn stand_height(&self) -> f32;
}

/// Head sits slightly past the top of the torso line
fn head_at(center: Vec2, axis: Vec2, half_len: f32, dims: &BodyDims) -> Vec2 {
    center + axis * (half_len + dims.head_radius * 0.4)
}

impl BodyKinematics for RigidTorso {
    fn landmarks(&self, pose: &Pose, dims: &BodyDims) -> Landmarks {
        let axis = forward_axis(pose.angle);
        let half = (self.body_length - self.bend_max * pose.shape) * 0.5;

        Landmarks {
            head: head_at(pose.center, axis, half, dims),
            foot: pose.center - axis * half,
            hand: pose.center + axis * dims.hand_offset,
            hip: None,
            knee: None,
            axis,
        }
    }

    fn stand_height(&self) -> f32 {
        self.body_length * 0.5
    }
}

impl BodyKinematics for ArticulatedLeg {
    fn landmarks(&self, pose: &Pose, dims: &BodyDims) -> Landmarks {
        let axis = forward_axis(pose.angle);
        let half_torso = self.torso_length * 0.5;
        let hip = pose.center - axis * half_torso;

        // Thigh and calf bend in opposite directions; the side picks which
        // way the knee points.
        let fold = self.fold_angle_max * pose.shape * pose.side.sign();
        let down = -axis;
        let thigh_dir = rotate(down, fold * 0.5);
        let calf_dir = rotate(down, -fold * 0.5);
        let knee = hip + thigh_dir * self.thigh_length;
        let foot = knee + calf_dir * self.calf_length;

        Landmarks {
            head: head_at(pose.center, axis, half_torso, dims),
            foot,
            hand: pose.center + axis * dims.hand_offset,
            hip: Some(hip),
            knee: Some(knee),
            axis,
        }
    }

    fn stand_height(&self) -> f32 {
        self.torso_length * 0.5 + self.thigh_length + self.calf_length
    }
}
