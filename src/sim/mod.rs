//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied time steps, clamped to a maximum
//! - Seeded RNG only
//! - Fixed player order (0 then 1)
//! - No rendering or platform dependencies

pub mod charge;
pub mod collision;
pub mod constraint;
pub mod integrate;
pub mod kinematics;
pub mod round;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use charge::{ChargeTuning, ReleasePolicy, update_charge};
pub use collision::{Arena, HeadContact, head_contact, resolve_foot};
pub use constraint::solve_rigid_pair;
pub use integrate::{Integration, integrate};
pub use kinematics::{BodyDims, BodyKinematics, Landmarks, Pose};
pub use snapshot::{MatchSnapshot, PlayerView};
pub use state::{ChargeState, MatchEvent, MatchPhase, MatchState, PairConstraint, Player, Side};
pub use tick::{InputEvent, tick};
