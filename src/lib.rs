//! tiltbar: single-ball rigid-body sandbox (gravity, wall bounce, rotating bar)

pub mod types;
pub mod api;
pub mod error;
pub mod math;
pub mod body;
pub mod bar;
pub mod narrowphase;
pub mod world;

pub use crate::types::*;
pub use crate::api::*;
pub use crate::error::SimError;
pub use crate::body::KinematicBody;
pub use crate::bar::ControlledBar;
pub use crate::narrowphase::CollisionResolver;
pub use crate::world::Simulation;
