//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, velocities in pixels per tick
//! - Stable iteration order (bricks are tested in array order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Axis, contact_axis};
pub use state::{
    Ball, Brick, BrickGrid, GameEvent, GameMode, GamePhase, GameState, Paddle, Tuning,
};
pub use tick::{TickInput, tick};
