//! Spinner Arcade - Pong and Breakout for a spinner-and-button cabinet
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `renderer`: Canvas draw pass behind a minimal drawing trait
//! - `platform`: Input snapshot, fixed-step clock, browser storage
//! - `session`: Glue between host loop, simulation, scores and drawing
//! - `settings` / `highscores`: Persisted preferences and best scores
//! - `audio`: Web Audio sound effects driven by simulation events

pub mod audio;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{HostError, Result};
pub use highscores::HighScores;
pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Court dimensions (canvas pixels)
    pub const COURT_WIDTH: f32 = 336.0;
    pub const COURT_HEIGHT: f32 = 262.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 60.0;
    pub const PADDLE_HALF_WIDTH: f32 = PADDLE_WIDTH / 2.0;
    pub const PADDLE_HEIGHT: f32 = 8.0;
    pub const PADDLE_Y: f32 = 242.0;
    /// Pixels of paddle travel per spinner step
    pub const PADDLE_SENSITIVITY: f32 = 1.5;

    /// Ball defaults (velocities are pixels per tick)
    pub const BALL_RADIUS: f32 = 4.0;
    pub const BALL_SERVE_DX: f32 = 2.0;
    pub const BALL_SERVE_DY: f32 = -3.0;
    /// Horizontal velocity added per unit of paddle-relative hit offset
    pub const PADDLE_SPIN: f32 = 1.5;
    /// Cap on |dx| so repeated edge hits can't accelerate the ball forever
    pub const BALL_MAX_DX: f32 = 5.0;

    /// Lives at the start of a Breakout game
    pub const STARTING_LIVES: u8 = 3;

    /// Brick grid (Breakout)
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COLS: usize = 10;
    pub const BRICK_COUNT: usize = BRICK_ROWS * BRICK_COLS;
    pub const BRICK_WIDTH: f32 = 30.0;
    pub const BRICK_HEIGHT: f32 = 10.0;
    pub const BRICK_GAP: f32 = 2.0;
    pub const BRICK_TOP: f32 = 30.0;
    pub const BRICK_LEFT: f32 =
        (COURT_WIDTH - (BRICK_COLS as f32 * BRICK_WIDTH + (BRICK_COLS - 1) as f32 * BRICK_GAP))
            / 2.0;
    /// Points for a bottom-row brick; each row above adds this much again
    pub const BRICK_ROW_POINTS: u64 = 10;
}

/// Palette shared by the renderer
pub mod palette {
    pub const BACKGROUND: &str = "#1a1a2e";
    pub const PADDLE: &str = "#eee";
    pub const BALL: &str = "#fff";
    pub const TEXT: &str = "#eee";
    pub const TEXT_DIM: &str = "#888";
    pub const WIN: &str = "#4ade80";
    pub const LOSE: &str = "#f87171";

    /// Brick colors, top row first
    pub const BRICK_ROWS: [&str; crate::consts::BRICK_ROWS] =
        ["#e94560", "#f08a5d", "#f9ed69", "#6bcb77", "#4d96ff"];
}
