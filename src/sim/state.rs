//! Game state and core simulation types
//!
//! One `GameState` holds everything a tick reads or writes. The driver owns
//! it and lends it to `tick` and `render`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// Which of the two games is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// Endless rally against the three walls
    #[default]
    Pong,
    /// Clear the brick wall with three lives
    Breakout,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Pong => "pong",
            GameMode::Breakout => "breakout",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pong" | "1" => Some(GameMode::Pong),
            "breakout" | "bricks" | "2" => Some(GameMode::Breakout),
            _ => None,
        }
    }

    /// Display title
    pub fn title(&self) -> &'static str {
        match self {
            GameMode::Pong => "PONG",
            GameMode::Breakout => "BREAKOUT",
        }
    }

    /// Breakout plays with bricks and lives; Pong with neither
    pub fn has_bricks(&self) -> bool {
        matches!(self, GameMode::Breakout)
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the start button
    Ready,
    /// Ball in motion
    Playing,
    /// Lives exhausted
    GameOver,
    /// Every brick cleared
    Won,
}

impl GamePhase {
    /// GameOver and Won only leave through a reset
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Won)
    }
}

/// Things that happened during a tick, drained by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    WallHit,
    PaddleHit,
    BrickBroken { row: u8, points: u64 },
    BallLost,
    GameOver,
    Won,
}

/// The ball. Rendered as a square of side `2 * radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self::serve()
    }
}

impl Ball {
    /// Ball at court center with the serve velocity
    pub fn serve() -> Self {
        Self {
            pos: Vec2::new(COURT_WIDTH / 2.0, COURT_HEIGHT / 2.0),
            vel: Vec2::new(BALL_SERVE_DX, BALL_SERVE_DY),
            radius: BALL_RADIUS,
        }
    }

    /// Put the ball back on the serve spot (radius is left alone)
    pub fn reset(&mut self) {
        let radius = self.radius;
        *self = Self::serve();
        self.radius = radius;
    }

    /// Integrate one tick
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    /// Bounding box used for brick overlap
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(self.radius))
    }
}

/// The player's paddle. Only its horizontal center moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub x: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: COURT_WIDTH / 2.0,
        }
    }
}

impl Paddle {
    /// Lowest legal center position
    pub const MIN_X: f32 = PADDLE_HALF_WIDTH;
    /// Highest legal center position
    pub const MAX_X: f32 = COURT_WIDTH - PADDLE_HALF_WIDTH;

    /// Shift by `dx` pixels, clamped to the court
    pub fn nudge(&mut self, dx: f32) {
        self.x = (self.x + dx).clamp(Self::MIN_X, Self::MAX_X);
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x - PADDLE_HALF_WIDTH
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + PADDLE_HALF_WIDTH
    }

    /// Whether `x` falls within the paddle span (edges inclusive)
    pub fn spans(&self, x: f32) -> bool {
        x >= self.left() && x <= self.right()
    }

    /// Hit offset in [-1, 1]: -1 at the left edge, 0 at center, 1 at the right edge
    pub fn hit_offset(&self, x: f32) -> f32 {
        ((x - self.x) / PADDLE_HALF_WIDTH).clamp(-1.0, 1.0)
    }
}

/// A single brick (top-left anchored rectangle)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brick {
    pub pos: Vec2,
    /// Row index, 0 at the top
    pub row: u8,
    pub active: bool,
}

impl Brick {
    pub fn new(row: usize, col: usize) -> Self {
        let x = BRICK_LEFT + col as f32 * (BRICK_WIDTH + BRICK_GAP);
        let y = BRICK_TOP + row as f32 * (BRICK_HEIGHT + BRICK_GAP);
        Self {
            pos: Vec2::new(x, y),
            row: row as u8,
            active: true,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_rect(self.pos, Vec2::new(BRICK_WIDTH, BRICK_HEIGHT))
    }

    /// Score value: top rows are worth more
    pub fn points(&self) -> u64 {
        (BRICK_ROWS as u64 - self.row as u64) * BRICK_ROW_POINTS
    }
}

/// Fixed-size brick wall, laid out row-major from the top-left
#[derive(Debug, Clone, PartialEq)]
pub struct BrickGrid {
    bricks: [Brick; BRICK_COUNT],
}

impl Default for BrickGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl BrickGrid {
    pub fn new() -> Self {
        Self {
            bricks: std::array::from_fn(|i| Brick::new(i / BRICK_COLS, i % BRICK_COLS)),
        }
    }

    /// All bricks in fixed order, active or not
    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| b.active)
    }

    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }

    pub fn cleared_count(&self) -> usize {
        BRICK_COUNT - self.active_count()
    }

    pub fn is_cleared(&self) -> bool {
        self.bricks.iter().all(|b| !b.active)
    }

    /// Index of the first active brick (in array order) overlapping `area`
    pub fn first_overlap(&self, area: &Aabb) -> Option<usize> {
        self.bricks
            .iter()
            .position(|b| b.active && b.bounds().overlaps(area))
    }

    /// Deactivate a brick and return a copy of it as it was
    pub fn deactivate(&mut self, index: usize) -> Brick {
        let brick = self.bricks[index];
        self.bricks[index].active = false;
        brick
    }
}

/// Tunable gameplay values (derived from settings)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Paddle pixels per spinner step
    pub paddle_sensitivity: f32,
    /// dx added per unit of paddle hit offset
    pub paddle_spin: f32,
    /// Cap on |dx|
    pub max_ball_dx: f32,
    /// Breakout lives per game
    pub starting_lives: u8,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            paddle_sensitivity: PADDLE_SENSITIVITY,
            paddle_spin: PADDLE_SPIN,
            max_ball_dx: BALL_MAX_DX,
            starting_lives: STARTING_LIVES,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub mode: GameMode,
    pub phase: GamePhase,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Present only in Breakout
    pub bricks: Option<BrickGrid>,
    /// Breakout: brick points. Pong: paddle returns this rally.
    pub score: u64,
    pub lives: u8,
    /// Ticks spent in `Playing` since the last reset
    pub time_ticks: u64,
    pub tuning: Tuning,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(mode: GameMode) -> Self {
        Self::with_tuning(mode, Tuning::default())
    }

    pub fn with_tuning(mode: GameMode, tuning: Tuning) -> Self {
        Self {
            mode,
            phase: GamePhase::Ready,
            paddle: Paddle::default(),
            ball: Ball::serve(),
            bricks: mode.has_bricks().then(BrickGrid::new),
            score: 0,
            lives: tuning.starting_lives,
            time_ticks: 0,
            tuning,
            events: Vec::new(),
        }
    }

    /// Back to initial values, keeping mode and tuning
    pub fn reset(&mut self) {
        *self = Self::with_tuning(self.mode, self.tuning);
    }

    /// Bricks still standing (0 in Pong)
    pub fn bricks_remaining(&self) -> usize {
        self.bricks.as_ref().map_or(0, BrickGrid::active_count)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
