//! Fixed timestep simulation tick
//!
//! Advances the game by one frame. Velocities are in pixels per tick, so
//! there is no `dt`: the driver calls this at `TICK_HZ`.

use super::collision::{Axis, contact_axis};
use super::state::{GameEvent, GameMode, GamePhase, GameState};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Start button went down since the last tick (edge, not level)
    pub start: bool,
    /// Spinner steps since the last tick (negative = left)
    pub spinner_delta: i32,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Ready => {
            if input.start {
                // A Pong rally score stays on screen until the next serve
                if state.mode == GameMode::Pong {
                    state.score = 0;
                }
                state.phase = GamePhase::Playing;
                state.push_event(GameEvent::Started);
                log::info!("{} started", state.mode.title());
            }
        }
        GamePhase::GameOver | GamePhase::Won => {
            if input.start {
                state.reset();
                state.phase = GamePhase::Playing;
                state.push_event(GameEvent::Started);
                log::info!("{} restarted", state.mode.title());
            }
        }
        GamePhase::Playing => step(state, input),
    }
}

/// Physics for one `Playing` tick
fn step(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    let sensitivity = state.tuning.paddle_sensitivity;
    state.paddle.nudge(input.spinner_delta as f32 * sensitivity);

    state.ball.advance();

    if bounce_walls(state) {
        state.push_event(GameEvent::WallHit);
    }
    if bounce_paddle(state) {
        if state.mode == GameMode::Pong {
            state.score += 1;
        }
        state.push_event(GameEvent::PaddleHit);
    }

    if let Some(event) = break_brick(state) {
        state.push_event(event);
        if state.bricks.as_ref().is_some_and(|b| b.is_cleared()) {
            state.phase = GamePhase::Won;
            state.push_event(GameEvent::Won);
            log::info!("Board cleared with score {}", state.score);
            return;
        }
    }

    if state.ball.pos.y > COURT_HEIGHT {
        lose_ball(state);
    }
}

/// Reflect off the side walls and ceiling. Only flips a component that is
/// heading into the surface, so a ball still overlapping a wall on the
/// next tick can't flip back.
fn bounce_walls(state: &mut GameState) -> bool {
    let ball = &mut state.ball;
    let r = ball.radius;
    let mut hit = false;

    if ball.pos.x <= r && ball.vel.x < 0.0 {
        ball.vel.x = -ball.vel.x;
        hit = true;
    } else if ball.pos.x >= COURT_WIDTH - r && ball.vel.x > 0.0 {
        ball.vel.x = -ball.vel.x;
        hit = true;
    }

    if ball.pos.y <= r && ball.vel.y < 0.0 {
        ball.vel.y = -ball.vel.y;
        hit = true;
    }

    hit
}

/// Send the ball back up with spin from the hit offset
fn bounce_paddle(state: &mut GameState) -> bool {
    let tuning = state.tuning;
    let paddle = state.paddle;
    let ball = &mut state.ball;

    let in_band = ball.bottom() >= PADDLE_Y && ball.top() <= PADDLE_Y + PADDLE_HEIGHT;
    if !in_band || !paddle.spans(ball.pos.x) || ball.vel.y <= 0.0 {
        return false;
    }

    ball.vel.y = -ball.vel.y.abs();
    let spin = paddle.hit_offset(ball.pos.x) * tuning.paddle_spin;
    ball.vel.x = (ball.vel.x + spin).clamp(-tuning.max_ball_dx, tuning.max_ball_dx);
    log::trace!("paddle hit, vel now {:?}", ball.vel);
    true
}

/// Knock out at most one brick per tick
fn break_brick(state: &mut GameState) -> Option<GameEvent> {
    let bricks = state.bricks.as_mut()?;
    let ball_box = state.ball.bounds();
    let index = bricks.first_overlap(&ball_box)?;
    let brick = bricks.deactivate(index);

    match contact_axis(&ball_box, &brick.bounds()) {
        Axis::X => state.ball.vel.x = -state.ball.vel.x,
        Axis::Y => state.ball.vel.y = -state.ball.vel.y,
    }

    let points = brick.points();
    state.score += points;
    log::debug!("brick {index} (row {}) broken for {points}", brick.row);
    Some(GameEvent::BrickBroken {
        row: brick.row,
        points,
    })
}

/// Ball fell past the paddle
fn lose_ball(state: &mut GameState) {
    state.ball.reset();

    match state.mode {
        GameMode::Pong => {
            state.phase = GamePhase::Ready;
            state.push_event(GameEvent::BallLost);
            log::info!("Rally over after {} returns", state.score);
        }
        GameMode::Breakout => {
            state.lives = state.lives.saturating_sub(1);
            if state.lives == 0 {
                state.phase = GamePhase::GameOver;
                state.push_event(GameEvent::GameOver);
                log::info!("Game over with score {}", state.score);
            } else {
                state.push_event(GameEvent::BallLost);
                log::info!("Ball lost, {} lives left", state.lives);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Ball, BrickGrid};
    use glam::Vec2;

    const START: TickInput = TickInput {
        start: true,
        spinner_delta: 0,
    };
    const IDLE: TickInput = TickInput {
        start: false,
        spinner_delta: 0,
    };

    fn playing(mode: GameMode) -> GameState {
        let mut state = GameState::new(mode);
        tick(&mut state, &START);
        state.drain_events();
        state
    }

    fn place_ball(state: &mut GameState, x: f32, y: f32, dx: f32, dy: f32) {
        state.ball.pos = Vec2::new(x, y);
        state.ball.vel = Vec2::new(dx, dy);
    }

    #[test]
    fn test_ready_waits_for_start() {
        let mut state = GameState::new(GameMode::Pong);
        let before = state.ball;
        tick(
            &mut state,
            &TickInput {
                start: false,
                spinner_delta: 10,
            },
        );
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.ball, before);
        assert_eq!(state.paddle.x, COURT_WIDTH / 2.0);

        tick(&mut state, &START);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.drain_events(), vec![GameEvent::Started]);
    }

    #[test]
    fn test_ball_integrates_velocity() {
        let mut state = playing(GameMode::Pong);
        tick(&mut state, &IDLE);
        assert_eq!(
            state.ball.pos,
            Vec2::new(COURT_WIDTH / 2.0 + 2.0, COURT_HEIGHT / 2.0 - 3.0)
        );
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_spinner_moves_paddle() {
        let mut state = playing(GameMode::Pong);
        tick(
            &mut state,
            &TickInput {
                start: false,
                spinner_delta: 4,
            },
        );
        assert_eq!(state.paddle.x, COURT_WIDTH / 2.0 + 6.0);
    }

    #[test]
    fn test_left_wall_flips_dx() {
        let mut state = playing(GameMode::Pong);
        place_ball(&mut state, 5.0, 100.0, -2.0, 1.0);
        tick(&mut state, &IDLE);
        assert_eq!(state.ball.vel.x, 2.0);
        assert_eq!(state.ball.vel.y, 1.0);
        assert!(state.drain_events().contains(&GameEvent::WallHit));

        // Still inside the wall zone but moving away: no second flip
        tick(&mut state, &IDLE);
        assert_eq!(state.ball.vel.x, 2.0);
    }

    #[test]
    fn test_right_wall_flips_dx() {
        let mut state = playing(GameMode::Pong);
        place_ball(&mut state, COURT_WIDTH - 5.0, 100.0, 2.0, 1.0);
        tick(&mut state, &IDLE);
        assert_eq!(state.ball.vel.x, -2.0);
    }

    #[test]
    fn test_ceiling_flips_dy() {
        let mut state = playing(GameMode::Pong);
        place_ball(&mut state, 100.0, 6.0, 1.0, -3.0);
        tick(&mut state, &IDLE);
        assert_eq!(state.ball.vel.y, 3.0);
        assert_eq!(state.ball.vel.x, 1.0);
    }

    #[test]
    fn test_center_paddle_hit_reflects_without_spin() {
        let mut state = playing(GameMode::Pong);
        let x = state.paddle.x;
        place_ball(&mut state, x, PADDLE_Y - 6.0, 0.0, 3.0);
        tick(&mut state, &IDLE);
        assert_eq!(state.ball.vel, Vec2::new(0.0, -3.0));
        assert_eq!(state.score, 1);
        assert!(state.drain_events().contains(&GameEvent::PaddleHit));
    }

    #[test]
    fn test_edge_paddle_hit_adds_spin() {
        let mut state = playing(GameMode::Pong);
        let x = state.paddle.x + PADDLE_HALF_WIDTH;
        // Arrives exactly on the right edge after one tick
        place_ball(&mut state, x, PADDLE_Y - 6.0, 0.0, 3.0);
        tick(&mut state, &IDLE);
        assert_eq!(state.ball.vel.x, PADDLE_SPIN);
        assert_eq!(state.ball.vel.y, -3.0);
    }

    #[test]
    fn test_spin_is_clamped() {
        let mut state = playing(GameMode::Pong);
        let x = state.paddle.x + PADDLE_HALF_WIDTH - 1.0;
        place_ball(&mut state, x, PADDLE_Y - 6.0, 4.8, 3.0);
        state.ball.pos.x -= 4.8;
        tick(&mut state, &IDLE);
        assert_eq!(state.ball.vel.x, BALL_MAX_DX);
    }

    #[test]
    fn test_paddle_spin_applies_once_per_contact() {
        let mut state = playing(GameMode::Pong);
        let x = state.paddle.x + 15.0;
        place_ball(&mut state, x, PADDLE_Y - 4.0, 0.0, 3.0);
        tick(&mut state, &IDLE);
        let after_hit = state.ball.vel;
        // Ball is still inside the paddle band but now moving up
        tick(&mut state, &IDLE);
        assert_eq!(state.ball.vel, after_hit);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_ball_misses_paddle() {
        let mut state = playing(GameMode::Pong);
        place_ball(&mut state, 10.0, PADDLE_Y - 6.0, 0.0, 3.0);
        state.paddle.x = COURT_WIDTH - PADDLE_HALF_WIDTH;
        tick(&mut state, &IDLE);
        assert_eq!(state.ball.vel.y, 3.0);
    }

    #[test]
    fn test_pong_ball_loss_returns_to_ready() {
        let mut state = playing(GameMode::Pong);
        state.score = 7;
        place_ball(&mut state, 10.0, COURT_HEIGHT - 1.0, 0.0, 3.0);
        tick(&mut state, &IDLE);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.ball, Ball::serve());
        // Rally score shown until the next serve
        assert_eq!(state.score, 7);
        assert_eq!(state.drain_events(), vec![GameEvent::BallLost]);

        tick(&mut state, &START);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_breakout_ball_loss_costs_a_life() {
        let mut state = playing(GameMode::Breakout);
        place_ball(&mut state, 10.0, COURT_HEIGHT - 1.0, 0.0, 3.0);
        tick(&mut state, &IDLE);
        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ball, Ball::serve());
    }

    #[test]
    fn test_breakout_last_life_ends_game() {
        let mut state = playing(GameMode::Breakout);
        state.lives = 1;
        state.score = 90;
        place_ball(&mut state, 10.0, COURT_HEIGHT - 1.0, 0.0, 3.0);
        tick(&mut state, &IDLE);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives, 0);
        assert!(state.drain_events().contains(&GameEvent::GameOver));

        // Terminal: physics frozen until restart
        let ball = state.ball;
        tick(
            &mut state,
            &TickInput {
                start: false,
                spinner_delta: 20,
            },
        );
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.ball, ball);
        assert_eq!(state.score, 90);
    }

    #[test]
    fn test_brick_hit_from_below() {
        let mut state = playing(GameMode::Breakout);
        let brick = state.bricks.as_ref().unwrap().bricks()[BRICK_COLS * 4 + 2];
        let b = brick.bounds();
        let x = b.center().x;
        // Ball under the bottom row, moving up into it
        place_ball(&mut state, x, b.max.y + 5.0, 0.0, -3.0);
        tick(&mut state, &IDLE);

        assert_eq!(state.ball.vel.y, 3.0);
        assert_eq!(state.score, 10);
        assert_eq!(state.bricks_remaining(), BRICK_COUNT - 1);
        assert!(!state.bricks.as_ref().unwrap().bricks()[BRICK_COLS * 4 + 2].active);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::BrickBroken { row: 4, points: 10 })
        );
    }

    #[test]
    fn test_brick_hit_from_side() {
        let mut state = playing(GameMode::Breakout);
        let index = BRICK_COLS * 4 + 2;
        // Clear the right-hand neighbour so only the target's face is in reach
        state.bricks.as_mut().unwrap().deactivate(index + 1);
        let b = state.bricks.as_ref().unwrap().bricks()[index].bounds();
        let before = state.bricks_remaining();

        // Just off the right face at mid-height, drifting left
        let y = b.center().y;
        place_ball(&mut state, b.max.x + BALL_RADIUS + 2.0, y, -3.0, 1.0);
        tick(&mut state, &IDLE);

        assert_eq!(state.ball.vel.x, 3.0);
        assert_eq!(state.ball.vel.y, 1.0);
        assert_eq!(state.score, 10);
        assert_eq!(state.bricks_remaining(), before - 1);
        assert!(!state.bricks.as_ref().unwrap().bricks()[index].active);
    }

    #[test]
    fn test_only_one_brick_per_tick() {
        let mut state = playing(GameMode::Breakout);
        // Straddle two adjacent bricks in the bottom row
        let left = state.bricks.as_ref().unwrap().bricks()[BRICK_COLS * 4].bounds();
        let x = left.max.x + BRICK_GAP / 2.0;
        place_ball(&mut state, x, left.max.y + 5.0, 0.0, -3.0);
        tick(&mut state, &IDLE);
        assert_eq!(state.bricks_remaining(), BRICK_COUNT - 1);
        // Array order decides: the left one goes first
        assert!(!state.bricks.as_ref().unwrap().bricks()[BRICK_COLS * 4].active);
        assert!(state.bricks.as_ref().unwrap().bricks()[BRICK_COLS * 4 + 1].active);
    }

    #[test]
    fn test_last_brick_wins() {
        let mut state = playing(GameMode::Breakout);
        let mut grid = BrickGrid::new();
        for i in 1..BRICK_COUNT {
            grid.deactivate(i);
        }
        let b = grid.bricks()[0].bounds();
        state.bricks = Some(grid);
        place_ball(&mut state, b.center().x, b.max.y + 5.0, 0.0, -3.0);
        tick(&mut state, &IDLE);

        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.score, 50);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Won));
        assert!(!events.contains(&GameEvent::GameOver));
    }

    #[test]
    fn test_restart_from_won_resets_everything() {
        let mut state = playing(GameMode::Breakout);
        state.phase = GamePhase::Won;
        state.score = 1500;
        state.lives = 1;
        state.paddle.x = 50.0;
        state.bricks.as_mut().unwrap().deactivate(0);

        tick(&mut state, &START);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.paddle.x, COURT_WIDTH / 2.0);
        assert_eq!(state.bricks_remaining(), BRICK_COUNT);
        assert_eq!(state.ball, Ball::serve());
    }
}
