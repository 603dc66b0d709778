//! Demo-mode player
//!
//! Produces spinner input that chases the ball's predicted landing spot.
//! Used by the headless native runner and the in-browser demo toggle.

use super::state::{Ball, GamePhase, GameState};
use super::tick::TickInput;
use crate::consts::*;

/// Most spinner steps the autopilot will report in one tick
pub const MAX_STEPS_PER_TICK: i32 = 4;

/// Where the ball will cross the paddle line, folding in side-wall bounces.
/// A rising ball is tracked where it is.
pub fn predict_landing_x(ball: &Ball) -> f32 {
    if ball.vel.y <= 0.0 {
        return ball.pos.x;
    }
    let ticks = (PADDLE_Y - ball.bottom()) / ball.vel.y;
    if ticks <= 0.0 {
        return ball.pos.x;
    }

    let lo = ball.radius;
    let span = COURT_WIDTH - 2.0 * ball.radius;
    let raw = ball.pos.x + ball.vel.x * ticks - lo;
    let mut folded = raw.rem_euclid(2.0 * span);
    if folded > span {
        folded = 2.0 * span - folded;
    }
    lo + folded
}

/// Spinner delta that moves the paddle toward the landing spot.
///
/// Aims slightly off-center, swaying over time, so rallies don't settle
/// into a loop that never reaches the last bricks.
pub fn steer(state: &GameState) -> i32 {
    let time_factor = state.time_ticks as f32 * 0.013;
    let offset =
        (time_factor.sin() * 0.45 + (time_factor * 0.37).sin() * 0.15) * PADDLE_HALF_WIDTH;
    let target = predict_landing_x(&state.ball) - offset;

    let error = target - state.paddle.x;
    let steps = (error / state.tuning.paddle_sensitivity).round() as i32;
    steps.clamp(-MAX_STEPS_PER_TICK, MAX_STEPS_PER_TICK)
}

/// Full input for one tick: serve when idle, otherwise steer
pub fn drive(state: &GameState) -> TickInput {
    TickInput {
        start: state.phase == GamePhase::Ready,
        spinner_delta: if state.phase == GamePhase::Playing {
            steer(state)
        } else {
            0
        },
    }
}
