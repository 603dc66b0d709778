//! Stateless draw pass
//!
//! Reads the game state and paints one frame. Nothing here mutates the
//! simulation.

use super::{Canvas, TextAlign};
use crate::consts::*;
use crate::palette;
use crate::sim::{GameMode, GamePhase, GameState};

const FONT_TITLE: &str = "16px monospace";
const FONT_PROMPT: &str = "12px monospace";
const FONT_SMALL: &str = "10px monospace";

/// Host-side extras shown over the court
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Hud {
    /// Best stored score for the current game
    pub best_score: Option<u64>,
    /// Demo mode is steering the paddle
    pub autopilot: bool,
}

/// Draw the current state of either game
pub fn render(canvas: &mut impl Canvas, state: &GameState, hud: &Hud) {
    canvas.clear(palette::BACKGROUND);

    if let Some(bricks) = &state.bricks {
        for brick in bricks.iter_active() {
            let color = palette::BRICK_ROWS[brick.row as usize % palette::BRICK_ROWS.len()];
            canvas.fill_rect(brick.pos.x, brick.pos.y, BRICK_WIDTH, BRICK_HEIGHT, color);
        }
    }

    canvas.fill_rect(
        state.paddle.left(),
        PADDLE_Y,
        PADDLE_WIDTH,
        PADDLE_HEIGHT,
        palette::PADDLE,
    );

    let ball = &state.ball;
    canvas.fill_rect(
        ball.pos.x - ball.radius,
        ball.pos.y - ball.radius,
        ball.radius * 2.0,
        ball.radius * 2.0,
        palette::BALL,
    );

    match state.phase {
        GamePhase::Ready => draw_start_prompt(canvas, state, hud),
        GamePhase::Playing => draw_score(canvas, state),
        GamePhase::GameOver => draw_banner(canvas, state, "GAME OVER", palette::LOSE),
        GamePhase::Won => draw_banner(canvas, state, "YOU WIN!", palette::WIN),
    }

    if hud.autopilot {
        canvas.fill_text(
            "DEMO",
            COURT_WIDTH - 8.0,
            COURT_HEIGHT - 4.0,
            FONT_SMALL,
            palette::TEXT_DIM,
            TextAlign::Right,
        );
    }
}

fn centered(canvas: &mut impl Canvas, text: &str, y: f32, font: &str, color: &str) {
    canvas.fill_text(text, COURT_WIDTH / 2.0, y, font, color, TextAlign::Center);
}

fn draw_start_prompt(canvas: &mut impl Canvas, state: &GameState, hud: &Hud) {
    centered(canvas, state.mode.title(), 108.0, FONT_TITLE, palette::TEXT);
    centered(canvas, "Press A to start", 131.0, FONT_PROMPT, palette::TEXT);
    centered(
        canvas,
        "Use spinner to move paddle",
        150.0,
        FONT_SMALL,
        palette::TEXT_DIM,
    );

    // Last rally stays up until the next serve
    if state.mode == GameMode::Pong && state.score > 0 {
        let text = format!("Rally: {}", state.score);
        centered(canvas, &text, 172.0, FONT_SMALL, palette::TEXT);
    }
    if let Some(best) = hud.best_score {
        let text = format!("Best: {best}");
        centered(canvas, &text, 186.0, FONT_SMALL, palette::TEXT_DIM);
    }
}

fn draw_score(canvas: &mut impl Canvas, state: &GameState) {
    match state.mode {
        GameMode::Pong => {
            centered(
                canvas,
                &state.score.to_string(),
                20.0,
                FONT_PROMPT,
                palette::TEXT,
            );
        }
        GameMode::Breakout => {
            canvas.fill_text(
                &format!("Score: {}", state.score),
                8.0,
                16.0,
                FONT_SMALL,
                palette::TEXT,
                TextAlign::Left,
            );
            canvas.fill_text(
                &format!("Lives: {}", state.lives),
                COURT_WIDTH - 8.0,
                16.0,
                FONT_SMALL,
                palette::TEXT,
                TextAlign::Right,
            );
        }
    }
}

fn draw_banner(canvas: &mut impl Canvas, state: &GameState, title: &str, color: &str) {
    centered(canvas, title, 131.0, FONT_TITLE, color);
    let score = format!("Score: {}", state.score);
    centered(canvas, &score, 150.0, FONT_PROMPT, palette::TEXT);
    centered(
        canvas,
        "Press A to play again",
        170.0,
        FONT_SMALL,
        palette::TEXT_DIM,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, RecordingCanvas};

    #[test]
    fn test_frame_starts_with_clear() {
        let mut canvas = RecordingCanvas::new();
        render(&mut canvas, &GameState::new(GameMode::Pong), &Hud::default());
        assert_eq!(
            canvas.commands()[0],
            DrawCommand::Clear {
                color: palette::BACKGROUND.to_string()
            }
        );
    }

    #[test]
    fn test_ready_screen_prompts() {
        let mut canvas = RecordingCanvas::new();
        let hud = Hud {
            best_score: Some(42),
            autopilot: false,
        };
        render(&mut canvas, &GameState::new(GameMode::Pong), &hud);
        let texts = canvas.texts();
        assert!(texts.contains(&"PONG"));
        assert!(texts.contains(&"Press A to start"));
        assert!(texts.contains(&"Use spinner to move paddle"));
        assert!(texts.contains(&"Best: 42"));
        assert!(!texts.contains(&"DEMO"));
    }

    #[test]
    fn test_paddle_and_ball_geometry() {
        let mut canvas = RecordingCanvas::new();
        let state = GameState::new(GameMode::Pong);
        render(&mut canvas, &state, &Hud::default());

        let paddle = DrawCommand::Rect {
            x: COURT_WIDTH / 2.0 - PADDLE_HALF_WIDTH,
            y: PADDLE_Y,
            w: PADDLE_WIDTH,
            h: PADDLE_HEIGHT,
            color: palette::PADDLE.to_string(),
        };
        let ball = DrawCommand::Rect {
            x: COURT_WIDTH / 2.0 - BALL_RADIUS,
            y: COURT_HEIGHT / 2.0 - BALL_RADIUS,
            w: BALL_RADIUS * 2.0,
            h: BALL_RADIUS * 2.0,
            color: palette::BALL.to_string(),
        };
        assert!(canvas.frame().contains(&paddle));
        assert!(canvas.frame().contains(&ball));
    }

    #[test]
    fn test_only_active_bricks_drawn_by_row_color() {
        let mut canvas = RecordingCanvas::new();
        let mut state = GameState::new(GameMode::Breakout);
        if let Some(grid) = state.bricks.as_mut() {
            grid.deactivate(0);
            grid.deactivate(1);
        }
        render(&mut canvas, &state, &Hud::default());

        assert_eq!(canvas.rects_of(palette::BRICK_ROWS[0]), BRICK_COLS - 2);
        for color in &palette::BRICK_ROWS[1..] {
            assert_eq!(canvas.rects_of(color), BRICK_COLS);
        }
    }

    #[test]
    fn test_breakout_hud_while_playing() {
        let mut canvas = RecordingCanvas::new();
        let mut state = GameState::new(GameMode::Breakout);
        state.phase = GamePhase::Playing;
        state.score = 120;
        state.lives = 2;
        render(&mut canvas, &state, &Hud::default());
        let texts = canvas.texts();
        assert!(texts.contains(&"Score: 120"));
        assert!(texts.contains(&"Lives: 2"));
        assert!(!texts.contains(&"Press A to start"));
    }

    #[test]
    fn test_banners() {
        let mut canvas = RecordingCanvas::new();
        let mut state = GameState::new(GameMode::Breakout);
        state.phase = GamePhase::GameOver;
        render(&mut canvas, &state, &Hud::default());
        assert!(canvas.texts().contains(&"GAME OVER"));

        state.phase = GamePhase::Won;
        render(&mut canvas, &state, &Hud::default());
        assert!(canvas.texts().contains(&"YOU WIN!"));
        assert!(!canvas.texts().contains(&"GAME OVER"));
    }

    #[test]
    fn test_pong_rally_shown_on_ready() {
        let mut canvas = RecordingCanvas::new();
        let mut state = GameState::new(GameMode::Pong);
        state.score = 9;
        render(
            &mut canvas,
            &state,
            &Hud {
                best_score: None,
                autopilot: true,
            },
        );
        let texts = canvas.texts();
        assert!(texts.contains(&"Rally: 9"));
        assert!(texts.contains(&"DEMO"));
    }
}
