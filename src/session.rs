//! A running game as the host sees it
//!
//! Owns the game state plus everything around it: the controller that
//! turns raw events into tick input, the fixed-step clock, the settings and
//! the current game's high score table. The browser loop and the native
//! runner both drive a `Session`.

use crate::highscores::HighScores;
use crate::platform::{Controller, FixedStep, now_epoch_ms};
use crate::renderer::{Canvas, Hud, render};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameMode, GamePhase, GameState, TickInput, autopilot, tick};

pub struct Session {
    pub state: GameState,
    pub settings: Settings,
    pub controller: Controller,
    clock: FixedStep,
    high_scores: HighScores,
    autopilot: bool,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        let mode = settings.mode;
        Self {
            state: GameState::with_tuning(mode, settings.tuning()),
            high_scores: HighScores::load(mode),
            settings,
            controller: Controller::new(),
            clock: FixedStep::new(),
            autopilot: false,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Change game. Refused mid-rally; returns whether the switch happened.
    pub fn switch_mode(&mut self, mode: GameMode) -> bool {
        if self.state.phase == GamePhase::Playing {
            return false;
        }
        if mode == self.state.mode {
            return true;
        }
        self.state = GameState::with_tuning(mode, self.settings.tuning());
        self.high_scores = HighScores::load(mode);
        self.settings.mode = mode;
        self.settings.save();
        log::info!("Switched to {}", mode.title());
        true
    }

    pub fn toggle_autopilot(&mut self) -> bool {
        self.autopilot = !self.autopilot;
        log::info!("Autopilot: {}", self.autopilot);
        self.autopilot
    }

    /// Run however many ticks the frame timestamp calls for
    pub fn update(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let ticks = self.clock.advance(now_ms);
        let mut events = Vec::new();
        for _ in 0..ticks {
            events.extend(self.step());
        }
        events
    }

    /// Exactly one tick
    pub fn step(&mut self) -> Vec<GameEvent> {
        let mut input = self.controller.poll();
        if self.autopilot {
            let auto = autopilot::drive(&self.state);
            input = TickInput {
                start: input.start || auto.start,
                spinner_delta: auto.spinner_delta,
            };
        }

        tick(&mut self.state, &input);

        let events = self.state.drain_events();
        for event in &events {
            self.record(event);
        }
        events
    }

    /// Enter finished rallies and games into the table (not in demo mode)
    fn record(&mut self, event: &GameEvent) {
        if self.autopilot {
            return;
        }
        let finished = match event {
            GameEvent::GameOver | GameEvent::Won => true,
            GameEvent::BallLost => self.state.mode == GameMode::Pong,
            _ => false,
        };
        if !finished {
            return;
        }
        if let Some(rank) = self.high_scores.add_score(self.state.score, now_epoch_ms()) {
            log::info!("New high score #{rank}: {}", self.state.score);
            self.high_scores.save(self.state.mode);
        }
    }

    pub fn hud(&self) -> Hud {
        Hud {
            best_score: self.high_scores.top_score(),
            autopilot: self.autopilot,
        }
    }

    pub fn render(&self, canvas: &mut impl Canvas) {
        render(canvas, &self.state, &self.hud());
    }

    /// Drop held input and timing history (tab hidden, window blurred)
    pub fn suspend(&mut self) {
        self.controller.release_all();
        self.clock.reset();
    }
}
