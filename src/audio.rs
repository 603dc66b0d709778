//! Audio system using Web Audio API
//!
//! Procedurally generated blips - no external files needed. The mapping from
//! simulation events to sounds is plain Rust; only the player needs a
//! browser.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball served
    Start,
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits wall or ceiling
    WallHit,
    /// Brick broken; pitch rises toward the top row
    BrickBreak { row: u8 },
    /// Ball fell past the paddle
    BallLost,
    /// Lives exhausted
    GameOver,
    /// Board cleared
    Win,
}

impl SoundEffect {
    pub fn for_event(event: &GameEvent) -> Self {
        match *event {
            GameEvent::Started => SoundEffect::Start,
            GameEvent::WallHit => SoundEffect::WallHit,
            GameEvent::PaddleHit => SoundEffect::PaddleHit,
            GameEvent::BrickBroken { row, .. } => SoundEffect::BrickBreak { row },
            GameEvent::BallLost => SoundEffect::BallLost,
            GameEvent::GameOver => SoundEffect::GameOver,
            GameEvent::Won => SoundEffect::Win,
        }
    }

    /// Base pitch for a brick row (row 0 is the top)
    pub fn brick_frequency(row: u8) -> f32 {
        let rows_from_bottom = (crate::consts::BRICK_ROWS as u8).saturating_sub(row + 1);
        440.0 * 2f32.powf(rows_from_bottom as f32 * 3.0 / 12.0)
    }
}

#[cfg(target_arch = "wasm32")]
pub use player::AudioManager;

#[cfg(target_arch = "wasm32")]
mod player {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
        blurred: bool,
        mute_on_blur: bool,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_sfx_volume(),
                blurred: false,
                mute_on_blur: settings.mute_on_blur,
            }
        }

        /// Pick up volume changes
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_sfx_volume();
            self.mute_on_blur = settings.mute_on_blur;
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Window focus changed
        pub fn set_blurred(&mut self, blurred: bool) {
            self.blurred = blurred;
        }

        fn effective_volume(&self) -> f32 {
            if self.blurred && self.mute_on_blur {
                0.0
            } else {
                self.volume
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Browsers start the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Start => self.play_start(ctx, vol),
                SoundEffect::PaddleHit => self.play_paddle_hit(ctx, vol),
                SoundEffect::WallHit => self.play_wall_hit(ctx, vol),
                SoundEffect::BrickBreak { row } => {
                    self.play_brick(ctx, vol, SoundEffect::brick_frequency(row))
                }
                SoundEffect::BallLost => self.play_ball_lost(ctx, vol),
                SoundEffect::GameOver => self.play_sequence(
                    ctx,
                    vol,
                    &[400.0, 350.0, 300.0, 200.0],
                    0.2,
                    OscillatorType::Sine,
                ),
                SoundEffect::Win => self.play_sequence(
                    ctx,
                    vol,
                    &[400.0, 500.0, 600.0, 800.0],
                    0.1,
                    OscillatorType::Triangle,
                ),
            }
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Serve - short rising chirp
        fn play_start(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.frequency().set_value_at_time(200.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(600.0, t + 0.15)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.25).ok();
        }

        /// Paddle hit - solid thump
        fn play_paddle_hit(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.frequency().set_value_at_time(220.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(110.0, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.12).ok();
        }

        /// Wall hit - higher ping
        fn play_wall_hit(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.06)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.08).ok();
        }

        /// Brick - pitched blip
        fn play_brick(&self, ctx: &AudioContext, vol: f32, freq: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.09)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Ball lost - falling tone
        fn play_ball_lost(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(60.0, t + 0.5)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.6).ok();
        }

        /// Short note sequence (fanfare or dirge)
        fn play_sequence(
            &self,
            ctx: &AudioContext,
            vol: f32,
            notes: &[f32],
            spacing: f64,
            osc_type: OscillatorType,
        ) {
            for (i, freq) in notes.iter().enumerate() {
                let delay = i as f64 * spacing;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, osc_type) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + spacing * 1.5)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + spacing * 2.0).ok();
                }
            }
        }
    }
}
