//! Fixed-step clock
//!
//! Converts variable frame deltas from `requestAnimationFrame` into a
//! whole number of simulation ticks.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
    last_time_ms: Option<f64>,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a frame timestamp (ms) and get the number of ticks to run.
    ///
    /// The first frame runs one tick. Long stalls (tab in background) are
    /// clamped so the game doesn't fast-forward, and at most
    /// `MAX_SUBSTEPS` ticks run per frame.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_time_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_time_ms = Some(now_ms);

        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS {
            // Spiral of death: drop the backlog
            self.accumulator = 0.0;
        }
        ticks
    }

    /// Forget timing history (after a pause or tab switch)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time_ms = None;
    }
}

/// Wall-clock time in Unix milliseconds (for score timestamps)
#[cfg(target_arch = "wasm32")]
pub fn now_epoch_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_epoch_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
