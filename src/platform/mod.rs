//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (button level, spinner motion)
//! - Time/ticks
//! - Storage (LocalStorage on web)

pub mod clock;
pub mod input;
pub mod storage;

pub use clock::{FixedStep, now_epoch_ms};
pub use input::{ButtonEdge, ButtonSource, Controller, InputSnapshot, SpinnerAccumulator};
