//! Input snapshot and per-tick input derivation
//!
//! The host reports a digital button level and spinner motion. Browser
//! events arrive at arbitrary times, so motion is accumulated here and
//! handed out as whole steps once per tick.

use crate::sim::TickInput;

/// Raw controller state polled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Button is currently held
    pub button: bool,
    /// Spinner steps since the previous poll
    pub spinner_delta: i32,
}

/// Turns a held button into a single press
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonEdge {
    was_down: bool,
}

impl ButtonEdge {
    /// True only on the poll where the button goes from up to down
    pub fn update(&mut self, down: bool) -> bool {
        let pressed = down && !self.was_down;
        self.was_down = down;
        pressed
    }
}

/// Collects fractional spinner motion between ticks
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinnerAccumulator {
    pending: f32,
}

impl SpinnerAccumulator {
    /// Add motion measured in steps (may be fractional, e.g. from a mouse)
    pub fn push(&mut self, steps: f32) {
        self.pending += steps;
    }

    /// Take the whole steps collected so far, keeping the remainder
    pub fn take(&mut self) -> i32 {
        let whole = self.pending.trunc();
        self.pending -= whole;
        whole as i32
    }

    /// Drop anything pending (on blur or mode change)
    pub fn clear(&mut self) {
        self.pending = 0.0;
    }
}

/// Physical inputs that can hold the button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonSource {
    Keyboard,
    Mouse,
    Touch,
}

impl ButtonSource {
    fn bit(self) -> u8 {
        match self {
            ButtonSource::Keyboard => 1,
            ButtonSource::Mouse => 1 << 1,
            ButtonSource::Touch => 1 << 2,
        }
    }
}

/// Host-side controller: feeds events in, yields one snapshot per tick
#[derive(Debug, Clone, Default)]
pub struct Controller {
    /// One bit per `ButtonSource` currently holding the button
    held: u8,
    /// A press landed since the last poll
    tapped: bool,
    spinner: SpinnerAccumulator,
    /// Arrow keys stand in for the spinner while held
    left_held: bool,
    right_held: bool,
    edge: ButtonEdge,
}

impl Controller {
    /// Mouse pixels per spinner step
    pub const MOUSE_PIXELS_PER_STEP: f32 = 2.0;
    /// Wheel delta units per spinner step
    pub const WHEEL_UNITS_PER_STEP: f32 = 20.0;
    /// Spinner steps per tick while an arrow key is held
    pub const KEY_STEPS_PER_TICK: i32 = 3;

    pub fn new() -> Self {
        Self::default()
    }

    /// A source pressed the button. Every press counts as a new start on
    /// the next poll, even if that source's last release was never seen.
    pub fn button_down(&mut self, source: ButtonSource) {
        self.held |= source.bit();
        self.tapped = true;
    }

    pub fn button_up(&mut self, source: ButtonSource) {
        self.held &= !source.bit();
    }

    /// Discrete spinner steps
    pub fn spin_steps(&mut self, steps: i32) {
        self.spinner.push(steps as f32);
    }

    /// Arrow key held or released
    pub fn spin_left(&mut self, held: bool) {
        self.left_held = held;
    }

    pub fn spin_right(&mut self, held: bool) {
        self.right_held = held;
    }

    /// Horizontal mouse motion in pixels
    pub fn mouse_motion(&mut self, dx: f32) {
        self.spinner.push(dx / Self::MOUSE_PIXELS_PER_STEP);
    }

    /// Mouse wheel delta
    pub fn wheel(&mut self, delta: f32) {
        self.spinner.push(delta / Self::WHEEL_UNITS_PER_STEP);
    }

    /// Release everything (window lost focus)
    pub fn release_all(&mut self) {
        self.held = 0;
        self.tapped = false;
        self.left_held = false;
        self.right_held = false;
        self.spinner.clear();
    }

    /// Current raw state; drains the spinner
    pub fn snapshot(&mut self) -> InputSnapshot {
        let button = self.held > 0 || self.tapped;
        self.tapped = false;
        let keys = (self.right_held as i32 - self.left_held as i32) * Self::KEY_STEPS_PER_TICK;
        InputSnapshot {
            button,
            spinner_delta: self.spinner.take() + keys,
        }
    }

    /// Snapshot reduced to what the simulation consumes
    pub fn poll(&mut self) -> TickInput {
        let pressed = self.tapped;
        let snapshot = self.snapshot();
        let rising = self.edge.update(snapshot.button);
        TickInput {
            start: rising || pressed,
            spinner_delta: snapshot.spinner_delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_fires_once_per_press() {
        let mut edge = ButtonEdge::default();
        assert!(!edge.update(false));
        assert!(edge.update(true));
        assert!(!edge.update(true));
        assert!(!edge.update(false));
        assert!(edge.update(true));
    }

    #[test]
    fn test_spinner_keeps_remainder() {
        let mut spinner = SpinnerAccumulator::default();
        spinner.push(1.5);
        assert_eq!(spinner.take(), 1);
        spinner.push(0.75);
        assert_eq!(spinner.take(), 1);
        assert_eq!(spinner.take(), 0);
        spinner.push(-2.5);
        assert_eq!(spinner.take(), -2);
    }

    #[test]
    fn test_quick_tap_is_not_lost() {
        let mut controller = Controller::new();
        controller.button_down(ButtonSource::Keyboard);
        controller.button_up(ButtonSource::Keyboard);
        let input = controller.poll();
        assert!(input.start);
        assert!(!controller.poll().start);
    }

    #[test]
    fn test_held_button_starts_once() {
        let mut controller = Controller::new();
        controller.button_down(ButtonSource::Keyboard);
        assert!(controller.poll().start);
        assert!(!controller.poll().start);
        assert!(!controller.poll().start);
        controller.button_up(ButtonSource::Keyboard);
        assert!(!controller.poll().start);
    }

    #[test]
    fn test_two_sources_hold_button() {
        let mut controller = Controller::new();
        controller.button_down(ButtonSource::Keyboard);
        controller.button_down(ButtonSource::Touch);
        controller.button_up(ButtonSource::Keyboard);
        assert!(controller.snapshot().button);
        controller.button_up(ButtonSource::Touch);
        assert!(!controller.snapshot().button);
    }

    #[test]
    fn test_lost_release_does_not_block_later_starts() {
        let mut controller = Controller::new();
        // Mouse released outside the page: no mouseup ever arrives
        controller.button_down(ButtonSource::Mouse);
        assert!(controller.poll().start);
        assert!(!controller.poll().start);

        let mut starts = 0;
        for _ in 0..5 {
            controller.button_down(ButtonSource::Mouse);
            controller.button_up(ButtonSource::Mouse);
            if controller.poll().start {
                starts += 1;
            }
        }
        assert_eq!(starts, 5);
        assert!(!controller.snapshot().button);
    }

    #[test]
    fn test_repeated_press_from_held_source_fires_again() {
        let mut controller = Controller::new();
        controller.button_down(ButtonSource::Touch);
        assert!(controller.poll().start);
        // Second touchstart without the touchend in between
        controller.button_down(ButtonSource::Touch);
        assert!(controller.poll().start);
        assert!(!controller.poll().start);
    }

    #[test]
    fn test_mouse_motion_becomes_steps() {
        let mut controller = Controller::new();
        controller.mouse_motion(5.0);
        controller.spin_steps(-1);
        assert_eq!(controller.poll().spinner_delta, 1);
        controller.mouse_motion(1.0);
        assert_eq!(controller.poll().spinner_delta, 1);
    }

    #[test]
    fn test_held_arrow_spins_every_tick() {
        let mut controller = Controller::new();
        controller.spin_right(true);
        assert_eq!(controller.poll().spinner_delta, Controller::KEY_STEPS_PER_TICK);
        assert_eq!(controller.poll().spinner_delta, Controller::KEY_STEPS_PER_TICK);
        controller.spin_left(true);
        assert_eq!(controller.poll().spinner_delta, 0);
        controller.spin_right(false);
        assert_eq!(controller.poll().spinner_delta, -Controller::KEY_STEPS_PER_TICK);
        controller.spin_left(false);
        assert_eq!(controller.poll().spinner_delta, 0);
    }

    #[test]
    fn test_release_all_clears_pending() {
        let mut controller = Controller::new();
        controller.button_down(ButtonSource::Mouse);
        controller.spin_steps(3);
        controller.spin_left(true);
        controller.release_all();
        let input = controller.poll();
        assert!(!input.start);
        assert_eq!(input.spinner_delta, 0);
    }
}
