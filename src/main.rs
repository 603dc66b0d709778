//! Spinner Arcade entry point
//!
//! In the browser this wires DOM events into a `Session` and drives it from
//! `requestAnimationFrame`. Natively it runs the autopilot headless for a
//! fixed number of ticks and logs what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, MouseEvent, TouchEvent, WheelEvent};

    use spinner_arcade::audio::{AudioManager, SoundEffect};
    use spinner_arcade::platform::ButtonSource;
    use spinner_arcade::renderer::WebCanvas;
    use spinner_arcade::sim::GameMode;
    use spinner_arcade::{HostError, Session, Settings};

    const CANVAS_ID: &str = "canvas";

    /// Everything the event handlers and the frame loop share
    struct Game {
        session: Session,
        canvas: WebCanvas,
        audio: AudioManager,
        /// Last horizontal touch position, for turning drags into spinner motion
        last_touch_x: Option<f32>,
    }

    impl Game {
        fn frame(&mut self, time: f64) {
            for event in self.session.update(time) {
                self.audio.play(SoundEffect::for_event(&event));
            }
            self.session.render(&mut self.canvas);
        }

        fn toggle_mute(&mut self) {
            self.session.settings.muted = !self.session.settings.muted;
            self.session.settings.save();
            self.audio.apply_settings(&self.session.settings);
            log::info!("Muted: {}", self.session.settings.muted);
        }

        fn select_mode(&mut self, mode: GameMode) {
            if !self.session.switch_mode(mode) {
                log::info!("Finish the current game before switching");
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Spinner Arcade starting...");

        if let Err(e) = start() {
            log::error!("Startup failed: {e}");
        }
    }

    fn start() -> Result<(), HostError> {
        let settings = Settings::load();
        let canvas = WebCanvas::from_element_id(CANVAS_ID)?;
        let audio = AudioManager::new(&settings);
        log::info!("Loaded settings, mode: {}", settings.mode.title());

        let game = Rc::new(RefCell::new(Game {
            session: Session::new(settings),
            canvas,
            audio,
            last_touch_x: None,
        }));

        setup_keyboard(game.clone())?;
        setup_pointer(game.clone());
        setup_touch(game.clone());
        setup_auto_suspend(game.clone())?;

        request_animation_frame(game);

        log::info!("Spinner Arcade running!");
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> Result<(), HostError> {
        let window = web_sys::window().ok_or(HostError::NoWindow)?;

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                let repeat = event.repeat();
                match event.key().as_str() {
                    " " | "Enter" | "a" | "A" => {
                        event.prevent_default();
                        if !repeat {
                            g.session.controller.button_down(ButtonSource::Keyboard);
                        }
                    }
                    "ArrowLeft" => {
                        event.prevent_default();
                        g.session.controller.spin_left(true);
                    }
                    "ArrowRight" => {
                        event.prevent_default();
                        g.session.controller.spin_right(true);
                    }
                    "," => g.session.controller.spin_steps(-1),
                    "." => g.session.controller.spin_steps(1),
                    "p" | "P" if !repeat => {
                        g.session.toggle_autopilot();
                    }
                    "m" | "M" if !repeat => g.toggle_mute(),
                    "1" => g.select_mode(GameMode::Pong),
                    "2" => g.select_mode(GameMode::Breakout),
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "Enter" | "a" | "A" => {
                        g.session.controller.button_up(ButtonSource::Keyboard)
                    }
                    "ArrowLeft" => g.session.controller.spin_left(false),
                    "ArrowRight" => g.session.controller.spin_right(false),
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_pointer(game: Rc<RefCell<Game>>) {
        let canvas = game.borrow().canvas.element().clone();

        // Mouse move: horizontal motion turns the spinner
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .session
                    .controller
                    .mouse_motion(event.movement_x() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Wheel
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: WheelEvent| {
                event.prevent_default();
                let delta = if event.delta_x() != 0.0 {
                    event.delta_x()
                } else {
                    event.delta_y()
                };
                game.borrow_mut().session.controller.wheel(delta as f32);
            });
            let _ =
                canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down: button, and capture the pointer so motion keeps coming
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                {
                    let mut g = game.borrow_mut();
                    g.audio.resume();
                    g.session.controller.button_down(ButtonSource::Mouse);
                }
                canvas_clone.request_pointer_lock();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up: on the window, so a release outside the canvas still lands
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut()
                    .session
                    .controller
                    .button_up(ButtonSource::Mouse);
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch(game: Rc<RefCell<Game>>) {
        let canvas = game.borrow().canvas.element().clone();

        // Touch start (button)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.session.controller.button_down(ButtonSource::Touch);
                g.last_touch_x = event.touches().get(0).map(|t| t.client_x() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move: drag distance turns the spinner
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let Some(touch) = event.touches().get(0) else {
                    return;
                };
                let x = touch.client_x() as f32;
                let mut g = game.borrow_mut();
                if let Some(last) = g.last_touch_x {
                    g.session.controller.mouse_motion(x - last);
                }
                g.last_touch_x = Some(x);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end and cancel both release
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            event.prevent_default();
            let mut g = game.borrow_mut();
            g.session.controller.button_up(ButtonSource::Touch);
            g.last_touch_x = None;
        });
        for name in ["touchend", "touchcancel"] {
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    fn setup_auto_suspend(game: Rc<RefCell<Game>>) -> Result<(), HostError> {
        let window = web_sys::window().ok_or(HostError::NoWindow)?;
        let document = window.document().ok_or(HostError::NoDocument)?;

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().session.suspend();
                    log::info!("Suspended (tab hidden)");
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.session.suspend();
                g.audio.set_blurred(true);
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window focus
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_blurred(false);
            });
            window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("{}", HostError::NoWindow);
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {}", HostError::from(e));
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use spinner_arcade::consts::TICK_HZ;
    use spinner_arcade::renderer::RecordingCanvas;
    use spinner_arcade::sim::{GameEvent, GameMode};
    use spinner_arcade::{Session, Settings};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mode = match args.next() {
        Some(name) => match GameMode::from_str(&name) {
            Some(mode) => mode,
            None => {
                eprintln!("Unknown game '{name}' (expected pong or breakout)");
                std::process::exit(2);
            }
        },
        None => GameMode::Pong,
    };
    let ticks: u64 = match args.next() {
        Some(n) => match n.parse() {
            Ok(n) => n,
            Err(e) => {
                eprintln!("Invalid tick count '{n}': {e}");
                std::process::exit(2);
            }
        },
        None => u64::from(TICK_HZ) * 60,
    };

    log::info!("Spinner Arcade (native) running {} for {ticks} ticks", mode.title());

    let settings = Settings {
        mode,
        ..Default::default()
    };
    let mut session = Session::new(settings);
    session.toggle_autopilot();

    let mut paddle_hits = 0u64;
    let mut bricks = 0u64;
    let mut balls_lost = 0u64;
    for _ in 0..ticks {
        for event in session.step() {
            match event {
                GameEvent::PaddleHit => paddle_hits += 1,
                GameEvent::BrickBroken { .. } => bricks += 1,
                GameEvent::BallLost => balls_lost += 1,
                GameEvent::GameOver | GameEvent::Won => {
                    log::info!("{:?} at tick {}", session.state.phase, session.state.time_ticks);
                }
                _ => {}
            }
        }
    }

    let mut canvas = RecordingCanvas::new();
    session.render(&mut canvas);

    println!("{} after {ticks} ticks", mode.title());
    println!("  phase:        {:?}", session.state.phase);
    println!("  score:        {}", session.state.score);
    println!("  paddle hits:  {paddle_hits}");
    println!("  balls lost:   {balls_lost}");
    if mode.has_bricks() {
        println!("  bricks:       {bricks} broken, {} left", session.state.bricks_remaining());
        println!("  lives:        {}", session.state.lives);
    }
    println!("  draw calls:   {}", canvas.frame().len());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
