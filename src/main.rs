//! Brick Breaker entry point
//!
//! On the web: creates the canvas, wires host messaging and input, and runs
//! the animation-frame loop. Natively: plays one seeded round headlessly.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, CanvasRenderingContext2d, HtmlCanvasElement, MessageEvent,
        MouseEvent, PointerEvent, TouchEvent,
    };

    use brick_breaker::consts::*;
    use brick_breaker::layout::snap_viewport_width;
    use brick_breaker::persistence::LocalStorageStore;
    use brick_breaker::platform::{ParentWindowHost, relative_x};
    use brick_breaker::renderer::canvas;
    use brick_breaker::{Engine, Tuning};

    /// Game instance holding the engine and its surface
    struct Game {
        engine: Engine<LocalStorageStore, ParentWindowHost>,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        width: u32,
        last_time: f64,
    }

    impl Game {
        /// One animation frame: step, then paint
        fn frame(&mut self, time: f64) {
            let multiplier = if self.last_time > 0.0 {
                ((time - self.last_time) / FRAME_MS) as f32
            } else {
                1.0
            };
            self.last_time = time;

            self.engine.frame(multiplier);
            let shapes = self.engine.draw_list();
            canvas::paint(
                &self.ctx,
                self.width as f64,
                VIEWPORT_HEIGHT as f64,
                &shapes,
            );
        }

        fn resize(&mut self, width: u32) {
            if width == self.width {
                return;
            }
            self.width = width;
            self.canvas.set_width(width);
            self.engine.resize(width);
        }

        /// Game-space coordinates of a client point
        fn to_game(&self, client_x: f64, client_y: f64) -> (f32, f32) {
            let rect = self.canvas.get_bounding_client_rect();
            (
                relative_x(client_x, rect.left()),
                (client_y - rect.top()) as f32,
            )
        }
    }

    fn window_width() -> u32 {
        web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|v| v.as_f64())
            .map(|w| w.max(0.0) as u32)
            .unwrap_or(REFERENCE_WIDTH as u32)
    }

    fn load_tuning(document: &web_sys::Document) -> Tuning {
        document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
            .map(|json| Tuning::from_json(&json))
            .unwrap_or_default()
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Brick Breaker starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let body = document.body().expect("no body");

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .expect("create canvas")
            .dyn_into()
            .expect("not a canvas");
        let width = snap_viewport_width(window_width());
        canvas.set_width(width);
        canvas.set_height(VIEWPORT_HEIGHT as u32);
        let _ = body.append_child(&canvas);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let touch_capable =
            js_sys::Reflect::has(&window, &JsValue::from_str("ontouchstart")).unwrap_or(false);
        let seed = js_sys::Date::now() as u64;

        let engine = Engine::new(
            width,
            touch_capable,
            seed,
            load_tuning(&document),
            LocalStorageStore,
            ParentWindowHost,
        );
        log::info!(
            "Engine initialized (width {}, {:?} input, seed {})",
            width,
            engine.input_mode(),
            seed
        );

        let game = Rc::new(RefCell::new(Game {
            engine,
            canvas: canvas.clone(),
            ctx,
            width,
            last_time: 0.0,
        }));

        setup_host_messages(game.clone());
        if touch_capable {
            setup_touch_handlers(&canvas, game.clone());
        } else {
            setup_pointer_handlers(&canvas, game.clone());
        }
        setup_overlay_click(&canvas, game.clone());
        setup_resize(game.clone());

        request_animation_frame(game);

        log::info!("Brick Breaker running!");
    }

    fn setup_host_messages(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MessageEvent| {
            let Some(json) = js_sys::JSON::stringify(&event.data())
                .ok()
                .and_then(|s| s.as_string())
            else {
                return;
            };
            game.borrow_mut().engine.receive_host_message(&json);
        });
        let _ =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_touch_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let options = AddEventListenerOptions::new();
        options.set_passive(false);

        // Touch start: overlay control, or begin drag, move paddle, launch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let (x, y) = g.to_game(touch.client_x() as f64, touch.client_y() as f64);
                    g.engine.touch_start(x, y);
                }
            });
            let _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }

        // Touch move: steer while dragging
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let (x, _) = g.to_game(touch.client_x() as f64, touch.client_y() as f64);
                    g.engine.touch_move(x);
                }
            });
            let _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
                "touchmove",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }

        // Touch end: stop dragging, paddle stays put
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().engine.touch_end();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer move: always steers
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let (x, _) = g.to_game(event.client_x() as f64, event.client_y() as f64);
                g.engine.pointer_move(x);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer down: launch only
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().engine.pointer_down();
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Retry / Play Again
    fn setup_overlay_click(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let mut g = game.borrow_mut();
            let (x, y) = g.to_game(event.client_x() as f64, event.client_y() as f64);
            g.engine.click(x, y);
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let width = snap_viewport_width(window_width());
            game.borrow_mut().resize(width);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
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

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use brick_breaker::persistence::MemoryStore;
    use brick_breaker::platform::RecordingHost;
    use brick_breaker::sim::SessionPhase;
    use brick_breaker::{Engine, Tuning};

    env_logger::init();
    log::info!("Brick Breaker (native) starting...");
    log::info!("Native mode runs a headless autoplay round - build for wasm32 to play");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024u64);
    let mut engine = Engine::new(
        756,
        false,
        seed,
        Tuning::default(),
        MemoryStore::new(),
        RecordingHost::new(),
    );

    const MAX_FRAMES: u32 = 200_000;
    let mut frames = 0;
    while frames < MAX_FRAMES {
        let state = engine.state();
        if matches!(state.phase, SessionPhase::Won | SessionPhase::Lost) {
            break;
        }
        // Track the ball with a drifting offset so rallies reach every column
        let drift = (frames as f32 * 0.013).sin() * state.paddle.width * 0.4;
        let target = state.ball.pos.x + drift;
        engine.pointer_move(target);
        engine.pointer_down();
        engine.frame(1.0);
        frames += 1;
    }

    let state = engine.state();
    println!(
        "{:?} after {} frames: {} lives, {} bricks left, {}",
        state.phase,
        frames,
        state.lives,
        state.bricks_remaining(),
        engine.stats().summary()
    );
    if let Some(message) = engine.host().last() {
        log::info!("Would post to host: {:?}", message.to_json());
    }
}
